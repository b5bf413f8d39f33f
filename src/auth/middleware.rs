//! Route guards that only let signed-in users through.
//!
//! A request passes when its auth cookie holds a live token for a user that
//! still exists. The guard attaches that user's `UserID` and `Email` to the
//! request and renews the cookie on the way out. Anyone else is sent to the
//! sign-in page with a `redirect_url` pointing back to where they were.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use time::Duration;

use crate::{
    AppState, Error,
    auth::{
        User, build_log_in_redirect_url,
        cookie::{get_token_from_cookies, invalidate_auth_cookie, renew_auth_cookie},
        get_user_by_id,
        redirect::build_log_in_redirect_url_from_target,
    },
    endpoints,
    internal_server_error::InternalServerError,
    routing::get_internal_server_error_redirect,
};

/// The state needed by the auth guards.
#[derive(Debug, Clone)]
pub struct AuthState {
    /// The key used to decrypt and verify the auth cookie.
    pub cookie_key: Key,
    /// How far each request pushes back the end of the session.
    pub cookie_duration: Duration,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

/// How a guard answers a client that is not signed in.
#[derive(Debug, Clone, Copy)]
enum Rejection {
    /// A full page load, answered with a 303 redirect.
    Page,
    /// An HTMX request, answered with an `HX-Redirect` header.
    Htmx,
}

impl Rejection {
    fn sign_in(self, log_in_url: String) -> Response {
        match self {
            Rejection::Page => Redirect::to(&log_in_url).into_response(),
            // HTMX ignores HX-Redirect unless the status is 2xx.
            Rejection::Htmx => (HxRedirect(log_in_url), StatusCode::OK).into_response(),
        }
    }

    fn server_error(self) -> Response {
        match self {
            Rejection::Page => InternalServerError::default().into_response(),
            Rejection::Htmx => get_internal_server_error_redirect(),
        }
    }
}

/// The sign-in URL for `request`, falling back to one that returns to the dashboard.
fn log_in_url_for(request: &Request) -> String {
    build_log_in_redirect_url(request).unwrap_or_else(|| {
        tracing::warn!(
            "No usable redirect target for {}. Falling back to dashboard.",
            request.uri().path()
        );

        build_log_in_redirect_url_from_target(endpoints::DASHBOARD_VIEW)
            .unwrap_or_else(|| endpoints::LOG_IN_VIEW.to_owned())
    })
}

/// Find the user named by the auth cookie in `jar`.
///
/// # Errors
///
/// Returns [Error::CookieMissing] or [Error::InvalidToken] for a missing or
/// dead session, [Error::NotFound] if the user no longer exists, and
/// [Error::DatabaseLockError] or [Error::SqlError] if the lookup fails.
fn signed_in_user(
    jar: &PrivateCookieJar,
    db_connection: &Mutex<Connection>,
) -> Result<User, Error> {
    let token = get_token_from_cookies(jar)?;
    let connection = db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_user_by_id(token.user_id, &connection)
}

async fn guard(
    state: AuthState,
    mut request: Request,
    next: Next,
    rejection: Rejection,
) -> Response {
    let jar = PrivateCookieJar::from_headers(request.headers(), state.cookie_key.clone());

    let user = match signed_in_user(&jar, &state.db_connection) {
        Ok(user) => user,
        Err(error @ (Error::DatabaseLockError | Error::SqlError(_))) => {
            tracing::error!("Could not check session: {error}");
            return rejection.server_error();
        }
        Err(Error::CookieMissing) => return rejection.sign_in(log_in_url_for(&request)),
        Err(error) => {
            tracing::debug!("Rejected session: {error}");
            let response = rejection.sign_in(log_in_url_for(&request));
            return (invalidate_auth_cookie(jar), response).into_response();
        }
    };

    request.extensions_mut().insert(user.id);
    request.extensions_mut().insert(user.email);
    let response = next.run(request).await;

    match renew_auth_cookie(jar, state.cookie_duration) {
        Ok(jar) => (jar, response).into_response(),
        Err(error) => {
            tracing::error!("Could not renew auth cookie: {error}");
            response
        }
    }
}

/// Guard for pages: signed-out clients are redirected to the sign-in page.
///
/// Handlers behind the guard can take `Extension<UserID>` and `Extension<Email>`.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    guard(state, request, next, Rejection::Page).await
}

/// Guard for HTMX endpoints: signed-out clients get an `HX-Redirect` to the
/// sign-in page that returns them to the page they were on.
///
/// Handlers behind the guard can take `Extension<UserID>` and `Extension<Email>`.
pub async fn auth_guard_hx(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    guard(state, request, next, Rejection::Htmx).await
}
