//! Middleware for logging requests and responses.

use axum::{
    body::Body,
    extract::Request,
    http::{Method, StatusCode, header::CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Form fields whose values must never be written to the logs.
const REDACTED_FIELDS: [&str; 2] = ["password", "confirm_password"];

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
/// Password fields in submitted forms are redacted.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_text = match read_body_text(body).await {
        Ok(text) => text,
        Err(error) => {
            tracing::error!("could not read request body: {error}");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    let is_form = parts
        .headers
        .get(CONTENT_TYPE)
        .is_some_and(|content_type| content_type == FORM_CONTENT_TYPE);

    if parts.method == Method::POST && is_form {
        log_request(&parts, &redact_form_fields(&body_text, &REDACTED_FIELDS));
    } else {
        log_request(&parts, &body_text);
    }

    let request = Request::from_parts(parts, body_text.into());
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_text = match read_body_text(body).await {
        Ok(text) => text,
        Err(error) => {
            tracing::error!("could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    log_response(&parts, &body_text);

    Response::from_parts(parts, body_text.into())
}

async fn read_body_text(body: Body) -> Result<String, axum::Error> {
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await?;

    Ok(String::from_utf8_lossy(&body_bytes).into_owned())
}

/// Replace the values of `field_names` in the URL encoded `form_text`.
fn redact_form_fields(form_text: &str, field_names: &[&str]) -> String {
    form_text
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((name, _)) if field_names.contains(&name) => format!("{name}=********"),
            _ => pair.to_owned(),
        })
        .collect::<Vec<_>>()
        .join("&")
}

const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// The longest prefix of `body` that is at most [LOG_BODY_LENGTH_LIMIT] bytes
/// and ends on a character boundary.
fn truncate_body(body: &str) -> &str {
    let mut end = LOG_BODY_LENGTH_LIMIT.min(body.len());

    while !body.is_char_boundary(end) {
        end -= 1;
    }

    &body[..end]
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {parts:#?}\nbody: {:}...",
            truncate_body(body)
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!("Received request: {parts:#?}\nbody: {body:?}");
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {parts:#?}\nbody: {:}...",
            truncate_body(body)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {parts:#?}\nbody: {body:?}");
    }
}

#[cfg(test)]
mod tests {
    use axum::{Form, Router, middleware, routing::post};
    use axum_test::TestServer;
    use serde::Deserialize;

    use super::{LOG_BODY_LENGTH_LIMIT, logging_middleware, redact_form_fields, truncate_body};

    #[test]
    fn redacts_password_fields() {
        let form = "email=a%40b.co&password=hunter2&confirm_password=hunter2&remember_me=on";

        let redacted = redact_form_fields(form, &["password", "confirm_password"]);

        assert_eq!(
            redacted,
            "email=a%40b.co&password=********&confirm_password=********&remember_me=on"
        );
    }

    #[test]
    fn leaves_other_fields_alone() {
        let form = "amount=12.30&category=password";

        assert_eq!(redact_form_fields(form, &["password"]), form);
    }

    #[test]
    fn truncates_on_char_boundary() {
        let body = "é".repeat(LOG_BODY_LENGTH_LIMIT);

        let truncated = truncate_body(&body);

        assert!(truncated.len() <= LOG_BODY_LENGTH_LIMIT);
        assert!(truncated.chars().all(|c| c == 'é'));
    }

    #[derive(Deserialize)]
    struct EchoForm {
        password: String,
    }

    async fn echo(Form(form): Form<EchoForm>) -> String {
        form.password
    }

    #[tokio::test]
    async fn passes_request_body_through() {
        let app = Router::new()
            .route("/echo", post(echo))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::try_new(app).expect("Could not create test server.");

        let response = server
            .post("/echo")
            .form(&[("password", "hunter2")])
            .await;

        response.assert_status_ok();
        response.assert_text("hunter2");
    }
}
