//! Reading and writing the auth cookie.
//!
//! The auth cookie holds a JSON encoded [Token] and is stored in a private
//! (encrypted and signed) cookie jar.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::{
    Error,
    auth::{Token, UserID},
};

/// The name of the cookie holding the auth token.
pub(crate) const COOKIE_TOKEN: &str = "token";
/// How long a session lasts without activity, unless "remember me" was ticked.
pub(crate) const DEFAULT_COOKIE_DURATION: Duration = Duration::minutes(5);

/// Sign `user_id` in for `duration` by adding an auth cookie to `jar`.
///
/// # Errors
///
/// Returns [Error::InvalidToken] if the token cannot be created or serialized.
pub(crate) fn set_auth_cookie(
    jar: PrivateCookieJar,
    user_id: UserID,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let token = Token::issue(user_id, duration)?;

    store_token(jar, &token)
}

fn store_token(jar: PrivateCookieJar, token: &Token) -> Result<PrivateCookieJar, Error> {
    let mut cookie = auth_cookie(token.encode()?);
    cookie.set_expires(token.expires_at);

    Ok(jar.add(cookie))
}

fn auth_cookie(value: String) -> Cookie<'static> {
    Cookie::build((COOKIE_TOKEN, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(true)
        .build()
}

/// Replace the auth cookie with one the browser drops straight away.
pub(crate) fn invalidate_auth_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    let mut cookie = auth_cookie("deleted".to_owned());
    cookie.set_expires(OffsetDateTime::UNIX_EPOCH);
    cookie.set_max_age(Duration::ZERO);

    jar.add(cookie)
}

/// Keep the session in `jar` alive for at least `duration` from now.
///
/// # Errors
///
/// The cookie jar is not modified if an error is returned.
///
/// Returns:
/// - [Error::CookieMissing] if the auth cookie is not in the cookie jar.
/// - [Error::InvalidToken] if the token is unreadable or has expired.
pub(crate) fn renew_auth_cookie(
    jar: PrivateCookieJar,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let token = get_token_from_cookies(&jar)?.renew(duration)?;

    store_token(jar, &token)
}

/// Read the live auth token from `jar`.
///
/// # Errors
///
/// Returns:
/// - [Error::CookieMissing] if there is no auth cookie in `jar`.
/// - [Error::InvalidToken] if the cookie does not hold a valid token or the
///   token has expired.
pub(crate) fn get_token_from_cookies(jar: &PrivateCookieJar) -> Result<Token, Error> {
    let cookie = jar.get(COOKIE_TOKEN).ok_or(Error::CookieMissing)?;

    Token::decode(cookie.value_trimmed())
}

#[cfg(test)]
mod cookie_tests {
    use axum_extra::extract::{
        PrivateCookieJar,
        cookie::{Cookie, Key, SameSite},
    };
    use sha2::{Digest, Sha512};
    use time::{Duration, OffsetDateTime};

    use crate::{
        Error,
        auth::{
            UserID,
            cookie::{COOKIE_TOKEN, DEFAULT_COOKIE_DURATION, get_token_from_cookies},
        },
    };

    use super::{invalidate_auth_cookie, renew_auth_cookie, set_auth_cookie};

    fn get_jar() -> PrivateCookieJar {
        let hash = Sha512::digest(b"foobar");
        let key = Key::from(&hash);

        PrivateCookieJar::new(key)
    }

    /// Test helper macro to assert that two date times are within one second
    /// of each other. Used instead of a function so that the file and line
    /// number of the caller is included in the error message instead of the
    /// helper.
    macro_rules! assert_date_time_close {
        ($left:expr, $right:expr) => {
            assert!(
                ($left - $right).abs() < Duration::seconds(1),
                "got date time {:?}, want {:?}",
                $left,
                $right
            );
        };
    }

    #[test]
    fn can_set_cookie() {
        let user_id = UserID::new(1);

        let jar = set_auth_cookie(get_jar(), user_id, DEFAULT_COOKIE_DURATION).unwrap();
        let token = get_token_from_cookies(&jar).unwrap();
        let cookie = jar.get(COOKIE_TOKEN).unwrap();

        let want = OffsetDateTime::now_utc() + DEFAULT_COOKIE_DURATION;
        assert_eq!(token.user_id, user_id);
        assert_date_time_close!(token.expires_at, want);
        assert_date_time_close!(cookie.expires_datetime().unwrap(), want);
    }

    #[test]
    fn cookie_is_private_and_strict() {
        let jar = set_auth_cookie(get_jar(), UserID::new(1), DEFAULT_COOKIE_DURATION).unwrap();
        let cookie = jar.get(COOKIE_TOKEN).unwrap();

        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn missing_cookie_is_an_error() {
        assert_eq!(get_token_from_cookies(&get_jar()), Err(Error::CookieMissing));
    }

    #[test]
    fn garbage_cookie_is_an_error() {
        let jar = get_jar().add(Cookie::new(COOKIE_TOKEN, "FOOBAR"));

        assert!(matches!(
            get_token_from_cookies(&jar),
            Err(Error::InvalidToken(_))
        ));
    }

    #[test]
    fn expired_token_is_an_error() {
        let jar = set_auth_cookie(get_jar(), UserID::new(1), Duration::seconds(-10)).unwrap();

        assert!(matches!(
            get_token_from_cookies(&jar),
            Err(Error::InvalidToken(_))
        ));
    }

    #[test]
    fn renewing_moves_cookie_expiry() {
        let jar = set_auth_cookie(get_jar(), UserID::new(1), Duration::seconds(5)).unwrap();

        let jar = renew_auth_cookie(jar, Duration::minutes(10)).unwrap();
        let cookie = jar.get(COOKIE_TOKEN).unwrap();

        assert_date_time_close!(
            cookie.expires_datetime().unwrap(),
            OffsetDateTime::now_utc() + Duration::minutes(10)
        );
    }

    #[test]
    fn renewing_without_cookie_is_an_error() {
        assert_eq!(
            renew_auth_cookie(get_jar(), DEFAULT_COOKIE_DURATION).err(),
            Some(Error::CookieMissing)
        );
    }

    #[test]
    fn invalidate_auth_cookie_succeeds() {
        let jar = set_auth_cookie(get_jar(), UserID::new(1), DEFAULT_COOKIE_DURATION).unwrap();

        let jar = invalidate_auth_cookie(jar);
        let cookie = jar.get(COOKIE_TOKEN).unwrap();

        assert_eq!(cookie.value(), "deleted");
        assert_eq!(cookie.expires_datetime(), Some(OffsetDateTime::UNIX_EPOCH));
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert!(get_token_from_cookies(&jar).is_err());
    }
}
