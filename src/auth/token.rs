//! The session token carried, JSON encoded, in the private auth cookie.
//!
//! A token names the signed-in user and the instant the session ends. The
//! expiry is stored as a Unix timestamp so a session lasts the same wall-clock
//! time whatever timezone the server is configured for.

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{Error, auth::UserID};

/// Identifies the signed-in user until `expires_at`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Token {
    pub user_id: UserID,

    #[serde(with = "time::serde::timestamp")]
    pub expires_at: OffsetDateTime,
}

impl Token {
    /// Start a session for `user_id` that ends `lifetime` from now.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidToken] if the expiry does not fit in a date time.
    pub fn issue(user_id: UserID, lifetime: Duration) -> Result<Self, Error> {
        Ok(Self {
            user_id,
            expires_at: expiry_from_now(lifetime)?,
        })
    }

    /// Whether the session has ended at `now`.
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        self.expires_at <= now
    }

    /// Push the expiry out to at least `lifetime` from now.
    ///
    /// A token that already outlives `lifetime`, e.g. one issued with
    /// "remember me", keeps its expiry.
    pub fn renew(self, lifetime: Duration) -> Result<Self, Error> {
        let expires_at = self.expires_at.max(expiry_from_now(lifetime)?);

        Ok(Self { expires_at, ..self })
    }

    /// Serialize the token for storing in a cookie.
    pub fn encode(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(|error| Error::InvalidToken(error.to_string()))
    }

    /// Read a token from a cookie value, rejecting tokens that have expired.
    pub fn decode(value: &str) -> Result<Self, Error> {
        let token: Token =
            serde_json::from_str(value).map_err(|error| Error::InvalidToken(error.to_string()))?;

        if token.is_expired_at(OffsetDateTime::now_utc()) {
            return Err(Error::InvalidToken("token has expired".to_owned()));
        }

        Ok(token)
    }
}

fn expiry_from_now(lifetime: Duration) -> Result<OffsetDateTime, Error> {
    OffsetDateTime::now_utc()
        .checked_add(lifetime)
        .ok_or_else(|| Error::InvalidToken("token expiry overflowed".to_owned()))
}
