//! Password validation and hashing.
//!
//! `ValidatedPassword` wraps a string that satisfies the password length rules.
//! `PasswordHash` converts a `ValidatedPassword` into a salted and hashed password.

use std::fmt::Display;

use bcrypt::{BcryptError, hash, verify};
use serde::{Deserialize, Serialize};

use crate::Error;

/// The minimum number of characters in a password.
pub const MIN_PASSWORD_LENGTH: usize = 6;
/// The maximum number of characters in a password.
pub const MAX_PASSWORD_LENGTH: usize = 72;
/// The most bytes bcrypt will hash, anything after this would be ignored.
const MAX_PASSWORD_BYTES: usize = 72;

/// A password that has been validated, but not yet hashed.
///
/// This struct can be used to construct a [PasswordHash].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedPassword(String);

impl ValidatedPassword {
    /// Create and validate a new password from a string.
    ///
    /// # Errors
    ///
    /// Returns [Error::PasswordTooShort] or [Error::PasswordTooLong] if the
    /// number of characters in `raw_password_string` is outside of
    /// [MIN_PASSWORD_LENGTH] and [MAX_PASSWORD_LENGTH]. A password within the
    /// character limit is still too long if it takes more than 72 bytes in
    /// UTF-8, e.g. 40 accented letters.
    pub fn new(raw_password_string: &str) -> Result<Self, Error> {
        let length = raw_password_string.chars().count();

        if length < MIN_PASSWORD_LENGTH {
            Err(Error::PasswordTooShort(MIN_PASSWORD_LENGTH))
        } else if length > MAX_PASSWORD_LENGTH
            || raw_password_string.len() > MAX_PASSWORD_BYTES
        {
            Err(Error::PasswordTooLong(MAX_PASSWORD_LENGTH))
        } else {
            Ok(Self(raw_password_string.to_string()))
        }
    }

    /// Create a new `ValidatedPassword` without any validation.
    ///
    /// The caller should ensure that `raw_password_string` is a valid password.
    pub fn new_unchecked(raw_password_string: &str) -> Self {
        Self(raw_password_string.to_string())
    }
}

impl Display for ValidatedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", str::repeat("*", 8))
    }
}

/// A salted and hashed password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// An alias for the default encryption cost for hashing passwords.
    pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

    /// Create a hashed password from a validated password with the specified `cost`.
    ///
    /// `cost` increases the rounds of hashing and therefore the time needed to verify a password.
    /// Pass in [PasswordHash::DEFAULT_COST] to use the recommended cost.
    ///
    /// # Errors
    ///
    /// Returns [Error::PasswordTooLong] if the password is longer than bcrypt
    /// can hash, which can only happen for passwords made with
    /// [ValidatedPassword::new_unchecked]. Other hashing failures give
    /// [Error::HashingError].
    pub fn new(password: ValidatedPassword, cost: u32) -> Result<Self, Error> {
        if password.0.len() > MAX_PASSWORD_BYTES {
            return Err(Error::PasswordTooLong(MAX_PASSWORD_LENGTH));
        }

        hash(&password.0, cost)
            .map(Self)
            .map_err(|error| Error::HashingError(error.to_string()))
    }

    /// Create a new `PasswordHash` without any validation.
    ///
    /// The caller should ensure that `raw_password_hash` is a valid password hash.
    pub fn new_unchecked(raw_password_hash: &str) -> Self {
        Self(raw_password_hash.to_string())
    }

    /// Validate and hash a raw password string in one step.
    pub fn from_raw_password(raw_password: &str, cost: u32) -> Result<Self, Error> {
        let validated_password = ValidatedPassword::new(raw_password)?;
        PasswordHash::new(validated_password, cost)
    }

    /// Check that `raw_password` matches the stored password.
    pub fn verify(&self, raw_password: &str) -> Result<bool, BcryptError> {
        verify(raw_password, &self.0)
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod validated_password_tests {
    use crate::{Error, auth::ValidatedPassword};

    use super::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

    #[test]
    fn new_fails_on_empty() {
        let result = ValidatedPassword::new("");

        assert_eq!(result, Err(Error::PasswordTooShort(MIN_PASSWORD_LENGTH)));
    }

    #[test]
    fn new_fails_on_short_password() {
        let result = ValidatedPassword::new("abc");

        assert_eq!(result, Err(Error::PasswordTooShort(MIN_PASSWORD_LENGTH)));
    }

    #[test]
    fn new_accepts_boundary_lengths() {
        assert!(ValidatedPassword::new(&"a".repeat(MIN_PASSWORD_LENGTH)).is_ok());
        assert!(ValidatedPassword::new(&"a".repeat(MAX_PASSWORD_LENGTH)).is_ok());
    }

    #[test]
    fn new_fails_on_long_password() {
        let result = ValidatedPassword::new(&"a".repeat(MAX_PASSWORD_LENGTH + 1));

        assert_eq!(result, Err(Error::PasswordTooLong(MAX_PASSWORD_LENGTH)));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // Six characters, twelve bytes.
        assert!(ValidatedPassword::new("éééééé").is_ok());
    }

    #[test]
    fn new_fails_when_bcrypt_would_truncate() {
        // Forty characters, but 160 bytes.
        let result = ValidatedPassword::new(&"🔑".repeat(40));

        assert_eq!(result, Err(Error::PasswordTooLong(MAX_PASSWORD_LENGTH)));
    }
}
