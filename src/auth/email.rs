//! Email addresses used to identify users.

use std::fmt::Display;

use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

use crate::Error;

/// The maximum number of characters in an email address.
pub const MAX_EMAIL_LENGTH: usize = 255;

/// A well-formed, lowercase email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Create and validate an email address.
    ///
    /// Surrounding whitespace is removed and the address is lowercased so
    /// that "Foo@Example.com " and "foo@example.com" refer to the same user.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidEmail] if `raw_email` is not of the form
    /// `local@domain.tld` or is longer than [MAX_EMAIL_LENGTH] characters.
    pub fn new(raw_email: &str) -> Result<Self, Error> {
        let email = raw_email.trim().to_lowercase();

        if email.chars().count() > MAX_EMAIL_LENGTH {
            return Err(Error::InvalidEmail);
        }

        let parsed = EmailAddress::parse_with_options(
            &email,
            email_address::Options::default().without_display_text(),
        )
        .map_err(|_| Error::InvalidEmail)?;

        let domain = parsed.domain();
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(Error::InvalidEmail);
        }

        Ok(Self(email))
    }

    /// Create a new `Email` without any validation.
    ///
    /// The caller should ensure that `raw_email` is a correctly formatted email address.
    /// For emails coming from the user, use [Email::new] instead.
    pub fn new_unchecked(raw_email: &str) -> Self {
        Self(raw_email.to_owned())
    }

    /// The email address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod email_tests {
    use crate::Error;

    use super::{Email, MAX_EMAIL_LENGTH};

    #[test]
    fn create_email_success() {
        let email = Email::new("foo@bar.baz").unwrap();

        assert_eq!(email.as_str(), "foo@bar.baz");
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        let email = Email::new("  Foo@Bar.BAZ ").unwrap();

        assert_eq!(email.as_str(), "foo@bar.baz");
    }

    #[test]
    fn create_email_fails_with_no_at_symbol() {
        assert_eq!(Email::new("foobar.baz"), Err(Error::InvalidEmail));
    }

    #[test]
    fn create_email_fails_with_empty_string() {
        assert_eq!(Email::new(""), Err(Error::InvalidEmail));
    }

    #[test]
    fn create_email_fails_without_dot_in_domain() {
        assert_eq!(Email::new("foo@localhost"), Err(Error::InvalidEmail));
    }

    #[test]
    fn create_email_fails_with_whitespace_inside() {
        assert_eq!(Email::new("foo bar@baz.com"), Err(Error::InvalidEmail));
    }

    #[test]
    fn create_email_fails_when_too_long() {
        let local_part = "a".repeat(MAX_EMAIL_LENGTH);

        assert_eq!(
            Email::new(&format!("{local_part}@example.com")),
            Err(Error::InvalidEmail)
        );
    }
}
