//! Newsletter sign-up address.

use core::fmt;

/// Why a sign-up address was refused.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("no address given")]
    Blank,
    #[error("address is longer than {0} characters")]
    TooLong(usize),
    #[error("address contains whitespace")]
    Whitespace,
    #[error("address needs exactly one @")]
    AtSign,
    #[error("nothing before the @")]
    NoMailbox,
    #[error("domain {0:?} is not a mail host")]
    BadDomain(String),
}

/// A sign-up address, trimmed and lowercased.
///
/// Accepts what a browser's `type="email"` field would submit, plus a dot
/// in the domain: `fan@localhost` is refused since no one subscribes from
/// there.
///
/// ```
/// use sole_store_core::Email;
///
/// let email = Email::parse("  Fan@Example.COM ").unwrap();
/// assert_eq!(email.as_str(), "fan@example.com");
/// assert_eq!(email.domain(), "example.com");
///
/// assert!(Email::parse("fan@localhost").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Longest address a mail server has to accept.
    pub const MAX_LENGTH: usize = 254;

    /// Normalize and validate a submitted address.
    ///
    /// # Errors
    ///
    /// Returns the first rule the trimmed input breaks.
    pub fn parse(input: &str) -> Result<Self, EmailError> {
        let address = input.trim().to_lowercase();

        if address.is_empty() {
            return Err(EmailError::Blank);
        }
        if address.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong(Self::MAX_LENGTH));
        }
        if address.chars().any(char::is_whitespace) {
            return Err(EmailError::Whitespace);
        }

        let Some((mailbox, domain)) = address.split_once('@') else {
            return Err(EmailError::AtSign);
        };
        if domain.contains('@') {
            return Err(EmailError::AtSign);
        }
        if mailbox.is_empty() {
            return Err(EmailError::NoMailbox);
        }
        if !domain.contains('.') || domain.split('.').any(str::is_empty) {
            return Err(EmailError::BadDomain(domain.to_string()));
        }

        Ok(Self(address))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Host part, after the `@`.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map_or("", |(_, domain)| domain)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
