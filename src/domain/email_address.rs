use std::fmt;

use crate::domain::ValidationError;
use crate::validation::{sanitize_input, validate_email};

/// Syntactically valid email address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Sanitize and parse an email address
    pub fn parse(email: Option<&str>) -> Result<Self, ValidationError> {
        let email = sanitize_input(email);
        if validate_email(&email) {
            Ok(Self(email))
        } else {
            Err(ValidationError::InvalidEmail)
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
