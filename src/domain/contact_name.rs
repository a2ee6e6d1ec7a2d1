use crate::domain::ValidationError;
use crate::validation::sanitize_input;

/// Minimum contact name length, counted in chars after sanitization
const MIN_NAME_CHARS: usize = 2;

/// Contact name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactName(String);

impl ContactName {
    /// Sanitize and parse a contact name
    pub fn parse(name: Option<&str>) -> Result<Self, ValidationError> {
        let name = sanitize_input(name);
        if name.chars().count() < MIN_NAME_CHARS {
            Err(ValidationError::NameTooShort)
        } else {
            Ok(Self(name))
        }
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
