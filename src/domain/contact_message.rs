use crate::domain::ValidationError;
use crate::validation::sanitize_input;

/// Minimum message length, counted in chars after sanitization
const MIN_MESSAGE_CHARS: usize = 10;

/// Body of a contact form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage(String);

impl ContactMessage {
    /// Sanitize and parse a contact message
    pub fn parse(message: Option<&str>) -> Result<Self, ValidationError> {
        let message = sanitize_input(message);
        if message.chars().count() < MIN_MESSAGE_CHARS {
            Err(ValidationError::MessageTooShort)
        } else {
            Ok(Self(message))
        }
    }

    /// First `chars` characters of the message, for log lines
    pub fn preview(&self, chars: usize) -> &str {
        self.0
            .char_indices()
            .nth(chars)
            .map_or(self.0.as_str(), |(end, _)| &self.0[..end])
    }
}

impl AsRef<str> for ContactMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
