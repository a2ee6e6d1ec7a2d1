use crate::domain::EmailAddress;

/// Validated newsletter subscription request
pub struct NewSubscriber {
    pub email: EmailAddress,
}
