mod contact_message;
mod contact_name;
mod email_address;
mod new_contact;
mod new_subscriber;

pub use contact_message::ContactMessage;
pub use contact_name::ContactName;
pub use email_address::EmailAddress;
pub use new_contact::NewContact;
pub use new_subscriber::NewSubscriber;

/// Reasons a submitted record can be rejected before reaching the store
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Email is required")]
    EmailRequired,
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Message must be at least 10 characters")]
    MessageTooShort,
}
