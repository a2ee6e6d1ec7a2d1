use crate::domain::{ContactMessage, ContactName, EmailAddress};

/// Validated contact form submission
pub struct NewContact {
    pub name: ContactName,
    pub email: EmailAddress,
    pub message: ContactMessage,
}
