use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use serde_json::Value;

use crate::domain::{ContactMessage, ContactName, EmailAddress, NewContact, ValidationError};
use crate::persistence::{Contact, Store};
use crate::routes::helpers::{parse_json_body, present, text_field, Created, ErrorBody, ListError};
use crate::utils::error_chain_fmt;

/// Characters of the message echoed into the submission log line
const MESSAGE_PREVIEW_CHARS: usize = 50;

/// Contact form JSON body
#[derive(serde::Deserialize)]
pub struct ContactPayload {
    #[serde(default, deserialize_with = "present")]
    name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    email: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    message: Option<Value>,
}

impl TryFrom<ContactPayload> for NewContact {
    type Error = SubmitError;

    fn try_from(value: ContactPayload) -> Result<Self, Self::Error> {
        // Every key must be present, even if its value is null
        let (Some(name), Some(email), Some(message)) = (value.name, value.email, value.message)
        else {
            return Err(ValidationError::MissingFields.into());
        };

        // Read all three fields before any rule is checked
        let name = text_field("name", name)?;
        let email = text_field("email", email)?;
        let message = text_field("message", message)?;

        let name = ContactName::parse(name.as_deref())?;
        let email = EmailAddress::parse(email.as_deref())?;
        let message = ContactMessage::parse(message.as_deref())?;
        Ok(Self {
            name,
            email,
            message,
        })
    }
}

/// Contact form submission error
#[derive(thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    #[error("Internal server error. Please try again later.")]
    UnexpectedError(#[from] anyhow::Error),
}

impl fmt::Debug for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SubmitError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::new(self.to_string()))
    }
}

/// Contact form handler
#[tracing::instrument(
    name = "Handling a contact form submission",
    skip(body, store),
    fields(contact_id = tracing::field::Empty)
)]
pub async fn submit(body: web::Bytes, store: web::Data<Store>) -> Result<HttpResponse, SubmitError> {
    // Parse and validate the submission before touching the database
    let payload = parse_json_body::<ContactPayload>(&body)
        .context("Failed to parse the contact form body as JSON")?;
    let new_contact: NewContact = payload.ok_or(ValidationError::MissingFields)?.try_into()?;

    // Store the submission
    let contact_id = store
        .insert_contact(&new_contact)
        .await
        .context("Failed to insert a new contact in the database")?;
    tracing::Span::current().record("contact_id", contact_id);

    tracing::info!(
        contact_name = %new_contact.name.as_ref(),
        contact_email = %new_contact.email,
        message_preview = %new_contact.message.preview(MESSAGE_PREVIEW_CHARS),
        "New contact submission (ID: {contact_id})"
    );

    Ok(HttpResponse::Ok().json(Created {
        success: true,
        message: "Thank you for contacting us! We will get back to you soon.",
        id: contact_id,
    }))
}

/// Contacts listing body
#[derive(serde::Serialize)]
struct ContactList {
    success: bool,
    count: usize,
    contacts: Vec<Contact>,
}

/// List every contact submission, newest first
#[tracing::instrument(name = "Listing contact submissions", skip(store))]
pub async fn list_contacts(store: web::Data<Store>) -> Result<HttpResponse, ListError> {
    let contacts = store
        .list_contacts()
        .await
        .context("Failed to fetch contacts from the database")?;

    Ok(HttpResponse::Ok().json(ContactList {
        success: true,
        count: contacts.len(),
        contacts,
    }))
}
