use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use serde_json::Value;

use crate::domain::{EmailAddress, NewSubscriber, ValidationError};
use crate::persistence::{InsertSubscriberError, Store, Subscriber};
use crate::routes::helpers::{parse_json_body, present, text_field, Created, ErrorBody, ListError};
use crate::utils::error_chain_fmt;

/// Newsletter signup JSON body
#[derive(serde::Deserialize)]
pub struct SubscriptionPayload {
    #[serde(default, deserialize_with = "present")]
    email: Option<Value>,
}

impl TryFrom<SubscriptionPayload> for NewSubscriber {
    type Error = SubscribeError;

    fn try_from(value: SubscriptionPayload) -> Result<Self, Self::Error> {
        let email = value.email.ok_or(ValidationError::EmailRequired)?;
        let email = text_field("email", email)?;
        let email = EmailAddress::parse(email.as_deref())?;
        Ok(Self { email })
    }
}

/// Newsletter subscription error
#[derive(thiserror::Error)]
pub enum SubscribeError {
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    #[error("This email is already subscribed")]
    AlreadySubscribed,
    #[error("Internal server error. Please try again later.")]
    UnexpectedError(#[from] anyhow::Error),
}

impl fmt::Debug for SubscribeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SubscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) | Self::AlreadySubscribed => StatusCode::BAD_REQUEST,
            Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::new(self.to_string()))
    }
}

/// Newsletter subscription handler
#[tracing::instrument(
    name = "Adding a new newsletter subscriber",
    skip(body, store),
    fields(subscriber_id = tracing::field::Empty)
)]
pub async fn subscribe(
    body: web::Bytes,
    store: web::Data<Store>,
) -> Result<HttpResponse, SubscribeError> {
    // Parse and validate the request before touching the database
    let payload = parse_json_body::<SubscriptionPayload>(&body)
        .context("Failed to parse the subscription body as JSON")?;
    let new_subscriber: NewSubscriber = payload.ok_or(ValidationError::EmailRequired)?.try_into()?;

    // Store the subscriber, a duplicate email is an expected outcome
    let subscriber_id = match store.insert_subscriber(&new_subscriber).await {
        Ok(id) => id,
        Err(InsertSubscriberError::Duplicate) => return Err(SubscribeError::AlreadySubscribed),
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context("Failed to insert a new subscriber in the database")
                .into());
        }
    };
    tracing::Span::current().record("subscriber_id", subscriber_id);

    tracing::info!(
        "New newsletter subscriber (ID: {subscriber_id}): {}",
        new_subscriber.email
    );

    Ok(HttpResponse::Ok().json(Created {
        success: true,
        message: "Successfully subscribed to newsletter!",
        id: subscriber_id,
    }))
}

/// Subscribers listing body
#[derive(serde::Serialize)]
struct SubscriberList {
    success: bool,
    count: usize,
    subscribers: Vec<Subscriber>,
}

/// List active newsletter subscribers, newest first
#[tracing::instrument(name = "Listing active subscribers", skip(store))]
pub async fn list_subscribers(store: web::Data<Store>) -> Result<HttpResponse, ListError> {
    let subscribers = store
        .list_active_subscribers()
        .await
        .context("Failed to fetch subscribers from the database")?;

    Ok(HttpResponse::Ok().json(SubscriberList {
        success: true,
        count: subscribers.len(),
        subscribers,
    }))
}
