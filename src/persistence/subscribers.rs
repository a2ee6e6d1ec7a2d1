use std::fmt;

use chrono::{DateTime, Utc};
use sqlx::Connection;

use crate::domain::NewSubscriber;
use crate::persistence::Store;
use crate::utils::error_chain_fmt;

/// Stored newsletter subscriber
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, sqlx::FromRow)]
pub struct Subscriber {
    pub id: i64,
    pub email: String,
    pub subscribed_at: DateTime<Utc>,
    pub is_active: bool,
}

/// Outcome of a failed subscriber insert
#[derive(thiserror::Error)]
pub enum InsertSubscriberError {
    #[error("A subscriber with this email already exists")]
    Duplicate,
    #[error("Failed to store subscriber")]
    Unexpected(#[source] sqlx::Error),
}

impl fmt::Debug for InsertSubscriberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<sqlx::Error> for InsertSubscriberError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => Self::Duplicate,
            other => Self::Unexpected(other),
        }
    }
}

impl Store {
    /// Insert a subscriber and return its id
    ///
    /// The UNIQUE constraint on `email` decides races between concurrent
    /// duplicates; the loser gets [`InsertSubscriberError::Duplicate`] and the
    /// existing row is left untouched.
    #[tracing::instrument(
        name = "Saving new subscriber in the database",
        skip_all,
        fields(subscriber_email = %subscriber.email)
    )]
    pub async fn insert_subscriber(
        &self,
        subscriber: &NewSubscriber,
    ) -> Result<i64, InsertSubscriberError> {
        let mut conn = self.connect().await?;
        let mut transaction = conn.begin().await?;

        let id = sqlx::query(
            r"
            INSERT INTO newsletter_subscribers (email, subscribed_at, is_active)
            VALUES (?, ?, 1)
            ",
        )
        .bind(subscriber.email.as_ref())
        .bind(Utc::now())
        .execute(&mut *transaction)
        .await?
        .last_insert_rowid();

        transaction.commit().await?;
        conn.close().await?;
        Ok(id)
    }

    /// List active subscribers, newest first
    #[tracing::instrument(name = "Listing active subscribers", skip(self))]
    pub async fn list_active_subscribers(&self) -> sqlx::Result<Vec<Subscriber>> {
        let mut conn = self.connect().await?;
        let mut transaction = conn.begin().await?;

        let subscribers = sqlx::query_as::<_, Subscriber>(
            r"
            SELECT id, email, subscribed_at, is_active
            FROM newsletter_subscribers
            WHERE is_active = 1
            ORDER BY subscribed_at DESC, id DESC
            ",
        )
        .fetch_all(&mut *transaction)
        .await?;

        transaction.commit().await?;
        conn.close().await?;
        Ok(subscribers)
    }
}
