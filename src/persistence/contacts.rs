use chrono::{DateTime, Utc};
use sqlx::Connection;

use crate::domain::NewContact;
use crate::persistence::Store;

/// Stored contact form submission
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, sqlx::FromRow)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Store {
    /// Insert a contact submission and return its id
    #[tracing::instrument(name = "Saving new contact in the database", skip_all)]
    pub async fn insert_contact(&self, contact: &NewContact) -> sqlx::Result<i64> {
        let mut conn = self.connect().await?;
        let mut transaction = conn.begin().await?;

        let id = sqlx::query(
            r"
            INSERT INTO contacts (name, email, message, created_at)
            VALUES (?, ?, ?, ?)
            ",
        )
        .bind(contact.name.as_ref())
        .bind(contact.email.as_ref())
        .bind(contact.message.as_ref())
        .bind(Utc::now())
        .execute(&mut *transaction)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {e:?}");
            e
        })?
        .last_insert_rowid();

        transaction.commit().await?;
        conn.close().await?;
        Ok(id)
    }

    /// List every contact, newest first
    #[tracing::instrument(name = "Listing contacts", skip(self))]
    pub async fn list_contacts(&self) -> sqlx::Result<Vec<Contact>> {
        let mut conn = self.connect().await?;
        let mut transaction = conn.begin().await?;

        let contacts = sqlx::query_as::<_, Contact>(
            r"
            SELECT id, name, email, message, created_at
            FROM contacts
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(&mut *transaction)
        .await?;

        transaction.commit().await?;
        conn.close().await?;
        Ok(contacts)
    }
}
