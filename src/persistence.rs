//! SQLite-backed storage for contact messages and newsletter subscribers.
//!
//! Every operation opens its own connection, runs a single statement inside a
//! transaction and closes the connection again. Nothing is pooled or shared
//! between requests.

mod contacts;
mod subscribers;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};

pub use contacts::Contact;
pub use subscribers::{InsertSubscriberError, Subscriber};

const CREATE_CONTACTS: &str = r"
    CREATE TABLE IF NOT EXISTS contacts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        message TEXT NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )";

const CREATE_NEWSLETTER_SUBSCRIBERS: &str = r"
    CREATE TABLE IF NOT EXISTS newsletter_subscribers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email TEXT UNIQUE NOT NULL,
        subscribed_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        is_active BOOLEAN DEFAULT 1
    )";

/// Handle on the database file
#[derive(Clone, Debug)]
pub struct Store {
    options: SqliteConnectOptions,
}

impl Store {
    pub const fn new(options: SqliteConnectOptions) -> Self {
        Self { options }
    }

    /// Open a fresh connection scoped to a single operation
    async fn connect(&self) -> sqlx::Result<SqliteConnection> {
        self.options.connect().await
    }

    /// Create both tables unless they already exist
    #[tracing::instrument(name = "Initializing database schema", skip(self))]
    pub async fn init_schema(&self) -> sqlx::Result<()> {
        let mut conn = self.connect().await?;
        let mut transaction = conn.begin().await?;
        sqlx::query(CREATE_CONTACTS)
            .execute(&mut *transaction)
            .await?;
        sqlx::query(CREATE_NEWSLETTER_SUBSCRIBERS)
            .execute(&mut *transaction)
            .await?;
        transaction.commit().await?;
        conn.close().await?;

        tracing::info!("Database initialized successfully");
        Ok(())
    }
}
