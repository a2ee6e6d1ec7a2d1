use std::{io, net};

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;
use actix_web::dev::Server;
use actix_web::http::StatusCode;
use actix_web::middleware::ErrorHandlers;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha512};
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::persistence::Store;
use crate::routes::{
    health_check, home, list_contacts, list_subscribers, not_found, render_internal_error, submit,
    subscribe,
};

/// Largest request body accepted by the JSON endpoints
pub const MAX_BODY_BYTES: usize = 256 * 1024;

/// Application
pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    /// Build an application based on settings
    pub async fn build(config: Settings) -> anyhow::Result<Self> {
        // Make sure both tables exist before serving anything
        let store = Store::new(config.database.db_options());
        store
            .init_schema()
            .await
            .context("Failed to initialize the database schema")?;

        // Run the HTTP server and return its data
        let listener = net::TcpListener::bind(format!(
            "{}:{}",
            config.application.app_host, config.application.app_port
        ))?;
        let port = listener.local_addr()?.port();
        let signing_key = session_key(config.application.secret_key.as_ref());
        let server = run_server(listener, store, signing_key)?;
        Ok(Self { server, port })
    }

    /// Get application port
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Run application until it is stopped
    pub async fn run_until_stopped(self) -> io::Result<()> {
        self.server.await
    }
}

/// Derive the session signing key from the configured secret
///
/// Secrets of any length are stretched to the 64 bytes the cookie key needs.
/// Without a secret, sessions are signed with a key that lives as long as the process.
pub fn session_key(secret: Option<&SecretString>) -> Key {
    match secret.map(|secret| secret.expose_secret()) {
        Some(secret) if !secret.is_empty() => {
            Key::from(Sha512::digest(secret.as_bytes()).as_slice())
        }
        _ => {
            tracing::warn!("No secret key configured, sessions are signed with an ephemeral key");
            Key::generate()
        }
    }
}

/// Run the HTTP server
pub fn run_server(
    listener: net::TcpListener,
    store: Store,
    signing_key: Key,
) -> io::Result<Server> {
    // Prepare data to be added the application context
    let store = web::Data::new(store);

    // Start the HTTP server
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(
                ErrorHandlers::new()
                    .handler(StatusCode::INTERNAL_SERVER_ERROR, render_internal_error),
            )
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                signing_key.clone(),
            ))
            .wrap(TracingLogger::default())
            .service(web::resource("/").route(web::get().to(home)))
            .service(web::resource("/submit").route(web::post().to(submit)))
            .service(web::resource("/newsletter").route(web::post().to(subscribe)))
            .service(web::resource("/contacts").route(web::get().to(list_contacts)))
            .service(web::resource("/subscribers").route(web::get().to(list_subscribers)))
            .service(web::resource("/health").route(web::get().to(health_check)))
            .default_service(web::to(not_found))
            .app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
            .app_data(store.clone())
    })
    .listen(listener)?
    .run())
}
