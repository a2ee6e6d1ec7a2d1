use std::io;

use innovatehive::configuration::Settings;
use innovatehive::startup::Application;
use innovatehive::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = get_subscriber("innovatehive".into(), "info".into(), io::stdout);
    init_subscriber(subscriber);

    // Retrieve settings
    let config = Settings::get_config()?;

    // Initialize the schema, then serve until stopped
    let application = Application::build(config).await?;
    tracing::info!("Listening on port {}", application.port());
    application.run_until_stopped().await?;

    Ok(())
}
