// Main application entry point

use ishocon2_webapp::build_rocket;
use ishocon2_webapp::config::AppConfig;
use tracing_subscriber::prelude::*;

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.rust_log.clone()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let host = config.value("db_host")?;
    let port = config.value("db_port")?;
    let user = config.value("db_username")?;
    let database = config.value("db_database")?;
    tracing::info!(%host, %port, %user, %database, "connecting to election database");

    let _rocket = build_rocket(&config)?.launch().await?;
    Ok(())
}
