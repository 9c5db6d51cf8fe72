//! Clan API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p clan-api
//! ```
//!
//! Configuration is loaded from the environment (and `.env`).

use clan_common::{try_init_tracing_with_config, AppConfig, Environment, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    // APP_ENV picks the log format before the rest of the config is read
    let env = std::env::var("APP_ENV")
        .ok()
        .and_then(|v| v.parse::<Environment>().ok())
        .unwrap_or(Environment::Development);

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    info!("Starting Clan API Server...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        address = %config.api.address(),
        admins = config.admins.discord_ids.len(),
        "Configuration loaded"
    );

    clan_api::run(config).await?;

    Ok(())
}
