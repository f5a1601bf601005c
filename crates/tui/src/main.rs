mod app;
mod client;
mod config;
mod error;
mod rates;
mod ui;

use std::{fs::OpenOptions, sync::Mutex};

use crate::{config::AppConfig, error::Result};

/// The terminal is owned by the UI, so logs go to a file.
fn init_tracing(config: &AppConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "cambio_tui={level},engine={level}",
            level = config.log_level
        ))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    init_tracing(&config)?;
    tracing::info!(base_url = %config.base_url, "starting dashboard");

    let mut app = app::App::new(config)?;
    app.run().await?;
    Ok(())
}
