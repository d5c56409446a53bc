//! ChatApp web server
//!
//! Entry point: load configuration, set up logging, serve.

use std::sync::Arc;

use anyhow::Context;
use mimalloc::MiMalloc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use chatapp_web::config::{AppConfig, LogFormat};
use chatapp_web::server::start_server;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present) before config reads the environment
    let _ = dotenvy::dotenv();

    let config = AppConfig::load().context("Configuration error")?;
    init_tracing(config.log.format)?;

    start_server(Arc::new(config)).await
}

/// Initialize tracing (M-LOG-STRUCTURED)
fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(fmt::layer().with_target(true)).try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true))
            .try_init()?,
    }
    Ok(())
}
