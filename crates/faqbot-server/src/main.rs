//! faqbot server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), layers
//! `FAQBOT_*` environment variables over it, and serves the chatbot API
//! under `/api` from an in-memory session store.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use faqbot_server::{ServerConfig, app, spawn_sweeper};
use faqbot_store_memory::MemoryStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "FAQ chatbot server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("FAQBOT"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store = Arc::new(MemoryStore::new());
  let sweeper = spawn_sweeper(
    store.clone(),
    server_cfg.session_ttl(),
    server_cfg.sweep_interval(),
  );

  let app = app(store, &server_cfg);
  let address = server_cfg.address();

  tracing::info!(
    ttl_secs = server_cfg.session_ttl_secs,
    "Listening on http://{address}"
  );
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(async {
      let _ = tokio::signal::ctrl_c().await;
      tracing::info!("shutting down");
    })
    .await
    .context("server error")?;

  sweeper.abort();
  Ok(())
}
