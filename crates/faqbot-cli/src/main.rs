//! `faqbot`: terminal chat client for the faqbot server.
//!
//! # Usage
//!
//! ```text
//! faqbot --url http://localhost:8080
//! faqbot --template tech-support
//! faqbot --import faqs.csv
//! faqbot --config ~/.config/faqbot/config.toml
//! ```

mod app;
mod client;
mod ui;

use std::{
  io,
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use client::{ApiClient, ApiConfig};
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use faqbot_codec::Format;
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;

const DEFAULT_URL: &str = "http://localhost:8080";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "faqbot", about = "Terminal client for the faqbot FAQ chatbot")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the faqbot server (default: http://localhost:8080).
  #[arg(long, env = "FAQBOT_URL")]
  url: Option<String>,

  /// Import FAQs at startup: `.csv`, `.json`, or `question|answer` lines.
  #[arg(long, value_name = "FILE")]
  import: Option<PathBuf>,

  /// Load a built-in template at startup (e.g. `tech-support`).
  #[arg(long, value_name = "SLUG")]
  template: Option<String>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

/// CLI flags override the config file, which overrides defaults.
fn api_config(args: &Args, file: &ConfigFile) -> ApiConfig {
  ApiConfig {
    base_url: args
      .url
      .clone()
      .or_else(|| (!file.url.is_empty()).then(|| file.url.clone()))
      .unwrap_or_else(|| DEFAULT_URL.to_string()),
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  let mut client = ApiClient::new(api_config(&args, &file_cfg))?;
  client
    .open_session()
    .await
    .context("opening a chat session")?;
  let mut app = App::new(client);

  let setup = prepare(&mut app, &args).await;

  // Set up the terminal.
  let run_result = match setup {
    Ok(()) => run_terminal(&mut app).await,
    Err(e) => Err(e),
  };

  // Sessions are not kept once the client exits.
  if let Err(e) = app.client.close_session().await {
    eprintln!("warning: {e:#}");
  }

  run_result
}

/// Apply `--template` and `--import`, then load the session state.
async fn prepare(app: &mut App, args: &Args) -> Result<()> {
  if let Some(slug) = &args.template {
    let report = app
      .client
      .load_template(slug)
      .await
      .with_context(|| format!("loading template {slug}"))?;
    app.note_import(&report, slug);
  }

  if let Some(path) = &args.import {
    let report = import_file(app, path).await?;
    app.note_import(&report, &path.display().to_string());
  }

  app.refresh().await
}

async fn import_file(app: &App, path: &Path) -> Result<client::ImportReport> {
  let body = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("reading {}", path.display()))?;
  app
    .client
    .import(Format::from_path(path), body)
    .await
    .with_context(|| format!("importing {}", path.display()))
}

async fn run_terminal(app: &mut App) -> Result<()> {
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Run the event loop; restore terminal even on error.
  let run_result = run_event_loop(&mut terminal, app).await;

  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event
      && !app.handle_key(key).await?
    {
      break;
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn args(argv: &[&str]) -> Args {
    Args::parse_from(std::iter::once("faqbot").chain(argv.iter().copied()))
  }

  #[test]
  fn url_precedence() {
    let file = ConfigFile {
      url: "http://from-file:1".into(),
    };

    let flagged = args(&["--url", "http://from-flag:2"]);
    assert_eq!(api_config(&flagged, &file).base_url, "http://from-flag:2");

    let bare = Args {
      url: None,
      ..args(&[])
    };
    assert_eq!(api_config(&bare, &file).base_url, "http://from-file:1");
    assert_eq!(
      api_config(&bare, &ConfigFile::default()).base_url,
      DEFAULT_URL
    );
  }

  #[test]
  fn config_file_parses() {
    let cfg: ConfigFile = toml::from_str("url = \"http://box:9000\"").unwrap();
    assert_eq!(cfg.url, "http://box:9000");
    let empty: ConfigFile = toml::from_str("").unwrap();
    assert!(empty.url.is_empty());
  }

  #[test]
  fn startup_flags() {
    let a = args(&["--import", "faqs.csv", "--template", "product-faqs"]);
    assert_eq!(a.import.as_deref(), Some(Path::new("faqs.csv")));
    assert_eq!(a.template.as_deref(), Some("product-faqs"));
  }
}
