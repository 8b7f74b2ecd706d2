use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use wikiterm::config::Config;
use wikiterm::ui;

/// Terminal client for a wiki server.
#[derive(Debug, Parser)]
#[command(name = "wikiterm", version, about)]
struct Args {
    /// Base URL of the wiki server, overriding the config file.
    #[arg(long)]
    server: Option<String>,

    /// Path to the config file (default:
    /// `~/.config/wikiterm/config.toml`).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().context("loading config")?,
    };
    if let Some(server) = args.server {
        config.server.base_url = server;
        config.validate().context("validating --server override")?;
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;

    tracing::info!(server = %config.server.base_url, "starting wikiterm");
    ui::run(&config, runtime.handle().clone()).context("running UI")?;
    Ok(())
}

/// Initialize tracing with optional file output.
///
/// A TUI cannot log to stdout, so logging is off unless `WIKITERM_LOG`
/// names a file path. The file name gets a timestamp and pid suffix so
/// concurrent instances do not clobber each other.
fn init_tracing() {
    let Ok(log_path) = std::env::var("WIKITERM_LOG") else {
        return;
    };

    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let unique_path = format!("{log_path}.{timestamp}.{pid}");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Ok(file) = std::fs::File::create(&unique_path) else {
        eprintln!("Warning: Failed to create log file: {unique_path}");
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}
