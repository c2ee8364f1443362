//! Groupline TUI entry point.

use std::{
    fs::OpenOptions,
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use clap::Parser;
use groupline_client::{Endpoint, GroupListPolicy, SettingsStore, ValidationError};
use groupline_tui::Runtime;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Groupline terminal chat client
#[derive(Parser, Debug)]
#[command(name = "groupline")]
#[command(about = "Terminal client for Groupline group chat")]
#[command(version)]
struct Args {
    /// Server host (overrides the saved endpoint for this run)
    #[arg(long)]
    host: Option<String>,

    /// Server port (overrides the saved endpoint for this run)
    #[arg(short, long)]
    port: Option<String>,

    /// Name to chat as; `/connect` without a name uses it
    #[arg(short, long)]
    username: Option<String>,

    /// Settings file (default: platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rebuild the group list from each announcement instead of appending
    #[arg(long)]
    replace_groups: bool,

    /// Do not select the first group automatically
    #[arg(long)]
    no_auto_select: bool,

    /// Write logs to this file (stdout belongs to the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); `RUST_LOG` takes precedence
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path, &args.log_level)?;
    }

    let mut settings = match &args.config {
        Some(path) => SettingsStore::open(path)?,
        None => SettingsStore::open_default()?,
    };
    tracing::info!(path = %settings.path().display(), "settings loaded");

    let endpoint = override_endpoint(settings.endpoint(), &args)?;
    settings.override_with(|s| {
        s.endpoint = endpoint;
        if args.username.is_some() {
            s.username.clone_from(&args.username);
        }
        if args.replace_groups {
            s.group_list_policy = GroupListPolicy::Replace;
        }
        if args.no_auto_select {
            s.auto_select_first = false;
        }
    });

    let runtime = Runtime::new(settings)?;
    Ok(runtime.run().await?)
}

/// Apply `--host` / `--port` on top of the saved endpoint.
fn override_endpoint(saved: &Endpoint, args: &Args) -> Result<Endpoint, ValidationError> {
    if args.host.is_none() && args.port.is_none() {
        return Ok(saved.clone());
    }
    let host = args.host.as_deref().unwrap_or(saved.host());
    let port = args.port.clone().unwrap_or_else(|| saved.port().to_string());
    Endpoint::from_parts(host, &port)
}

fn init_logging(path: &Path, level: &str) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();

    Ok(())
}
