//! `rollbook-tui`: terminal front end for the student records portal.
//!
//! Two screens follow the portal's view: a credential form (roll number
//! plus date of birth) and a dashboard listing the student's sessions
//! with details for the selected one. Portal state changes reach the UI
//! through a background state bridge task.
//!
//! Logs go to a file (default `$TMPDIR/rollbook-tui.log`) so they never
//! corrupt the terminal.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod state_bridge;
mod theme;
mod tui;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use rollbook_core::Portal;

use crate::app::App;

/// Look up a student's sessions and records in the terminal.
#[derive(Parser, Debug)]
#[command(name = "rollbook-tui", version, about)]
struct Cli {
    /// Config profile to use
    #[arg(short = 'p', long, env = "ROLLBOOK_PROFILE")]
    profile: Option<String>,

    /// Records service base URL (overrides the profile)
    #[arg(short = 'b', long, env = "ROLLBOOK_BASE_URL")]
    base_url: Option<String>,

    /// Accept invalid TLS certificates
    #[arg(short = 'k', long, env = "ROLLBOOK_INSECURE")]
    insecure: bool,

    /// Log file path (defaults to rollbook-tui.log in the temp dir)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-based tracing; stdout and stderr belong to the terminal UI. The
/// returned guard flushes pending lines when dropped.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "rollbook_tui={log_level},rollbook_core={log_level},rollbook_api={log_level}"
        ))
    });

    let log_file = cli
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("rollbook-tui.log"));
    let log_dir = log_file
        .parent()
        .map_or_else(std::env::temp_dir, std::path::Path::to_path_buf);
    let log_filename = log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("rollbook-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Resolve the profile (flags > config file > built-in default) and build
/// the portal. Returns the portal, its base URL and the saved roll number.
fn build_portal(cli: &Cli) -> Result<(Portal, String, Option<String>)> {
    let cfg = rollbook_config::load_config_or_default();
    let name = cfg.active_profile_name(cli.profile.as_deref());
    let mut profile = cfg.profile(&name)?;

    if let Some(ref url) = cli.base_url {
        profile.base_url.clone_from(url);
    }
    if cli.insecure {
        profile.insecure = Some(true);
    }

    let config = rollbook_config::profile_to_portal_config(&profile, &cfg.defaults)?;
    info!(profile = %name, base_url = %config.base_url, "resolved profile");

    let portal = Portal::new(&config)?;
    Ok((portal, config.base_url.to_string(), profile.roll_number))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks go in before the terminal switches modes.
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);
    info!("starting rollbook-tui");

    let (portal, base_url, roll_number) = build_portal(&cli)?;
    let mut app = App::new(portal, base_url, roll_number);
    app.run().await?;

    Ok(())
}
