//! Launcher TUI entry point.
//!
//! # Usage
//!
//! ```bash
//! # Mock host with canned replies
//! roomlink-tui --mock --log-file launcher.log
//!
//! # Native host channel
//! roomlink-tui --host 127.0.0.1:7070 --config roomlink.toml
//! ```

use std::{fs::OpenOptions, path::PathBuf};

use clap::Parser;
use roomlink_app::{Collaborators, HostEnvironment, LauncherOptions};
use roomlink_core::SystemEnv;
use roomlink_tui::{
    App, AppEvent, LauncherConfig, Overrides, Runtime, TerminalBell, TerminalDriver, host,
    weather,
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// In-room launcher terminal UI
#[derive(Parser, Debug)]
#[command(name = "roomlink-tui")]
#[command(about = "Hotel in-room launcher in the terminal")]
#[command(version)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Native host channel address (overrides the configuration file)
    #[arg(long)]
    host: Option<String>,

    /// Use the in-memory mock host even if a host address is configured
    #[arg(long)]
    mock: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write logs to this file. Without it logging is discarded, since the
    /// terminal belongs to the UI.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(&args)?;

    let mut config = LauncherConfig::load(args.config.as_deref())?;
    config.apply(&Overrides { host: args.host, mock: args.mock });

    tracing::info!(weather = ?config.weather.source, "launcher starting");

    let env = SystemEnv::new();
    let link = host::connect(env, &config).await?;
    let low_motion = link.detected.is_host_platform();
    tracing::info!(low_motion, "host detected");

    let driver = TerminalDriver::new()?;
    let mut app = App::new(LauncherOptions { show_splash: config.launcher.show_splash, low_motion });
    let (cols, rows) = driver.size()?;
    app.handle(AppEvent::Resize(cols, rows));

    let services = Collaborators {
        weather: weather::from_config(&config.weather),
        audio: Box::new(TerminalBell::stdout()),
    };

    Runtime::new(driver, env, link.bridge, app, services).run().await?;
    tracing::info!("launcher stopped");
    Ok(())
}

fn init_tracing(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::sync::Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();
    Ok(())
}
