//! Flashbar demo CLI.
//!
//! Runs a small terminal app with two triggers wired to the bar: `s` shows,
//! `d` dismisses. Lifecycle callbacks are logged through tracing; use
//! `--log-file` to keep the log out of the UI.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use flashbar::preset::BarPreset;
use flashbar::tui::{self, DemoOptions};
use flashbar::{Gravity, ProgressPosition};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GravityArg {
    Top,
    Bottom,
}

impl From<GravityArg> for Gravity {
    fn from(arg: GravityArg) -> Self {
        match arg {
            GravityArg::Top => Gravity::Top,
            GravityArg::Bottom => Gravity::Bottom,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProgressArg {
    Left,
    Right,
}

impl From<ProgressArg> for ProgressPosition {
    fn from(arg: ProgressArg) -> Self {
        match arg {
            ProgressArg::Left => ProgressPosition::Left,
            ProgressArg::Right => ProgressPosition::Right,
        }
    }
}

#[derive(Parser)]
#[command(name = "flashbar")]
#[command(about = "Demo for the flashbar terminal notification component")]
#[command(version)]
struct Cli {
    /// Edge of the screen the bar appears on
    #[arg(long, value_enum, default_value = "top")]
    gravity: GravityArg,

    /// Auto-dismiss the bar after this many milliseconds
    #[arg(long)]
    duration_ms: Option<u64>,

    /// Enable swipe-to-dismiss (drag the bar sideways with the mouse)
    #[arg(long)]
    swipe: bool,

    /// Show an indeterminate progress indicator on the given side
    #[arg(long, value_enum)]
    progress: Option<ProgressArg>,

    /// Dim the rest of the screen while the bar is up
    #[arg(long)]
    overlay: bool,

    /// Bar title
    #[arg(long)]
    title: Option<String>,

    /// Bar message
    #[arg(long)]
    message: Option<String>,

    /// JSON preset file describing the bar
    #[arg(long)]
    preset: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let preset = match &cli.preset {
        Some(path) => Some(BarPreset::load(path)?),
        None => None,
    };

    let options = DemoOptions {
        gravity: cli.gravity.into(),
        duration: cli.duration_ms.map(Duration::from_millis),
        swipe: cli.swipe,
        progress: cli.progress.map(Into::into),
        overlay: cli.overlay,
        title: cli.title,
        message: cli.message,
        preset,
    };

    tui::run(options).await
}
