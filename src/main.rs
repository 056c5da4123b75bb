use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

mod config;
mod headless;
mod input;
mod library;
mod logging;
mod playback;
mod runtime;
mod session;
mod timefmt;
mod ui;
mod visual;

use config::Settings;

#[derive(Parser)]
#[command(
    name = "aria",
    version,
    about = "Terminal music player with oscilloscope and spectrum displays"
)]
struct Cli {
    /// Music directory to browse, a single audio file, or "-" for stdin
    path: Option<PathBuf>,

    /// Initial volume, 0.0 to 1.0
    #[arg(long)]
    volume: Option<f32>,

    /// Format label for the stdin header (e.g. mp3, flac)
    #[arg(long)]
    format: Option<String>,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let mut settings = Settings::load().map_err(|e| anyhow::anyhow!("bad configuration: {e}"))?;
    settings.validate().map_err(anyhow::Error::msg)?;
    if let Some(volume) = cli.volume {
        settings.playback.volume = volume.clamp(0.0, 1.0);
    }

    let path = match cli.path {
        Some(path) => path,
        None => std::env::current_dir()?,
    };

    if path.as_os_str() == "-" {
        headless::run_stdin_mode(cli.format.as_deref(), settings.playback.volume)
    } else if path.is_dir() {
        runtime::run(&path, &settings)
    } else if path.is_file() {
        headless::run_file_mode(&path, settings.playback.volume)
    } else {
        bail!("no such file or directory: {}", path.display())
    }
}
