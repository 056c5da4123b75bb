//! Interactive mode: scan the library, wire up the playback thread and
//! session, and hand the terminal to the event loop.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use crate::config::Settings;
use crate::library::scan;
use crate::playback::AudioPlayer;
use crate::session::Session;
use crate::visual::SampleRing;

mod event_loop;

pub fn run(dir: &Path, settings: &Settings) -> Result<()> {
    let albums = scan(dir, &settings.library);
    if albums.is_empty() {
        println!("No audio files found under {}", dir.display());
        return Ok(());
    }
    let track_count: usize = albums.iter().map(|a| a.tracks.len()).sum();
    println!("Found {} tracks in {} albums.", track_count, albums.len());
    info!(albums = albums.len(), tracks = track_count, "library scanned");

    let ring = Arc::new(SampleRing::new(settings.visualizer.sample_capacity));
    let player = AudioPlayer::new(ring.clone());
    let mut session = Session::new(
        albums,
        Box::new(player),
        settings.playback.volume,
        settings.visualizer.mode.into(),
    );

    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &mut session, &ring, settings);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    session.shutdown();

    run_result
}
