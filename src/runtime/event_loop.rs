use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::config::Settings;
use crate::input::{self, Dispatch};
use crate::session::{Session, VisualizerMode};
use crate::ui;
use crate::visual::analysis::SpectrumAnalyzer;
use crate::visual::SampleRing;

/// Main terminal event loop: drain playback events, draw, then poll for
/// one key. Returns when a quit key is dispatched.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    session: &mut Session,
    ring: &Arc<SampleRing>,
    settings: &Settings,
) -> Result<()> {
    let mut analyzer = SpectrumAnalyzer::new(settings.visualizer.fft_size);

    loop {
        session.pump_player_events();

        // The FFT runs only when its output is on screen.
        let magnitudes = match session.visualizer_mode {
            VisualizerMode::Spectrum => {
                let window = ring.read(ring.capacity());
                analyzer.analyze(&window)
            }
            VisualizerMode::Oscilloscope => Vec::new(),
        };

        terminal.draw(|f| ui::draw(f, session, ring.as_ref(), &magnitudes))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if input::dispatch(key, session) == Dispatch::Quit {
                    break;
                }
            }
        }
    }

    Ok(())
}
