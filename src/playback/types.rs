//! Playback small types and handles: commands, events, shared info.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;

#[derive(Debug)]
pub enum PlayerCmd {
    /// Decode the file at `path` and start playing it from the beginning.
    /// `duration` is the tagged track length, published for progress display.
    Open {
        path: PathBuf,
        duration: Duration,
        generation: u64,
    },
    /// Resume the current sink.
    Play,
    /// Pause the current sink.
    Pause,
    /// Stop playback and drop the sink.
    Stop,
    /// Jump to an absolute position in the current file.
    Seek(Duration),
    /// Set the output volume (applies to the current and future sinks).
    SetVolume(f32),
    /// Quit the worker thread.
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEventKind {
    /// The current file played to the end.
    Completed,
    /// Opening or decoding failed; the message is for display/logging.
    Errored(String),
}

/// Event reported by the worker thread. `generation` is the open counter
/// value the event belongs to, so late events from a superseded track can
/// be recognized and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerEvent {
    pub generation: u64,
    pub kind: PlayerEventKind,
}

#[derive(Debug, Clone)]
pub struct PlaybackInfo {
    pub elapsed: Duration,
    pub duration: Duration,
    pub playing: bool,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
            playing: false,
        }
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

#[derive(Debug, Error)]
pub enum OpenError {
    #[error("failed to open {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        source: rodio::decoder::DecoderError,
    },
}
