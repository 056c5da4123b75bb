//! Playback subsystem: a worker thread owning the output stream and sink,
//! driven over a command channel, reporting back through shared state and
//! an event channel.

mod control;
mod player;
mod sink;
mod thread;
mod types;

pub use control::PlayerControl;
pub use player::AudioPlayer;
pub use sink::create_sink_at;
pub use types::{OpenError, PlayerEvent, PlayerEventKind};
