//! Session state machine: navigation, search, help, volume and playback
//! status for one running player instance.

mod model;
pub use model::{Focus, Session, Status, VisualizerMode};
