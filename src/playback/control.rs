use std::time::Duration;

use crate::library::Track;

use super::types::PlayerEvent;

/// Control surface the session drives. The real implementation forwards
/// everything to the playback thread; tests substitute a recording stub.
///
/// Commands are fire-and-forget: failures surface later as an `Errored`
/// event rather than a return value.
pub trait PlayerControl {
    /// Start playing `track` from the beginning. Bumps the open generation;
    /// events carrying an older generation are stale.
    fn open(&mut self, track: &Track);
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    /// Jump to an absolute position in the current track.
    fn seek(&mut self, position: Duration);
    fn set_volume(&mut self, volume: f32);
    /// Elapsed time in the current track.
    fn current_time(&self) -> Duration;
    /// Length of the current track, zero when nothing is open.
    fn duration(&self) -> Duration;
    /// Generation counter of the most recent `open`.
    fn generation(&self) -> u64;
    /// Drain one pending event, if any.
    fn poll_event(&mut self) -> Option<PlayerEvent>;
    /// Tear down any background resources. Called once on exit.
    fn shutdown(&mut self) {}
}
