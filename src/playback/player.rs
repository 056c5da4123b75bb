use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::library::Track;
use crate::visual::SampleRing;

use super::control::PlayerControl;
use super::thread::spawn_player_thread;
use super::types::{PlaybackHandle, PlaybackInfo, PlayerCmd, PlayerEvent};

/// Front-end over the playback thread. Cheap to drive from the event loop;
/// all decode and output work happens on the worker.
pub struct AudioPlayer {
    tx: Sender<PlayerCmd>,
    playback: PlaybackHandle,
    events: Receiver<PlayerEvent>,
    generation: AtomicU64,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    pub fn new(ring: Arc<SampleRing>) -> Self {
        let (tx, rx) = mpsc::channel::<PlayerCmd>();
        let (event_tx, event_rx) = mpsc::channel::<PlayerEvent>();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let handle = spawn_player_thread(rx, playback_info.clone(), ring, event_tx);

        Self {
            tx,
            playback: playback_info,
            events: event_rx,
            generation: AtomicU64::new(0),
            join: Mutex::new(Some(handle)),
        }
    }

    /// Ask the worker to quit and wait for it.
    pub fn shutdown(&self) {
        let _ = self.tx.send(PlayerCmd::Quit);
        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl PlayerControl for AudioPlayer {
    fn open(&mut self, track: &Track) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let _ = self.tx.send(PlayerCmd::Open {
            path: track.path.clone(),
            duration: track.duration,
            generation,
        });
    }

    fn play(&mut self) {
        let _ = self.tx.send(PlayerCmd::Play);
    }

    fn pause(&mut self) {
        let _ = self.tx.send(PlayerCmd::Pause);
    }

    fn stop(&mut self) {
        let _ = self.tx.send(PlayerCmd::Stop);
    }

    fn seek(&mut self, position: Duration) {
        let _ = self.tx.send(PlayerCmd::Seek(position));
    }

    fn set_volume(&mut self, volume: f32) {
        let _ = self.tx.send(PlayerCmd::SetVolume(volume));
    }

    fn current_time(&self) -> Duration {
        self.playback.lock().map(|info| info.elapsed).unwrap_or_default()
    }

    fn duration(&self) -> Duration {
        self.playback
            .lock()
            .map(|info| info.duration)
            .unwrap_or_default()
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn poll_event(&mut self) -> Option<PlayerEvent> {
        self.events.try_recv().ok()
    }

    fn shutdown(&mut self) {
        AudioPlayer::shutdown(self);
    }
}
