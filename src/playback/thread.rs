use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStreamBuilder, Sink};
use tracing::warn;

use crate::visual::SampleRing;

use super::sink::create_sink_at;
use super::types::{PlaybackHandle, PlayerCmd, PlayerEvent, PlayerEventKind};

struct Current {
    path: std::path::PathBuf,
    generation: u64,
}

pub(super) fn spawn_player_thread(
    rx: Receiver<PlayerCmd>,
    playback_info: PlaybackHandle,
    ring: Arc<SampleRing>,
    events: Sender<PlayerEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream =
            OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        let mut stream = stream;
        stream.log_on_drop(false);

        let mut current: Option<Current> = None;
        let mut sink: Option<Sink> = None;
        let mut paused = true;
        let mut volume = 1.0f32;

        // Track start time and accumulated elapsed when paused.
        let mut started_at: Option<Instant> = None;
        let mut accumulated = Duration::ZERO;

        loop {
            match rx.recv_timeout(Duration::from_millis(100)) {
                Ok(cmd) => match cmd {
                    PlayerCmd::Open {
                        path,
                        duration,
                        generation,
                    } => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        match create_sink_at(&stream, &path, Duration::ZERO, Some(&ring)) {
                            Ok(new_sink) => {
                                new_sink.set_volume(volume);
                                new_sink.play();
                                sink = Some(new_sink);
                                paused = false;
                                started_at = Some(Instant::now());
                                accumulated = Duration::ZERO;
                                current = Some(Current { path, generation });
                                if let Ok(mut info) = playback_info.lock() {
                                    info.elapsed = Duration::ZERO;
                                    info.duration = duration;
                                    info.playing = true;
                                }
                            }
                            Err(err) => {
                                warn!(?path, %err, "could not start playback");
                                current = None;
                                started_at = None;
                                accumulated = Duration::ZERO;
                                if let Ok(mut info) = playback_info.lock() {
                                    info.playing = false;
                                }
                                let _ = events.send(PlayerEvent {
                                    generation,
                                    kind: PlayerEventKind::Errored(err.to_string()),
                                });
                            }
                        }
                    }

                    PlayerCmd::Play => {
                        if let Some(ref s) = sink {
                            if paused {
                                s.play();
                                paused = false;
                                started_at = Some(Instant::now());
                                if let Ok(mut info) = playback_info.lock() {
                                    info.playing = true;
                                }
                            }
                        }
                    }

                    PlayerCmd::Pause => {
                        if let Some(ref s) = sink {
                            if !paused {
                                s.pause();
                                paused = true;
                                if let Some(st) = started_at {
                                    accumulated += Instant::now() - st;
                                }
                                started_at = None;
                                if let Ok(mut info) = playback_info.lock() {
                                    info.playing = false;
                                }
                            }
                        }
                    }

                    PlayerCmd::Stop => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        current = None;
                        paused = true;
                        started_at = None;
                        accumulated = Duration::ZERO;
                        if let Ok(mut info) = playback_info.lock() {
                            info.elapsed = Duration::ZERO;
                            info.duration = Duration::ZERO;
                            info.playing = false;
                        }
                    }

                    PlayerCmd::Seek(position) => {
                        // Scrubbing: rebuild the sink and skip into the file.
                        let Some(cur) = current.as_ref() else {
                            continue;
                        };
                        if sink.is_none() {
                            continue;
                        }
                        if let Some(s) = sink.as_ref() {
                            s.stop();
                        }

                        match create_sink_at(&stream, &cur.path, position, Some(&ring)) {
                            Ok(new_sink) => {
                                new_sink.set_volume(volume);
                                if paused {
                                    started_at = None;
                                } else {
                                    new_sink.play();
                                    started_at = Some(Instant::now());
                                }
                                sink = Some(new_sink);
                                accumulated = position;
                                if let Ok(mut info) = playback_info.lock() {
                                    info.elapsed = position;
                                }
                            }
                            Err(err) => {
                                warn!(path = ?cur.path, %err, "seek failed");
                                let generation = cur.generation;
                                sink = None;
                                current = None;
                                started_at = None;
                                accumulated = Duration::ZERO;
                                if let Ok(mut info) = playback_info.lock() {
                                    info.playing = false;
                                }
                                let _ = events.send(PlayerEvent {
                                    generation,
                                    kind: PlayerEventKind::Errored(err.to_string()),
                                });
                            }
                        }
                    }

                    PlayerCmd::SetVolume(v) => {
                        volume = v.clamp(0.0, 1.0);
                        if let Some(ref s) = sink {
                            s.set_volume(volume);
                        }
                    }

                    PlayerCmd::Quit => {
                        if let Some(ref s) = sink {
                            s.stop();
                        }
                        if let Ok(mut info) = playback_info.lock() {
                            info.playing = false;
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic tick: publish elapsed and check for completion.
                    if let Some(ref s) = sink {
                        let elapsed =
                            accumulated + started_at.map_or(Duration::ZERO, |st| st.elapsed());
                        if let Ok(mut info) = playback_info.lock() {
                            info.elapsed = elapsed;
                        }

                        if !paused && s.empty() {
                            let generation = current.as_ref().map_or(0, |c| c.generation);
                            sink = None;
                            current = None;
                            paused = true;
                            started_at = None;
                            accumulated = Duration::ZERO;
                            if let Ok(mut info) = playback_info.lock() {
                                info.playing = false;
                            }
                            let _ = events.send(PlayerEvent {
                                generation,
                                kind: PlayerEventKind::Completed,
                            });
                        }
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
