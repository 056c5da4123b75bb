//! Sink construction: open and decode a file, optionally tee decoded
//! samples into the visualizer ring, and hand back a paused `Sink` at the
//! requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use rodio::{ChannelCount, Decoder, OutputStream, SampleRate, Sink, Source};

use crate::visual::SampleRing;

use super::types::OpenError;

// Mono frames buffered locally before taking the ring lock.
const TAP_CHUNK: usize = 512;

/// Create a paused `Sink` for the file at `path`, starting at `start_at`.
///
/// When `ring` is given, decoded audio is downmixed to mono and written
/// into it as it flows to the output, so the visualizer sees exactly what
/// is being heard.
pub fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
    ring: Option<&Arc<SampleRing>>,
) -> Result<Sink, OpenError> {
    let file = File::open(path).map_err(|source| OpenError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file))
        .map_err(|source| OpenError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        // `skip_duration` is the seeking primitive; Duration::ZERO is fine.
        .skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    match ring {
        Some(ring) => sink.append(Tap::new(source, Arc::clone(ring))),
        None => sink.append(source),
    }
    sink.pause();
    Ok(sink)
}

/// Pass-through source that copies a mono downmix of everything it yields
/// into the sample ring, in chunks to keep lock traffic low.
struct Tap<S> {
    inner: S,
    ring: Arc<SampleRing>,
    pending: Vec<f32>,
    frame_sum: f32,
    frame_filled: u16,
}

impl<S> Tap<S> {
    fn new(inner: S, ring: Arc<SampleRing>) -> Self {
        Self {
            inner,
            ring,
            pending: Vec::with_capacity(TAP_CHUNK),
            frame_sum: 0.0,
            frame_filled: 0,
        }
    }
}

impl<S> Iterator for Tap<S>
where
    S: Source,
{
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        match self.inner.next() {
            Some(sample) => {
                self.frame_sum += sample;
                self.frame_filled += 1;
                let channels = self.inner.channels().max(1);
                if self.frame_filled >= channels {
                    let mono = self.frame_sum / channels as f32;
                    self.frame_sum = 0.0;
                    self.frame_filled = 0;
                    self.pending.push(mono);
                    if self.pending.len() >= TAP_CHUNK {
                        self.ring.write(&self.pending);
                        self.pending.clear();
                    }
                }
                Some(sample)
            }
            None => {
                if !self.pending.is_empty() {
                    self.ring.write(&self.pending);
                    self.pending.clear();
                }
                None
            }
        }
    }
}

impl<S> Source for Tap<S>
where
    S: Source,
{
    fn current_span_len(&self) -> Option<usize> {
        self.inner.current_span_len()
    }

    fn channels(&self) -> ChannelCount {
        self.inner.channels()
    }

    fn sample_rate(&self) -> SampleRate {
        self.inner.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }
}
