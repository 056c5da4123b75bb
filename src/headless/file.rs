use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::ItemKey;
use rodio::OutputStreamBuilder;

use crate::playback::create_sink_at;

use super::console::{print_header, write_progress};

const PROGRESS_TICK: Duration = Duration::from_millis(250);

/// Play one file to completion, printing a metadata header and an in-place
/// progress line. Decode and open failures are fatal here, unlike in the
/// TUI.
pub fn run_file_mode(path: &Path, volume: f32) -> Result<()> {
    if !path.is_file() {
        bail!("file not found: {}", path.display());
    }

    let tagged = lofty::read_from_path(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let properties = tagged.properties();
    let duration = properties.duration();
    let sample_rate = properties.sample_rate().unwrap_or(0);
    let channels = u16::from(properties.channels().unwrap_or(0));

    let tag = tagged.primary_tag().or_else(|| tagged.first_tag());
    let title = tag.and_then(|t| t.get_string(&ItemKey::TrackTitle));
    let artist = tag.and_then(|t| t.get_string(&ItemKey::TrackArtist));
    let album = tag.and_then(|t| t.get_string(&ItemKey::AlbumTitle));
    let codec = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_uppercase();

    let mut stream =
        OutputStreamBuilder::open_default_stream().context("no audio output device")?;
    stream.log_on_drop(false);

    let sink = create_sink_at(&stream, path, Duration::ZERO, None)?;
    sink.set_volume(volume.clamp(0.0, 1.0));

    print_header(title, artist, album, &codec, sample_rate, channels, duration);

    sink.play();

    // Poll the sink's real playback clock; the decode loop itself runs
    // faster than real time.
    let total = duration.as_secs_f64();
    while !sink.empty() {
        write_progress(sink.get_pos().as_secs_f64(), total);
        thread::sleep(PROGRESS_TICK);
    }

    write_progress(total, total);
    println!("\nPlayback complete.");
    Ok(())
}
