use std::io::{self, Cursor, Read};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use rodio::{Decoder, OutputStreamBuilder, Sink, Source};

use super::console::{print_header, write_progress};

const PROGRESS_TICK: Duration = Duration::from_millis(250);

/// Play audio piped on stdin. The whole stream is buffered up front so the
/// decoder can seek; `format` is a display hint for the header, the decoder
/// sniffs the actual container itself.
pub fn run_stdin_mode(format: Option<&str>, volume: f32) -> Result<()> {
    let mut data = Vec::new();
    io::stdin()
        .read_to_end(&mut data)
        .context("reading audio data from stdin")?;
    if data.is_empty() {
        bail!("no audio data on stdin");
    }

    let source = Decoder::new(Cursor::new(data)).context("failed to decode stdin stream")?;
    let sample_rate = source.sample_rate();
    let channels = source.channels();
    let duration = source.total_duration().unwrap_or_default();
    let codec = format.map(str::to_uppercase).unwrap_or_default();

    let mut stream =
        OutputStreamBuilder::open_default_stream().context("no audio output device")?;
    stream.log_on_drop(false);

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.set_volume(volume.clamp(0.0, 1.0));

    print_header(None, None, None, &codec, sample_rate, channels, duration);

    let total = duration.as_secs_f64();
    while !sink.empty() {
        write_progress(sink.get_pos().as_secs_f64(), total);
        thread::sleep(PROGRESS_TICK);
    }

    write_progress(total, total);
    println!("\nPlayback complete.");
    Ok(())
}
