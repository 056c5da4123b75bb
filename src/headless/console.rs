//! Plain-text output shared by the non-interactive modes.

use std::io::{self, Write};
use std::time::Duration;

use crate::timefmt::format_time;

pub(super) fn print_header(
    title: Option<&str>,
    artist: Option<&str>,
    album: Option<&str>,
    codec: &str,
    sample_rate: u32,
    channels: u16,
    duration: Duration,
) {
    println!("Now playing:");
    if let Some(title) = title {
        println!("  Title:  {title}");
    }
    if let Some(artist) = artist {
        println!("  Artist: {artist}");
    }
    if let Some(album) = album {
        println!("  Album:  {album}");
    }
    if !codec.is_empty() {
        println!("  Codec:  {codec}");
    }
    println!("  Format: {sample_rate} Hz, {channels} ch");
    if !duration.is_zero() {
        println!("  Length: {}", format_time(duration.as_secs_f64()));
    }
    println!();
}

/// One `\r`-prefixed progress line. With an unknown (zero) duration only
/// the elapsed time is shown.
pub(super) fn progress_line(elapsed: f64, duration: f64) -> String {
    if duration > 0.0 {
        let pct = elapsed / duration * 100.0;
        format!(
            "\r  {} / {}  [{:.0}%]",
            format_time(elapsed),
            format_time(duration),
            pct
        )
    } else {
        format!("\r  {}", format_time(elapsed))
    }
}

pub(super) fn write_progress(elapsed: f64, duration: f64) {
    let mut out = io::stdout();
    let _ = out.write_all(progress_line(elapsed, duration).as_bytes());
    let _ = out.flush();
}
