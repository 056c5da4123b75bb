use std::path::PathBuf;
use std::time::Duration;

use crate::timefmt::format_time;

/// A single audio file with the metadata the player cares about.
#[derive(Clone, Debug)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub track_number: u32,
    pub disc_number: u32,
    pub duration: Duration,
    pub codec: String,
    pub year: Option<u32>,
    pub genre: Option<String>,
    pub sample_rate: Option<u32>,
    pub bit_depth: Option<u8>,
}

impl Track {
    /// Track length as `M:SS`.
    pub fn formatted_duration(&self) -> String {
        format_time(self.duration.as_secs_f64())
    }
}

/// A group of tracks sharing (artist, album), ordered by disc and track
/// number.
#[derive(Clone, Debug)]
pub struct Album {
    pub name: String,
    pub artist: String,
    pub tracks: Vec<Track>,
    pub year: Option<u32>,
    pub genre: Option<String>,
}

impl Album {
    /// The string the sidebar shows and the search filter matches against.
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.artist, self.name)
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn total_duration(&self) -> Duration {
        self.tracks.iter().map(|t| t.duration).sum()
    }

    /// Summed album length as `M:SS`.
    pub fn formatted_duration(&self) -> String {
        format_time(self.total_duration().as_secs_f64())
    }

    /// Format summary from the first track, e.g. "FLAC/16-bit/44.1kHz".
    /// Integral sample rates render without a decimal ("48kHz").
    pub fn format_description(&self) -> Option<String> {
        let first = self.tracks.first()?;
        let mut parts = vec![first.codec.to_uppercase()];
        if let Some(bits) = first.bit_depth {
            parts.push(format!("{bits}-bit"));
        }
        if let Some(rate) = first.sample_rate {
            let khz = f64::from(rate) / 1000.0;
            if khz.fract() == 0.0 {
                parts.push(format!("{}kHz", khz as u32));
            } else {
                parts.push(format!("{khz:.1}kHz"));
            }
        }
        if parts.len() > 1 {
            Some(parts.join("/"))
        } else {
            parts.pop()
        }
    }
}
