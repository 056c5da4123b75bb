use std::collections::HashMap;
use std::path::Path;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::ItemKey;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::{Album, Track};

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Tag values like "3/12" carry the total after a slash; only the leading
/// number matters here.
fn parse_number(value: &str) -> Option<u32> {
    value.split('/').next()?.trim().parse().ok()
}

fn read_track(path: &Path) -> Option<Track> {
    let tagged = lofty::read_from_path(path).ok()?;
    let properties = tagged.properties();
    let duration = properties.duration();
    let sample_rate = properties.sample_rate();
    let bit_depth = properties.bit_depth();

    let codec = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let default_title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();

    let mut title = default_title;
    let mut artist = "Unknown Artist".to_string();
    let mut album = "Unknown Album".to_string();
    let mut track_number = 0;
    let mut disc_number = 1;
    let mut year = None;
    let mut genre = None;

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        if let Some(v) = tag.get_string(&ItemKey::TrackTitle) {
            if !v.trim().is_empty() {
                title = v.to_string();
            }
        }
        if let Some(v) = tag.get_string(&ItemKey::TrackArtist) {
            let v = v.trim();
            if !v.is_empty() {
                artist = v.to_string();
            }
        }
        if let Some(v) = tag.get_string(&ItemKey::AlbumTitle) {
            let v = v.trim();
            if !v.is_empty() {
                album = v.to_string();
            }
        }
        if let Some(n) = tag.get_string(&ItemKey::TrackNumber).and_then(parse_number) {
            track_number = n;
        }
        if let Some(n) = tag.get_string(&ItemKey::DiscNumber).and_then(parse_number) {
            disc_number = n;
        }
        year = tag.get_string(&ItemKey::Year).and_then(parse_number);
        genre = tag
            .get_string(&ItemKey::Genre)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
    }

    Some(Track {
        path: path.to_path_buf(),
        title,
        artist,
        album,
        track_number,
        disc_number,
        duration,
        codec,
        year,
        genre,
        sample_rate,
        bit_depth,
    })
}

/// Walk `dir` and return the album list the TUI navigates.
///
/// Hidden files and directories are skipped; files that fail to parse are
/// dropped without aborting the scan.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Album> {
    let mut tracks: Vec<Track> = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() || !is_audio_file(path, settings) {
            continue;
        }
        match read_track(path) {
            Some(track) => tracks.push(track),
            None => tracing::debug!(path = %path.display(), "dropping unreadable file"),
        }
    }

    build_albums(tracks)
}

/// Group tracks by (artist, album), sort each album's tracks by disc and
/// track number, and sort albums case-insensitively by display name.
pub(super) fn build_albums(tracks: Vec<Track>) -> Vec<Album> {
    let mut groups: HashMap<(String, String), Vec<Track>> = HashMap::new();
    for track in tracks {
        groups
            .entry((track.artist.clone(), track.album.clone()))
            .or_default()
            .push(track);
    }

    let mut albums: Vec<Album> = groups
        .into_iter()
        .map(|((artist, name), mut tracks)| {
            tracks.sort_by_key(|t| (t.disc_number, t.track_number));
            let year = tracks.first().and_then(|t| t.year);
            let genre = tracks.first().and_then(|t| t.genre.clone());
            Album {
                name,
                artist,
                tracks,
                year,
                genre,
            }
        })
        .collect();

    albums.sort_by(|a, b| {
        a.display_name()
            .to_lowercase()
            .cmp(&b.display_name().to_lowercase())
    });
    albums
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn is_audio_file_matches_configured_extensions_case_insensitive() {
        let settings = LibrarySettings::default();
        assert!(is_audio_file(Path::new("/tmp/a.flac"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.FLAC"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.mp3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.opus"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.aiff"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.txt"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a"), &settings));
    }

    #[test]
    fn is_hidden_detects_dotfiles() {
        assert!(is_hidden(Path::new("/music/.cache")));
        assert!(is_hidden(Path::new(".hidden.flac")));
        assert!(!is_hidden(Path::new("/music/visible.flac")));
    }

    #[test]
    fn parse_number_handles_slash_totals() {
        assert_eq!(parse_number("7"), Some(7));
        assert_eq!(parse_number("3/12"), Some(3));
        assert_eq!(parse_number(" 2 "), Some(2));
        assert_eq!(parse_number("abc"), None);
    }

    #[test]
    fn scan_silently_drops_unreadable_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("broken.flac"), b"not a real flac").unwrap();
        fs::write(dir.path().join("notes.txt"), b"ignore me").unwrap();

        let albums = scan(dir.path(), &LibrarySettings::default());
        assert!(albums.is_empty());
    }

    #[test]
    fn scan_skips_hidden_directories() {
        let dir = tempdir().unwrap();
        let hidden = dir.path().join(".stash");
        fs::create_dir_all(&hidden).unwrap();
        fs::write(hidden.join("a.flac"), b"not real").unwrap();

        let albums = scan(dir.path(), &LibrarySettings::default());
        assert!(albums.is_empty());
    }
}
