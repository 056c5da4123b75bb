use std::time::Duration;

use rand::RngExt;
use tracing::warn;

use crate::library::{Album, Track};
use crate::playback::{PlayerControl, PlayerEvent, PlayerEventKind};

/// Cyclic now-playing glyphs; the index advances when playback moves to a
/// different album.
const MUSIC_ICONS: [char; 8] = ['♪', '♫', '♬', '♩', '◉', '⏵', '☊', '⊛'];

const HSCROLL_STEP: usize = 4;
const VOLUME_STEP: f32 = 0.05;
/// Past this point `previous_track` restarts instead of moving back.
const RESTART_THRESHOLD: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    TrackList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Playing,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisualizerMode {
    Oscilloscope,
    #[default]
    Spectrum,
}

impl VisualizerMode {
    pub fn next(self) -> Self {
        match self {
            Self::Oscilloscope => Self::Spectrum,
            Self::Spectrum => Self::Oscilloscope,
        }
    }
}

/// One live instance per player invocation. Owned and mutated only by the
/// control thread; the playback worker talks back through events that the
/// event loop feeds into `handle_player_event`.
pub struct Session {
    pub albums: Vec<Album>,
    pub selected_album: usize,
    pub selected_track: usize,
    pub focus: Focus,
    pub search_query: String,
    pub searching: bool,
    pub showing_help: bool,
    pub visualizer_mode: VisualizerMode,
    pub sidebar_hscroll: usize,
    pub track_list_hscroll: usize,
    pub volume: f32,
    pub status: Status,
    pub current_track: Option<Track>,
    last_played_album: Option<String>,
    icon_index: usize,
    player: Box<dyn PlayerControl>,
}

impl Session {
    pub fn new(
        albums: Vec<Album>,
        mut player: Box<dyn PlayerControl>,
        volume: f32,
        visualizer_mode: VisualizerMode,
    ) -> Self {
        let volume = volume.clamp(0.0, 1.0);
        player.set_volume(volume);
        Self {
            albums,
            selected_album: 0,
            selected_track: 0,
            focus: Focus::Sidebar,
            search_query: String::new(),
            searching: false,
            showing_help: false,
            visualizer_mode,
            sidebar_hscroll: 0,
            track_list_hscroll: 0,
            volume,
            status: Status::Idle,
            current_track: None,
            last_played_album: None,
            icon_index: rand::rng().random_range(0..MUSIC_ICONS.len()),
            player,
        }
    }

    /// Album positions matching the active filter, in library order. An
    /// empty query matches everything.
    pub fn filtered_album_indices(&self) -> Vec<usize> {
        if self.search_query.is_empty() {
            return (0..self.albums.len()).collect();
        }
        let needle = self.search_query.to_lowercase();
        self.albums
            .iter()
            .enumerate()
            .filter(|(_, album)| album.display_name().to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn move_up(&mut self) {
        match self.focus {
            Focus::Sidebar => {
                let filtered = self.filtered_album_indices();
                let Some(pos) = filtered.iter().position(|&i| i == self.selected_album) else {
                    return;
                };
                if pos > 0 {
                    self.selected_album = filtered[pos - 1];
                    self.selected_track = 0;
                }
            }
            Focus::TrackList => {
                if self.selected_track > 0 {
                    self.selected_track -= 1;
                }
            }
        }
    }

    pub fn move_down(&mut self) {
        match self.focus {
            Focus::Sidebar => {
                let filtered = self.filtered_album_indices();
                let Some(pos) = filtered.iter().position(|&i| i == self.selected_album) else {
                    return;
                };
                if pos + 1 < filtered.len() {
                    self.selected_album = filtered[pos + 1];
                    self.selected_track = 0;
                }
            }
            Focus::TrackList => {
                let track_count = self
                    .albums
                    .get(self.selected_album)
                    .map_or(0, |a| a.tracks.len());
                if self.selected_track + 1 < track_count {
                    self.selected_track += 1;
                }
            }
        }
    }

    pub fn focus_left(&mut self) {
        self.focus = Focus::Sidebar;
    }

    pub fn focus_right(&mut self) {
        self.focus = Focus::TrackList;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Sidebar => Focus::TrackList,
            Focus::TrackList => Focus::Sidebar,
        };
    }

    pub fn scroll_left(&mut self) {
        let offset = self.focused_hscroll_mut();
        *offset = offset.saturating_sub(HSCROLL_STEP);
    }

    pub fn scroll_right(&mut self) {
        *self.focused_hscroll_mut() += HSCROLL_STEP;
    }

    pub fn reset_hscroll(&mut self) {
        *self.focused_hscroll_mut() = 0;
    }

    fn focused_hscroll_mut(&mut self) -> &mut usize {
        match self.focus {
            Focus::Sidebar => &mut self.sidebar_hscroll,
            Focus::TrackList => &mut self.track_list_hscroll,
        }
    }

    pub fn cycle_visualizer_mode(&mut self) {
        self.visualizer_mode = self.visualizer_mode.next();
    }

    /// Start playing the track under the cursor. Out-of-bounds selection
    /// (empty album, empty library) is a silent no-op. Moving to a
    /// different album advances the now-playing icon.
    pub fn play_selected(&mut self) {
        let Some(album) = self.albums.get(self.selected_album) else {
            return;
        };
        let Some(track) = album.tracks.get(self.selected_track) else {
            return;
        };
        let track = track.clone();

        let album_key = album.display_name();
        if self.last_played_album.as_deref() != Some(album_key.as_str()) {
            self.icon_index = (self.icon_index + 1) % MUSIC_ICONS.len();
            self.last_played_album = Some(album_key);
        }

        self.player.stop();
        self.player.open(&track);
        self.current_track = Some(track);
        self.status = Status::Playing;
    }

    pub fn toggle_play_pause(&mut self) {
        match self.status {
            Status::Playing => {
                self.player.pause();
                self.status = Status::Paused;
            }
            Status::Paused => {
                self.player.play();
                self.status = Status::Playing;
            }
            Status::Idle => self.play_selected(),
        }
    }

    /// Advance within the current album; no-op past the last track.
    pub fn next_track(&mut self) {
        let track_count = self
            .albums
            .get(self.selected_album)
            .map_or(0, |a| a.tracks.len());
        if self.selected_track + 1 < track_count {
            self.selected_track += 1;
            self.play_selected();
        }
    }

    /// More than three seconds in: restart the current track. Otherwise
    /// step back to the previous one, if there is one.
    pub fn previous_track(&mut self) {
        if self.player.current_time() > RESTART_THRESHOLD {
            self.player.seek(Duration::ZERO);
            self.player.play();
            self.status = Status::Playing;
            return;
        }
        if self.selected_track > 0 {
            self.selected_track -= 1;
            self.play_selected();
        }
    }

    pub fn volume_up(&mut self) {
        self.set_volume(self.volume + VOLUME_STEP);
    }

    pub fn volume_down(&mut self) {
        self.set_volume(self.volume - VOLUME_STEP);
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.player.set_volume(self.volume);
    }

    pub fn start_search(&mut self) {
        self.search_query.clear();
        self.searching = true;
    }

    pub fn append_search_char(&mut self, c: char) {
        self.search_query.push(c);
        self.snap_selection_to_filter();
    }

    pub fn delete_search_char(&mut self) {
        self.search_query.pop();
        self.snap_selection_to_filter();
    }

    /// Leave search mode, keeping the filter applied.
    pub fn commit_search(&mut self) {
        self.searching = false;
    }

    /// Leave search mode and drop the filter.
    pub fn cancel_search(&mut self) {
        self.searching = false;
        self.search_query.clear();
    }

    /// Drop a committed filter while browsing.
    pub fn clear_filter(&mut self) {
        self.search_query.clear();
    }

    fn snap_selection_to_filter(&mut self) {
        let filtered = self.filtered_album_indices();
        if filtered.is_empty() {
            return;
        }
        if !filtered.contains(&self.selected_album) {
            self.selected_album = filtered[0];
            self.selected_track = 0;
        }
    }

    pub fn toggle_help(&mut self) {
        self.showing_help = !self.showing_help;
    }

    pub fn music_icon(&self) -> char {
        MUSIC_ICONS[self.icon_index]
    }

    pub fn current_time(&self) -> Duration {
        self.player.current_time()
    }

    pub fn track_duration(&self) -> Duration {
        self.current_track
            .as_ref()
            .map_or(Duration::ZERO, |t| t.duration)
    }

    /// Fraction of the current track played, in [0, 1]. Zero-duration
    /// tracks report zero rather than dividing by zero.
    pub fn playback_progress(&self) -> f64 {
        let duration = self.track_duration();
        if duration.is_zero() {
            return 0.0;
        }
        (self.player.current_time().as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Drain and apply all pending playback events.
    pub fn pump_player_events(&mut self) {
        while let Some(event) = self.player.poll_event() {
            self.handle_player_event(event);
        }
    }

    /// Apply one playback event. Events whose generation does not match
    /// the latest open are from a superseded track and are dropped.
    pub fn handle_player_event(&mut self, event: PlayerEvent) {
        if event.generation != self.player.generation() {
            return;
        }
        match event.kind {
            PlayerEventKind::Completed => {
                let has_next = self
                    .albums
                    .get(self.selected_album)
                    .is_some_and(|a| self.selected_track + 1 < a.tracks.len());
                if has_next {
                    self.next_track();
                } else {
                    self.status = Status::Idle;
                    self.current_track = None;
                }
            }
            PlayerEventKind::Errored(message) => {
                warn!(%message, "playback error, continuing");
            }
        }
    }

    pub fn shutdown(&mut self) {
        self.player.shutdown();
    }
}
