//! Mode-aware key routing: help overlay first, then search capture, then
//! the browsing keymap.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::{Focus, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Continue,
    Quit,
}

/// Resolve one key event against the session's current mode. Quitting is
/// reported to the caller; the dispatcher never terminates the process
/// itself.
pub fn dispatch(key: KeyEvent, session: &mut Session) -> Dispatch {
    let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c');

    // Help swallows everything except its own close keys, quit included.
    if session.showing_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            session.toggle_help();
        }
        return Dispatch::Continue;
    }

    // While searching, printable keys are query text, shortcuts included.
    if session.searching {
        if ctrl_c {
            return Dispatch::Quit;
        }
        match key.code {
            KeyCode::Esc => session.cancel_search(),
            KeyCode::Backspace => session.delete_search_char(),
            KeyCode::Tab | KeyCode::Enter => session.commit_search(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                session.append_search_char(c);
            }
            _ => {}
        }
        return Dispatch::Continue;
    }

    if ctrl_c {
        return Dispatch::Quit;
    }

    match key.code {
        KeyCode::Char('q') => return Dispatch::Quit,
        KeyCode::Up | KeyCode::Char('k') => session.move_up(),
        KeyCode::Down | KeyCode::Char('j') => session.move_down(),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => session.scroll_left(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => session.scroll_right(),
        KeyCode::Char('0') => session.reset_hscroll(),
        KeyCode::Enter => match session.focus {
            Focus::Sidebar => session.focus_right(),
            Focus::TrackList => session.play_selected(),
        },
        KeyCode::Tab => session.toggle_focus(),
        KeyCode::Char('p') | KeyCode::Char(' ') => session.toggle_play_pause(),
        KeyCode::Char('n') => session.next_track(),
        KeyCode::Char('b') => session.previous_track(),
        KeyCode::Char('-') => session.volume_down(),
        KeyCode::Char('+') | KeyCode::Char('=') => session.volume_up(),
        KeyCode::Char('/') => session.start_search(),
        KeyCode::Char('?') => session.toggle_help(),
        KeyCode::Char('v') => session.cycle_visualizer_mode(),
        // A committed filter is dropped with Escape; otherwise a no-op.
        KeyCode::Esc => session.clear_filter(),
        _ => {}
    }
    Dispatch::Continue
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::*;
    use crate::library::{Album, Track};
    use crate::playback::{PlayerControl, PlayerEvent};
    use crate::session::VisualizerMode;

    struct NullPlayer;

    impl PlayerControl for NullPlayer {
        fn open(&mut self, _track: &Track) {}
        fn play(&mut self) {}
        fn pause(&mut self) {}
        fn stop(&mut self) {}
        fn seek(&mut self, _position: Duration) {}
        fn set_volume(&mut self, _volume: f32) {}
        fn current_time(&self) -> Duration {
            Duration::ZERO
        }
        fn duration(&self) -> Duration {
            Duration::ZERO
        }
        fn generation(&self) -> u64 {
            0
        }
        fn poll_event(&mut self) -> Option<PlayerEvent> {
            None
        }
    }

    fn session() -> Session {
        let tracks: Vec<Track> = (1..=3)
            .map(|n| Track {
                path: PathBuf::from(format!("/music/t{n}.flac")),
                title: format!("Track {n}"),
                artist: "Artist".to_string(),
                album: "Album".to_string(),
                track_number: n,
                disc_number: 1,
                duration: Duration::from_secs(200),
                codec: "FLAC".to_string(),
                year: None,
                genre: None,
                sample_rate: None,
                bit_depth: None,
            })
            .collect();
        let albums = vec![
            Album {
                name: "Album".to_string(),
                artist: "Artist".to_string(),
                tracks,
                year: None,
                genre: None,
            },
            Album {
                name: "Other".to_string(),
                artist: "Artist".to_string(),
                tracks: Vec::new(),
                year: None,
                genre: None,
            },
        ];
        Session::new(albums, Box::new(NullPlayer), 1.0, VisualizerMode::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn q_and_ctrl_c_quit_while_browsing() {
        let mut s = session();
        assert_eq!(dispatch(key(KeyCode::Char('q')), &mut s), Dispatch::Quit);
        assert_eq!(dispatch(ctrl('c'), &mut s), Dispatch::Quit);
    }

    #[test]
    fn arrows_and_vim_keys_move_the_selection() {
        let mut s = session();
        dispatch(key(KeyCode::Down), &mut s);
        assert_eq!(s.selected_album, 1);
        dispatch(key(KeyCode::Char('k')), &mut s);
        assert_eq!(s.selected_album, 0);
        dispatch(key(KeyCode::Char('j')), &mut s);
        assert_eq!(s.selected_album, 1);
        dispatch(key(KeyCode::Up), &mut s);
        assert_eq!(s.selected_album, 0);
    }

    #[test]
    fn horizontal_keys_scroll_and_zero_resets() {
        let mut s = session();
        dispatch(key(KeyCode::Right), &mut s);
        dispatch(key(KeyCode::Char('L')), &mut s);
        assert_eq!(s.sidebar_hscroll, 8);
        dispatch(key(KeyCode::Char('h')), &mut s);
        assert_eq!(s.sidebar_hscroll, 4);
        dispatch(key(KeyCode::Char('0')), &mut s);
        assert_eq!(s.sidebar_hscroll, 0);
        dispatch(key(KeyCode::Char('H')), &mut s);
        assert_eq!(s.sidebar_hscroll, 0);
    }

    #[test]
    fn enter_moves_focus_then_plays() {
        let mut s = session();
        dispatch(key(KeyCode::Enter), &mut s);
        assert_eq!(s.focus, Focus::TrackList);
        dispatch(key(KeyCode::Enter), &mut s);
        assert_eq!(s.status, crate::session::Status::Playing);
    }

    #[test]
    fn p_and_space_toggle_playback() {
        let mut s = session();
        dispatch(key(KeyCode::Char('p')), &mut s);
        assert_eq!(s.status, crate::session::Status::Playing);
        dispatch(key(KeyCode::Char(' ')), &mut s);
        assert_eq!(s.status, crate::session::Status::Paused);
    }

    #[test]
    fn volume_keys_adjust_volume() {
        let mut s = session();
        dispatch(key(KeyCode::Char('-')), &mut s);
        assert!((s.volume - 0.95).abs() < 1e-6);
        dispatch(key(KeyCode::Char('+')), &mut s);
        assert!((s.volume - 1.0).abs() < 1e-6);
    }

    #[test]
    fn slash_enters_search_and_keys_become_text() {
        let mut s = session();
        dispatch(key(KeyCode::Char('/')), &mut s);
        assert!(s.searching);
        dispatch(key(KeyCode::Char('j')), &mut s);
        dispatch(key(KeyCode::Char('q')), &mut s);
        dispatch(key(KeyCode::Char('-')), &mut s);
        assert_eq!(s.search_query, "jq-");
        assert_eq!(s.selected_album, 0);
    }

    #[test]
    fn search_arrows_are_ignored() {
        let mut s = session();
        dispatch(key(KeyCode::Char('/')), &mut s);
        dispatch(key(KeyCode::Down), &mut s);
        assert_eq!(s.selected_album, 0);
        assert!(s.search_query.is_empty());
    }

    #[test]
    fn search_backspace_escape_and_commit() {
        let mut s = session();
        dispatch(key(KeyCode::Char('/')), &mut s);
        dispatch(key(KeyCode::Char('a')), &mut s);
        dispatch(key(KeyCode::Char('b')), &mut s);
        dispatch(key(KeyCode::Backspace), &mut s);
        assert_eq!(s.search_query, "a");
        dispatch(key(KeyCode::Tab), &mut s);
        assert!(!s.searching);
        assert_eq!(s.search_query, "a");

        dispatch(key(KeyCode::Char('/')), &mut s);
        dispatch(key(KeyCode::Char('x')), &mut s);
        dispatch(key(KeyCode::Esc), &mut s);
        assert!(!s.searching);
        assert!(s.search_query.is_empty());
    }

    #[test]
    fn ctrl_c_quits_while_searching() {
        let mut s = session();
        dispatch(key(KeyCode::Char('/')), &mut s);
        assert_eq!(dispatch(ctrl('c'), &mut s), Dispatch::Quit);
    }

    #[test]
    fn help_swallows_everything_but_its_close_keys() {
        let mut s = session();
        dispatch(key(KeyCode::Char('?')), &mut s);
        assert!(s.showing_help);
        assert_eq!(dispatch(key(KeyCode::Char('q')), &mut s), Dispatch::Continue);
        assert_eq!(dispatch(ctrl('c'), &mut s), Dispatch::Continue);
        dispatch(key(KeyCode::Down), &mut s);
        assert_eq!(s.selected_album, 0);
        dispatch(key(KeyCode::Char('/')), &mut s);
        assert!(!s.searching);
        dispatch(key(KeyCode::Esc), &mut s);
        assert!(!s.showing_help);
    }

    #[test]
    fn escape_clears_a_committed_filter() {
        let mut s = session();
        dispatch(key(KeyCode::Char('/')), &mut s);
        dispatch(key(KeyCode::Char('o')), &mut s);
        dispatch(key(KeyCode::Enter), &mut s);
        assert_eq!(s.search_query, "o");
        dispatch(key(KeyCode::Esc), &mut s);
        assert!(s.search_query.is_empty());
    }

    #[test]
    fn tab_toggles_focus_while_browsing() {
        let mut s = session();
        dispatch(key(KeyCode::Tab), &mut s);
        assert_eq!(s.focus, Focus::TrackList);
        dispatch(key(KeyCode::Tab), &mut s);
        assert_eq!(s.focus, Focus::Sidebar);
    }

    #[test]
    fn v_cycles_the_visualizer() {
        let mut s = session();
        let before = s.visualizer_mode;
        dispatch(key(KeyCode::Char('v')), &mut s);
        assert_ne!(s.visualizer_mode, before);
    }

    #[test]
    fn unknown_keys_are_a_no_op() {
        let mut s = session();
        assert_eq!(dispatch(key(KeyCode::Char('z')), &mut s), Dispatch::Continue);
        assert_eq!(dispatch(key(KeyCode::F(5)), &mut s), Dispatch::Continue);
        assert_eq!(s.selected_album, 0);
    }
}
