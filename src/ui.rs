//! UI rendering for the terminal user interface.
//!
//! Layout: album sidebar on the left, track list and visualizer on the
//! right, a now-playing bar along the bottom, and a centered help popup
//! layered on top when open.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph},
};

use crate::session::{Focus, Session, Status, VisualizerMode};
use crate::timefmt::format_time;
use crate::visual::{scope, spectrum, SampleRing};

const PROGRESS_SEGMENTS: usize = 24;
const VOLUME_SEGMENTS: usize = 10;

const HELP_TEXT: &str = "\
j/k, arrows   move selection
h/l, H/L      scroll text
0             reset scroll
Tab           switch pane
Enter         focus tracks / play
p, space      play/pause
n / b         next / previous
- / +         volume
v             oscilloscope/spectrum
/             search albums
Esc           clear filter
?             this help
q, Ctrl-C     quit";

/// Skip `offset` characters off the front; panes scroll text, not columns.
fn hscrolled(text: &str, offset: usize) -> String {
    text.chars().skip(offset).collect()
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn segment_bar(fraction: f64, segments: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * segments as f64).round() as usize;
    let mut bar = String::with_capacity(segments * 3);
    for i in 0..segments {
        bar.push(if i < filled { '█' } else { '░' });
    }
    bar
}

fn pane_border_style(session: &Session, pane: Focus) -> Style {
    if session.focus == pane {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Render the entire UI into `frame` from the session state. Spectrum
/// magnitudes are computed by the caller each tick; the oscilloscope reads
/// the ring directly.
pub fn draw(frame: &mut Frame, session: &Session, ring: &SampleRing, magnitudes: &[f32]) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(frame.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(32), Constraint::Min(1)])
        .split(chunks[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(10)])
        .split(panes[1]);

    draw_sidebar(frame, session, panes[0]);
    draw_track_list(frame, session, right[0]);
    draw_visualizer(frame, session, ring, magnitudes, right[1]);
    draw_now_playing(frame, session, chunks[1]);

    if session.showing_help {
        draw_help(frame, chunks[0]);
    }
}

fn draw_sidebar(frame: &mut Frame, session: &Session, area: Rect) {
    let filtered = session.filtered_album_indices();

    let title = if session.searching {
        format!(" albums /{}_ ", session.search_query)
    } else if !session.search_query.is_empty() {
        format!(" albums /{} ", session.search_query)
    } else {
        " albums ".to_string()
    };

    let items: Vec<ListItem> = filtered
        .iter()
        .map(|&i| ListItem::new(hscrolled(&session.albums[i].display_name(), session.sidebar_hscroll)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(pane_border_style(session, Focus::Sidebar))
                .title(title),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if let Some(pos) = filtered.iter().position(|&i| i == session.selected_album) {
        state.select(Some(pos));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_track_list(frame: &mut Frame, session: &Session, area: Rect) {
    let album = session.albums.get(session.selected_album);

    let title = match album {
        Some(a) => match a.format_description() {
            Some(desc) => format!(" tracks · {} · {} ", desc, a.formatted_duration()),
            None => format!(" tracks · {} ", a.formatted_duration()),
        },
        None => " tracks ".to_string(),
    };

    let items: Vec<ListItem> = album
        .map(|a| {
            a.tracks
                .iter()
                .map(|t| {
                    let line = format!(
                        "{:02}  {}  {}",
                        t.track_number,
                        t.title,
                        t.formatted_duration()
                    );
                    ListItem::new(hscrolled(&line, session.track_list_hscroll))
                })
                .collect()
        })
        .unwrap_or_default();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(pane_border_style(session, Focus::TrackList))
                .title(title),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if album.is_some_and(|a| !a.tracks.is_empty()) {
        state.select(Some(session.selected_track));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_visualizer(
    frame: &mut Frame,
    session: &Session,
    ring: &SampleRing,
    magnitudes: &[f32],
    area: Rect,
) {
    let title = match session.visualizer_mode {
        VisualizerMode::Oscilloscope => " oscilloscope ",
        VisualizerMode::Spectrum => " spectrum ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let style = Style::default().fg(Color::Cyan);
    match session.visualizer_mode {
        VisualizerMode::Oscilloscope => scope::render(ring, inner, style, frame.buffer_mut()),
        VisualizerMode::Spectrum => spectrum::render(magnitudes, inner, style, frame.buffer_mut()),
    }
}

fn draw_now_playing(frame: &mut Frame, session: &Session, area: Rect) {
    let volume_bar = segment_bar(session.volume as f64, VOLUME_SEGMENTS);
    let volume_pct = (session.volume * 100.0).round() as u32;

    let text = match (&session.current_track, session.status) {
        (Some(track), status) if status != Status::Idle => {
            let glyph = match status {
                Status::Playing => '▶',
                Status::Paused => '⏸',
                Status::Idle => '⏹',
            };
            let elapsed = format_time(session.current_time().as_secs_f64());
            let total = format_time(track.duration.as_secs_f64());
            let progress = segment_bar(session.playback_progress(), PROGRESS_SEGMENTS);
            format!(
                "{} {} {} - {}  {} {}/{}  vol {} {}%",
                session.music_icon(),
                glyph,
                track.title,
                track.artist,
                progress,
                elapsed,
                total,
                volume_bar,
                volume_pct,
            )
        }
        _ => format!("No track playing  vol {} {}%", volume_bar, volume_pct),
    };

    let bar = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" now playing ")
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            }),
    );
    frame.render_widget(bar, area);
}

fn draw_help(frame: &mut Frame, area: Rect) {
    let popup = centered_rect_sized(40, 17, area);
    frame.render_widget(Clear, popup);
    let help = Paragraph::new(HELP_TEXT).alignment(Alignment::Left).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" help (? closes) ")
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            }),
    );
    frame.render_widget(help, popup);
}
