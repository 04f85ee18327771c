//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`: the home
//! screen, the archive list and the player modal drawn over it.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::catalog::ArchiveItem;
use crate::config::{ControlsSettings, UiSettings};
use crate::player::PlaybackState;
use crate::player::time::format_seconds;

const HOME_CONTROLS: &[(&str, &str)] = &[("enter", "open archive"), ("q", "quit")];

const ARCHIVE_CONTROLS: &[(&str, &str)] = &[
    ("j/k", "up/down"),
    ("gg/G", "top/bottom"),
    ("enter", "open track"),
    ("esc", "home"),
    ("q", "quit"),
];

const PLAYER_CONTROLS: &[(&str, &str)] = &[
    ("space/p", "play/pause"),
    ("h/l", "seek"),
    ("0-9", "jump"),
    ("s", "stop"),
    ("esc", "close"),
    ("H", "home"),
    ("q", "quit"),
];

const LEFT_PAD: Padding = Padding {
    left: 1,
    right: 0,
    top: 0,
    bottom: 0,
};

/// Render the controls help text for the current view.
fn controls_text(app: &App, seek_step_percent: u8) -> String {
    let pairs = if app.is_modal_open() {
        PLAYER_CONTROLS
    } else if app.is_archive_visible() {
        ARCHIVE_CONTROLS
    } else {
        HOME_CONTROLS
    };
    pairs
        .iter()
        .map(|(k, v)| {
            if *k == "h/l" {
                format!("[h/l] seek -/+{seek_step_percent}%")
            } else {
                format!("[{k}] {v}")
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
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

fn list_line(item: &ArchiveItem) -> String {
    let mut line = format!(
        "{:02}. {} · {} ({}) {}",
        item.index,
        item.title,
        item.album_title,
        item.album_year,
        format_seconds(item.duration)
    );
    if !item.has_audio() {
        line.push_str(" [no audio]");
    }
    line
}

fn status_text(app: &App) -> String {
    let mut parts: Vec<String> = vec![format!("{} tracks", app.items.len())];
    match app.active_item() {
        Some(item) if app.is_modal_open() => {
            let state = match app.playback_state() {
                PlaybackState::Playing => "Playing",
                PlaybackState::Paused if app.is_starting() => "Starting",
                PlaybackState::Paused => "Paused",
                PlaybackState::Stopped => "No audio",
            };
            parts.push(format!("Track: {}", item.title));
            parts.push(state.to_string());
        }
        _ => parts.push("Stopped".to_string()),
    }
    parts.join(" • ")
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" zeroday ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status = Paragraph::new(status_text(app))
        .block(Block::bordered().padding(LEFT_PAD).title(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    if app.is_archive_visible() {
        draw_archive(frame, app, chunks[2]);
    } else {
        draw_home(frame, app, ui_settings, chunks[2]);
    }

    if app.is_modal_open() {
        draw_player(frame, app, ui_settings, chunks[2]);
    }

    let footer = Paragraph::new(controls_text(app, controls_settings.seek_step_percent))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(LEFT_PAD),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}

fn draw_home(frame: &mut Frame, app: &App, ui_settings: &UiSettings, area: Rect) {
    let text = format!(
        "{}\n\n{} albums · {} tracks\n\npress enter to open the archive",
        ui_settings.header_text,
        app.albums.len(),
        app.items.len()
    );
    let home = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).padding(Padding::top(1)))
        .wrap(Wrap { trim: true });
    frame.render_widget(home, area);
}

fn draw_archive(frame: &mut Frame, app: &App, area: Rect) {
    // Only build ListItems for the visible window, centered on the cursor when possible.
    let total = app.items.len();
    let list_height = area.height.saturating_sub(2) as usize;
    let sel = app.selected.min(total.saturating_sub(1));
    let (start, end, selected_in_visible) = if total <= list_height || list_height == 0 {
        (0, total, sel)
    } else {
        let half = list_height / 2;
        let mut start = sel.saturating_sub(half);
        if start + list_height > total {
            start = total - list_height;
        }
        (start, start + list_height, sel - start)
    };

    let active = app.active_index().filter(|_| app.is_modal_open());
    let visible: Vec<ListItem> = app.items[start..end]
        .iter()
        .enumerate()
        .map(|(offset, item)| {
            let entry = ListItem::new(list_line(item));
            if active == Some(start + offset) {
                entry.bold()
            } else {
                entry
            }
        })
        .collect();

    let list = List::new(visible)
        .block(Block::default().borders(Borders::ALL).title(" archive "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(selected_in_visible));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_player(frame: &mut Frame, app: &App, ui_settings: &UiSettings, area: Rect) {
    let Some(item) = app.active_item() else {
        return;
    };
    let lyrics_height = if ui_settings.show_lyrics && !item.lyrics.is_empty() {
        12
    } else {
        0
    };
    let popup = centered_rect_sized(72, 9 + lyrics_height, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .padding(LEFT_PAD)
        .title(format!(" {} ", item.title))
        .title_alignment(Alignment::Center);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let about = format!(
        "{} ({}) · track {}\ncover: {}",
        item.album_title,
        item.album_year,
        item.index,
        if item.cover.is_empty() { "-" } else { item.cover.as_str() }
    );
    frame.render_widget(Paragraph::new(about), rows[0]);

    if !item.has_audio() {
        frame.render_widget(Paragraph::new("no recording available").italic(), rows[2]);
    } else {
        let ratio = (app.progress() / 100.0).clamp(0.0, 1.0);
        let gauge = Gauge::default()
            .ratio(ratio)
            .label("")
            .gauge_style(Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(gauge, rows[2]);

        let marker = if app.is_playing() { "▶" } else { "⏸" };
        let times = format!(
            "{marker} {}{}{}",
            app.current_time_formatted(),
            ui_settings.time_separator,
            app.total_time_formatted()
        );
        frame.render_widget(Paragraph::new(times), rows[3]);
    }

    if lyrics_height > 0 {
        let lyrics = Paragraph::new(item.lyrics.as_str())
            .block(Block::default().borders(Borders::TOP).title(" lyrics "))
            .wrap(Wrap { trim: false });
        frame.render_widget(lyrics, rows[4]);
    }
}
