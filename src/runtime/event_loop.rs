use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::App;
use crate::config;
use crate::mpris::ControlCmd;
use crate::mpris::MprisHandle;
use crate::player::PlaybackState;
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Last-known item and playback state as emitted to MPRIS.
    pub last_mpris: (Option<usize>, PlaybackState),
}

impl EventLoopState {
    /// Construct a new `EventLoopState` seeded from `app`.
    pub fn new(app: &App) -> Self {
        Self {
            pending_gg: false,
            last_mpris: mpris_key(app),
        }
    }
}

fn mpris_key(app: &App) -> (Option<usize>, PlaybackState) {
    let index = app.active_index().filter(|_| app.is_modal_open());
    (index, app.playback_state())
}

/// Main terminal event loop: applies playback results, draws, and handles
/// input from the keyboard and MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.pump();

        // Keep MPRIS in sync even when playback changes come from the element (end of track).
        let key = mpris_key(app);
        if key != state.last_mpris {
            update_mpris(mpris, app);
            state.last_mpris = key;
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply an MPRIS command. Returns true when the app should quit.
fn handle_control_cmd(cmd: ControlCmd, app: &mut App) -> bool {
    debug!(?cmd, "MPRIS command");
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => {
            if !app.is_playing() {
                app.toggle_play();
            }
        }
        ControlCmd::Pause => {
            if app.is_playing() {
                app.toggle_play();
            }
        }
        ControlCmd::PlayPause => app.toggle_play(),
        ControlCmd::Stop => app.stop(),
    }
    false
}

/// Apply a key press to the current view. Returns true when the app should quit.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    state: &mut EventLoopState,
) -> bool {
    if key.code == KeyCode::Char('q') {
        return true;
    }

    if app.is_modal_open() {
        state.pending_gg = false;
        let step = f64::from(settings.controls.seek_step_percent);
        match key.code {
            KeyCode::Char(' ') | KeyCode::Char('p') => app.toggle_play(),
            KeyCode::Char('h') | KeyCode::Left => app.seek_by(-step),
            KeyCode::Char('l') | KeyCode::Right => app.seek_by(step),
            KeyCode::Char(c @ '0'..='9') => {
                if let Some(d) = c.to_digit(10) {
                    app.seek(f64::from(d) * 10.0);
                }
            }
            KeyCode::Char('s') => app.stop(),
            KeyCode::Esc | KeyCode::Backspace => app.close(),
            KeyCode::Char('H') => app.go_home(),
            _ => {}
        }
        return false;
    }

    if !app.is_archive_visible() {
        if key.code == KeyCode::Enter {
            app.enter_archive();
        }
        return false;
    }

    match key.code {
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            app.last();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.prev();
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            app.open_selected();
        }
        KeyCode::Esc | KeyCode::Backspace => {
            state.pending_gg = false;
            app.go_home();
        }
        _ => {
            // g pending should clear on any other key
            state.pending_gg = false;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::MediaEvent;
    use crate::audio::fake::{Call, FakeBackend};
    use crate::catalog::{Album, Track};
    use crossterm::event::KeyModifiers;

    fn app(backend: &FakeBackend) -> App {
        let tracks = ["a", "b", "c"]
            .iter()
            .map(|id| Track {
                id: id.to_string(),
                title: id.to_uppercase(),
                duration: 100.0,
                audio: format!("/audio/{id}.mp3"),
                cover: String::new(),
                lyrics: String::new(),
            })
            .collect();
        let album = Album {
            id: "x".into(),
            title: "X".into(),
            year: 2000,
            description: String::new(),
            cover: String::new(),
            tracks,
        };
        App::new(vec![album], Box::new(backend.clone()))
    }

    fn press(app: &mut App, state: &mut EventLoopState, code: KeyCode) -> bool {
        let settings = config::Settings::default();
        handle_key_event(KeyEvent::new(code, KeyModifiers::NONE), &settings, app, state)
    }

    #[test]
    fn home_enter_opens_archive_and_escape_returns() {
        let backend = FakeBackend::new();
        let mut app = app(&backend);
        let mut state = EventLoopState::new(&app);

        press(&mut app, &mut state, KeyCode::Enter);
        assert!(app.is_archive_visible());
        assert!(!app.is_modal_open());

        press(&mut app, &mut state, KeyCode::Esc);
        assert!(!app.is_archive_visible());
    }

    #[test]
    fn archive_navigation_and_gg() {
        let backend = FakeBackend::new();
        let mut app = app(&backend);
        let mut state = EventLoopState::new(&app);
        press(&mut app, &mut state, KeyCode::Enter);

        press(&mut app, &mut state, KeyCode::Char('G'));
        assert_eq!(app.selected, 2);
        press(&mut app, &mut state, KeyCode::Char('j'));
        assert_eq!(app.selected, 0);
        press(&mut app, &mut state, KeyCode::Char('k'));
        assert_eq!(app.selected, 2);

        press(&mut app, &mut state, KeyCode::Char('g'));
        assert_eq!(app.selected, 2);
        press(&mut app, &mut state, KeyCode::Char('g'));
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn modal_keys_drive_playback() {
        let backend = FakeBackend::new();
        let mut app = app(&backend);
        let mut state = EventLoopState::new(&app);
        press(&mut app, &mut state, KeyCode::Enter);
        press(&mut app, &mut state, KeyCode::Enter);
        assert!(app.is_modal_open());

        press(&mut app, &mut state, KeyCode::Char(' '));
        app.pump();
        assert!(app.is_playing());

        backend.emit(MediaEvent::DurationKnown(Duration::from_secs(100)));
        app.pump();
        press(&mut app, &mut state, KeyCode::Char('5'));
        assert_eq!(app.progress(), 50.0);
        press(&mut app, &mut state, KeyCode::Char('l'));
        assert_eq!(app.progress(), 55.0);
        assert_eq!(backend.calls().last(), Some(&Call::Seek(Duration::from_secs(55))));

        press(&mut app, &mut state, KeyCode::Char('s'));
        assert!(!app.is_playing());
        assert!(app.has_session());

        press(&mut app, &mut state, KeyCode::Esc);
        assert!(!app.is_modal_open());
        assert!(app.is_archive_visible());
        assert_eq!(backend.live(), 0);
    }

    #[test]
    fn shift_h_goes_home_from_the_modal() {
        let backend = FakeBackend::new();
        let mut app = app(&backend);
        let mut state = EventLoopState::new(&app);
        press(&mut app, &mut state, KeyCode::Enter);
        press(&mut app, &mut state, KeyCode::Enter);

        press(&mut app, &mut state, KeyCode::Char('H'));
        assert!(!app.is_archive_visible());
        assert!(!app.is_modal_open());
        assert_eq!(backend.live(), 0);
    }

    #[test]
    fn q_quits_from_any_view() {
        let backend = FakeBackend::new();
        let mut app = app(&backend);
        let mut state = EventLoopState::new(&app);
        assert!(press(&mut app, &mut state, KeyCode::Char('q')));
    }

    #[test]
    fn control_commands_map_to_store_operations() {
        let backend = FakeBackend::new();
        let mut app = app(&backend);
        app.open_selected();

        assert!(!handle_control_cmd(ControlCmd::Pause, &mut app));
        app.pump();
        assert!(!app.is_playing());

        handle_control_cmd(ControlCmd::Play, &mut app);
        app.pump();
        assert!(app.is_playing());

        handle_control_cmd(ControlCmd::Play, &mut app);
        app.pump();
        assert!(app.is_playing());

        handle_control_cmd(ControlCmd::PlayPause, &mut app);
        assert!(!app.is_playing());

        handle_control_cmd(ControlCmd::PlayPause, &mut app);
        app.pump();
        handle_control_cmd(ControlCmd::Stop, &mut app);
        assert!(!app.is_playing());
        assert!(app.has_session());

        assert!(handle_control_cmd(ControlCmd::Quit, &mut app));
    }
}
