use std::env;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::{MediaBackend, NullBackend, RodioBackend};
use crate::catalog;
use crate::config;
use crate::mpris::ControlCmd;

mod event_loop;
mod mpris_sync;
mod settings;

const DEFAULT_CATALOG: &str = "archive.json";
const USAGE: &str = "usage: zeroday [CATALOG] | zeroday --dump-config | zeroday --help";

/// What the command line asked for.
#[derive(Debug, PartialEq)]
enum Command {
    Run(Option<String>),
    DumpConfig,
    Help,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, String> {
    let Some(arg) = args.next() else {
        return Ok(Command::Run(None));
    };
    let command = match arg.as_str() {
        "--dump-config" => Command::DumpConfig,
        "-h" | "--help" => Command::Help,
        flag if flag.starts_with('-') && flag != "-" => {
            return Err(format!("zeroday: unknown option {flag}\n{USAGE}"));
        }
        _ => Command::Run(Some(arg)),
    };
    if let Some(extra) = args.next() {
        return Err(format!("zeroday: unexpected argument {extra}\n{USAGE}"));
    }
    Ok(command)
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let command = match parse_args(env::args().skip(1)) {
        Ok(command) => command,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };
    let arg = match command {
        Command::Help => {
            println!("{USAGE}");
            return Ok(());
        }
        Command::DumpConfig => {
            print!("{}", settings::load_settings().to_toml()?);
            return Ok(());
        }
        Command::Run(arg) => arg,
    };

    let settings = settings::load_settings();

    let _log_guard = crate::logging::init(&settings.logging);
    info!("zeroday starting");

    let catalog_path = catalog_path(arg, &settings.catalog);
    let albums = catalog::load(&catalog_path)?;
    let media_root = media_root(&catalog_path, &settings.catalog);

    let backend = open_backend(media_root, Duration::from_millis(settings.audio.tick_ms));
    let mut app = App::new(albums, backend);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    mpris_sync::update_mpris(&mpris, &app);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new(&app);
        event_loop::run(&mut terminal, &settings, &mut app, &mpris, &control_rx, &mut state)
    })();

    // Release the audio session before the terminal is restored.
    app.go_home();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("zeroday exiting");
    run_result
}

/// First argument, then `catalog.path`, then `archive.json` in the working directory.
fn catalog_path(arg: Option<String>, catalog: &config::CatalogSettings) -> PathBuf {
    arg.map(PathBuf::from)
        .or_else(|| catalog.path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG))
}

/// `catalog.media_root`, else the directory containing the catalog.
fn media_root(catalog_path: &Path, catalog: &config::CatalogSettings) -> PathBuf {
    if let Some(root) = &catalog.media_root {
        return root.clone();
    }
    match catalog_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn open_backend(media_root: PathBuf, tick: Duration) -> Box<dyn MediaBackend> {
    match RodioBackend::open_default(media_root, tick) {
        Ok(backend) => Box::new(backend),
        Err(e) => {
            warn!("{e}; playback disabled");
            Box::new(NullBackend)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parse_args_recognizes_commands() {
        assert_eq!(parse_args(args(&[])), Ok(Command::Run(None)));
        assert_eq!(
            parse_args(args(&["data/archive.json"])),
            Ok(Command::Run(Some("data/archive.json".into())))
        );
        assert_eq!(parse_args(args(&["--dump-config"])), Ok(Command::DumpConfig));
        assert_eq!(parse_args(args(&["--help"])), Ok(Command::Help));
        assert_eq!(parse_args(args(&["-h"])), Ok(Command::Help));
    }

    #[test]
    fn parse_args_rejects_unknown_options_instead_of_reading_them_as_catalogs() {
        let err = parse_args(args(&["--verbose"])).unwrap_err();
        assert!(err.contains("unknown option --verbose"));
        assert!(err.contains("usage: zeroday"));

        assert!(parse_args(args(&["a.json", "b.json"])).is_err());
    }

    #[test]
    fn catalog_path_prefers_argument_then_config() {
        let mut cfg = config::CatalogSettings::default();
        assert_eq!(catalog_path(None, &cfg), PathBuf::from("archive.json"));

        cfg.path = Some(PathBuf::from("/srv/archive.json"));
        assert_eq!(catalog_path(None, &cfg), PathBuf::from("/srv/archive.json"));
        assert_eq!(
            catalog_path(Some("other.json".into()), &cfg),
            PathBuf::from("other.json")
        );
    }

    #[test]
    fn media_root_defaults_to_catalog_directory() {
        let mut cfg = config::CatalogSettings::default();
        assert_eq!(
            media_root(Path::new("/srv/site/archive.json"), &cfg),
            PathBuf::from("/srv/site")
        );
        assert_eq!(media_root(Path::new("archive.json"), &cfg), PathBuf::from("."));

        cfg.media_root = Some(PathBuf::from("/srv/public"));
        assert_eq!(
            media_root(Path::new("/srv/site/archive.json"), &cfg),
            PathBuf::from("/srv/public")
        );
    }
}
