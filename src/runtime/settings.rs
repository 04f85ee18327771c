use crate::config;

/// Load and validate settings. Logging is not up yet, so problems go to stderr.
pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("zeroday: invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("zeroday: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}
