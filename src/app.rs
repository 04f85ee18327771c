//! Application module: exposes the store used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the archive, the view
//! flags and the playback controller.

mod model;

pub use model::*;
