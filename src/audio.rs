//! Audio playback primitive.
//!
//! `MediaElement` is the one object that actually plays a source; the
//! playback controller owns at most one at a time. `RodioBackend` builds
//! elements on the default output device, `NullBackend` stands in when there
//! is none.

mod backend;
mod element;
mod probe;
mod sink;
mod thread;
mod types;

pub use backend::{NullBackend, RodioBackend};
pub use element::{MediaBackend, MediaElement};
pub use sink::resolve_source;
pub use types::*;

#[cfg(test)]
pub(crate) mod fake;
