//! Playback session controller and time formatting.
//!
//! `PlaybackController` is the only owner of a media element. It keeps the
//! play flag, elapsed time, duration and progress in step with the element's
//! notifications and guarantees that at most one element is alive.

mod controller;
mod session;
pub mod time;

pub use controller::{PlaybackController, PlaybackState, progress_percent};
