use std::sync::mpsc::Sender;
use std::time::Duration;

use super::types::{MediaEvent, PlayRequest, Preload};

/// A single playback primitive bound to one audio source.
///
/// Only the playback controller talks to elements. Calls never fail: problems
/// surface as rejected play requests or as the absence of notifications.
pub trait MediaElement {
    fn set_preload(&mut self, preload: Preload);

    /// Attach the listener that receives notifications. Replaces any previous one.
    fn subscribe(&mut self, listener: Sender<MediaEvent>);

    /// Detach the listener. No notification is sent after this returns.
    fn unsubscribe(&mut self);

    /// Ask the element to start playing. The outcome arrives asynchronously.
    fn play(&mut self) -> PlayRequest;

    fn pause(&mut self);

    /// Jump to an absolute position, keeping the current play/pause state.
    fn seek(&mut self, position: Duration);

    /// Unbind the source and release whatever the element loaded for it.
    fn clear_source(&mut self);
}

/// Factory for media elements.
pub trait MediaBackend {
    fn create(&self, source: &str) -> Box<dyn MediaElement>;
}
