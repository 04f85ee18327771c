use std::sync::mpsc::{self, Receiver};

use crate::audio::{MediaBackend, MediaElement, MediaEvent, PlayRequest, Preload};

/// One live binding between a source and a media element.
///
/// Acquiring a session subscribes to the element's notifications; dropping it
/// pauses, clears the source and unsubscribes before the element itself is
/// released, so nothing can be delivered for a session that is gone.
pub(super) struct Session {
    source: String,
    element: Box<dyn MediaElement>,
    events: Receiver<MediaEvent>,
    pending_play: Option<PlayRequest>,
}

impl Session {
    pub(super) fn acquire(backend: &dyn MediaBackend, source: &str) -> Self {
        let mut element = backend.create(source);
        element.set_preload(Preload::Metadata);
        let (tx, events) = mpsc::channel();
        element.subscribe(tx);
        Self {
            source: source.to_string(),
            element,
            events,
            pending_play: None,
        }
    }

    pub(super) fn source(&self) -> &str {
        &self.source
    }

    pub(super) fn element(&mut self) -> &mut dyn MediaElement {
        self.element.as_mut()
    }

    pub(super) fn request_play(&mut self) {
        self.pending_play = Some(self.element.play());
    }

    pub(super) fn cancel_play(&mut self) {
        self.pending_play = None;
    }

    pub(super) fn has_pending_play(&self) -> bool {
        self.pending_play.is_some()
    }

    /// Outcome of the pending play request, once it has one.
    pub(super) fn poll_play(&mut self) -> Option<Result<(), crate::audio::PlayRejected>> {
        let outcome = self.pending_play.as_ref()?.try_resolve()?;
        self.pending_play = None;
        Some(outcome)
    }

    /// Notifications queued since the last drain.
    pub(super) fn drain_events(&self) -> Vec<MediaEvent> {
        self.events.try_iter().collect()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.element.pause();
        self.element.clear_source();
        self.element.unsubscribe();
    }
}
