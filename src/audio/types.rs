//! Audio-related small types.
//!
//! Notifications emitted by a media element, the preload hint and the
//! one-shot play request used for best-effort playback start.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::time::Duration;

use thiserror::Error;

/// Real-time notification from a media element to its listener.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    /// Periodic position report while playing.
    Progress {
        position: Duration,
        /// Total length when the element knows it.
        duration: Option<Duration>,
    },
    /// Total length became known (metadata preload finished).
    DurationKnown(Duration),
    /// The source played through to its end.
    Ended,
}

/// How much of the source an element should load before playback is requested.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Preload {
    #[default]
    None,
    /// Only what is needed to know the total duration.
    Metadata,
}

/// Why a play request did not start playback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayRejected {
    #[error("no playable source")]
    NoSource,
    #[error("playback denied: {0}")]
    Denied(String),
    /// The element went away without answering.
    #[error("play request abandoned")]
    Abandoned,
}

pub type PlayResult = Result<(), PlayRejected>;

/// Pending outcome of `MediaElement::play`.
///
/// The caller polls it with `try_resolve`; an answer that never arrives keeps
/// the request pending forever.
#[derive(Debug)]
pub struct PlayRequest {
    rx: Receiver<PlayResult>,
}

/// Sending half of a `PlayRequest`, held by the element until it knows the outcome.
#[derive(Debug)]
pub struct PlayResponder {
    tx: Sender<PlayResult>,
}

impl PlayRequest {
    pub fn channel() -> (PlayResponder, PlayRequest) {
        let (tx, rx) = mpsc::channel();
        (PlayResponder { tx }, PlayRequest { rx })
    }

    /// A request that is already answered.
    pub fn resolved(result: PlayResult) -> Self {
        let (responder, request) = Self::channel();
        responder.resolve(result);
        request
    }

    /// `None` while pending, the outcome once the element has answered.
    pub fn try_resolve(&self) -> Option<PlayResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(PlayRejected::Abandoned)),
        }
    }
}

impl PlayResponder {
    pub fn resolve(self, result: PlayResult) {
        let _ = self.tx.send(result);
    }
}
