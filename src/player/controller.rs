use std::time::Duration;

use tracing::debug;

use crate::audio::{MediaBackend, MediaEvent};

use super::session::Session;

/// Coarse playback state, as reported to MPRIS and the status line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No session.
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Owns the single audio session and the progress state derived from it.
///
/// Every mutation happens through `&mut self` on the caller's thread: direct
/// operations, plus `pump`, which applies whatever the element reported
/// asynchronously since the last call.
pub struct PlaybackController {
    backend: Box<dyn MediaBackend>,
    session: Option<Session>,
    playing: bool,
    /// 0..=100
    progress: f64,
    elapsed: Duration,
    /// Duration reported by the element; zero until known.
    media_duration: Duration,
    /// Catalog duration shown until the element reports the real one.
    nominal_duration: Duration,
}

impl PlaybackController {
    pub fn new(backend: Box<dyn MediaBackend>) -> Self {
        Self {
            backend,
            session: None,
            playing: false,
            progress: 0.0,
            elapsed: Duration::ZERO,
            media_duration: Duration::ZERO,
            nominal_duration: Duration::ZERO,
        }
    }

    /// Replace any current session with one bound to `source`.
    ///
    /// An empty source leaves the controller idle.
    pub fn open(&mut self, source: &str, nominal_duration: Duration) {
        self.teardown();
        self.nominal_duration = nominal_duration;
        if source.is_empty() {
            debug!("no audio source, staying idle");
            return;
        }
        self.session = Some(Session::acquire(self.backend.as_ref(), source));
        debug!(source, "session opened");
    }

    pub fn close(&mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(source = session.source(), "session closed");
            drop(session);
        }
        self.playing = false;
        self.progress = 0.0;
        self.elapsed = Duration::ZERO;
        self.media_duration = Duration::ZERO;
        self.nominal_duration = Duration::ZERO;
    }

    /// Pause when playing, otherwise request playback. No-op without a session.
    pub fn toggle_play(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if self.playing {
            session.element().pause();
            session.cancel_play();
            self.playing = false;
        } else {
            session.request_play();
        }
    }

    /// Pause without releasing the session.
    pub fn stop(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.element().pause();
            session.cancel_play();
        }
        self.playing = false;
    }

    /// Jump to `percent` (0..=100) of the known duration.
    ///
    /// Ignored until the element has reported a duration. Progress moves to
    /// the requested spot right away instead of waiting for the next report.
    pub fn seek(&mut self, percent: f64) {
        if self.media_duration.is_zero() || !percent.is_finite() {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let percent = percent.clamp(0.0, 100.0);
        let target = self.media_duration.mul_f64(percent / 100.0);
        session.element().seek(target);
        self.progress = percent;
    }

    /// Apply the play request outcome and queued notifications.
    pub fn pump(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.poll_play() {
            Some(Ok(())) => {
                self.playing = true;
                debug!("playback started");
            }
            // Rejected starts leave the session paused; nothing to report upstream.
            Some(Err(reason)) => debug!(%reason, "play request rejected"),
            None => {}
        }
        for event in session.drain_events() {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::Progress { position, duration } => {
                self.elapsed = position;
                self.media_duration = duration.filter(|d| !d.is_zero()).unwrap_or_default();
                self.progress = progress_percent(self.elapsed, self.media_duration);
            }
            MediaEvent::DurationKnown(duration) => {
                self.media_duration = duration;
            }
            MediaEvent::Ended => {
                self.playing = false;
                self.progress = 0.0;
                self.elapsed = Duration::ZERO;
                if let Some(session) = self.session.as_mut() {
                    session.element().seek(Duration::ZERO);
                }
                debug!("track ended, rewound");
            }
        }
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Source bound to the live session.
    pub fn source(&self) -> Option<&str> {
        self.session.as_ref().map(Session::source)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_starting(&self) -> bool {
        self.session.as_ref().is_some_and(Session::has_pending_play)
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn media_duration(&self) -> Duration {
        self.media_duration
    }

    /// Real duration when known, otherwise the catalog's nominal one.
    pub fn total_duration(&self) -> Duration {
        if self.media_duration.is_zero() {
            self.nominal_duration
        } else {
            self.media_duration
        }
    }

    pub fn state(&self) -> PlaybackState {
        match (&self.session, self.playing) {
            (None, _) => PlaybackState::Stopped,
            (Some(_), true) => PlaybackState::Playing,
            (Some(_), false) => PlaybackState::Paused,
        }
    }
}

/// `elapsed / duration` as a percentage, 0 when the duration is unknown.
pub fn progress_percent(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        0.0
    } else {
        elapsed.as_secs_f64() / duration.as_secs_f64() * 100.0
    }
}
