//! `rodio`-backed media elements.
//!
//! Each element owns a paused `Sink` on the shared output stream plus a ticker
//! thread that turns sink state into `MediaEvent`s for the subscribed listener.

use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use crate::error::AudioError;

use super::element::{MediaBackend, MediaElement};
use super::probe::probe_duration;
use super::sink::{load_into, resolve_source};
use super::thread::spawn_ticker;
use super::types::{MediaEvent, PlayRejected, PlayRequest, Preload};

/// Opens elements on the default output device.
pub struct RodioBackend {
    stream: OutputStream,
    media_root: PathBuf,
    tick: Duration,
}

impl RodioBackend {
    pub fn open_default(media_root: PathBuf, tick: Duration) -> Result<Self, AudioError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);
        Ok(Self {
            stream,
            media_root,
            tick,
        })
    }
}

impl MediaBackend for RodioBackend {
    fn create(&self, source: &str) -> Box<dyn MediaElement> {
        let path = resolve_source(&self.media_root, source);
        let sink = Sink::connect_new(self.stream.mixer());
        sink.pause();

        let mut state = ElementState::new(sink, path);
        match load_into(&state.sink, &state.path, Duration::ZERO) {
            Ok(total) => {
                state.playable = true;
                state.duration = total;
            }
            Err(e) => warn!(error = %e, "audio source unavailable"),
        }

        let shared = Arc::new(Mutex::new(state));
        let ticker = spawn_ticker(shared.clone(), self.tick);
        Box::new(RodioElement {
            shared,
            ticker: Some(ticker),
        })
    }
}

/// Element state shared with the ticker thread.
pub(super) struct ElementState {
    sink: Sink,
    path: PathBuf,
    playable: bool,
    /// Position the queued source was skipped to; `sink.get_pos()` counts from here.
    offset: Duration,
    duration: Option<Duration>,
    preload: Preload,
    listener: Option<Sender<MediaEvent>>,
    duration_announced: bool,
    started: bool,
    ended: bool,
    pub(super) closed: bool,
}

impl ElementState {
    fn new(sink: Sink, path: PathBuf) -> Self {
        Self {
            sink,
            path,
            playable: false,
            offset: Duration::ZERO,
            duration: None,
            preload: Preload::None,
            listener: None,
            duration_announced: false,
            started: false,
            ended: false,
            closed: false,
        }
    }

    fn position(&self) -> Duration {
        self.offset + self.sink.get_pos()
    }

    fn reload(&mut self, at: Duration) -> bool {
        match load_into(&self.sink, &self.path, at) {
            Ok(total) => {
                self.offset = at;
                if self.duration.is_none() {
                    self.duration = total;
                }
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to reload audio source");
                self.playable = false;
                false
            }
        }
    }

    /// Notifications due since the last tick.
    pub(super) fn poll_events(&mut self) -> Vec<MediaEvent> {
        let mut events = Vec::new();
        if self.listener.is_none() || !self.playable {
            return events;
        }

        if self.preload == Preload::Metadata && !self.duration_announced {
            if let Some(d) = self.duration {
                events.push(MediaEvent::DurationKnown(d));
                self.duration_announced = true;
            }
        }

        if !self.started || self.ended {
            return events;
        }

        if self.sink.empty() {
            self.ended = true;
            events.push(MediaEvent::Ended);
        } else if !self.sink.is_paused() {
            events.push(MediaEvent::Progress {
                position: self.position(),
                duration: self.duration,
            });
        }
        events
    }

    /// Deliver `events`, dropping the listener if its receiver is gone.
    pub(super) fn deliver(&mut self, events: Vec<MediaEvent>) {
        let Some(tx) = self.listener.as_ref() else {
            return;
        };
        if events.into_iter().any(|e| tx.send(e).is_err()) {
            self.listener = None;
        }
    }
}

pub(super) type SharedElement = Arc<Mutex<ElementState>>;

pub struct RodioElement {
    shared: SharedElement,
    ticker: Option<JoinHandle<()>>,
}

impl RodioElement {
    fn state(&self) -> Option<MutexGuard<'_, ElementState>> {
        self.shared.lock().ok()
    }
}

impl MediaElement for RodioElement {
    fn set_preload(&mut self, preload: Preload) {
        let Some(mut s) = self.state() else {
            return;
        };
        s.preload = preload;
        if preload == Preload::Metadata && s.playable && s.duration.is_none() {
            s.duration = probe_duration(&s.path);
        }
    }

    fn subscribe(&mut self, listener: Sender<MediaEvent>) {
        if let Some(mut s) = self.state() {
            s.listener = Some(listener);
            s.duration_announced = false;
        }
    }

    fn unsubscribe(&mut self) {
        if let Some(mut s) = self.state() {
            s.listener = None;
        }
    }

    fn play(&mut self) -> PlayRequest {
        let Some(mut s) = self.state() else {
            return PlayRequest::resolved(Err(PlayRejected::Denied("element state poisoned".into())));
        };
        if !s.playable {
            return PlayRequest::resolved(Err(PlayRejected::NoSource));
        }
        if s.sink.empty() {
            let at = if s.ended { Duration::ZERO } else { s.offset };
            if !s.reload(at) {
                return PlayRequest::resolved(Err(PlayRejected::NoSource));
            }
        }
        s.sink.play();
        s.started = true;
        s.ended = false;
        debug!(path = ?s.path, "sink playing");
        PlayRequest::resolved(Ok(()))
    }

    fn pause(&mut self) {
        if let Some(s) = self.state() {
            s.sink.pause();
        }
    }

    fn seek(&mut self, position: Duration) {
        let Some(mut s) = self.state() else {
            return;
        };
        if !s.playable {
            return;
        }
        let position = match s.duration {
            Some(d) => position.min(d),
            None => position,
        };
        let was_playing = s.started && !s.ended && !s.sink.is_paused();
        if s.reload(position) {
            s.ended = false;
            if was_playing {
                s.sink.play();
            }
        }
    }

    fn clear_source(&mut self) {
        if let Some(mut s) = self.state() {
            s.sink.stop();
            s.playable = false;
            s.path = PathBuf::new();
        }
    }
}

impl Drop for RodioElement {
    fn drop(&mut self) {
        if let Some(mut s) = self.state() {
            s.closed = true;
            s.listener = None;
            s.sink.stop();
        }
        if let Some(h) = self.ticker.take() {
            let _ = h.join();
        }
    }
}

/// Backend used when no output device could be opened: every play request is denied.
pub struct NullBackend;

struct NullElement;

impl MediaBackend for NullBackend {
    fn create(&self, _source: &str) -> Box<dyn MediaElement> {
        Box::new(NullElement)
    }
}

impl MediaElement for NullElement {
    fn set_preload(&mut self, _preload: Preload) {}

    fn subscribe(&mut self, _listener: Sender<MediaEvent>) {}

    fn unsubscribe(&mut self) {}

    fn play(&mut self) -> PlayRequest {
        PlayRequest::resolved(Err(PlayRejected::Denied("no audio output".into())))
    }

    fn pause(&mut self) {}

    fn seek(&mut self, _position: Duration) {}

    fn clear_source(&mut self) {}
}
