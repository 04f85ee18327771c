//! Scripted in-memory backend for tests.
//!
//! Every element records its calls into a shared log, and the test drives
//! notifications and play outcomes by hand.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::Sender;
use std::time::Duration;

use super::element::{MediaBackend, MediaElement};
use super::types::{MediaEvent, PlayRejected, PlayRequest, PlayResponder, PlayResult, Preload};

/// How elements answer play requests.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlayPolicy {
    #[default]
    Accept,
    Reject,
    /// Keep the request pending until `FakeBackend::resolve_play` is called.
    Hold,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(String),
    Preload(Preload),
    Subscribe,
    Unsubscribe,
    Play,
    Pause,
    Seek(Duration),
    ClearSource,
    Drop,
}

#[derive(Default)]
pub struct FakeState {
    pub calls: Vec<Call>,
    pub live: usize,
    pub max_live: usize,
    pub policy: PlayPolicy,
    listener: Option<Sender<MediaEvent>>,
    held: Option<PlayResponder>,
    /// Elements dropped with their listener still attached.
    stale_listeners: usize,
}

#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Rc<RefCell<FakeState>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: PlayPolicy) -> Self {
        let backend = Self::default();
        backend.state.borrow_mut().policy = policy;
        backend
    }

    pub fn set_policy(&self, policy: PlayPolicy) {
        self.state.borrow_mut().policy = policy;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn live(&self) -> usize {
        self.state.borrow().live
    }

    pub fn max_live(&self) -> usize {
        self.state.borrow().max_live
    }

    /// Elements dropped while a listener was still attached.
    pub fn stale_listeners(&self) -> usize {
        self.state.borrow().stale_listeners
    }

    pub fn created(&self) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Create(_)))
            .count()
    }

    /// Send a notification the way the live element would. Returns false when
    /// no listener is attached or its receiver is gone.
    pub fn emit(&self, event: MediaEvent) -> bool {
        match self.state.borrow().listener.as_ref() {
            Some(tx) => tx.send(event).is_ok(),
            None => false,
        }
    }

    /// Answer a held play request.
    pub fn resolve_play(&self, result: PlayResult) {
        if let Some(responder) = self.state.borrow_mut().held.take() {
            responder.resolve(result);
        }
    }
}

impl MediaBackend for FakeBackend {
    fn create(&self, source: &str) -> Box<dyn MediaElement> {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::Create(source.to_string()));
        s.live += 1;
        s.max_live = s.max_live.max(s.live);
        Box::new(FakeElement {
            state: self.state.clone(),
            subscribed: false,
        })
    }
}

struct FakeElement {
    state: Rc<RefCell<FakeState>>,
    subscribed: bool,
}

impl FakeElement {
    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl MediaElement for FakeElement {
    fn set_preload(&mut self, preload: Preload) {
        self.record(Call::Preload(preload));
    }

    fn subscribe(&mut self, listener: Sender<MediaEvent>) {
        self.record(Call::Subscribe);
        self.state.borrow_mut().listener = Some(listener);
        self.subscribed = true;
    }

    fn unsubscribe(&mut self) {
        self.record(Call::Unsubscribe);
        self.state.borrow_mut().listener = None;
        self.subscribed = false;
    }

    fn play(&mut self) -> PlayRequest {
        self.record(Call::Play);
        let policy = self.state.borrow().policy.clone();
        match policy {
            PlayPolicy::Accept => PlayRequest::resolved(Ok(())),
            PlayPolicy::Reject => {
                PlayRequest::resolved(Err(PlayRejected::Denied("not allowed".into())))
            }
            PlayPolicy::Hold => {
                let (responder, request) = PlayRequest::channel();
                self.state.borrow_mut().held = Some(responder);
                request
            }
        }
    }

    fn pause(&mut self) {
        self.record(Call::Pause);
    }

    fn seek(&mut self, position: Duration) {
        self.record(Call::Seek(position));
    }

    fn clear_source(&mut self) {
        self.record(Call::ClearSource);
    }
}

impl Drop for FakeElement {
    fn drop(&mut self) {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::Drop);
        s.live -= 1;
        if self.subscribed {
            s.stale_listeners += 1;
        }
    }
}
