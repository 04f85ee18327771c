use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::backend::SharedElement;

/// Spawn the per-element ticker that turns sink state into notifications.
///
/// The thread exits once the element is closed.
pub(super) fn spawn_ticker(shared: SharedElement, tick: Duration) -> JoinHandle<()> {
    thread::spawn(move || {
        loop {
            thread::sleep(tick);
            let Ok(mut state) = shared.lock() else {
                break;
            };
            if state.closed {
                break;
            }
            let events = state.poll_events();
            if !events.is_empty() {
                state.deliver(events);
            }
        }
    })
}
