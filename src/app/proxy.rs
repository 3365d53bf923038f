//! Event delivery from walk tasks to the thread that owns the WebView.

use super::events::UserEvent;
use tao::event_loop::EventLoopProxy;

/// Sends backend events — walk nodes, terminal outcomes, errors, state
/// snapshots — toward the event loop.
///
/// A walk task fires its events and moves on; it has no way to recover if
/// the event loop is gone, so the trait returns nothing. Keeping the walk
/// side behind this trait is also what lets the integration tests run whole
/// walks against a channel instead of a tao event loop.
pub trait EventProxy: Send + Sync + Clone + 'static {
    fn send_event(&self, event: UserEvent);
}

/// The production implementation: tao's own proxy. A send only fails once
/// the event loop has shut down, at which point dropping the event is the
/// right thing to do; we just log it.
impl EventProxy for EventLoopProxy<UserEvent> {
    fn send_event(&self, event: UserEvent) {
        if let Err(e) = self.send_event(event) {
            tracing::warn!("Event loop is gone, dropping walk event: {}", e);
        }
    }
}
