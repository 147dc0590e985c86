//! In-process gesture bus backed by a tokio broadcast channel.

use tokio::sync::broadcast;

use proxiwake_domain::event::GestureFired;

use crate::ports::GestureSink;

/// In-process [`GestureSink`] fanning confirmed gestures out to every
/// subscriber through a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the event is simply dropped).
pub struct GestureBus {
    sender: broadcast::Sender<GestureFired>,
}

impl GestureBus {
    /// Create a new bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to gestures on this bus.
    ///
    /// Returns a receiver that will get all gestures fired *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<GestureFired> {
        self.sender.subscribe()
    }
}

impl GestureSink for GestureBus {
    fn gesture_fired(&self, event: GestureFired) {
        // broadcast::send fails only when there are zero receivers.
        let _ = self.sender.send(event);
    }
}
