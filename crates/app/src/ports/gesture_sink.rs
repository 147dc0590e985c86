//! Gesture sink port: consumers of confirmed gestures.

use std::sync::Arc;

use proxiwake_domain::event::GestureFired;

/// Notified exactly once per confirmed gesture.
pub trait GestureSink {
    fn gesture_fired(&self, event: GestureFired);
}

impl<T: GestureSink + ?Sized> GestureSink for Arc<T> {
    fn gesture_fired(&self, event: GestureFired) {
        (**self).gesture_fired(event);
    }
}
