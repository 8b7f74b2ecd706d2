use std::time::{Duration, Instant};

use crate::flash::FlashMessage;

/// The toast currently on screen, if any.
///
/// One toast at a time; showing a new one replaces the old, matching the
/// single-slot relay feeding it. Expiry is checked on UI ticks.
pub struct ToastState {
    active: Option<(FlashMessage, Instant)>,
    ttl: Duration,
}

impl ToastState {
    pub fn new(ttl: Duration) -> Self {
        Self { active: None, ttl }
    }

    /// Put a toast on screen, replacing any current one.
    pub fn show(&mut self, message: FlashMessage) {
        tracing::debug!(title = %message.title, "showing toast");
        self.active = Some((message, Instant::now()));
    }

    /// Expire the toast once it has been up for the full TTL.
    pub fn on_tick(&mut self) {
        if let Some((_, shown_at)) = &self.active {
            if shown_at.elapsed() >= self.ttl {
                self.active = None;
            }
        }
    }

    /// Remove the toast immediately.
    pub fn dismiss(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<&FlashMessage> {
        self.active.as_ref().map(|(message, _)| message)
    }
}
