use crate::flash::message::FlashMessage;
use crate::flash::slot::FlashSlot;

/// Carries flash messages across navigation boundaries.
///
/// Navigation replaces the whole view, so a toast raised by the old view
/// would die with it. The relay persists the message into its slot first
/// and navigates second; the destination view then drains the slot
/// exactly once when it activates.
#[derive(Debug, Clone)]
pub struct FlashRelay<S> {
    slot: S,
}

impl<S: FlashSlot> FlashRelay<S> {
    pub fn new(slot: S) -> Self {
        Self { slot }
    }

    /// Persist `message`, then hand `destination` to `navigate`.
    ///
    /// The write strictly precedes navigation, so the destination finds
    /// the message no matter how quickly it activates. Storage failures
    /// downgrade to a log line and navigation still happens; losing a
    /// toast must never block a completed action.
    pub fn stash_and_navigate<D, N>(&self, message: &FlashMessage, destination: D, navigate: N)
    where
        N: FnOnce(D),
    {
        match serde_json::to_string(message) {
            Ok(raw) => {
                if let Err(error) = self.slot.write(&raw) {
                    tracing::warn!(%error, "failed to persist flash message");
                }
            }
            Err(error) => {
                tracing::warn!(%error, "failed to encode flash message");
            }
        }
        navigate(destination);
    }

    /// Drain the pending message, if any.
    ///
    /// Reading and clearing are one logical step: the slot is emptied
    /// before the payload is decoded, so a message is observable at most
    /// once however decoding goes. An undecodable payload degrades to
    /// [`FlashMessage::generic_error`] instead of surfacing a decode
    /// failure to the caller.
    pub fn take_pending(&self) -> Option<FlashMessage> {
        let raw = match self.slot.read() {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(error) => {
                tracing::warn!(%error, "failed to read flash slot");
                return None;
            }
        };
        if let Err(error) = self.slot.clear() {
            tracing::warn!(%error, "failed to clear flash slot");
        }
        match serde_json::from_str(&raw) {
            Ok(message) => Some(message),
            Err(error) => {
                tracing::warn!(%error, "discarding undecodable flash message");
                Some(FlashMessage::generic_error())
            }
        }
    }
}
