//! One module per screen; the app owns exactly one at a time.

mod editor;
mod page;
mod recent;

pub use editor::{EditorAction, EditorBody, EditorField, EditorForm, EditorMode, EditorScreen};
pub use page::PageScreen;
pub use recent::RecentScreen;

use std::sync::mpsc::Sender;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::api::ApiClient;
use crate::fetch::FetchState;
use crate::ui::events::AppEvent;

/// Everything a screen needs to start fetching on activation.
#[derive(Clone)]
pub struct ScreenContext {
    pub client: ApiClient,
    pub runtime: Handle,
    /// Smoothing floor handed to every controller this context builds.
    pub min_visible: Duration,
    pub events: Sender<AppEvent>,
}

impl ScreenContext {
    /// Forward controller state changes into the app event channel so a
    /// settled fetch redraws without waiting for the next tick.
    pub(crate) fn bridge_state_changes<T, E>(&self, mut rx: watch::Receiver<FetchState<T, E>>)
    where
        T: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        let events = self.events.clone();
        self.runtime.spawn(async move {
            while rx.changed().await.is_ok() {
                if events.send(AppEvent::Refresh).is_err() {
                    break;
                }
            }
        });
    }
}

/// Step a selection index through a list, wrapping at both ends.
pub(crate) fn step_wrapping(current: usize, len: usize, direction: i32) -> usize {
    if len == 0 {
        return 0;
    }
    let current = current.min(len - 1);
    if direction.is_negative() {
        if current == 0 {
            len - 1
        } else {
            current - 1
        }
    } else if current + 1 >= len {
        0
    } else {
        current + 1
    }
}
