//! A single wiki page.

use crate::api::{ApiError, Page};
use crate::fetch::{FetchController, FetchState};
use crate::ui::route::Route;
use crate::ui::screens::ScreenContext;

/// Viewer for one page, keyed by page name.
///
/// A missing page redirects to the new-page editor pre-filled with the
/// requested name, once per activation; every other failure renders as
/// a network error screen.
pub struct PageScreen {
    name: String,
    controller: FetchController<String, Page, ApiError>,
    scroll: u16,
    redirected: bool,
}

impl PageScreen {
    pub fn new(ctx: &ScreenContext, name: String) -> Self {
        let controller = FetchController::new(ctx.runtime.clone(), ctx.min_visible);
        ctx.bridge_state_changes(controller.subscribe());

        let client = ctx.client.clone();
        let fetch_name = name.clone();
        controller.query(name.clone(), move || async move {
            client.page(&fetch_name, true).await
        });

        Self {
            name,
            controller,
            scroll: 0,
            redirected: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> FetchState<Page, ApiError> {
        self.controller.state()
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn scroll_by(&mut self, delta: i16) {
        self.scroll = if delta.is_negative() {
            self.scroll.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll.saturating_add(delta as u16)
        };
    }

    /// Where to go instead, if the fetch settled as "no such page".
    ///
    /// Fires at most once per activation, so the app can follow the
    /// redirect without re-triggering it on every tick.
    pub fn take_not_found_redirect(&mut self) -> Option<Route> {
        if self.redirected {
            return None;
        }
        match self.controller.state() {
            FetchState::Error(error) if error.is_not_found() => {
                self.redirected = true;
                Some(Route::New {
                    name: Some(self.name.clone()),
                })
            }
            _ => None,
        }
    }
}
