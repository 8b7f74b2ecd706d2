//! The wiki index: the ten most recently updated pages.

use crate::api::{ApiError, PagePreview};
use crate::fetch::{FetchController, FetchState};
use crate::ui::screens::{step_wrapping, ScreenContext};

/// Listing of recent pages with a movable selection.
///
/// The listing is fetched once per activation; there is nothing to key
/// the query on, so the dependency key is `()` and the attempt never
/// restarts for the screen's lifetime.
pub struct RecentScreen {
    controller: FetchController<(), Vec<PagePreview>, ApiError>,
    selected: usize,
}

impl RecentScreen {
    pub fn new(ctx: &ScreenContext) -> Self {
        let controller = FetchController::new(ctx.runtime.clone(), ctx.min_visible);
        ctx.bridge_state_changes(controller.subscribe());

        let client = ctx.client.clone();
        controller.query((), move || async move { client.recent_pages().await });

        Self {
            controller,
            selected: 0,
        }
    }

    pub fn state(&self) -> FetchState<Vec<PagePreview>, ApiError> {
        self.controller.state()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Move the selection up (`-1`) or down (`1`), wrapping.
    pub fn move_selection(&mut self, direction: i32) {
        if let FetchState::Success(pages) = self.controller.state() {
            self.selected = step_wrapping(self.selected, pages.len(), direction);
        }
    }

    /// Name of the page under the cursor, if the listing has settled.
    pub fn selected_page(&self) -> Option<String> {
        match self.controller.state() {
            FetchState::Success(pages) => pages.get(self.selected).map(|p| p.page_name.clone()),
            _ => None,
        }
    }
}
