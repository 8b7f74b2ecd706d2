//! The Ctrl+K search overlay.
//!
//! The overlay owns its own fetch controller, created when it opens and
//! dropped when it closes; while it is open, every edit of the query is
//! a key change and supersedes the previous attempt. An empty query is
//! answered locally with no results and no network call.

use crossterm::event::{KeyCode, KeyEvent};

use crate::api::{ApiError, SearchResult};
use crate::fetch::{FetchController, FetchState};
use crate::ui::route::Route;
use crate::ui::screens::{step_wrapping, ScreenContext};

/// What the app should do after the overlay handled a key.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchAction {
    None,
    Close,
    /// Close and go to the selected hit.
    Open(Route),
}

pub struct SearchOverlay {
    query: String,
    controller: FetchController<String, Vec<SearchResult>, ApiError>,
    selected: usize,
}

impl SearchOverlay {
    pub fn open(ctx: &ScreenContext) -> Self {
        let controller = FetchController::new(ctx.runtime.clone(), ctx.min_visible);
        ctx.bridge_state_changes(controller.subscribe());
        Self {
            query: String::new(),
            controller,
            selected: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Results to render: `None` while the query is empty.
    pub fn state(&self) -> Option<FetchState<Vec<SearchResult>, ApiError>> {
        if self.query.is_empty() {
            None
        } else {
            Some(self.controller.state())
        }
    }

    pub fn on_key(&mut self, ctx: &ScreenContext, key: KeyEvent) -> SearchAction {
        match key.code {
            KeyCode::Esc => return SearchAction::Close,
            KeyCode::Enter => {
                if let Some(name) = self.selected_hit() {
                    return SearchAction::Open(Route::Page { name });
                }
                return SearchAction::None;
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Backspace => {
                self.query.pop();
                self.restart(ctx);
            }
            KeyCode::Char(ch) => {
                self.query.push(ch);
                self.restart(ctx);
            }
            _ => {}
        }
        SearchAction::None
    }

    /// Start an attempt for the current query. Equal keys are suppressed
    /// by the controller, so retyping a deleted character is free.
    fn restart(&mut self, ctx: &ScreenContext) {
        self.selected = 0;
        if self.query.is_empty() {
            return;
        }
        let client = ctx.client.clone();
        let query = self.query.clone();
        self.controller.query(self.query.clone(), move || async move {
            client.search(&query).await
        });
    }

    fn move_selection(&mut self, direction: i32) {
        if let Some(FetchState::Success(hits)) = self.state() {
            self.selected = step_wrapping(self.selected, hits.len(), direction);
        }
    }

    fn selected_hit(&self) -> Option<String> {
        match self.state()? {
            FetchState::Success(hits) => hits.get(self.selected).map(|hit| hit.title.clone()),
            _ => None,
        }
    }
}
