//! Application state: current route, active screen, overlays, and the
//! glue between mutation outcomes and flash-message navigation.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::flash::{FlashMessage, FlashRelay, FlashSlot};
use crate::ui::route::Route;
use crate::ui::screens::{
    EditorAction, EditorMode, EditorScreen, PageScreen, RecentScreen, ScreenContext,
};
use crate::ui::search::{SearchAction, SearchOverlay};
use crate::ui::toast::ToastState;
use crate::ui::worker::{Mutation, MutationOutcome};

/// The screen currently occupying the body region.
pub enum Screen {
    Recent(RecentScreen),
    Page(PageScreen),
    Editor(EditorScreen),
}

pub struct App<S> {
    should_quit: bool,
    route: Route,
    screen: Screen,
    search: Option<SearchOverlay>,
    toast: ToastState,
    relay: FlashRelay<S>,
    ctx: ScreenContext,
    mutations: mpsc::Sender<Mutation>,
    /// Animation counter for spinners; bumps every tick.
    animation_tick: u64,
}

impl<S: FlashSlot> App<S> {
    /// Build the app and activate the start route.
    ///
    /// Activation includes draining the flash slot, so a message stashed
    /// by a previous run (the process-restart analogue of a reload)
    /// shows up once right here.
    pub fn new(
        ctx: ScreenContext,
        relay: FlashRelay<S>,
        mutations: mpsc::Sender<Mutation>,
        toast_ttl: Duration,
        start: Route,
    ) -> Self {
        tracing::info!(route = %start, "activating start route");
        let screen = Self::build_screen(&ctx, &start);
        let mut app = Self {
            should_quit: false,
            route: start,
            screen,
            search: None,
            toast: ToastState::new(toast_ttl),
            relay,
            ctx,
            mutations,
            animation_tick: 0,
        };
        if let Some(message) = app.relay.take_pending() {
            app.toast.show(message);
        }
        app
    }

    fn build_screen(ctx: &ScreenContext, route: &Route) -> Screen {
        match route {
            Route::Recent => Screen::Recent(RecentScreen::new(ctx)),
            Route::Page { name } => Screen::Page(PageScreen::new(ctx, name.clone())),
            Route::Edit { name } => Screen::Editor(EditorScreen::edit(ctx, name.clone())),
            Route::New { name } => Screen::Editor(EditorScreen::new_page(ctx, name.clone())),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    pub fn toast(&self) -> &ToastState {
        &self.toast
    }

    pub fn search(&self) -> Option<&SearchOverlay> {
        self.search.as_ref()
    }

    pub fn animation_tick(&self) -> u64 {
        self.animation_tick
    }

    /// Activate `route`: tear down the old screen (dropping it detaches
    /// its controller), build the new one, and drain the flash slot.
    pub fn navigate(&mut self, route: Route) {
        tracing::info!(%route, "navigating");
        self.screen = Self::build_screen(&self.ctx, &route);
        self.route = route;
        if let Some(message) = self.relay.take_pending() {
            self.toast.show(message);
        }
    }

    /// Toggle the search overlay. Opening builds a fresh controller,
    /// closing drops it; the open flag is the overlay's existence.
    pub fn toggle_search(&mut self) {
        self.search = match self.search.take() {
            Some(_) => None,
            None => Some(SearchOverlay::open(&self.ctx)),
        };
    }

    /// Run a key through the search overlay, if one is open.
    ///
    /// Returns false when no overlay is open and the key is still
    /// unhandled.
    pub fn on_search_key(&mut self, key: crossterm::event::KeyEvent) -> bool {
        let Some(overlay) = &mut self.search else {
            return false;
        };
        match overlay.on_key(&self.ctx, key) {
            SearchAction::None => {}
            SearchAction::Close => self.search = None,
            SearchAction::Open(route) => {
                self.search = None;
                self.navigate(route);
            }
        }
        true
    }

    /// Run a key through the editor and act on the result.
    pub fn on_editor_key(&mut self, key: crossterm::event::KeyEvent) {
        let Screen::Editor(editor) = &mut self.screen else {
            return;
        };
        match editor.on_key(key) {
            EditorAction::None => {}
            EditorAction::Cancel => {
                let back = match editor.mode() {
                    EditorMode::Edit => Route::Page {
                        name: editor.name().to_string(),
                    },
                    EditorMode::New => Route::Recent,
                };
                self.navigate(back);
            }
            EditorAction::Submit(mutation) => self.submit_mutation(mutation),
        }
    }

    fn submit_mutation(&mut self, mutation: Mutation) {
        if let Err(error) = self.mutations.try_send(mutation) {
            tracing::warn!(%error, "mutation queue rejected request");
            if let Screen::Editor(editor) = &mut self.screen {
                editor.on_mutation_failed(&crate::api::ApiError::Transport {
                    message: "mutation worker unavailable".to_string(),
                });
            }
        }
    }

    pub fn on_tick(&mut self) {
        self.animation_tick = self.animation_tick.wrapping_add(1);
        self.toast.on_tick();
        self.refresh_screen();
    }

    /// A controller published a new state; fold it into the screen.
    pub fn on_refresh(&mut self) {
        self.refresh_screen();
    }

    fn refresh_screen(&mut self) {
        match &mut self.screen {
            Screen::Page(page) => {
                if let Some(route) = page.take_not_found_redirect() {
                    self.navigate(route);
                }
            }
            Screen::Editor(editor) => editor.refresh(),
            Screen::Recent(_) => {}
        }
    }

    pub fn dismiss_toast(&mut self) {
        self.toast.dismiss();
    }

    /// A background save or delete settled.
    ///
    /// Success stashes the confirmation and navigates through the relay,
    /// so the toast outlives the editor it came from; failure stays on
    /// the editor as inline text and navigation does not happen.
    pub fn on_mutation(&mut self, outcome: MutationOutcome) {
        match outcome {
            MutationOutcome::Saved {
                name,
                created,
                result: Ok(()),
            } => {
                let (title, verb) = if created {
                    ("Page created!", "created")
                } else {
                    ("Page updated!", "updated")
                };
                let message = FlashMessage::success(title)
                    .with_description(format!("Wiki page {name} was {verb}"));
                self.stash_and_navigate(message, Route::Page { name });
            }
            MutationOutcome::Deleted {
                name,
                result: Ok(()),
            } => {
                let message = FlashMessage::success("Page deleted!")
                    .with_description(format!("Wiki page {name} was deleted"));
                self.stash_and_navigate(message, Route::Recent);
            }
            MutationOutcome::Saved {
                result: Err(error), ..
            }
            | MutationOutcome::Deleted {
                result: Err(error), ..
            } => {
                if let Screen::Editor(editor) = &mut self.screen {
                    editor.on_mutation_failed(&error);
                }
            }
        }
    }

    fn stash_and_navigate(&mut self, message: FlashMessage, route: Route) {
        let mut destination = None;
        self.relay
            .stash_and_navigate(&message, route.to_string(), |path| {
                destination = Some(path);
            });
        // The navigate capability only records the path; the actual
        // transition happens here, after the relay returned.
        if let Some(path) = destination {
            match Route::parse(&path) {
                Some(route) => self.navigate(route),
                None => tracing::error!(%path, "flash destination did not parse"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiClient, ApiError};
    use crate::flash::{FlashKind, MemorySlot};
    use crate::ui::events::AppEvent;
    use std::sync::mpsc as std_mpsc;
    use tokio::runtime::Handle;

    struct Harness {
        app: App<MemorySlot>,
        slot: MemorySlot,
        mutation_rx: mpsc::Receiver<Mutation>,
        _event_rx: std_mpsc::Receiver<AppEvent>,
    }

    fn harness() -> Harness {
        let (event_tx, event_rx) = std_mpsc::channel();
        let (mutation_tx, mutation_rx) = mpsc::channel(8);
        let ctx = ScreenContext {
            // Nothing listens here; app tests never await the fetches.
            client: ApiClient::new(
                "http://127.0.0.1:9",
                Duration::from_millis(100),
                Duration::from_millis(100),
            ),
            runtime: Handle::current(),
            min_visible: Duration::ZERO,
            events: event_tx,
        };
        let slot = MemorySlot::new();
        let app = App::new(
            ctx,
            FlashRelay::new(slot.clone()),
            mutation_tx,
            Duration::from_secs(4),
            Route::Recent,
        );
        Harness {
            app,
            slot,
            mutation_rx,
            _event_rx: event_rx,
        }
    }

    #[tokio::test]
    async fn startup_activates_the_recent_screen() {
        let h = harness();
        assert_eq!(h.app.route(), &Route::Recent);
        assert!(matches!(h.app.screen(), Screen::Recent(_)));
        assert!(h.app.toast().active().is_none());
    }

    #[tokio::test]
    async fn save_success_navigates_and_shows_one_toast() {
        use crate::flash::FlashSlot as _;

        let mut h = harness();
        h.app.on_mutation(MutationOutcome::Saved {
            name: "FooBar".to_string(),
            created: false,
            result: Ok(()),
        });

        assert_eq!(
            h.app.route(),
            &Route::Page {
                name: "FooBar".to_string()
            }
        );
        let toast = h.app.toast().active().expect("toast after navigation");
        assert_eq!(toast.kind, FlashKind::Success);
        assert_eq!(toast.title, "Page updated!");
        assert_eq!(
            toast.description.as_deref(),
            Some("Wiki page FooBar was updated")
        );

        // The slot was drained by the activation; the next one finds
        // nothing.
        assert_eq!(h.slot.read().unwrap(), None);
        h.app.dismiss_toast();
        h.app.navigate(Route::Recent);
        assert!(h.app.toast().active().is_none());
    }

    #[tokio::test]
    async fn create_and_delete_use_their_own_wording() {
        let mut h = harness();
        h.app.on_mutation(MutationOutcome::Saved {
            name: "FooBar".to_string(),
            created: true,
            result: Ok(()),
        });
        assert_eq!(h.app.toast().active().unwrap().title, "Page created!");

        h.app.on_mutation(MutationOutcome::Deleted {
            name: "FooBar".to_string(),
            result: Ok(()),
        });
        assert_eq!(h.app.route(), &Route::Recent);
        let toast = h.app.toast().active().unwrap();
        assert_eq!(toast.title, "Page deleted!");
        assert_eq!(
            toast.description.as_deref(),
            Some("Wiki page FooBar was deleted")
        );
    }

    #[tokio::test]
    async fn save_failure_stays_on_the_editor() {
        let mut h = harness();
        h.app.navigate(Route::New {
            name: Some("FooBar".to_string()),
        });
        h.app.on_mutation(MutationOutcome::Saved {
            name: "FooBar".to_string(),
            created: true,
            result: Err(ApiError::Status { status: 500 }),
        });

        assert_eq!(
            h.app.route(),
            &Route::New {
                name: Some("FooBar".to_string())
            }
        );
        assert!(h.app.toast().active().is_none());
        match h.app.screen() {
            Screen::Editor(editor) => match editor.body() {
                crate::ui::screens::EditorBody::Form(form) => {
                    assert!(form.failure.is_some());
                }
                _ => panic!("editor lost its form"),
            },
            _ => panic!("left the editor on failure"),
        }
    }

    #[tokio::test]
    async fn editor_submit_reaches_the_mutation_channel() {
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

        let mut h = harness();
        h.app.navigate(Route::New {
            name: Some("FooBar".to_string()),
        });
        h.app
            .on_editor_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        h.app
            .on_editor_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        h.app
            .on_editor_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));

        match h.mutation_rx.try_recv() {
            Ok(Mutation::Save { draft }) => {
                assert_eq!(draft.page_name, "FooBar");
                assert_eq!(draft.page_content, "x");
            }
            other => panic!("expected a queued save, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn search_overlay_opens_and_closes() {
        let mut h = harness();
        assert!(h.app.search().is_none());
        h.app.toggle_search();
        assert!(h.app.search().is_some());
        h.app.toggle_search();
        assert!(h.app.search().is_none());
    }

    #[tokio::test]
    async fn stale_flash_message_shows_on_startup() {
        use crate::flash::FlashSlot as _;

        let (event_tx, _event_rx) = std_mpsc::channel();
        let (mutation_tx, _mutation_rx) = mpsc::channel(8);
        let slot = MemorySlot::new();
        slot.write(r#"{"type":"success","title":"Page updated!"}"#)
            .unwrap();

        let ctx = ScreenContext {
            client: ApiClient::new(
                "http://127.0.0.1:9",
                Duration::from_millis(100),
                Duration::from_millis(100),
            ),
            runtime: Handle::current(),
            min_visible: Duration::ZERO,
            events: event_tx,
        };
        let app = App::new(
            ctx,
            FlashRelay::new(slot.clone()),
            mutation_tx,
            Duration::from_secs(4),
            Route::Recent,
        );

        assert_eq!(app.toast().active().unwrap().title, "Page updated!");
        assert_eq!(slot.read().unwrap(), None);
    }
}
