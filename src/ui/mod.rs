//! Terminal UI: synchronous event loop over async fetches.

pub mod app;
pub mod events;
pub mod input;
pub mod layout;
pub mod render;
pub mod route;
pub mod screens;
pub mod search;
pub mod terminal;
pub mod theme;
pub mod toast;
pub mod worker;

use std::io;

use tokio::runtime::Handle;

use crate::api::ApiClient;
use crate::config::Config;
use crate::flash::{FileSlot, FlashRelay};
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::route::Route;
use crate::ui::screens::ScreenContext;
use crate::ui::terminal::setup_terminal;

/// Run the UI until quit. Blocks the calling thread; all async work
/// happens on `runtime`.
pub fn run(config: &Config, runtime: Handle) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;

    let tick_rate = config.ui.tick_rate();
    let events = EventHandler::new(tick_rate);

    let client = ApiClient::new(
        &config.server.base_url,
        config.server.connect_timeout(),
        config.server.request_timeout(),
    );
    let mutations = worker::spawn(&runtime, client.clone(), events.sender());
    let ctx = ScreenContext {
        client,
        runtime,
        min_visible: config.ui.min_loading(),
        events: events.sender(),
    };
    let relay = FlashRelay::new(FileSlot::in_state_dir());
    let mut app = App::new(ctx, relay, mutations, config.ui.toast_ttl(), Route::Recent);

    loop {
        terminal.draw(|frame| render::draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(AppEvent::Key(key)) => input::handle_key(&mut app, key),
            Ok(AppEvent::Tick) => app.on_tick(),
            Ok(AppEvent::Refresh) => app.on_refresh(),
            // ratatui re-measures on the next draw; nothing to do here.
            Ok(AppEvent::Resize(_, _)) => {}
            Ok(AppEvent::Mutation(outcome)) => app.on_mutation(outcome),
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    drop(guard);
    Ok(())
}
