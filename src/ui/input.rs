//! Route-aware key dispatch.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::flash::FlashSlot;
use crate::ui::app::{App, Screen};
use crate::ui::route::Route;

pub fn handle_key<S: FlashSlot>(app: &mut App<S>, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Any keypress takes the toast down; the key still does its job.
    app.dismiss_toast();

    if is_ctrl_char(key, 'q') {
        app.request_quit();
        return;
    }
    if is_ctrl_char(key, 'k') {
        app.toggle_search();
        return;
    }
    if app.on_search_key(key) {
        return;
    }

    match app.screen() {
        Screen::Recent(_) => handle_recent_key(app, key),
        Screen::Page(_) => handle_page_key(app, key),
        Screen::Editor(_) => app.on_editor_key(key),
    }
}

fn handle_recent_key<S: FlashSlot>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Up | KeyCode::Char('k') => move_recent_selection(app, -1),
        KeyCode::Down | KeyCode::Char('j') => move_recent_selection(app, 1),
        KeyCode::Enter => {
            let selected = match app.screen() {
                Screen::Recent(recent) => recent.selected_page(),
                _ => None,
            };
            if let Some(name) = selected {
                app.navigate(Route::Page { name });
            }
        }
        KeyCode::Char('n') => app.navigate(Route::New { name: None }),
        _ => {}
    }
}

fn handle_page_key<S: FlashSlot>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Esc | KeyCode::Backspace => app.navigate(Route::Recent),
        KeyCode::Char('e') => {
            let name = match app.screen() {
                Screen::Page(page) => page.name().to_string(),
                _ => return,
            };
            app.navigate(Route::Edit { name });
        }
        KeyCode::Up => scroll_page(app, -1),
        KeyCode::Down => scroll_page(app, 1),
        KeyCode::PageUp => scroll_page(app, -10),
        KeyCode::PageDown => scroll_page(app, 10),
        _ => {}
    }
}

fn move_recent_selection<S: FlashSlot>(app: &mut App<S>, direction: i32) {
    if let Screen::Recent(recent) = app.screen_mut() {
        recent.move_selection(direction);
    }
}

fn scroll_page<S: FlashSlot>(app: &mut App<S>, delta: i16) {
    if let Screen::Page(page) = app.screen_mut() {
        page.scroll_by(delta);
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
