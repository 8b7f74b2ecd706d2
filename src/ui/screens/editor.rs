//! Create/edit form for a wiki page.
//!
//! Editing an existing page fetches it first, through the same fetch
//! lifecycle the viewer uses; creating starts with an empty form. Saves
//! and deletes are handed to the mutation worker and settle back as app
//! events, so the form stays responsive and blocks only re-submission.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use uuid::Uuid;

use crate::api::{ApiError, Page, PageDraft};
use crate::fetch::{FetchController, FetchState};
use crate::ui::screens::ScreenContext;
use crate::ui::worker::Mutation;

/// Whether the screen creates a page or rewrites an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    New,
    Edit,
}

/// Which form field receives typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Name,
    Content,
}

/// The editable form and its submission bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorForm {
    /// Set when editing; its presence turns the save into an update.
    pub page_uuid: Option<Uuid>,
    pub name: String,
    pub content: String,
    pub focus: EditorField,
    pub dirty: bool,
    /// Set on the first Esc with unsaved changes; the next Esc discards.
    pub confirm_discard: bool,
    /// Set on the first Ctrl+D; the next Ctrl+D deletes.
    pub confirm_delete: bool,
    pub name_error: Option<String>,
    pub content_error: Option<String>,
    /// A save or delete is in flight; re-submission is blocked.
    pub submitting: bool,
    /// Last mutation failure, shown inline under the form.
    pub failure: Option<String>,
}

impl EditorForm {
    fn new(page_uuid: Option<Uuid>, name: String, content: String) -> Self {
        Self {
            page_uuid,
            name,
            content,
            focus: EditorField::Name,
            dirty: false,
            confirm_discard: false,
            confirm_delete: false,
            name_error: None,
            content_error: None,
            submitting: false,
            failure: None,
        }
    }
}

/// What the editor shows: the edit-mode prefetch drives the first two.
pub enum EditorBody {
    Loading,
    Failed(ApiError),
    Form(EditorForm),
}

/// What the app should do after a key was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    None,
    /// Leave the editor without saving.
    Cancel,
    /// Hand a save or delete to the mutation worker.
    Submit(Mutation),
}

pub struct EditorScreen {
    mode: EditorMode,
    /// Page being edited, or the pre-filled name for a new page.
    name: String,
    controller: Option<FetchController<String, Page, ApiError>>,
    body: EditorBody,
}

impl EditorScreen {
    /// Editor for a page that does not exist yet.
    pub fn new_page(_ctx: &ScreenContext, name: Option<String>) -> Self {
        let name = name.unwrap_or_default();
        Self {
            mode: EditorMode::New,
            name: name.clone(),
            controller: None,
            body: EditorBody::Form(EditorForm::new(None, name, String::new())),
        }
    }

    /// Editor for an existing page; fetches it before showing the form.
    pub fn edit(ctx: &ScreenContext, name: String) -> Self {
        let controller = FetchController::new(ctx.runtime.clone(), ctx.min_visible);
        ctx.bridge_state_changes(controller.subscribe());

        let client = ctx.client.clone();
        let fetch_name = name.clone();
        controller.query(name.clone(), move || async move {
            client.page(&fetch_name, false).await
        });

        Self {
            mode: EditorMode::Edit,
            name,
            controller: Some(controller),
            body: EditorBody::Loading,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &EditorBody {
        &self.body
    }

    /// Move the prefetch result into the form. Called on ticks and fetch
    /// refreshes; does nothing once the form exists.
    pub fn refresh(&mut self) {
        if !matches!(self.body, EditorBody::Loading) {
            return;
        }
        let Some(controller) = &self.controller else {
            return;
        };
        match controller.state() {
            FetchState::Loading => {}
            FetchState::Success(page) => {
                self.body = EditorBody::Form(EditorForm::new(
                    Some(page.page_uuid),
                    page.page_name,
                    page.page_content,
                ));
            }
            FetchState::Error(error) => {
                self.body = EditorBody::Failed(error);
            }
        }
    }

    /// The save settled with an error; unlock the form and show it.
    pub fn on_mutation_failed(&mut self, error: &ApiError) {
        if let EditorBody::Form(form) = &mut self.body {
            form.submitting = false;
            form.failure = Some(error.to_string());
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> EditorAction {
        let form = match &mut self.body {
            EditorBody::Form(form) => form,
            // Before the form exists only Esc means anything.
            _ => {
                return if key.code == KeyCode::Esc {
                    EditorAction::Cancel
                } else {
                    EditorAction::None
                };
            }
        };

        if form.submitting {
            return EditorAction::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('s') | KeyCode::Char('S') => Self::submit(form),
                KeyCode::Char('d') | KeyCode::Char('D') if self.mode == EditorMode::Edit => {
                    if form.confirm_delete {
                        form.submitting = true;
                        EditorAction::Submit(Mutation::Delete {
                            name: self.name.clone(),
                        })
                    } else {
                        form.confirm_delete = true;
                        form.confirm_discard = false;
                        EditorAction::None
                    }
                }
                _ => EditorAction::None,
            };
        }

        match key.code {
            KeyCode::Esc => {
                if form.confirm_delete {
                    form.confirm_delete = false;
                    EditorAction::None
                } else if form.dirty && !form.confirm_discard {
                    form.confirm_discard = true;
                    EditorAction::None
                } else {
                    EditorAction::Cancel
                }
            }
            KeyCode::Tab | KeyCode::BackTab => {
                form.focus = match form.focus {
                    EditorField::Name => EditorField::Content,
                    EditorField::Content => EditorField::Name,
                };
                form.confirm_discard = false;
                form.confirm_delete = false;
                EditorAction::None
            }
            KeyCode::Enter if form.focus == EditorField::Content => {
                form.content.push('\n');
                Self::mark_edited(form);
                EditorAction::None
            }
            KeyCode::Enter => {
                form.focus = EditorField::Content;
                EditorAction::None
            }
            KeyCode::Backspace => {
                match form.focus {
                    EditorField::Name => form.name.pop(),
                    EditorField::Content => form.content.pop(),
                };
                Self::mark_edited(form);
                EditorAction::None
            }
            KeyCode::Char(ch) => {
                match form.focus {
                    EditorField::Name => form.name.push(ch),
                    EditorField::Content => form.content.push(ch),
                }
                Self::mark_edited(form);
                EditorAction::None
            }
            _ => EditorAction::None,
        }
    }

    fn mark_edited(form: &mut EditorForm) {
        form.dirty = true;
        form.confirm_discard = false;
        form.confirm_delete = false;
        match form.focus {
            EditorField::Name => form.name_error = None,
            EditorField::Content => form.content_error = None,
        }
    }

    fn submit(form: &mut EditorForm) -> EditorAction {
        form.name_error = validate_page_name(&form.name).err();
        form.content_error = validate_page_content(&form.content).err();
        if form.name_error.is_some() || form.content_error.is_some() {
            return EditorAction::None;
        }

        form.submitting = true;
        form.failure = None;
        EditorAction::Submit(Mutation::Save {
            draft: PageDraft {
                page_uuid: form.page_uuid,
                page_name: form.name.clone(),
                page_content: form.content.clone(),
            },
        })
    }
}

/// Page names are CamelCase: an uppercase letter followed by ASCII
/// letters and digits.
pub fn validate_page_name(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            first.is_ascii_uppercase() && chars.all(|ch| ch.is_ascii_alphanumeric())
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err("Page name must be in CamelCase (e.g., MyPageName).".to_string())
    }
}

/// Content must have something besides whitespace in it.
pub fn validate_page_content(content: &str) -> Result<(), String> {
    if content.trim().is_empty() {
        Err("Page content must not be empty or whitespace.".to_string())
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::events::AppEvent;
    use std::sync::mpsc;
    use std::time::Duration;
    use tokio::runtime::Handle;

    fn test_context() -> (ScreenContext, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel();
        let ctx = ScreenContext {
            client: crate::api::ApiClient::new(
                "http://127.0.0.1:9",
                Duration::from_millis(100),
                Duration::from_millis(100),
            ),
            runtime: Handle::current(),
            min_visible: Duration::ZERO,
            events: tx,
        };
        (ctx, rx)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn type_str(screen: &mut EditorScreen, text: &str) {
        for ch in text.chars() {
            screen.on_key(key(KeyCode::Char(ch)));
        }
    }

    fn form(screen: &EditorScreen) -> &EditorForm {
        match screen.body() {
            EditorBody::Form(form) => form,
            _ => panic!("editor has no form"),
        }
    }

    #[tokio::test]
    async fn new_page_starts_with_prefilled_name() {
        let (ctx, _rx) = test_context();
        let screen = EditorScreen::new_page(&ctx, Some("FooBar".to_string()));
        assert_eq!(screen.mode(), EditorMode::New);
        assert_eq!(form(&screen).name, "FooBar");
        assert!(!form(&screen).dirty);
    }

    #[tokio::test]
    async fn edit_mode_prefetches_before_showing_the_form() {
        let (ctx, _rx) = test_context();
        let screen = EditorScreen::edit(&ctx, "FooBar".to_string());
        assert_eq!(screen.mode(), EditorMode::Edit);
        assert!(matches!(screen.body(), EditorBody::Loading));
    }

    #[tokio::test]
    async fn submit_rejects_invalid_name_and_blank_content() {
        let (ctx, _rx) = test_context();
        let mut screen = EditorScreen::new_page(&ctx, None);
        type_str(&mut screen, "lowercase");
        screen.on_key(key(KeyCode::Tab));
        type_str(&mut screen, "   ");

        assert_eq!(screen.on_key(ctrl('s')), EditorAction::None);
        assert!(form(&screen).name_error.is_some());
        assert!(form(&screen).content_error.is_some());
        assert!(!form(&screen).submitting);
    }

    #[tokio::test]
    async fn submit_produces_a_create_mutation() {
        let (ctx, _rx) = test_context();
        let mut screen = EditorScreen::new_page(&ctx, Some("FooBar".to_string()));
        screen.on_key(key(KeyCode::Tab));
        type_str(&mut screen, "hello world");

        let action = screen.on_key(ctrl('s'));
        match action {
            EditorAction::Submit(Mutation::Save { draft }) => {
                assert_eq!(draft.page_name, "FooBar");
                assert_eq!(draft.page_content, "hello world");
                assert_eq!(draft.page_uuid, None);
            }
            other => panic!("expected a save, got {other:?}"),
        }
        assert!(form(&screen).submitting);
        // Locked while the save is in flight.
        assert_eq!(screen.on_key(ctrl('s')), EditorAction::None);
    }

    #[tokio::test]
    async fn escape_asks_before_discarding_changes() {
        let (ctx, _rx) = test_context();
        let mut screen = EditorScreen::new_page(&ctx, None);
        type_str(&mut screen, "X");

        assert_eq!(screen.on_key(key(KeyCode::Esc)), EditorAction::None);
        assert!(form(&screen).confirm_discard);
        assert_eq!(screen.on_key(key(KeyCode::Esc)), EditorAction::Cancel);
    }

    #[tokio::test]
    async fn typing_withdraws_the_discard_confirmation() {
        let (ctx, _rx) = test_context();
        let mut screen = EditorScreen::new_page(&ctx, None);
        type_str(&mut screen, "X");
        screen.on_key(key(KeyCode::Esc));
        type_str(&mut screen, "y");
        assert!(!form(&screen).confirm_discard);
    }

    #[tokio::test]
    async fn clean_form_escape_cancels_immediately() {
        let (ctx, _rx) = test_context();
        let mut screen = EditorScreen::new_page(&ctx, Some("FooBar".to_string()));
        assert_eq!(screen.on_key(key(KeyCode::Esc)), EditorAction::Cancel);
    }

    #[tokio::test]
    async fn delete_requires_confirmation_and_only_in_edit_mode() {
        let (ctx, _rx) = test_context();
        let mut screen = EditorScreen::new_page(&ctx, Some("FooBar".to_string()));
        assert_eq!(screen.on_key(ctrl('d')), EditorAction::None);
        assert!(!form(&screen).confirm_delete);

        let mut screen = EditorScreen::edit(&ctx, "FooBar".to_string());
        // Hand-settle the prefetch so the form exists.
        screen.body = EditorBody::Form(EditorForm::new(
            Some(Uuid::new_v4()),
            "FooBar".to_string(),
            "body".to_string(),
        ));

        assert_eq!(screen.on_key(ctrl('d')), EditorAction::None);
        assert!(form(&screen).confirm_delete);
        assert_eq!(
            screen.on_key(ctrl('d')),
            EditorAction::Submit(Mutation::Delete {
                name: "FooBar".to_string()
            })
        );
    }

    #[tokio::test]
    async fn failed_mutation_unlocks_the_form() {
        let (ctx, _rx) = test_context();
        let mut screen = EditorScreen::new_page(&ctx, Some("FooBar".to_string()));
        screen.on_key(key(KeyCode::Tab));
        type_str(&mut screen, "hello");
        screen.on_key(ctrl('s'));
        assert!(form(&screen).submitting);

        screen.on_mutation_failed(&ApiError::Status { status: 502 });
        assert!(!form(&screen).submitting);
        assert_eq!(
            form(&screen).failure.as_deref(),
            Some("HTTP request failed with status code 502")
        );
    }

    #[test]
    fn page_name_validation_matches_camel_case() {
        assert!(validate_page_name("HomePage").is_ok());
        assert!(validate_page_name("A1").is_ok());
        assert!(validate_page_name("").is_err());
        assert!(validate_page_name("homePage").is_err());
        assert!(validate_page_name("Home Page").is_err());
        assert!(validate_page_name("Home-Page").is_err());
    }

    #[test]
    fn content_validation_rejects_whitespace_only() {
        assert!(validate_page_content("hello").is_ok());
        assert!(validate_page_content("  \n\t ").is_err());
        assert!(validate_page_content("").is_err());
    }
}
