//! Background worker for page mutations.
//!
//! Saves and deletes run off the UI thread, one at a time, and come
//! back as app events. The sender side lives in the app; dropping it
//! shuts the worker down.

use std::sync::mpsc::Sender;

use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::api::{ApiClient, ApiError, PageDraft};
use crate::ui::events::AppEvent;

/// A requested change to the wiki.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Create or update a page.
    Save { draft: PageDraft },
    /// Delete a page by name.
    Delete { name: String },
}

/// Settled result of a mutation, delivered as an app event.
#[derive(Debug, Clone)]
pub enum MutationOutcome {
    Saved {
        name: String,
        /// True when the save created the page rather than updating it.
        created: bool,
        result: Result<(), ApiError>,
    },
    Deleted {
        name: String,
        result: Result<(), ApiError>,
    },
}

/// Number of mutations that may queue before `try_send` pushes back.
const MUTATION_QUEUE_DEPTH: usize = 8;

/// Spawn the mutation worker on `runtime`.
///
/// Outcomes are posted to `events`; if the UI side goes away the worker
/// exits on the next send.
pub fn spawn(
    runtime: &Handle,
    client: ApiClient,
    events: Sender<AppEvent>,
) -> mpsc::Sender<Mutation> {
    let (tx, mut rx) = mpsc::channel::<Mutation>(MUTATION_QUEUE_DEPTH);

    runtime.spawn(async move {
        while let Some(mutation) = rx.recv().await {
            let outcome = match mutation {
                Mutation::Save { draft } => {
                    let created = draft.page_uuid.is_none();
                    let name = draft.page_name.clone();
                    tracing::info!(page = %name, created, "saving page");
                    let result = client.save_page(&draft).await;
                    if let Err(error) = &result {
                        tracing::warn!(page = %name, %error, "save failed");
                    }
                    MutationOutcome::Saved {
                        name,
                        created,
                        result,
                    }
                }
                Mutation::Delete { name } => {
                    tracing::info!(page = %name, "deleting page");
                    let result = client.delete_page(&name).await;
                    if let Err(error) = &result {
                        tracing::warn!(page = %name, %error, "delete failed");
                    }
                    MutationOutcome::Deleted { name, result }
                }
            };
            if events.send(AppEvent::Mutation(outcome)).is_err() {
                break;
            }
        }
    });

    tx
}
