//! Client for the wiki server's HTTP API.

mod client;
mod error;
mod models;

pub use client::ApiClient;
pub use error::ApiError;
pub use models::{format_updated_at, Page, PageDraft, PageFile, PagePreview, SearchResult};
