use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::multipart::Form;
use reqwest::{Client, Response, StatusCode};

use crate::api::error::ApiError;
use crate::api::models::{Page, PageDraft, PagePreview, SearchResult};

/// HTTP client for the wiki server.
///
/// Cheap to clone; every clone shares the underlying connection pool, so
/// view producers can each own one.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client against `base_url` (scheme and authority, no
    /// trailing slash required).
    pub fn new(base_url: &str, connect_timeout: Duration, request_timeout: Duration) -> Self {
        let http = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .expect("Failed to build wiki API client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The ten most recently updated pages.
    pub async fn recent_pages(&self) -> Result<Vec<PagePreview>, ApiError> {
        let url = format!("{}/api/page/recent", self.base_url);
        let response = self.get_json(&url, &[]).await?;
        Self::check_status(&response)?;
        response.json().await.map_err(ApiError::from_reqwest)
    }

    /// Fetch one page by name. `include_files` pulls attachment metadata
    /// along; a missing page maps to [`ApiError::NotFound`].
    pub async fn page(&self, name: &str, include_files: bool) -> Result<Page, ApiError> {
        let url = format!("{}/api/page/{}", self.base_url, name);
        let query: &[(&str, &str)] = if include_files {
            &[("include_files", "true")]
        } else {
            &[]
        };
        let response = self.get_json(&url, query).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                name: name.to_string(),
            });
        }
        Self::check_status(&response)?;
        response.json().await.map_err(ApiError::from_reqwest)
    }

    /// Full-text search over page contents.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ApiError> {
        let url = format!("{}/api/search", self.base_url);
        let response = self.get_json(&url, &[("q", query)]).await?;
        Self::check_status(&response)?;
        response.json().await.map_err(ApiError::from_reqwest)
    }

    /// Create or update a page.
    ///
    /// The server keys off the presence of `pageUuid` in the form: with it
    /// the submission is an edit, without it a create.
    pub async fn save_page(&self, draft: &PageDraft) -> Result<(), ApiError> {
        let url = format!("{}/api/page", self.base_url);

        let mut form = Form::new()
            .text("pageName", draft.page_name.clone())
            .text("pageContent", draft.page_content.clone());
        if let Some(page_uuid) = draft.page_uuid {
            form = form.text("pageUuid", page_uuid.to_string());
        }

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;
        Self::check_status(&response)
    }

    /// Delete a page by name.
    pub async fn delete_page(&self, name: &str) -> Result<(), ApiError> {
        let url = format!("{}/api/page/{}", self.base_url, name);
        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                name: name.to_string(),
            });
        }
        Self::check_status(&response)
    }

    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Response, ApiError> {
        self.http
            .get(url)
            .query(query)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(ApiError::from_reqwest)
    }

    fn check_status(response: &Response) -> Result<(), ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::Status {
                status: status.as_u16(),
            })
        }
    }
}
