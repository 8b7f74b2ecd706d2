//! Wire models for the wiki API.
//!
//! Field names travel camelCase on the wire; timestamps are RFC 3339.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A full wiki page as served by `GET /api/page/{name}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub page_uuid: Uuid,
    pub page_name: String,
    pub page_content: String,
    /// Rendered table of contents; absent for pages without headings.
    #[serde(default)]
    pub page_toc: Option<String>,
    pub updated_at: DateTime<Utc>,
    /// The server omits this field entirely when the page has no
    /// attachments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub page_files: Vec<PageFile>,
}

/// Entry in the recent-pages listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePreview {
    pub page_uuid: Uuid,
    pub page_name: String,
    pub preview_text: String,
    pub updated_at: DateTime<Utc>,
}

/// Attachment metadata returned with `include_files=true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFile {
    pub file_uuid: Uuid,
    pub file_name: String,
    pub file_size: u64,
    pub content_type: String,
    pub updated_at: DateTime<Utc>,
}

/// Full-text search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub row_id: i64,
    pub title: String,
    pub body: String,
}

/// Fields submitted when creating or updating a page.
///
/// Goes out as a multipart form, not JSON; `page_uuid` is set only when
/// editing an existing page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDraft {
    pub page_uuid: Option<Uuid>,
    pub page_name: String,
    pub page_content: String,
}

/// Render a timestamp the way page footers show it, e.g.
/// `Mon Jan 5 03:04 PM`.
pub fn format_updated_at(updated_at: &DateTime<Utc>) -> String {
    updated_at.format("%a %b %-d %I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn page_decodes_camel_case_wire_form() {
        let json = r#"{
            "pageUuid": "9f8f26f5-6d1e-4b02-9e9b-12f1b6f1a100",
            "pageName": "HomePage",
            "pageContent": "<p>hello</p>",
            "pageToc": null,
            "updatedAt": "2025-11-02T10:30:00Z"
        }"#;
        let page: Page = serde_json::from_str(json).unwrap();
        assert_eq!(page.page_name, "HomePage");
        assert_eq!(page.page_toc, None);
        assert!(page.page_files.is_empty());
    }

    #[test]
    fn page_decodes_attached_files() {
        let json = r#"{
            "pageUuid": "9f8f26f5-6d1e-4b02-9e9b-12f1b6f1a100",
            "pageName": "Gallery",
            "pageContent": "<p>pics</p>",
            "pageToc": "<ul></ul>",
            "updatedAt": "2025-11-02T10:30:00Z",
            "pageFiles": [{
                "fileUuid": "52cf5b9b-46a9-4bd9-b861-5d5634040556",
                "fileName": "cat.jpg",
                "fileSize": 20480,
                "contentType": "image/jpeg",
                "updatedAt": "2025-11-02T10:30:00Z"
            }]
        }"#;
        let page: Page = serde_json::from_str(json).unwrap();
        assert_eq!(page.page_files.len(), 1);
        assert_eq!(page.page_files[0].content_type, "image/jpeg");
    }

    #[test]
    fn preview_list_decodes() {
        let json = r#"[{
            "pageUuid": "9f8f26f5-6d1e-4b02-9e9b-12f1b6f1a100",
            "pageName": "HomePage",
            "previewText": "hello there",
            "updatedAt": "2025-11-02T10:30:00Z"
        }]"#;
        let previews: Vec<PagePreview> = serde_json::from_str(json).unwrap();
        assert_eq!(previews[0].preview_text, "hello there");
    }

    #[test]
    fn search_results_decode() {
        let json = r#"[{"rowId": 3, "title": "HomePage", "body": "hello"}]"#;
        let results: Vec<SearchResult> = serde_json::from_str(json).unwrap();
        assert_eq!(results[0].row_id, 3);
        assert_eq!(results[0].title, "HomePage");
    }

    #[test]
    fn timestamp_formats_for_footers() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 5, 15, 4, 0).unwrap();
        assert_eq!(format_updated_at(&ts), "Mon Jan 5 03:04 PM");
    }
}
