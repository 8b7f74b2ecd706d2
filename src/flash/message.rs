use serde::{Deserialize, Serialize};

/// Visual category of a flash message.
///
/// Serialized lowercase; this is the wire form the slot stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
    Info,
    Warning,
    Default,
}

/// A one-shot notification carried across a navigation boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashMessage {
    /// Message category, stored under `type` like the wire format it
    /// mirrors.
    #[serde(rename = "type")]
    pub kind: FlashKind,
    /// Headline shown in the toast.
    pub title: String,
    /// Optional second line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FlashMessage {
    /// Success message with a title only.
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            title: title.into(),
            description: None,
        }
    }

    /// Error message with a title only.
    pub fn error(title: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            title: title.into(),
            description: None,
        }
    }

    /// Attach a description line.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Substitute shown when a persisted message cannot be decoded.
    pub fn generic_error() -> Self {
        Self::error("An unknown error occurred.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_kind_lowercase_under_type() {
        let message = FlashMessage::success("Page updated!")
            .with_description("Wiki page Foo was updated.");
        let json = serde_json::to_string(&message).unwrap();
        assert_eq!(
            json,
            r#"{"type":"success","title":"Page updated!","description":"Wiki page Foo was updated."}"#
        );
    }

    #[test]
    fn description_is_omitted_when_absent() {
        let json = serde_json::to_string(&FlashMessage::error("Failed to save page.")).unwrap();
        assert_eq!(json, r#"{"type":"error","title":"Failed to save page."}"#);
    }

    #[test]
    fn deserializes_all_kinds() {
        for (raw, kind) in [
            ("success", FlashKind::Success),
            ("error", FlashKind::Error),
            ("info", FlashKind::Info),
            ("warning", FlashKind::Warning),
            ("default", FlashKind::Default),
        ] {
            let json = format!(r#"{{"type":"{raw}","title":"t"}}"#);
            let message: FlashMessage = serde_json::from_str(&json).unwrap();
            assert_eq!(message.kind, kind);
        }
    }

    #[test]
    fn generic_error_has_fixed_title() {
        let message = FlashMessage::generic_error();
        assert_eq!(message.kind, FlashKind::Error);
        assert_eq!(message.title, "An unknown error occurred.");
        assert_eq!(message.description, None);
    }
}
