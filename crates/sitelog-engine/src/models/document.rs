use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A supporting document reduced to its AI-extracted summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestedDoc {
    pub id: Uuid,
    pub name: String,
    /// File extension, shown as the document badge.
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Extracted summary, not the original file text.
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    pub name: String,
    pub doc_type: String,
    pub content: String,
}

impl NewDocument {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            doc_type: doc_type_for(&name),
            name,
            content: content.into(),
        }
    }

    pub(crate) fn into_doc(self, id: Uuid, timestamp: OffsetDateTime) -> IngestedDoc {
        IngestedDoc {
            id,
            name: self.name,
            doc_type: self.doc_type,
            content: self.content,
            timestamp,
        }
    }
}

/// Text after the last `.`; a name without a dot is its own type.
pub fn doc_type_for(name: &str) -> String {
    match name.rsplit('.').next() {
        Some(ext) if !ext.is_empty() => ext.to_string(),
        _ => "Unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("schedule.xlsx", "xlsx")]
    #[case("minutes.final.docx", "docx")]
    #[case("README", "README")]
    #[case("trailing.", "Unknown")]
    #[case("", "Unknown")]
    fn doc_types(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(doc_type_for(name), expected);
    }

    #[test]
    fn stored_type_field_is_named_type() {
        let doc =
            NewDocument::new("a.pdf", "summary").into_doc(Uuid::nil(), OffsetDateTime::UNIX_EPOCH);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["type"], "pdf");
        assert_eq!(json["timestamp"], "1970-01-01T00:00:00Z");
    }
}
