//! Analysis result records.
//!
//! A `TextRecord` carries one unit of processed text plus whatever metadata
//! the producing stage attaches. Records nest: a topic record holds one
//! child record per member document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A processed-text record flowing between pipeline stages.
///
/// Metadata keys are stage-defined; a `BTreeMap` keeps serialized output
/// deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRecord {
    /// The processed text (for topic records, the topic label).
    pub text: String,

    /// Free-form metadata attached by the producing stage.
    #[serde(default)]
    pub meta: BTreeMap<String, Value>,

    /// Nested child records (for topic records, the member documents).
    #[serde(default)]
    pub children: Vec<TextRecord>,

    /// Name of the source the text originated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
}

impl TextRecord {
    /// Create a record with text only.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            meta: BTreeMap::new(),
            children: Vec::new(),
            source_name: None,
        }
    }

    /// Attach a metadata entry.
    pub fn with_meta(mut self, key: impl Into<String>, value: Value) -> Self {
        self.meta.insert(key.into(), value);
        self
    }

    /// Attach child records.
    pub fn with_children(mut self, children: Vec<TextRecord>) -> Self {
        self.children = children;
        self
    }

    /// Attach a source name.
    pub fn with_source_name(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = Some(source_name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_new() {
        let record = TextRecord::new("hello");
        assert_eq!(record.text, "hello");
        assert!(record.meta.is_empty());
        assert!(record.children.is_empty());
        assert!(record.source_name.is_none());
    }

    #[test]
    fn test_record_builders() {
        let record = TextRecord::new("topic")
            .with_meta("cluster_size", json!(3))
            .with_children(vec![TextRecord::new("doc")])
            .with_source_name("crawler");

        assert_eq!(record.meta["cluster_size"], json!(3));
        assert_eq!(record.children.len(), 1);
        assert_eq!(record.source_name.as_deref(), Some("crawler"));
    }

    #[test]
    fn test_record_serde_round_trip() {
        let record = TextRecord::new("topic")
            .with_meta("cluster_id", json!(-1))
            .with_children(vec![TextRecord::new("child").with_meta("k", json!("v"))]);

        let encoded = serde_json::to_string(&record).unwrap();
        let decoded: TextRecord = serde_json::from_str(&encoded).unwrap();
        assert_eq!(record, decoded);
    }

    #[test]
    fn test_record_deserialize_defaults() {
        let decoded: TextRecord = serde_json::from_str(r#"{"text": "bare"}"#).unwrap();
        assert_eq!(decoded.text, "bare");
        assert!(decoded.meta.is_empty());
        assert!(decoded.children.is_empty());
    }
}
