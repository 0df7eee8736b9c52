// src/models/section.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Entity;
use super::question::{QuestionKind, QuestionRef};

/// A named bundle of question references, one array per bucket.
///
/// Used for sectional tests (one skill's buckets) and full mock tests (all
/// buckets). Bucket arrays and any other backend attributes are kept in
/// `fields` and read through [`Section::bucket`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub title: String,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Full mock tests share the section document shape.
pub type MockTest = Section;

impl Section {
    /// References held in `kind`'s bucket. Entries that are neither an id
    /// nor a question document are skipped.
    pub fn bucket(&self, kind: QuestionKind) -> Vec<QuestionRef> {
        match self.fields.get(kind.bucket_key()) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| serde_json::from_value::<QuestionRef>(item.clone()).ok())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Kinds whose bucket key is present, in dashboard order.
    pub fn kinds_present(&self) -> Vec<QuestionKind> {
        QuestionKind::ALL
            .iter()
            .copied()
            .filter(|kind| self.fields.contains_key(kind.bucket_key()))
            .collect()
    }

    pub fn reference_count(&self) -> usize {
        QuestionKind::ALL.iter().map(|kind| self.bucket(*kind).len()).sum()
    }
}

impl Entity for Section {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn title(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_read_ids_and_documents() {
        let section: Section = serde_json::from_value(serde_json::json!({
            "_id": "s1",
            "title": "Listening Set 1",
            "summarizeSpokenText": ["q1"],
            "highlightCorrectSummary": [{ "_id": "q2", "title": "Bees" }],
            "createdAt": "2024-01-01"
        }))
        .unwrap();

        assert_eq!(section.bucket(QuestionKind::SummarizeSpokenText).len(), 1);
        assert_eq!(
            section.bucket(QuestionKind::HighlightCorrectSummary)[0].label(),
            "Bees"
        );
        assert!(section.bucket(QuestionKind::ReadAloud).is_empty());
        assert_eq!(section.reference_count(), 2);
        assert_eq!(
            section.kinds_present(),
            vec![QuestionKind::SummarizeSpokenText, QuestionKind::HighlightCorrectSummary]
        );
    }

    #[test]
    fn virtual_id_does_not_clash_with_mongo_id() {
        let sections: Vec<Section> = serde_json::from_value(serde_json::json!([
            { "_id": "s1", "id": "s1", "title": "Listening Set 1", "writeFromDictation": ["q1"] },
            { "_id": "s2", "title": "Listening Set 2" }
        ]))
        .unwrap();

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].id.as_deref(), Some("s1"));
        assert_eq!(sections[0].bucket(QuestionKind::WriteFromDictation).len(), 1);
    }
}
