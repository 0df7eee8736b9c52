// src/resources/section.rs

use async_trait::async_trait;
use serde_json::Value;
use validator::Validate;

use super::{Draft, Resource, not_blank};
use crate::api::{self, Backend, Payload};
use crate::error::AdminError;
use crate::models::question::{QuestionKind, Skill};
use crate::models::section::Section;
use crate::picker::{self, CrossReferencePicker};

/// Sectional tests of one skill, e.g. `/listeningsection`.
pub struct SectionResource(pub Skill);

/// Picker over `skill`'s buckets with the section caps applied.
pub fn section_picker(skill: Skill) -> CrossReferencePicker {
    let picker = CrossReferencePicker::new(skill.kinds());
    match skill {
        Skill::Writing => picker.with_cap(QuestionKind::SummarizeWrittenText, 2),
        Skill::Listening => picker.with_cap(QuestionKind::SummarizeSpokenText, 1),
        _ => picker,
    }
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct SectionDraft {
    pub skill: Skill,

    #[validate(length(max = 200), custom(function = not_blank))]
    pub title: String,

    pub picker: CrossReferencePicker,
}

impl SectionDraft {
    pub fn new(skill: Skill) -> Self {
        Self {
            skill,
            title: String::new(),
            picker: section_picker(skill),
        }
    }
}

impl Draft for SectionDraft {
    fn check(&self, _creating: bool) -> Result<(), AdminError> {
        self.validate()?;
        Ok(())
    }

    fn payload(&self, _creating: bool) -> Result<Payload, AdminError> {
        let mut object = self.picker.selection_json();
        object.insert("title".to_string(), Value::String(self.title.trim().to_string()));
        Ok(Payload::Json(Value::Object(object)))
    }
}

#[async_trait]
impl Resource for SectionResource {
    type Item = Section;
    type Draft = SectionDraft;

    fn segment(&self) -> &str {
        self.0.section_resource()
    }

    fn label(&self) -> String {
        format!("{} sections", self.0.label())
    }

    fn view_fetches_detail(&self) -> bool {
        true
    }

    fn blank_draft(&self) -> SectionDraft {
        SectionDraft::new(self.0)
    }

    fn draft_from(&self, item: &Section) -> SectionDraft {
        let mut draft = SectionDraft::new(self.0);
        draft.title = item.title.clone();
        for kind in self.0.kinds() {
            draft.picker.set_selected(kind, item.bucket(kind));
        }
        draft
    }

    /// Loads the unused pool; ids already in the section are filtered out.
    async fn prepare_draft(
        &self,
        backend: &dyn Backend,
        draft: &mut SectionDraft,
        _editing: Option<&str>,
    ) -> Result<(), AdminError> {
        let path = format!("{}/get/unused", self.segment());
        let data = api::get(backend, &path).await.map_err(|e| {
            tracing::error!("Failed to load unused questions for {}: {:?}", self.label(), e);
            e
        })?;
        draft.picker.load_unused(picker::parse_unused(data));
        Ok(())
    }
}
