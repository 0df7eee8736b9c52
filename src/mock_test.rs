// src/mock_test.rs

//! Full mock test builder.
//!
//! A mock test picks a fixed number of questions of every kind, one skill
//! per step: Speaking, Writing, Reading, then Listening.

use serde_json::Value;
use validator::Validate;

use crate::api::Payload;
use crate::error::AdminError;
use crate::models::question::{QuestionKind, Skill};
use crate::picker::CrossReferencePicker;
use crate::resources::{Draft, not_blank};

/// Number of questions of `kind` a full mock test must contain.
pub fn required_count(kind: QuestionKind) -> usize {
    use QuestionKind::*;
    match kind {
        ReadAloud => 6,
        RepeatSentence => 10,
        DescribeImage => 5,
        RetellLecture => 2,
        AnswerShortQuestion => 5,
        SummarizeWrittenText => 2,
        WriteEssay => 1,
        ReadWriteFillBlanks => 5,
        ReadingMcqMultiple => 2,
        ReorderParagraphs => 2,
        ReadingFillBlanks => 4,
        ReadingMcqSingle => 1,
        SummarizeSpokenText => 1,
        ListeningMcqMultiple => 2,
        ListeningFillBlanks => 2,
        HighlightCorrectSummary => 1,
        ListeningMcqSingle => 2,
        SelectMissingWord => 1,
        HighlightIncorrectWords => 2,
        WriteFromDictation => 3,
    }
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct MockTestDraft {
    #[validate(length(max = 200), custom(function = not_blank))]
    pub title: String,

    pub picker: CrossReferencePicker,

    step: usize,
}

impl Default for MockTestDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTestDraft {
    /// Empty draft on the first step; every kind capped at its required count.
    pub fn new() -> Self {
        let picker = QuestionKind::ALL
            .iter()
            .fold(CrossReferencePicker::new(QuestionKind::ALL.to_vec()), |picker, kind| {
                picker.with_cap(*kind, required_count(*kind))
            });
        Self {
            title: String::new(),
            picker,
            step: 0,
        }
    }

    pub fn current_step(&self) -> Skill {
        Skill::ALL[self.step]
    }

    /// Outstanding count per kind of `skill`; empty when the step is complete.
    pub fn missing(&self, skill: Skill) -> Vec<(QuestionKind, usize)> {
        skill
            .kinds()
            .into_iter()
            .filter_map(|kind| {
                let have = self.picker.selected(kind).len();
                let need = required_count(kind);
                (have < need).then_some((kind, need - have))
            })
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        Skill::ALL.iter().all(|skill| self.missing(*skill).is_empty())
    }

    /// Advances to the next skill once the current one is complete.
    pub fn next_step(&mut self) -> Result<Skill, AdminError> {
        let missing = self.missing(self.current_step());
        if !missing.is_empty() {
            return Err(AdminError::Validation(describe_missing(self.current_step(), &missing)));
        }
        if self.step + 1 < Skill::ALL.len() {
            self.step += 1;
        }
        Ok(self.current_step())
    }

    pub fn prev_step(&mut self) -> Skill {
        self.step = self.step.saturating_sub(1);
        self.current_step()
    }
}

fn describe_missing(skill: Skill, missing: &[(QuestionKind, usize)]) -> String {
    let parts: Vec<String> = missing
        .iter()
        .map(|(kind, count)| format!("{} more {}", count, kind.short_code()))
        .collect();
    format!("{} step is incomplete: select {}", skill, parts.join(", "))
}

impl Draft for MockTestDraft {
    fn check(&self, _creating: bool) -> Result<(), AdminError> {
        self.validate()?;
        for skill in Skill::ALL {
            let missing = self.missing(skill);
            if !missing.is_empty() {
                return Err(AdminError::Validation(describe_missing(skill, &missing)));
            }
        }
        Ok(())
    }

    fn payload(&self, _creating: bool) -> Result<Payload, AdminError> {
        let mut object = self.picker.selection_json();
        object.insert("title".to_string(), Value::String(self.title.trim().to_string()));
        Ok(Payload::Json(Value::Object(object)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_counts_add_up() {
        let total: usize = QuestionKind::ALL.iter().map(|k| required_count(*k)).sum();
        assert_eq!(total, 59);
    }

    #[test]
    fn new_draft_reports_every_kind_missing() {
        let draft = MockTestDraft::new();
        assert_eq!(draft.current_step(), Skill::Speaking);
        assert_eq!(draft.missing(Skill::Writing), vec![
            (QuestionKind::SummarizeWrittenText, 2),
            (QuestionKind::WriteEssay, 1),
        ]);
        assert!(!draft.is_complete());
    }
}
