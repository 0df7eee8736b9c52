// src/resources/question.rs

use serde_json::{Map, Value, json};
use validator::Validate;

use super::{Draft, Resource, not_blank};
use crate::api::{Payload, Upload};
use crate::error::AdminError;
use crate::models::question::{AnswerOption, AnswerShape, Difficulty, Media, Question, QuestionKind};
use crate::reorder;

/// The collection of one question type, e.g. `/describeimage`.
pub struct QuestionResource(pub QuestionKind);

/// Question form. Only the fields relevant to `kind` are sent.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct QuestionDraft {
    pub kind: QuestionKind,

    #[validate(length(max = 300), custom(function = not_blank))]
    pub title: String,

    pub difficulty: Difficulty,
    pub is_predictive: bool,

    #[validate(length(max = 20000))]
    pub text: String,

    #[validate(length(max = 20000))]
    pub transcript: String,

    #[validate(length(max = 5000))]
    pub prompt: String,

    #[validate(length(max = 2000))]
    pub answer: String,

    pub answers: Vec<String>,
    pub options: Vec<AnswerOption>,

    /// Reorder paragraphs in their correct order.
    pub paragraphs: Vec<String>,

    pub image: Option<Upload>,
    pub audio: Option<Upload>,

    /// Media already stored for the question being edited.
    pub image_url: Option<String>,
    pub audio_url: Option<String>,
}

impl QuestionDraft {
    pub fn new(kind: QuestionKind) -> Self {
        Self {
            kind,
            title: String::new(),
            difficulty: Difficulty::default(),
            is_predictive: false,
            text: String::new(),
            transcript: String::new(),
            prompt: String::new(),
            answer: String::new(),
            answers: Vec::new(),
            options: Vec::new(),
            paragraphs: Vec::new(),
            image: None,
            audio: None,
            image_url: None,
            audio_url: None,
        }
    }

    /// Attaches a file to whichever media slot its field names.
    pub fn attach(&mut self, upload: Upload) {
        if upload.field == Media::Image.field() {
            self.image = Some(upload);
        } else {
            self.audio = Some(upload);
        }
    }

    fn check_content(&self) -> Result<(), AdminError> {
        use QuestionKind::*;
        let (field, value) = match self.kind {
            ReadAloud | SummarizeWrittenText | ReadingFillBlanks | ReadWriteFillBlanks
            | ReadingMcqSingle | ReadingMcqMultiple => ("Passage text", &self.text),
            WriteEssay => ("Essay prompt", &self.prompt),
            HighlightIncorrectWords => ("Transcript", &self.transcript),
            _ => return Ok(()),
        };
        if value.trim().is_empty() {
            return Err(AdminError::Validation(format!("{} is required", field)));
        }
        Ok(())
    }

    fn check_media(&self, creating: bool) -> Result<(), AdminError> {
        let Some(media) = self.kind.media() else {
            return Ok(());
        };
        let (upload, stored) = match media {
            Media::Image => (&self.image, &self.image_url),
            Media::Audio => (&self.audio, &self.audio_url),
        };
        if upload.is_some() || (!creating && stored.is_some()) {
            return Ok(());
        }
        let noun = match media {
            Media::Image => "An image",
            Media::Audio => "An audio",
        };
        Err(AdminError::Validation(format!("{} file is required", noun)))
    }

    fn check_answer(&self) -> Result<(), AdminError> {
        match self.kind.answer_shape() {
            AnswerShape::Open => Ok(()),
            AnswerShape::Text => {
                if self.answer.trim().is_empty() {
                    return Err(AdminError::Validation("Answer is required".to_string()));
                }
                Ok(())
            }
            AnswerShape::Words => {
                if self.answers.is_empty() {
                    return Err(AdminError::Validation("At least one answer word is required".to_string()));
                }
                if self.answers.iter().any(|word| word.trim().is_empty()) {
                    return Err(AdminError::Validation("Answer words cannot be blank".to_string()));
                }
                Ok(())
            }
            AnswerShape::SingleOption => {
                self.check_options()?;
                let correct = self.correct_count();
                if correct != 1 {
                    return Err(AdminError::Validation(format!(
                        "{} needs exactly one correct {}, found {}",
                        self.kind.short_code(),
                        self.option_noun(),
                        correct
                    )));
                }
                Ok(())
            }
            AnswerShape::MultipleOptions => {
                self.check_options()?;
                if self.correct_count() == 0 {
                    return Err(AdminError::Validation(
                        "Mark at least one option as correct".to_string(),
                    ));
                }
                Ok(())
            }
            AnswerShape::Ordering => reorder::build(&self.paragraphs).map(|_| ()),
        }
    }

    fn check_options(&self) -> Result<(), AdminError> {
        if self.options.len() < 2 {
            return Err(AdminError::Validation(format!(
                "At least 2 {}s are required",
                self.option_noun()
            )));
        }
        if self.options.iter().any(|opt| opt.text.trim().is_empty()) {
            return Err(AdminError::Validation(format!(
                "Every {} needs text",
                self.option_noun()
            )));
        }
        Ok(())
    }

    fn correct_count(&self) -> usize {
        self.options.iter().filter(|opt| opt.is_correct).count()
    }

    fn option_noun(&self) -> &'static str {
        if self.kind == QuestionKind::HighlightCorrectSummary {
            "summary"
        } else {
            "option"
        }
    }

    /// On edit, blank content fields are sent as empty strings so they clear.
    fn payload_object(&self, creating: bool) -> Result<Map<String, Value>, AdminError> {
        let mut object = Map::new();
        object.insert("title".to_string(), json!(self.title.trim()));
        object.insert("difficulty".to_string(), json!(self.difficulty.to_string()));
        object.insert("isPredictive".to_string(), json!(self.is_predictive));

        for (key, value) in [
            ("text", &self.text),
            ("transcript", &self.transcript),
            ("prompt", &self.prompt),
        ] {
            if !creating || !value.trim().is_empty() {
                object.insert(key.to_string(), json!(value.trim()));
            }
        }

        match self.kind.answer_shape() {
            AnswerShape::Open => {}
            AnswerShape::Text => {
                object.insert("answer".to_string(), json!(self.answer.trim()));
            }
            AnswerShape::Words => {
                let words: Vec<&str> = self.answers.iter().map(|w| w.trim()).collect();
                object.insert("answers".to_string(), json!(words));
            }
            AnswerShape::SingleOption | AnswerShape::MultipleOptions => {
                object.insert("options".to_string(), serde_json::to_value(&self.options)?);
            }
            AnswerShape::Ordering => {
                let key = reorder::build(&self.paragraphs)?;
                object.insert("sentences".to_string(), serde_json::to_value(&key.sentences)?);
                object.insert("correctOrder".to_string(), json!(key.correct_order));
            }
        }

        Ok(object)
    }
}

impl Draft for QuestionDraft {
    fn check(&self, creating: bool) -> Result<(), AdminError> {
        self.validate()?;
        self.check_content()?;
        self.check_answer()?;
        self.check_media(creating)
    }

    fn payload(&self, creating: bool) -> Result<Payload, AdminError> {
        let object = self.payload_object(creating)?;
        let files = self.image.iter().chain(self.audio.iter()).cloned().collect();
        Ok(Payload::from_object(object, files))
    }
}

impl Resource for QuestionResource {
    type Item = Question;
    type Draft = QuestionDraft;

    fn segment(&self) -> &str {
        self.0.resource()
    }

    fn label(&self) -> String {
        format!("{} questions", self.0.label())
    }

    fn blank_draft(&self) -> QuestionDraft {
        QuestionDraft::new(self.0)
    }

    fn draft_from(&self, item: &Question) -> QuestionDraft {
        let paragraphs = if item.sentences.is_empty() {
            Vec::new()
        } else {
            match reorder::reconstruct(&item.sentences, &item.correct_order) {
                Ok(paragraphs) => paragraphs,
                Err(e) => {
                    tracing::warn!(
                        "Question {:?} has an unusable answer key, keeping stored order: {}",
                        item.id,
                        e
                    );
                    item.sentences.iter().map(|p| p.text.clone()).collect()
                }
            }
        };

        QuestionDraft {
            kind: self.0,
            title: item.title.clone(),
            difficulty: item.difficulty,
            is_predictive: item.is_predictive,
            text: item.text.clone().unwrap_or_default(),
            transcript: item.transcript.clone().unwrap_or_default(),
            prompt: item.prompt.clone().unwrap_or_default(),
            answer: item.answer.clone().unwrap_or_default(),
            answers: item.answers.clone(),
            options: item.options.clone(),
            paragraphs,
            image: None,
            audio: None,
            image_url: item.image.clone(),
            audio_url: item.audio.clone(),
        }
    }
}
