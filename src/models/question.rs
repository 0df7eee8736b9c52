// src/models/question.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Entity;

/// The four test skills a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Skill {
    Speaking,
    Writing,
    Reading,
    Listening,
}

impl Skill {
    pub const ALL: [Skill; 4] = [Skill::Speaking, Skill::Writing, Skill::Reading, Skill::Listening];

    pub fn label(self) -> &'static str {
        match self {
            Skill::Speaking => "Speaking",
            Skill::Writing => "Writing",
            Skill::Reading => "Reading",
            Skill::Listening => "Listening",
        }
    }

    /// Question kinds of this skill, in dashboard order.
    pub fn kinds(self) -> Vec<QuestionKind> {
        QuestionKind::ALL
            .iter()
            .copied()
            .filter(|kind| kind.skill() == self)
            .collect()
    }

    /// Resource segment of the sectional tests for this skill.
    pub fn section_resource(self) -> &'static str {
        match self {
            Skill::Speaking => "speakingsection",
            Skill::Writing => "writingsection",
            Skill::Reading => "readingsection",
            Skill::Listening => "listeningsection",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Skill {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Skill::ALL
            .iter()
            .copied()
            .find(|skill| skill.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown skill '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(alias = "easy")]
    Easy,
    #[default]
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "hard")]
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(label)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

/// Media a question kind carries as an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Media {
    Image,
    Audio,
}

impl Media {
    /// Multipart field name and the JSON attribute holding the stored URL.
    pub fn field(self) -> &'static str {
        match self {
            Media::Image => "image",
            Media::Audio => "audio",
        }
    }
}

/// How a kind's correct answer is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerShape {
    /// Scored by a human or model; no stored key.
    Open,
    /// Free-text `answer`.
    Text,
    /// `answers`: words for blanks, or the incorrect words to highlight.
    Words,
    /// `options` with exactly one marked correct.
    SingleOption,
    /// `options` with at least one marked correct.
    MultipleOptions,
    /// `sentences` plus `correctOrder`.
    Ordering,
}

/// Every question type managed by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QuestionKind {
    ReadAloud,
    RepeatSentence,
    DescribeImage,
    RetellLecture,
    AnswerShortQuestion,
    SummarizeWrittenText,
    WriteEssay,
    ReadWriteFillBlanks,
    ReadingMcqMultiple,
    ReorderParagraphs,
    ReadingFillBlanks,
    ReadingMcqSingle,
    SummarizeSpokenText,
    ListeningMcqMultiple,
    ListeningFillBlanks,
    HighlightCorrectSummary,
    ListeningMcqSingle,
    SelectMissingWord,
    HighlightIncorrectWords,
    WriteFromDictation,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 20] = [
        QuestionKind::ReadAloud,
        QuestionKind::RepeatSentence,
        QuestionKind::DescribeImage,
        QuestionKind::RetellLecture,
        QuestionKind::AnswerShortQuestion,
        QuestionKind::SummarizeWrittenText,
        QuestionKind::WriteEssay,
        QuestionKind::ReadWriteFillBlanks,
        QuestionKind::ReadingMcqMultiple,
        QuestionKind::ReorderParagraphs,
        QuestionKind::ReadingFillBlanks,
        QuestionKind::ReadingMcqSingle,
        QuestionKind::SummarizeSpokenText,
        QuestionKind::ListeningMcqMultiple,
        QuestionKind::ListeningFillBlanks,
        QuestionKind::HighlightCorrectSummary,
        QuestionKind::ListeningMcqSingle,
        QuestionKind::SelectMissingWord,
        QuestionKind::HighlightIncorrectWords,
        QuestionKind::WriteFromDictation,
    ];

    pub fn skill(self) -> Skill {
        use QuestionKind::*;
        match self {
            ReadAloud | RepeatSentence | DescribeImage | RetellLecture | AnswerShortQuestion => {
                Skill::Speaking
            }
            SummarizeWrittenText | WriteEssay => Skill::Writing,
            ReadWriteFillBlanks | ReadingMcqMultiple | ReorderParagraphs | ReadingFillBlanks
            | ReadingMcqSingle => Skill::Reading,
            SummarizeSpokenText | ListeningMcqMultiple | ListeningFillBlanks
            | HighlightCorrectSummary | ListeningMcqSingle | SelectMissingWord
            | HighlightIncorrectWords | WriteFromDictation => Skill::Listening,
        }
    }

    /// REST resource segment, e.g. `readaloud` for `/readaloud/:id`.
    pub fn resource(self) -> &'static str {
        use QuestionKind::*;
        match self {
            ReadAloud => "readaloud",
            RepeatSentence => "repeatsentence",
            DescribeImage => "describeimage",
            RetellLecture => "retelllecture",
            AnswerShortQuestion => "answershortquestion",
            SummarizeWrittenText => "summarizewrittentext",
            WriteEssay => "writeessay",
            ReadWriteFillBlanks => "readwritefillblanks",
            ReadingMcqMultiple => "readingmcqmultiple",
            ReorderParagraphs => "reorderparagraphs",
            ReadingFillBlanks => "readingfillblanks",
            ReadingMcqSingle => "readingmcqsingle",
            SummarizeSpokenText => "summarizespokentext",
            ListeningMcqMultiple => "listeningmcqmultiple",
            ListeningFillBlanks => "listeningfillblanks",
            HighlightCorrectSummary => "highlightcorrectsummary",
            ListeningMcqSingle => "listeningmcqsingle",
            SelectMissingWord => "selectmissingword",
            HighlightIncorrectWords => "highlightincorrectwords",
            WriteFromDictation => "writefromdictation",
        }
    }

    /// Key of this kind's bucket in section and mock test payloads.
    pub fn bucket_key(self) -> &'static str {
        use QuestionKind::*;
        match self {
            ReadAloud => "readAloud",
            RepeatSentence => "repeatSentence",
            DescribeImage => "describeImage",
            RetellLecture => "retellLecture",
            AnswerShortQuestion => "answerShortQuestion",
            SummarizeWrittenText => "summarizeWrittenText",
            WriteEssay => "writeEssay",
            ReadWriteFillBlanks => "readWriteFillBlanks",
            ReadingMcqMultiple => "readingMcqMultiple",
            ReorderParagraphs => "reorderParagraphs",
            ReadingFillBlanks => "readingFillBlanks",
            ReadingMcqSingle => "readingMcqSingle",
            SummarizeSpokenText => "summarizeSpokenText",
            ListeningMcqMultiple => "listeningMcqMultiple",
            ListeningFillBlanks => "listeningFillBlanks",
            HighlightCorrectSummary => "highlightCorrectSummary",
            ListeningMcqSingle => "listeningMcqSingle",
            SelectMissingWord => "selectMissingWord",
            HighlightIncorrectWords => "highlightIncorrectWords",
            WriteFromDictation => "writeFromDictation",
        }
    }

    pub fn short_code(self) -> &'static str {
        use QuestionKind::*;
        match self {
            ReadAloud => "RA",
            RepeatSentence => "RS",
            DescribeImage => "DI",
            RetellLecture => "RL",
            AnswerShortQuestion => "ASQ",
            SummarizeWrittenText => "SWT",
            WriteEssay => "WE",
            ReadWriteFillBlanks => "RWFIB",
            ReadingMcqMultiple => "RMCQM",
            ReorderParagraphs => "RO",
            ReadingFillBlanks => "RFIB",
            ReadingMcqSingle => "RMCQS",
            SummarizeSpokenText => "SST",
            ListeningMcqMultiple => "LMCQM",
            ListeningFillBlanks => "LFIB",
            HighlightCorrectSummary => "HCS",
            ListeningMcqSingle => "LMCQS",
            SelectMissingWord => "SMW",
            HighlightIncorrectWords => "HIW",
            WriteFromDictation => "WFD",
        }
    }

    pub fn label(self) -> &'static str {
        use QuestionKind::*;
        match self {
            ReadAloud => "Read Aloud",
            RepeatSentence => "Repeat Sentence",
            DescribeImage => "Describe Image",
            RetellLecture => "Retell Lecture",
            AnswerShortQuestion => "Answer Short Question",
            SummarizeWrittenText => "Summarize Written Text",
            WriteEssay => "Write Essay",
            ReadWriteFillBlanks => "Reading & Writing Fill in the Blanks",
            ReadingMcqMultiple => "Reading Multiple Choice (Multiple)",
            ReorderParagraphs => "Re-order Paragraphs",
            ReadingFillBlanks => "Reading Fill in the Blanks",
            ReadingMcqSingle => "Reading Multiple Choice (Single)",
            SummarizeSpokenText => "Summarize Spoken Text",
            ListeningMcqMultiple => "Listening Multiple Choice (Multiple)",
            ListeningFillBlanks => "Listening Fill in the Blanks",
            HighlightCorrectSummary => "Highlight Correct Summary",
            ListeningMcqSingle => "Listening Multiple Choice (Single)",
            SelectMissingWord => "Select Missing Word",
            HighlightIncorrectWords => "Highlight Incorrect Words",
            WriteFromDictation => "Write From Dictation",
        }
    }

    /// Uploaded media the kind requires when created.
    pub fn media(self) -> Option<Media> {
        use QuestionKind::*;
        match self {
            DescribeImage => Some(Media::Image),
            RepeatSentence | RetellLecture | AnswerShortQuestion => Some(Media::Audio),
            kind if kind.skill() == Skill::Listening => Some(Media::Audio),
            _ => None,
        }
    }

    pub fn answer_shape(self) -> AnswerShape {
        use QuestionKind::*;
        match self {
            ReadAloud | RepeatSentence | DescribeImage | RetellLecture | SummarizeWrittenText
            | WriteEssay | SummarizeSpokenText => AnswerShape::Open,
            AnswerShortQuestion | WriteFromDictation => AnswerShape::Text,
            ReadWriteFillBlanks | ReadingFillBlanks | ListeningFillBlanks
            | HighlightIncorrectWords => AnswerShape::Words,
            ReadingMcqSingle | ListeningMcqSingle | HighlightCorrectSummary | SelectMissingWord => {
                AnswerShape::SingleOption
            }
            ReadingMcqMultiple | ListeningMcqMultiple => AnswerShape::MultipleOptions,
            ReorderParagraphs => AnswerShape::Ordering,
        }
    }

    pub fn from_bucket_key(key: &str) -> Option<Self> {
        QuestionKind::ALL.iter().copied().find(|kind| kind.bucket_key() == key)
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts the resource segment, the bucket key or the short code, case-insensitively.
impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        QuestionKind::ALL
            .iter()
            .copied()
            .find(|kind| {
                kind.resource().eq_ignore_ascii_case(needle)
                    || kind.bucket_key().eq_ignore_ascii_case(needle)
                    || kind.short_code().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| format!("unknown question type '{}'", s))
    }
}

/// One choice of a multiple-choice style question.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    #[serde(rename = "isCorrect", default)]
    pub is_correct: bool,
}

/// A reorder-paragraph fragment tagged with its letter id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub id: String,
    pub text: String,
}

/// A practice question as stored by the backend.
/// Which content fields are filled depends on the question kind.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub difficulty: Difficulty,

    #[serde(default)]
    pub is_predictive: bool,

    /// Passage or prompt text shown to the candidate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Transcript of the audio, for listening and speaking kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    /// URL of the stored image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// URL of the stored audio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<AnswerOption>,

    /// Reorder fragments in display (shuffled) order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sentences: Vec<Paragraph>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub correct_order: Vec<String>,
}

impl Entity for Question {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        if let Some(answer) = &self.answer {
            fields.push(answer);
        }
        fields
    }
}

/// A question reference inside a section or mock test.
/// Summary responses carry bare ids; detail responses carry populated questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionRef {
    Id(String),
    Populated(Box<Question>),
}

impl QuestionRef {
    pub fn id(&self) -> Option<&str> {
        match self {
            QuestionRef::Id(id) => Some(id),
            QuestionRef::Populated(question) => question.id.as_deref(),
        }
    }

    /// Title when populated, otherwise the id.
    pub fn label(&self) -> &str {
        match self {
            QuestionRef::Id(id) => id,
            QuestionRef::Populated(question) if !question.title.is_empty() => &question.title,
            QuestionRef::Populated(question) => question.id.as_deref().unwrap_or(""),
        }
    }

    pub fn question(&self) -> Option<&Question> {
        match self {
            QuestionRef::Id(_) => None,
            QuestionRef::Populated(question) => Some(question),
        }
    }
}

impl From<Question> for QuestionRef {
    fn from(question: Question) -> Self {
        QuestionRef::Populated(Box::new(question))
    }
}
