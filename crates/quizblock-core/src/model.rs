//! Core data model types for quizblock.
//!
//! A [`Question`] is the parsed, immutable form of one quiz block. It is
//! built by [`crate::parser::parse`] and only read afterwards.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Placeholder token marking a gap in a fill-blank prompt.
pub const BLANK_TOKEN: &str = "[blank]";

/// The five supported question kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    FreeText,
    TrueFalse,
    FillBlank,
    Sort,
}

impl QuestionKind {
    /// The canonical short tag accepted by `-- Type`.
    pub fn tag(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "mc",
            QuestionKind::FreeText => "text",
            QuestionKind::TrueFalse => "tf",
            QuestionKind::FillBlank => "fb",
            QuestionKind::Sort => "sort",
        }
    }

    /// Whether this kind cannot be answered without a list of options.
    pub fn requires_options(&self) -> bool {
        matches!(self, QuestionKind::MultipleChoice | QuestionKind::Sort)
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::MultipleChoice => write!(f, "multiple choice"),
            QuestionKind::FreeText => write!(f, "free text"),
            QuestionKind::TrueFalse => write!(f, "true/false"),
            QuestionKind::FillBlank => write!(f, "fill-in-the-blank"),
            QuestionKind::Sort => write!(f, "sort"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = std::convert::Infallible;

    /// Unknown tags fall back to [`QuestionKind::MultipleChoice`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim().to_lowercase().as_str() {
            "mc" => QuestionKind::MultipleChoice,
            "text" => QuestionKind::FreeText,
            "tf" | "truefalse" => QuestionKind::TrueFalse,
            "fb" | "fillblank" => QuestionKind::FillBlank,
            "sort" => QuestionKind::Sort,
            other => {
                tracing::debug!(tag = other, "unknown question type, using multiple choice");
                QuestionKind::MultipleChoice
            }
        };
        Ok(kind)
    }
}

/// A selectable or sortable option declared with `-- <id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizOption {
    /// Free-form identifier, referenced by answers.
    pub id: String,
    /// Option text; may span several lines.
    pub text: String,
}

impl QuizOption {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// A parsed quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    kind: QuestionKind,
    prompt: String,
    options: Vec<QuizOption>,
    answers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    blank_count: Option<usize>,
    #[serde(skip)]
    raw_answer: String,
}

impl Question {
    pub(crate) fn new(
        kind: QuestionKind,
        prompt: String,
        options: Vec<QuizOption>,
        answers: Vec<String>,
        raw_answer: String,
    ) -> Self {
        let blank_count = (kind == QuestionKind::FillBlank).then(|| count_blanks(&prompt).max(1));
        Self {
            kind,
            prompt,
            options,
            answers,
            blank_count,
            raw_answer,
        }
    }

    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    /// Prompt text, newline-joined.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[QuizOption] {
        &self.options
    }

    /// Correct answers; interpretation depends on [`Question::kind`].
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// Number of gaps in a fill-blank prompt (at least 1), or 0 for other kinds.
    pub fn blank_count(&self) -> usize {
        self.blank_count.unwrap_or(0)
    }

    /// The answer text exactly as authored, before type-specific interpretation.
    pub fn raw_answer(&self) -> &str {
        &self.raw_answer
    }

    /// Look up an option by id.
    pub fn option(&self, id: &str) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.id == id)
    }

    /// The prompt split around each `[blank]` token.
    ///
    /// A prompt with `n` tokens yields `n + 1` segments; a blank sits between
    /// each pair of neighbouring segments.
    pub fn prompt_segments(&self) -> Vec<&str> {
        self.prompt.split(BLANK_TOKEN).collect()
    }
}

/// Count `[blank]` tokens in a prompt.
pub fn count_blanks(prompt: &str) -> usize {
    prompt.matches(BLANK_TOKEN).count()
}
