//! Parse and grading error types.
//!
//! Parse errors abort construction of a single quiz block; grading errors
//! describe responses that cannot be given a verdict. Neither is fatal to
//! the host rendering the quiz.

use thiserror::Error;

use crate::model::QuestionKind;

/// Errors that can occur while parsing a quiz block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The source text is empty or whitespace-only.
    #[error("quiz content cannot be empty")]
    EmptyInput,

    /// No prompt text could be derived after parsing and normalization.
    #[error("quiz must have a question")]
    MissingQuestion,

    /// No answer values were captured.
    #[error("quiz must have at least one answer")]
    MissingAnswer,

    /// The question kind requires options but none were parsed.
    #[error("{kind} questions must have options")]
    MissingOptions { kind: QuestionKind },
}

/// Errors that prevent a response from being graded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradeError {
    /// The response is missing a selection or leaves a blank unfilled.
    #[error("response is incomplete: {0}")]
    IncompleteResponse(String),

    /// The fill-blank question defines fewer answers than it has blanks.
    #[error("not enough correct answers defined: {answers} answer(s) for {blanks} blank(s)")]
    AnswerConfiguration { answers: usize, blanks: usize },

    /// The response shape does not fit the question kind.
    #[error("a {response} response cannot grade a {kind} question")]
    ResponseMismatch {
        kind: QuestionKind,
        response: &'static str,
    },
}

impl GradeError {
    /// Returns `true` if the user should be asked to complete the response
    /// rather than being told the answer is wrong.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, GradeError::IncompleteResponse(_))
    }
}
