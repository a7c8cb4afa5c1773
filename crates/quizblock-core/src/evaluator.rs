//! Answer grading.
//!
//! Pure functions that compare a user's [`Response`] with a parsed
//! [`Question`] and produce a [`Verdict`].

use std::collections::HashSet;
use std::hash::Hash;

use serde::Serialize;

use crate::error::GradeError;
use crate::model::{Question, QuestionKind};

/// A response collected by a rendering sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Selected option ids (multiple choice).
    Selection(Vec<String>),
    /// Typed answer (free text).
    Text(String),
    /// Chosen value, or `None` when nothing was selected (true/false).
    TrueFalse(Option<bool>),
    /// One filling per blank, in prompt order (fill-blank).
    Blanks(Vec<String>),
    /// Option ids in the arranged order (sort).
    Order(Vec<String>),
}

impl Response {
    fn shape(&self) -> &'static str {
        match self {
            Response::Selection(_) => "selection",
            Response::Text(_) => "text",
            Response::TrueFalse(_) => "true/false",
            Response::Blanks(_) => "blanks",
            Response::Order(_) => "order",
        }
    }
}

/// Outcome of grading one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub correct: bool,
    /// Human-readable correct answer, for the failure message.
    pub expected: String,
}

/// Grade a response against a question.
pub fn grade(question: &Question, response: &Response) -> Result<Verdict, GradeError> {
    let correct = match (question.kind(), response) {
        (QuestionKind::MultipleChoice, Response::Selection(selected)) => {
            grade_multiple_choice(question, selected)
        }
        (QuestionKind::FreeText, Response::Text(text)) => grade_free_text(question, text),
        (QuestionKind::TrueFalse, Response::TrueFalse(value)) => {
            grade_true_false(question, *value)?
        }
        (QuestionKind::FillBlank, Response::Blanks(blanks)) => grade_fill_blank(question, blanks)?,
        (QuestionKind::Sort, Response::Order(order)) => grade_sort(question, order),
        (kind, other) => {
            return Err(GradeError::ResponseMismatch {
                kind,
                response: other.shape(),
            })
        }
    };

    tracing::debug!(kind = %question.kind(), correct, "graded response");

    Ok(Verdict {
        correct,
        expected: correct_answer_summary(question),
    })
}

/// The selected ids must equal the correct ids as sets.
pub fn grade_multiple_choice<S: AsRef<str>>(question: &Question, selected: &[S]) -> bool {
    let selected: Vec<&str> = dedup(selected.iter().map(|s| s.as_ref()));
    let correct: Vec<&str> = dedup(question.answers().iter().map(String::as_str));
    set_equals(&selected, &correct)
}

/// The trimmed text must match any accepted answer, ignoring case.
pub fn grade_free_text(question: &Question, text: &str) -> bool {
    let text = text.trim().to_lowercase();
    question.answers().iter().any(|a| a.to_lowercase() == text)
}

/// `None` means nothing was selected and is reported as incomplete.
pub fn grade_true_false(question: &Question, value: Option<bool>) -> Result<bool, GradeError> {
    let value =
        value.ok_or_else(|| GradeError::IncompleteResponse("select true or false".into()))?;
    let expected = question
        .answers()
        .first()
        .map(|a| a.to_lowercase())
        .unwrap_or_default();
    Ok(expected == if value { "true" } else { "false" })
}

/// Every blank must match its answer, ignoring case.
///
/// Unfilled blanks are reported before a short answer list, matching what a
/// user sees first.
pub fn grade_fill_blank<S: AsRef<str>>(
    question: &Question,
    blanks: &[S],
) -> Result<bool, GradeError> {
    let blank_count = question.blank_count();

    let unfilled = |i: &usize| blanks.get(*i).map_or(true, |b| b.as_ref().trim().is_empty());
    if let Some(index) = (0..blank_count).find(unfilled) {
        return Err(GradeError::IncompleteResponse(format!(
            "blank {} is empty",
            index + 1
        )));
    }

    let answers = question.answers();
    if answers.len() < blank_count {
        return Err(GradeError::AnswerConfiguration {
            answers: answers.len(),
            blanks: blank_count,
        });
    }

    Ok((0..blank_count).all(|i| blanks[i].as_ref().to_lowercase() == answers[i].to_lowercase()))
}

/// The arranged ids must equal the correct order position by position.
pub fn grade_sort<S: AsRef<str>>(question: &Question, order: &[S]) -> bool {
    let order: Vec<&str> = order.iter().map(|s| s.as_ref()).collect();
    let correct: Vec<&str> = question.answers().iter().map(String::as_str).collect();
    sequence_equals(&order, &correct)
}

/// `|a| = |b|` and every element of each is in the other.
pub fn set_equals<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().all(|x| b.contains(x)) && b.iter().all(|y| a.contains(y))
}

/// `|a| = |b|` and `a[i] = b[i]` for every index.
pub fn sequence_equals<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
}

fn dedup<T: Eq + Hash + Copy>(items: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items.filter(|item| seen.insert(*item)).collect()
}

/// Describe the correct answer of a question for display.
pub fn correct_answer_summary(question: &Question) -> String {
    let answers = question.answers();
    match question.kind() {
        QuestionKind::MultipleChoice | QuestionKind::FillBlank => answers.join(", "),
        QuestionKind::FreeText => answers.join(" or "),
        QuestionKind::TrueFalse => {
            let is_true = answers
                .first()
                .is_some_and(|a| a.eq_ignore_ascii_case("true"));
            let label = if is_true { "True" } else { "False" };
            label.to_string()
        }
        QuestionKind::Sort => answers
            .iter()
            .map(|id| {
                question
                    .option(id)
                    .map(|o| o.text.as_str())
                    .unwrap_or(id.as_str())
            })
            .collect::<Vec<_>>()
            .join(" → "),
    }
}
