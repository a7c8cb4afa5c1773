//! Authoring checks for parsed questions.
//!
//! A question that parses can still be unanswerable or misleading, e.g. a
//! sort answer naming an option that does not exist. These checks report
//! such problems without rejecting the question.

use std::collections::HashSet;

use crate::model::{Question, QuestionKind};
use crate::parser::is_true_false_token;

/// A warning from question validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Starting line of the block in its document (if applicable).
    pub line: Option<usize>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn new(message: impl Into<String>) -> Self {
        Self {
            line: None,
            message: message.into(),
        }
    }
}

/// Validate a parsed question for common authoring mistakes.
pub fn validate_question(question: &Question) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Check for duplicate option IDs
    let mut seen_ids = HashSet::new();
    for option in question.options() {
        if !seen_ids.insert(option.id.as_str()) {
            warnings.push(ValidationWarning::new(format!(
                "duplicate option ID: {}",
                option.id
            )));
        }
    }

    if question.answers().iter().any(|a| a.is_empty()) {
        warnings.push(ValidationWarning::new(
            "answer list contains an empty value (stray comma?)",
        ));
    }

    match question.kind() {
        QuestionKind::MultipleChoice => {
            for answer in question.answers() {
                if !answer.is_empty() && question.option(answer).is_none() {
                    warnings.push(ValidationWarning::new(format!(
                        "answer '{answer}' does not match any option"
                    )));
                }
            }
        }
        QuestionKind::Sort => check_sort_permutation(question, &mut warnings),
        QuestionKind::FillBlank => check_blanks(question, &mut warnings),
        QuestionKind::TrueFalse => {
            if !is_true_false_token(question.raw_answer()) {
                warnings.push(ValidationWarning::new(format!(
                    "answer '{}' is not true, false or wahr and is treated as false",
                    question.raw_answer()
                )));
            }
        }
        QuestionKind::FreeText => {}
    }

    if matches!(
        question.kind(),
        QuestionKind::TrueFalse | QuestionKind::FreeText | QuestionKind::FillBlank
    ) && !question.options().is_empty()
    {
        warnings.push(ValidationWarning::new(format!(
            "{} questions ignore options, but {} were declared",
            question.kind(),
            question.options().len()
        )));
    }

    warnings
}

fn check_sort_permutation(question: &Question, warnings: &mut Vec<ValidationWarning>) {
    let option_ids: HashSet<&str> = question.options().iter().map(|o| o.id.as_str()).collect();
    let mut listed = HashSet::new();

    for answer in question.answers() {
        if !option_ids.contains(answer.as_str()) {
            warnings.push(ValidationWarning::new(format!(
                "sort answer '{answer}' does not match any option"
            )));
        }
        if !listed.insert(answer.as_str()) {
            warnings.push(ValidationWarning::new(format!(
                "sort answer '{answer}' is listed more than once"
            )));
        }
    }

    let missing: Vec<&str> = question
        .options()
        .iter()
        .map(|o| o.id.as_str())
        .filter(|id| !listed.contains(id))
        .collect();
    if !missing.is_empty() {
        warnings.push(ValidationWarning::new(format!(
            "sort answer omits option(s): {}",
            missing.join(", ")
        )));
    }
}

fn check_blanks(question: &Question, warnings: &mut Vec<ValidationWarning>) {
    let blanks = question.blank_count();
    let answers = question.answers().len();

    if !question.prompt().contains(crate::model::BLANK_TOKEN) {
        warnings.push(ValidationWarning::new(
            "fill-in-the-blank prompt has no [blank] placeholder",
        ));
    }

    if answers < blanks {
        warnings.push(ValidationWarning::new(format!(
            "not enough answers: {answers} answer(s) for {blanks} blank(s); responses cannot be graded"
        )));
    } else if answers > blanks {
        warnings.push(ValidationWarning::new(format!(
            "{answers} answer(s) for {blanks} blank(s); extra answers are ignored"
        )));
    }
}
