//! Quiz block parser.
//!
//! Turns the line-oriented quiz format into a [`Question`]:
//!
//! ```text
//! -- Type mc
//! -- Question What is 2+2?
//! -- A
//! 3
//! -- B
//! 4
//! -- Answer B
//! ```
//!
//! Directive lines start with `-- `. `Type`, `Question` and `Answer` are
//! keywords; any other directive declares an option. Parsing is a single
//! pass over trimmed, non-empty lines driven by [`ParseState`].

use crate::error::ParseError;
use crate::model::{count_blanks, Question, QuestionKind, QuizOption};

const DIRECTIVE_MARKER: &str = "-- ";
const TYPE_DIRECTIVE: &str = "-- Type ";
const QUESTION_DIRECTIVE: &str = "-- Question";
const ANSWER_DIRECTIVE: &str = "-- answer";

/// Where the next content line goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// No open context. A bare line may become an implicit prompt.
    Idle,
    /// Content lines are appended to the prompt.
    InQuestion,
    /// Content lines are appended to the option at this index.
    InOption(usize),
    /// The next content line is the answer text.
    InAnswer,
}

/// Parse one quiz block into a [`Question`].
pub fn parse(source: &str) -> Result<Question, ParseError> {
    if source.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut builder = QuestionBuilder::new();
    for line in source.lines() {
        builder.feed(line);
    }
    builder.finish()
}

/// Mutable accumulator behind [`parse`].
#[derive(Debug)]
struct QuestionBuilder {
    state: ParseState,
    kind: QuestionKind,
    prompt: String,
    options: Vec<QuizOption>,
    answers: Vec<String>,
    raw_answer: String,
}

impl QuestionBuilder {
    fn new() -> Self {
        Self {
            state: ParseState::Idle,
            kind: QuestionKind::MultipleChoice,
            prompt: String::new(),
            options: Vec::new(),
            answers: Vec::new(),
            raw_answer: String::new(),
        }
    }

    fn transition(&mut self, next: ParseState) {
        if self.state != next {
            tracing::trace!(from = ?self.state, to = ?next, "parse state");
            self.state = next;
        }
    }

    fn feed(&mut self, raw: &str) {
        let line = raw.trim();
        if line.is_empty() {
            return;
        }

        if let Some(name) = line.strip_prefix(TYPE_DIRECTIVE) {
            let name = name.trim();
            if !name.is_empty() {
                self.kind = name.parse().unwrap_or(QuestionKind::MultipleChoice);
                self.transition(ParseState::Idle);
            }
            return;
        }

        if let Some(rest) = line.strip_prefix(QUESTION_DIRECTIVE) {
            let text = rest.trim();
            if text.is_empty() {
                self.transition(ParseState::InQuestion);
            } else {
                self.prompt = text.to_string();
                self.transition(ParseState::Idle);
            }
            return;
        }

        let is_directive = line.starts_with(DIRECTIVE_MARKER);

        if self.state == ParseState::InQuestion {
            if !is_directive {
                append_line(&mut self.prompt, line);
                return;
            }
            self.transition(ParseState::Idle);
        }

        if is_directive {
            self.directive(line);
            return;
        }

        match self.state {
            ParseState::InAnswer => {
                self.set_answer(line);
                self.transition(ParseState::Idle);
            }
            ParseState::InOption(index) => {
                if let Some(option) = self.options.get_mut(index) {
                    append_line(&mut option.text, line);
                }
            }
            ParseState::Idle => {
                if self.prompt.is_empty() && self.options.is_empty() && !line.starts_with("--") {
                    self.prompt = line.to_string();
                } else {
                    tracing::trace!(line, "ignoring line outside any context");
                }
            }
            ParseState::InQuestion => unreachable!("question lines are consumed above"),
        }
    }

    /// Handle an `-- Answer` or option directive.
    fn directive(&mut self, line: &str) {
        let is_answer = line
            .get(..ANSWER_DIRECTIVE.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(ANSWER_DIRECTIVE));

        if is_answer {
            let text = line[ANSWER_DIRECTIVE.len()..].trim();
            if text.is_empty() {
                self.transition(ParseState::InAnswer);
            } else {
                self.set_answer(text);
                self.transition(ParseState::Idle);
            }
            return;
        }

        let id = line[DIRECTIVE_MARKER.len()..].trim();
        self.options.push(QuizOption::new(id, ""));
        self.transition(ParseState::InOption(self.options.len() - 1));
    }

    fn set_answer(&mut self, text: &str) {
        self.raw_answer = text.to_string();
        self.answers = interpret_answer(self.kind, &self.prompt, text);
    }

    fn finish(mut self) -> Result<Question, ParseError> {
        self.normalize();

        if self.prompt.is_empty() {
            return Err(ParseError::MissingQuestion);
        }
        if self.answers.is_empty() {
            return Err(ParseError::MissingAnswer);
        }
        if self.kind.requires_options() && self.options.is_empty() {
            return Err(ParseError::MissingOptions { kind: self.kind });
        }

        Ok(Question::new(
            self.kind,
            self.prompt,
            self.options,
            self.answers,
            self.raw_answer,
        ))
    }

    /// Infer the prompt for the terse syntaxes that skip `-- Question`.
    fn normalize(&mut self) {
        match self.kind {
            QuestionKind::MultipleChoice if self.prompt.is_empty() && !self.options.is_empty() => {
                let first = self.options.remove(0);
                self.prompt = first.text;
            }
            QuestionKind::TrueFalse | QuestionKind::FreeText if self.options.len() == 1 => {
                if let Some(only) = self.options.pop() {
                    self.prompt = only.text;
                }
            }
            _ => {}
        }
    }
}

fn append_line(target: &mut String, line: &str) {
    if !target.is_empty() {
        target.push('\n');
    }
    target.push_str(line);
}

/// Interpret answer text according to the question kind.
///
/// `prompt` is the prompt accumulated so far; it decides whether a
/// fill-blank answer is split on commas.
pub fn interpret_answer(kind: QuestionKind, prompt: &str, text: &str) -> Vec<String> {
    match kind {
        QuestionKind::FillBlank => {
            if count_blanks(prompt) <= 1 {
                vec![text.to_string()]
            } else {
                split_answers(text)
            }
        }
        QuestionKind::TrueFalse => vec![normalize_true_false(text).to_string()],
        QuestionKind::MultipleChoice | QuestionKind::FreeText | QuestionKind::Sort => {
            split_answers(text)
        }
    }
}

fn split_answers(text: &str) -> Vec<String> {
    text.split(',').map(|a| a.trim().to_string()).collect()
}

/// Map a true/false answer token to `"true"` or `"false"`.
///
/// Accepts `true`, `false` and the German `wahr`; anything else is `"false"`.
pub fn normalize_true_false(text: &str) -> &'static str {
    match text.trim().to_lowercase().as_str() {
        "true" | "wahr" => "true",
        "false" => "false",
        other => {
            tracing::debug!(token = other, "unrecognized true/false answer, using false");
            "false"
        }
    }
}

/// Whether `text` is a token [`normalize_true_false`] recognizes rather than coerces.
pub fn is_true_false_token(text: &str) -> bool {
    matches!(
        text.trim().to_lowercase().as_str(),
        "true" | "false" | "wahr"
    )
}
