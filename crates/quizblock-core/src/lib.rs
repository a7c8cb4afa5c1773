//! quizblock-core: quiz block parser and answer evaluator.
//!
//! This crate defines the question model, the line-oriented quiz format
//! parser, and the grading rules that every quizblock front-end builds on.

pub mod document;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod parser;
pub mod validate;

pub use error::{GradeError, ParseError};
pub use evaluator::{grade, Response, Verdict};
pub use model::{Question, QuestionKind, QuizOption};
pub use parser::parse;
