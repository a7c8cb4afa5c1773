//! Parse-then-grade pipeline tests through the public core API.
//!
//! Every block in the sample quizzes is graded with its authored answer
//! and with a wrong one, the way the terminal sink would.

use std::path::Path;

use quizblock_core::document::load_quiz_file;
use quizblock_core::parser::normalize_true_false;
use quizblock_core::{grade, parse, GradeError, ParseError, Question, QuestionKind, Response};

fn authored_response(question: &Question) -> Response {
    let answers = question.answers().to_vec();
    match question.kind() {
        QuestionKind::MultipleChoice => Response::Selection(answers),
        QuestionKind::FreeText => Response::Text(answers[0].clone()),
        QuestionKind::TrueFalse => Response::TrueFalse(Some(answers[0] == "true")),
        QuestionKind::FillBlank => {
            Response::Blanks(answers.into_iter().take(question.blank_count()).collect())
        }
        QuestionKind::Sort => Response::Order(answers),
    }
}

fn is_correct(question: &Question, response: Response) -> bool {
    grade(question, &response).unwrap().correct
}

// --- Whole documents ---

#[test]
fn authored_answers_grade_correct() {
    let doc = load_quiz_file(Path::new("../../quizzes/rust-basics.md")).unwrap();
    assert_eq!(doc.errors().count(), 0);

    let questions: Vec<_> = doc.questions().collect();
    assert_eq!(questions.len(), 5);
    for question in questions {
        let response = authored_response(question);
        assert!(
            is_correct(question, response),
            "authored answer rejected for {:?}",
            question.prompt()
        );
    }
}

#[test]
fn broken_blocks_are_isolated() {
    let doc = load_quiz_file(Path::new("../../quizzes/needs-work.md")).unwrap();
    let errors: Vec<_> = doc.errors().collect();
    assert_eq!(
        errors,
        vec![(
            4,
            &ParseError::MissingOptions {
                kind: QuestionKind::MultipleChoice
            }
        )]
    );
    assert_eq!(doc.questions().count(), 2);
    assert_eq!(doc.warnings().len(), 2);
}

#[test]
fn short_fill_blank_answers_are_a_configuration_error() {
    let doc = load_quiz_file(Path::new("../../quizzes/needs-work.md")).unwrap();
    let question = doc
        .questions()
        .find(|q| q.kind() == QuestionKind::FillBlank)
        .unwrap();

    let blanks = vec!["1".to_string(), "2".to_string(), "3".to_string()];
    let err = grade(question, &Response::Blanks(blanks)).unwrap_err();
    assert_eq!(
        err,
        GradeError::AnswerConfiguration {
            answers: 2,
            blanks: 3
        }
    );
}

// --- Grading rules ---

#[test]
fn multiple_choice_ignores_order_and_duplicates() {
    let q = parse("-- Type mc\n-- Question Q\n-- A\nx\n-- B\ny\n-- C\nz\n-- Answer A, C").unwrap();
    let pick = |ids: &[&str]| Response::Selection(ids.iter().map(|s| s.to_string()).collect());

    assert!(is_correct(&q, pick(&["C", "A"])));
    assert!(is_correct(&q, pick(&["A", "C", "A"])));
    assert!(!is_correct(&q, pick(&["A"])));
    assert!(!is_correct(&q, pick(&["A", "B", "C"])));
}

#[test]
fn fill_blank_with_one_blank_keeps_commas() {
    let q = parse("-- Type fb\n-- Question Capital: [blank]\n-- Answer Paris, France").unwrap();
    assert_eq!(q.answers(), ["Paris, France"]);
    assert!(is_correct(&q, Response::Blanks(vec!["paris, france".into()])));
}

#[test]
fn fill_blank_positions_matter() {
    let q = parse("-- Type fb\n-- Question [blank] + [blank] = 4\n-- Answer 1, 3").unwrap();
    assert_eq!(q.answers(), ["1", "3"]);
    assert!(is_correct(&q, Response::Blanks(vec!["1".into(), "3".into()])));
    assert!(!is_correct(&q, Response::Blanks(vec!["3".into(), "1".into()])));

    let err = grade(&q, &Response::Blanks(vec!["1".into()])).unwrap_err();
    assert!(err.is_incomplete());
}

#[test]
fn true_false_mapping() {
    assert_eq!(normalize_true_false("wahr"), "true");
    assert_eq!(normalize_true_false("maybe"), "false");

    let q = parse("-- Type tf\n-- Question The sky is blue.\n-- Answer Wahr").unwrap();
    assert!(is_correct(&q, Response::TrueFalse(Some(true))));
    assert!(!is_correct(&q, Response::TrueFalse(Some(false))));
    assert!(grade(&q, &Response::TrueFalse(None))
        .unwrap_err()
        .is_incomplete());
}

#[test]
fn sort_requires_exact_positions() {
    let q = parse("-- Type sort\n-- Question Order\n-- A\nx\n-- B\ny\n-- C\nz\n-- Answer B, A, C")
        .unwrap();
    let order = |ids: &[&str]| Response::Order(ids.iter().map(|s| s.to_string()).collect());

    assert!(is_correct(&q, order(&["B", "A", "C"])));
    assert!(!is_correct(&q, order(&["A", "B", "C"])));
    assert!(!is_correct(&q, order(&["B", "A"])));

    let verdict = grade(&q, &order(&["A", "B", "C"])).unwrap();
    assert_eq!(verdict.expected, "y → x → z");
}

#[test]
fn terse_syntax_defaults_to_multiple_choice() {
    let q = parse("What is 2+2?\n-- A\n3\n-- B\n4\n-- Answer B").unwrap();
    assert_eq!(q.kind(), QuestionKind::MultipleChoice);
    assert_eq!(q.prompt(), "What is 2+2?");
    assert_eq!(q.options().len(), 2);
    assert!(is_correct(&q, Response::Selection(vec!["B".into()])));
}

#[test]
fn empty_and_optionless_sources_fail() {
    assert_eq!(parse("").unwrap_err(), ParseError::EmptyInput);
    assert_eq!(parse(" \n\t\n").unwrap_err(), ParseError::EmptyInput);
    assert_eq!(
        parse("-- Type mc\n-- Question Q\n-- Answer A").unwrap_err(),
        ParseError::MissingOptions {
            kind: QuestionKind::MultipleChoice
        }
    );
}

#[test]
fn mismatched_response_shape_is_rejected() {
    let q = parse("-- Type text\n-- Question Q\n-- Answer a").unwrap();
    let err = grade(&q, &Response::Order(vec!["a".into()])).unwrap_err();
    assert!(matches!(err, GradeError::ResponseMismatch { .. }));
}
