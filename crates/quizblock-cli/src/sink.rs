//! Terminal rendering sink.
//!
//! Presents parsed questions on a line-based terminal, collects responses,
//! grades them with the core evaluator and prints the verdict.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use rand::seq::SliceRandom;
use rand::Rng;

use quizblock_core::evaluator::{grade, Response, Verdict};
use quizblock_core::{GradeError, Question, QuestionKind};

use crate::config::{Labels, QuizConfig};

/// Separator between blank fillings in a one-line response.
pub const BLANK_SEPARATOR: char = '|';

/// How one question ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    /// The question could not be graded because its answers are malformed.
    Misconfigured,
}

/// Tally of outcomes over a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scorecard {
    pub correct: usize,
    pub incorrect: usize,
    pub misconfigured: usize,
    pub unanswered: usize,
}

impl Scorecard {
    pub fn record(&mut self, outcome: Option<Outcome>) {
        match outcome {
            Some(Outcome::Correct) => self.correct += 1,
            Some(Outcome::Incorrect) => self.incorrect += 1,
            Some(Outcome::Misconfigured) => self.misconfigured += 1,
            None => self.unanswered += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.correct + self.incorrect + self.misconfigured + self.unanswered
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.set_header(vec!["Correct", "Incorrect", "Unanswered", "Not gradable", "Score"]);
        let score = if self.total() == 0 {
            0.0
        } else {
            self.correct as f64 / self.total() as f64
        };
        table.add_row(vec![
            Cell::new(self.correct),
            Cell::new(self.incorrect),
            Cell::new(self.unanswered),
            Cell::new(self.misconfigured),
            Cell::new(format!("{:.1}%", score * 100.0)),
        ]);
        table
    }
}

/// Build the user-facing message for a grading result.
///
/// Returns `None` as the outcome when the response is incomplete and should
/// be collected again.
pub fn verdict_message(
    labels: &Labels,
    question: &Question,
    result: &Result<Verdict, GradeError>,
) -> (Option<Outcome>, String) {
    match result {
        Ok(verdict) if verdict.correct => (Some(Outcome::Correct), labels.correct.clone()),
        Ok(verdict) => {
            let expected = if question.kind() == QuestionKind::TrueFalse {
                true_false_label(labels, &verdict.expected)
            } else {
                verdict.expected.clone()
            };
            (
                Some(Outcome::Incorrect),
                format!("{} {}", labels.incorrect, expected),
            )
        }
        Err(e) if e.is_incomplete() => (None, labels.incomplete.clone()),
        Err(e) => (Some(Outcome::Misconfigured), format!("Error: {e}")),
    }
}

fn true_false_label(labels: &Labels, expected: &str) -> String {
    if expected.eq_ignore_ascii_case("true") {
        labels.true_label.clone()
    } else {
        labels.false_label.clone()
    }
}

/// Parse a one-line response for a question.
///
/// Option ids are separated by commas and may contain spaces; fill-blank responses
/// separate blanks with `|`; true/false accepts `true`/`t`/`wahr`,
/// `false`/`f`, or the configured labels, and empty means unanswered.
pub fn parse_response(question: &Question, input: &str, labels: &Labels) -> Result<Response> {
    let input = input.trim();
    let response = match question.kind() {
        QuestionKind::MultipleChoice => Response::Selection(split_ids(input)),
        QuestionKind::Sort => Response::Order(split_ids(input)),
        QuestionKind::FreeText => Response::Text(input.to_string()),
        QuestionKind::FillBlank => Response::Blanks(
            input
                .split(BLANK_SEPARATOR)
                .map(|b| b.trim().to_string())
                .collect(),
        ),
        QuestionKind::TrueFalse => Response::TrueFalse(parse_true_false(input, labels)?),
    };
    Ok(response)
}

fn split_ids(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_true_false(input: &str, labels: &Labels) -> Result<Option<bool>> {
    if input.is_empty() {
        return Ok(None);
    }
    let lower = input.to_lowercase();
    if lower == labels.true_label.to_lowercase() {
        return Ok(Some(true));
    }
    if lower == labels.false_label.to_lowercase() {
        return Ok(Some(false));
    }
    match lower.as_str() {
        "true" | "t" | "wahr" => Ok(Some(true)),
        "false" | "f" => Ok(Some(false)),
        _ => anyhow::bail!("unrecognized true/false response: '{input}'"),
    }
}

/// Answer choices offered for a fill-blank question.
///
/// Only the displayed order is shuffled; the question's answers keep their
/// authored order for grading.
pub fn blank_choices<G: Rng + ?Sized>(question: &Question, shuffle: bool, rng: &mut G) -> Vec<String> {
    let mut choices = question.answers().to_vec();
    if shuffle {
        choices.shuffle(rng);
    }
    choices
}

/// Chip selected by a blank input.
///
/// Text matching a choice literally selects that choice, preferring one not
/// yet used. Labels only apply when no choice reads the same as the input.
fn chip_for_input(choices: &[String], used: &[bool], input: &str) -> Option<usize> {
    let input = input.to_lowercase();
    let literal = |i: &usize| choices[*i].to_lowercase() == input;
    (0..choices.len())
        .filter(|i| !used[*i])
        .find(literal)
        .or_else(|| (0..choices.len()).find(literal))
        .or_else(|| (0..choices.len()).find(|&i| choice_label(i) == input))
}

/// Label of the `index`-th fill-blank choice: `a`, `b`, ... `z`, `aa`, ...
fn choice_label(index: usize) -> String {
    let letter = (b'a' + (index % 26) as u8) as char;
    letter.to_string().repeat(index / 26 + 1)
}

/// Interactive sink over any line reader and writer.
pub struct TerminalSink<'a, R, W, G> {
    input: R,
    output: W,
    rng: G,
    config: &'a QuizConfig,
}

impl<'a, R: BufRead, W: Write, G: Rng> TerminalSink<'a, R, W, G> {
    pub fn new(input: R, output: W, rng: G, config: &'a QuizConfig) -> Self {
        Self {
            input,
            output,
            rng,
            config,
        }
    }

    /// Present one question until it is graded.
    ///
    /// Returns `Ok(None)` when input ends before a complete response.
    pub fn present(
        &mut self,
        number: usize,
        total: usize,
        question: &Question,
    ) -> Result<Option<Outcome>> {
        let choices = if question.kind() == QuestionKind::FillBlank {
            blank_choices(question, self.config.shuffle_blank_choices, &mut self.rng)
        } else {
            Vec::new()
        };

        self.render(number, total, question, &choices)?;

        loop {
            let Some(response) = self.collect(question, &choices)? else {
                return Ok(None);
            };

            let result = grade(question, &response);
            let (outcome, message) = verdict_message(&self.config.labels, question, &result);
            writeln!(self.output, "{message}")?;

            if outcome.is_some() {
                writeln!(self.output)?;
                return Ok(outcome);
            }
        }
    }

    fn render(
        &mut self,
        number: usize,
        total: usize,
        question: &Question,
        choices: &[String],
    ) -> Result<()> {
        writeln!(self.output, "Question {number}/{total} ({})", question.kind())?;

        match question.kind() {
            QuestionKind::FillBlank => {
                let segments = question.prompt_segments();
                let mut prompt = String::new();
                for (i, segment) in segments.iter().enumerate() {
                    prompt.push_str(segment);
                    if i + 1 < segments.len() {
                        prompt.push_str(&format!("[{}]", i + 1));
                    }
                }
                writeln!(self.output, "{prompt}")?;
                writeln!(self.output, "Available choices:")?;
                for (i, choice) in choices.iter().enumerate() {
                    writeln!(self.output, "  {}) {choice}", choice_label(i))?;
                }
            }
            QuestionKind::TrueFalse => {
                writeln!(self.output, "{}", question.prompt())?;
                writeln!(
                    self.output,
                    "  {} / {}",
                    self.config.labels.true_label, self.config.labels.false_label
                )?;
            }
            QuestionKind::MultipleChoice | QuestionKind::Sort => {
                writeln!(self.output, "{}", question.prompt())?;
                for option in question.options() {
                    writeln!(self.output, "  {}: {}", option.id, option.text)?;
                }
            }
            QuestionKind::FreeText => {
                writeln!(self.output, "{}", question.prompt())?;
            }
        }

        Ok(())
    }

    fn collect(&mut self, question: &Question, choices: &[String]) -> Result<Option<Response>> {
        match question.kind() {
            QuestionKind::FillBlank => self.collect_blanks(question, choices),
            kind => loop {
                let hint = match kind {
                    QuestionKind::MultipleChoice => "Select option ids (comma-separated)",
                    QuestionKind::Sort => "Enter option ids in order (comma-separated)",
                    _ => "Your answer",
                };
                let Some(line) = self.prompt_line(hint)? else {
                    return Ok(None);
                };
                match parse_response(question, &line, &self.config.labels) {
                    Ok(response) => return Ok(Some(response)),
                    Err(e) => writeln!(self.output, "{e}")?,
                }
            },
        }
    }

    /// Fill each blank with a choice label or literal text; each choice
    /// can fill one blank only.
    fn collect_blanks(
        &mut self,
        question: &Question,
        choices: &[String],
    ) -> Result<Option<Response>> {
        let mut used = vec![false; choices.len()];
        let mut fillings = Vec::with_capacity(question.blank_count());

        for blank in 1..=question.blank_count() {
            loop {
                let Some(line) = self.prompt_line(&format!("Blank {blank}"))? else {
                    return Ok(None);
                };
                let chosen = chip_for_input(choices, &used, &line);
                match chosen {
                    Some(i) if used[i] => {
                        writeln!(self.output, "Choice {} is already used.", choice_label(i))?;
                    }
                    Some(i) => {
                        used[i] = true;
                        fillings.push(choices[i].clone());
                        break;
                    }
                    None => {
                        fillings.push(line);
                        break;
                    }
                }
            }
        }

        Ok(Some(Response::Blanks(fillings)))
    }

    fn prompt_line(&mut self, hint: &str) -> Result<Option<String>> {
        write!(self.output, "{hint}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read response")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Write the end-of-session summary.
    pub fn finish(&mut self, scorecard: &Scorecard) -> Result<()> {
        writeln!(self.output, "{}", scorecard.to_table())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizblock_core::parse;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    fn run_one(source: &str, input: &str, config: &QuizConfig) -> (Option<Outcome>, String) {
        let question = parse(source).unwrap();
        let mut output = Vec::new();
        let outcome = {
            let mut sink = TerminalSink::new(
                Cursor::new(input.to_string()),
                &mut output,
                StdRng::seed_from_u64(1),
                config,
            );
            sink.present(1, 1, &question).unwrap()
        };
        (outcome, String::from_utf8(output).unwrap())
    }

    #[test]
    fn multiple_choice_session() {
        let config = QuizConfig::default();
        let (outcome, out) = run_one(
            "-- Question What is 2+2?\n-- A\n3\n-- B\n4\n-- Answer B",
            "b\nB\n",
            &config,
        );
        assert_eq!(outcome, Some(Outcome::Incorrect));
        assert!(out.contains("  A: 3"));
        assert!(out.contains("Incorrect. The correct answer is: B"));
    }

    #[test]
    fn true_false_reasks_when_unanswered() {
        let config = QuizConfig::default();
        let (outcome, out) = run_one(
            "-- Type tf\n-- Question Rust has a GC.\n-- Answer false",
            "\nmaybe\nf\n",
            &config,
        );
        assert_eq!(outcome, Some(Outcome::Correct));
        assert!(out.contains("Please complete your answer."));
        assert!(out.contains("unrecognized true/false response"));
        assert!(out.contains("Correct!"));
    }

    #[test]
    fn true_false_uses_configured_labels() {
        let mut config = QuizConfig::default();
        config.labels.true_label = "Wahr".into();
        config.labels.false_label = "Falsch".into();
        let (outcome, out) = run_one(
            "-- Type tf\n-- Question Q\n-- Answer wahr",
            "falsch\n",
            &config,
        );
        assert_eq!(outcome, Some(Outcome::Incorrect));
        assert!(out.contains("  Wahr / Falsch"));
        assert!(out.ends_with("Incorrect. The correct answer is: Wahr\n\n"));
    }

    #[test]
    fn fill_blank_choices_in_authored_order_without_shuffle() {
        let mut config = QuizConfig::default();
        config.shuffle_blank_choices = false;
        let (outcome, out) = run_one(
            "-- Type fb\n-- Question [blank] + [blank] = 4\n-- Answer 1, 3",
            "a\na\nb\n",
            &config,
        );
        assert_eq!(outcome, Some(Outcome::Correct));
        assert!(out.contains("[1] + [2] = 4"));
        assert!(out.contains("  a) 1\n  b) 3\n"));
        assert!(out.contains("Choice a is already used."));
    }

    #[test]
    fn fill_blank_literal_text() {
        let mut config = QuizConfig::default();
        config.shuffle_blank_choices = false;
        let (outcome, _) = run_one(
            "-- Type fb\n-- Question Capital: [blank]\n-- Answer Paris, France",
            "paris, france\n",
            &config,
        );
        assert_eq!(outcome, Some(Outcome::Correct));
    }

    #[test]
    fn fill_blank_literal_answer_wins_over_label() {
        let mut config = QuizConfig::default();
        config.shuffle_blank_choices = false;
        let (outcome, out) = run_one(
            "-- Type fb\n-- Question [blank] then [blank]\n-- Answer b, a",
            "b\na\n",
            &config,
        );
        assert!(out.contains("  a) b\n  b) a\n"));
        assert_eq!(outcome, Some(Outcome::Correct));
    }

    #[test]
    fn fill_blank_repeated_answer_uses_each_chip() {
        let mut config = QuizConfig::default();
        config.shuffle_blank_choices = false;
        let (outcome, out) = run_one(
            "-- Type fb\n-- Question [blank] and [blank]\n-- Answer go, go",
            "go\ngo\n",
            &config,
        );
        assert!(!out.contains("already used"));
        assert_eq!(outcome, Some(Outcome::Correct));
    }

    #[test]
    fn sort_with_multi_word_ids() {
        let config = QuizConfig::default();
        let source = "-- Type sort\n-- Question Order\n-- Step one\nx\n-- Step two\ny\n-- Answer Step one, Step two";
        let question = parse(source).unwrap();
        let response = parse_response(&question, "Step one , Step two", &config.labels).unwrap();
        assert_eq!(
            response,
            Response::Order(vec!["Step one".into(), "Step two".into()])
        );

        let (outcome, out) = run_one(source, "Step one, Step two\n", &config);
        assert!(out.contains("  Step one: x"));
        assert_eq!(outcome, Some(Outcome::Correct));
    }

    #[test]
    fn fill_blank_misconfigured() {
        let config = QuizConfig::default();
        let (outcome, out) = run_one(
            "-- Type fb\n-- Question [blank] [blank] [blank]\n-- Answer a, b",
            "x\ny\nz\n",
            &config,
        );
        assert_eq!(outcome, Some(Outcome::Misconfigured));
        assert!(out.contains("not enough correct answers defined"));
    }

    #[test]
    fn end_of_input_leaves_question_unanswered() {
        let config = QuizConfig::default();
        let (outcome, _) = run_one("-- Type text\n-- Question Q\n-- Answer a", "", &config);
        assert_eq!(outcome, None);
    }

    #[test]
    fn sort_session_shows_options_in_authored_order() {
        let config = QuizConfig::default();
        let (outcome, out) = run_one(
            "-- Type sort\n-- Question Order\n-- A\nx\n-- B\ny\n-- Answer B, A",
            "A, B\n",
            &config,
        );
        assert_eq!(outcome, Some(Outcome::Incorrect));
        assert!(out.contains("  A: x\n  B: y\n"));
        assert!(out.contains("y → x"));
    }

    #[test]
    fn shuffle_keeps_answers_intact() {
        let q = parse("-- Type fb\n-- Question [blank] [blank] [blank] [blank]\n-- Answer a, b, c, d")
            .unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let mut choices = blank_choices(&q, true, &mut rng);
        choices.sort();
        assert_eq!(choices, vec!["a", "b", "c", "d"]);
        assert_eq!(q.answers(), &["a", "b", "c", "d"]);
    }

    #[test]
    fn parse_one_line_responses() {
        let labels = Labels::default();
        let mc = parse("-- Question Q\n-- A\nx\n-- B\ny\n-- Answer A").unwrap();
        assert_eq!(
            parse_response(&mc, "A, B", &labels).unwrap(),
            Response::Selection(vec!["A".into(), "B".into()])
        );
        let fb = parse("-- Type fb\n-- Question [blank] [blank]\n-- Answer a, b").unwrap();
        assert_eq!(
            parse_response(&fb, "a | b", &labels).unwrap(),
            Response::Blanks(vec!["a".into(), "b".into()])
        );
        let tf = parse("-- Type tf\n-- Question Q\n-- Answer true").unwrap();
        assert_eq!(
            parse_response(&tf, "", &labels).unwrap(),
            Response::TrueFalse(None)
        );
        assert!(parse_response(&tf, "perhaps", &labels).is_err());
    }

    #[test]
    fn choice_labels() {
        assert_eq!(choice_label(0), "a");
        assert_eq!(choice_label(25), "z");
        assert_eq!(choice_label(26), "aa");
    }

    #[test]
    fn scorecard_counts() {
        let mut card = Scorecard::default();
        card.record(Some(Outcome::Correct));
        card.record(Some(Outcome::Incorrect));
        card.record(None);
        assert_eq!(card.total(), 3);
        assert!(card.to_table().to_string().contains("33.3%"));
    }
}
