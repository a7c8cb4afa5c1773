//! The `quizblock run` command.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizblock_core::document::load_quiz_file;

use crate::config::load_config_from;
use crate::sink::{Scorecard, TerminalSink};

pub fn execute(quiz_path: PathBuf, seed: Option<u64>, config_path: Option<PathBuf>) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if seed.is_some() {
        config.seed = seed;
    }

    let doc = load_quiz_file(&quiz_path)?;
    for (line, error) in doc.errors() {
        eprintln!("Skipping quiz block at line {line}: {error}");
    }

    let questions: Vec<_> = doc.questions().collect();
    anyhow::ensure!(
        !questions.is_empty(),
        "no valid quiz blocks in {}",
        quiz_path.display()
    );

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    tracing::info!(questions = questions.len(), "starting quiz");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut sink = TerminalSink::new(stdin.lock(), stdout.lock(), rng, &config);
    let mut scorecard = Scorecard::default();

    let total = questions.len();
    for (index, question) in questions.into_iter().enumerate() {
        let outcome = sink.present(index + 1, total, question)?;
        scorecard.record(outcome);
        if outcome.is_none() {
            // Input closed; remaining questions count as unanswered.
            for _ in index + 1..total {
                scorecard.record(None);
            }
            break;
        }
    }

    sink.finish(&scorecard)?;
    Ok(())
}
