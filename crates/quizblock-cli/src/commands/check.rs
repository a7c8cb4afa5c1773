//! The `quizblock check` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizblock_core::document::load_quiz_file;
use quizblock_core::grade;

use crate::config::load_config_from;
use crate::sink::{parse_response, verdict_message, Outcome};

pub fn execute(
    quiz_path: PathBuf,
    block: usize,
    response: String,
    fail_on_incorrect: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(block >= 1, "block numbers start at 1");

    let config = load_config_from(config_path.as_deref())?;
    let doc = load_quiz_file(&quiz_path)?;

    let parsed = doc.blocks.get(block - 1).with_context(|| {
        format!(
            "{} has {} quiz block(s), no block {block}",
            quiz_path.display(),
            doc.blocks.len()
        )
    })?;
    let question = parsed
        .result
        .as_ref()
        .map_err(|e| anyhow::anyhow!("quiz block {block} (line {}): {e}", parsed.line))?;

    let response = parse_response(question, &response, &config.labels)?;
    let result = grade(question, &response);
    let (outcome, message) = verdict_message(&config.labels, question, &result);

    println!("{message}");

    if fail_on_incorrect && outcome != Some(Outcome::Correct) {
        std::process::exit(1);
    }

    Ok(())
}
