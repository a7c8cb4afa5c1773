//! The `quizblock validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizblock_core::document::load_quiz_path;

pub fn execute(quiz_path: PathBuf, strict: bool) -> Result<()> {
    let documents = load_quiz_path(&quiz_path)?;

    let mut total_errors = 0;
    let mut total_warnings = 0;

    for doc in &documents {
        println!(
            "Quiz file: {} ({} blocks)",
            doc.path.display(),
            doc.blocks.len()
        );

        for (line, error) in doc.errors() {
            println!("  [line {line}] ERROR: {error}");
            total_errors += 1;
        }

        let warnings = doc.warnings();
        for w in &warnings {
            let prefix = w
                .line
                .map(|line| format!("  [line {line}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_errors == 0 && total_warnings == 0 {
        println!("All quiz blocks valid.");
    } else {
        println!("\n{total_errors} error(s), {total_warnings} warning(s) found.");
    }

    anyhow::ensure!(total_errors == 0, "{total_errors} quiz block(s) failed to parse");
    anyhow::ensure!(
        !strict || total_warnings == 0,
        "{total_warnings} warning(s) reported in strict mode"
    );

    Ok(())
}
