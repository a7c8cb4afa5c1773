//! The `quizblock show` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};
use serde_json::json;

use quizblock_core::document::{load_quiz_path, QuizDocument};

pub fn execute(quiz_path: PathBuf, format: String) -> Result<()> {
    let documents = load_quiz_path(&quiz_path)?;

    match format.as_str() {
        "json" => {
            let docs: Vec<_> = documents.iter().map(document_json).collect();
            println!("{}", serde_json::to_string_pretty(&docs)?);
        }
        "text" => {
            for doc in &documents {
                println!("{}", doc.path.display());
                println!("{}", summary_table(doc));
            }
        }
        other => anyhow::bail!("Unknown format: {other}"),
    }

    Ok(())
}

fn document_json(doc: &QuizDocument) -> serde_json::Value {
    let blocks: Vec<_> = doc
        .blocks
        .iter()
        .map(|b| match &b.result {
            Ok(question) => json!({ "line": b.line, "question": question }),
            Err(e) => json!({ "line": b.line, "error": e.to_string() }),
        })
        .collect();

    json!({
        "path": doc.path.display().to_string(),
        "blocks": blocks,
    })
}

fn summary_table(doc: &QuizDocument) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Line", "Kind", "Prompt", "Options", "Answers"]);

    for (index, block) in doc.blocks.iter().enumerate() {
        match &block.result {
            Ok(q) => {
                let prompt = q.prompt().lines().next().unwrap_or_default();
                let options = q
                    .options()
                    .iter()
                    .map(|o| o.id.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                table.add_row(vec![
                    Cell::new(index + 1),
                    Cell::new(block.line),
                    Cell::new(format!("{} ({})", q.kind(), q.kind().tag())),
                    Cell::new(prompt),
                    Cell::new(options),
                    Cell::new(q.answers().join(", ")),
                ]);
            }
            Err(e) => {
                table.add_row(vec![
                    Cell::new(index + 1),
                    Cell::new(block.line),
                    Cell::new("error"),
                    Cell::new(e),
                    Cell::new(""),
                    Cell::new(""),
                ]);
            }
        }
    }

    table
}
