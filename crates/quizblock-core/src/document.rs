//! Quiz documents: files holding one or more quiz blocks.
//!
//! Markdown files carry quiz blocks in ```` ```quiz ```` fences; any other
//! file is read as a single raw block. Every block is parsed on its own, so
//! one broken block never hides its neighbours.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::ParseError;
use crate::model::Question;
use crate::parser::parse;
use crate::validate::{validate_question, ValidationWarning};

/// Info string that marks a fenced quiz block.
pub const QUIZ_FENCE_LANG: &str = "quiz";

/// File extensions picked up by [`load_quiz_directory`].
pub const QUIZ_EXTENSIONS: &[&str] = &["quiz", "md", "markdown"];

/// Raw text of one quiz block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizBlock {
    /// 1-based line of the block's first content line in its document.
    pub line: usize,
    pub source: String,
}

/// A parsed block, or the reason it failed.
#[derive(Debug, Clone)]
pub struct ParsedBlock {
    pub line: usize,
    pub result: Result<Question, ParseError>,
}

/// All quiz blocks of one file.
#[derive(Debug, Clone)]
pub struct QuizDocument {
    pub path: PathBuf,
    pub blocks: Vec<ParsedBlock>,
}

impl QuizDocument {
    /// Build a document from file contents.
    ///
    /// `path` decides the format: `.md`/`.markdown` are scanned for fences,
    /// everything else is one block.
    pub fn from_source(content: &str, path: &Path) -> Self {
        let raw_blocks = if is_markdown(path) {
            extract_quiz_blocks(content)
        } else {
            vec![QuizBlock {
                line: 1,
                source: content.to_string(),
            }]
        };

        let blocks = raw_blocks
            .into_iter()
            .map(|block| {
                let result = parse(&block.source);
                if let Err(e) = &result {
                    tracing::debug!(path = %path.display(), line = block.line, "quiz block failed: {e}");
                }
                ParsedBlock {
                    line: block.line,
                    result,
                }
            })
            .collect();

        Self {
            path: path.to_path_buf(),
            blocks,
        }
    }

    /// Successfully parsed questions, in document order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.blocks.iter().filter_map(|b| b.result.as_ref().ok())
    }

    /// Blocks that failed to parse, with their starting line.
    pub fn errors(&self) -> impl Iterator<Item = (usize, &ParseError)> {
        self.blocks
            .iter()
            .filter_map(|b| b.result.as_ref().err().map(|e| (b.line, e)))
    }

    /// Authoring warnings for every parsed question, tagged with block line.
    pub fn warnings(&self) -> Vec<ValidationWarning> {
        self.blocks
            .iter()
            .filter_map(|b| b.result.as_ref().ok().map(|q| (b.line, q)))
            .flat_map(|(line, q)| {
                validate_question(q).into_iter().map(move |mut w| {
                    w.line = Some(line);
                    w
                })
            })
            .collect()
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "md" || ext == "markdown")
}

/// Extract the bodies of ```` ```quiz ```` fenced blocks from markdown.
///
/// Fences of other languages are skipped. An unclosed quiz fence at the end
/// of the document is still returned.
pub fn extract_quiz_blocks(markdown: &str) -> Vec<QuizBlock> {
    let mut blocks = Vec::new();
    let mut in_block = false;
    let mut is_quiz_block = false;
    let mut start_line = 0;
    let mut current_block = String::new();

    for (index, line) in markdown.lines().enumerate() {
        let trimmed = line.trim();

        if !in_block && trimmed.starts_with("```") {
            in_block = true;
            let lang = trimmed.trim_start_matches('`').trim().to_lowercase();
            is_quiz_block = lang == QUIZ_FENCE_LANG;
            start_line = index + 2;
            current_block.clear();
            continue;
        }

        if in_block && trimmed == "```" {
            in_block = false;
            if is_quiz_block {
                blocks.push(QuizBlock {
                    line: start_line,
                    source: std::mem::take(&mut current_block),
                });
            }
            current_block.clear();
            continue;
        }

        if in_block && is_quiz_block {
            if !current_block.is_empty() {
                current_block.push('\n');
            }
            current_block.push_str(line);
        }
    }

    // Handle a truncated (unclosed) quiz block
    if in_block && is_quiz_block {
        blocks.push(QuizBlock {
            line: start_line,
            source: current_block,
        });
    }

    blocks
}

/// Read and parse a single quiz file.
pub fn load_quiz_file(path: &Path) -> Result<QuizDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    Ok(QuizDocument::from_source(&content, path))
}

/// Recursively load all quiz files from a directory, sorted by path.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<QuizDocument>> {
    let mut documents = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            documents.extend(load_quiz_directory(&path)?);
        } else if path
            .extension()
            .is_some_and(|ext| QUIZ_EXTENSIONS.iter().any(|known| ext == *known))
        {
            match load_quiz_file(&path) {
                Ok(doc) => documents.push(doc),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(documents)
}

/// Load a file, or every quiz file under a directory.
pub fn load_quiz_path(path: &Path) -> Result<Vec<QuizDocument>> {
    if path.is_dir() {
        load_quiz_directory(path)
    } else {
        Ok(vec![load_quiz_file(path)?])
    }
}
