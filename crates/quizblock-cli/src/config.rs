//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides the shuffle seed.
pub const SEED_ENV_VAR: &str = "QUIZBLOCK_SEED";

/// Top-level quizblock configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Shuffle the answer choices offered for fill-in-the-blank questions.
    #[serde(default = "default_true")]
    pub shuffle_blank_choices: bool,
    /// Fixed seed for the shuffle, for reproducible sessions.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Text shown to the quiz taker.
    #[serde(default)]
    pub labels: Labels,
}

/// User-facing strings of the terminal sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub true_label: String,
    pub false_label: String,
    pub correct: String,
    pub incorrect: String,
    pub incomplete: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            true_label: "True".into(),
            false_label: "False".into(),
            correct: "Correct!".into(),
            incorrect: "Incorrect. The correct answer is:".into(),
            incomplete: "Please complete your answer.".into(),
        }
    }
}

fn default_true() -> bool {
    true
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            shuffle_blank_choices: true,
            seed: None,
            labels: Labels::default(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `quizblock.toml` in the current directory
/// 2. `~/.config/quizblock/config.toml`
///
/// `QUIZBLOCK_SEED` overrides the configured seed.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizblock.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizConfig::default(),
    };

    if let Ok(seed) = std::env::var(SEED_ENV_VAR) {
        config.seed = Some(
            seed.trim()
                .parse()
                .with_context(|| format!("{SEED_ENV_VAR} must be an unsigned integer, got '{seed}'"))?,
        );
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizblock"))
}
