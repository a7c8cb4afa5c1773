//! quizblock CLI: parse, validate and take quiz blocks from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod sink;

#[derive(Parser)]
#[command(name = "quizblock", version, about = "Quiz block parser and terminal quiz runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz interactively
    Run {
        /// Quiz file (.quiz or markdown with ```quiz blocks)
        #[arg(long)]
        quiz: PathBuf,

        /// Seed for shuffling fill-in-the-blank choices
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Grade a single response
    Check {
        /// Quiz file (.quiz or markdown with ```quiz blocks)
        #[arg(long)]
        quiz: PathBuf,

        /// Block number within the file, starting at 1
        #[arg(long, default_value = "1")]
        block: usize,

        /// Response: comma-separated option ids, text, true/false, or blanks separated by '|'
        #[arg(long, allow_hyphen_values = true)]
        response: String,

        /// Exit code 1 unless the response is correct
        #[arg(long)]
        fail_on_incorrect: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate quiz files
    Validate {
        /// Quiz file or directory
        #[arg(long)]
        quiz: PathBuf,

        /// Exit code 1 on warnings as well as parse errors
        #[arg(long)]
        strict: bool,
    },

    /// Print parsed quiz blocks
    Show {
        /// Quiz file or directory
        #[arg(long)]
        quiz: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create starter config and example quiz
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizblock=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { quiz, seed, config } => commands::run::execute(quiz, seed, config),
        Commands::Check {
            quiz,
            block,
            response,
            fail_on_incorrect,
            config,
        } => commands::check::execute(quiz, block, response, fail_on_incorrect, config),
        Commands::Validate { quiz, strict } => commands::validate::execute(quiz, strict),
        Commands::Show { quiz, format } => commands::show::execute(quiz, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
