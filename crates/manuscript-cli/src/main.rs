//! book - a tool for working with groff mom manuscripts for writing books
//!
//! Usage:
//!   book cat <FILE> [CHAPTER...]       Print the text content of the manuscript
//!   book ls [-n] [--wc] <FILE>         List chapters
//!   book wc <FILE> [CHAPTER]           Show manuscript and chapter word counts
//!   book pub -f <FORMAT> <FILE> ...    Publish the manuscript as mom or pdf
//!   book tokens [--json] <FILE>        Dump the parsed token stream
//!
//! Chapters are selected by ordinal (`3`) or by title (`"THE STORM"`).

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod json;

use commands::{Format, Publish};

#[derive(Debug, Parser)]
#[command(name = "book", version)]
#[command(about = "A tool for working with groff manuscripts for writing books")]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file layered over the defaults and ./book.toml
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Print out the text content of the manuscript
    Cat {
        file: PathBuf,
        /// Chapter ordinals or titles to print (default: all)
        chapters: Vec<String>,
    },
    /// List chapters
    Ls {
        /// Display chapter numbers
        #[arg(short = 'n')]
        number: bool,
        /// Display the word count of each chapter
        #[arg(long = "wc")]
        word_count: bool,
        file: PathBuf,
    },
    /// Display manuscript word count and average chapter word count
    Wc {
        file: PathBuf,
        /// Only count this chapter
        chapter: Option<String>,
    },
    /// Publish the manuscript as normalized markup or a pdf
    Pub {
        /// Output format
        #[arg(short, long, value_enum)]
        format: Format,
        /// Only publish the first COUNT words
        #[arg(long = "wc", value_name = "COUNT")]
        words: Option<usize>,
        /// Output file (default: derived from the manuscript name)
        #[arg(short, long)]
        output: Option<PathBuf>,
        file: PathBuf,
        /// Chapter ordinals or titles to publish (default: all)
        chapters: Vec<String>,
    },
    /// Dump the parsed token stream
    Tokens {
        /// Output the manuscript as JSON
        #[arg(short, long)]
        json: bool,
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), String> {
    let config = config::load(cli.config.as_deref())
        .map_err(|e| format!("failed to load configuration: {}", e))?;

    match cli.command {
        Cmd::Cat { file, chapters } => commands::cat(&file, &chapters, &config),
        Cmd::Ls {
            number,
            word_count,
            file,
        } => commands::ls(&file, number, word_count),
        Cmd::Wc { file, chapter } => commands::wc(&file, chapter.as_deref()),
        Cmd::Pub {
            format,
            words,
            output,
            file,
            chapters,
        } => commands::publish(
            Publish {
                file: &file,
                format,
                words,
                output,
                selectors: &chapters,
            },
            &config,
        ),
        Cmd::Tokens { json, file } => commands::tokens(&file, json),
    }
}
