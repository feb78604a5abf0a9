//! Flags for `spec-reporter replay` and `spec-reporter tree`.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "spec-reporter",
    version,
    about = "Replay recorded spec runs through the console reporters."
)]
pub struct ReporterArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// When to emit ANSI color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Color when stdout is a terminal.
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Auto => atty::is(atty::Stream::Stdout),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replay a recorded run and print the report.
    Replay {
        /// The path to a .yaml, .yml, or .json recording.
        #[arg(required = true)]
        file: PathBuf,
        /// Print the nested, timed result tree instead of dots.
        #[arg(short, long)]
        verbose: bool,
        #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
        color: ColorMode,
        /// Leave stack traces out of the failure digest.
        #[arg(long)]
        no_stack_trace: bool,
        /// Drop stack trace lines matching this regular expression.
        #[arg(long, value_name = "REGEX")]
        stack_filter: Option<String>,
    },
    /// Show the suite/spec tree of a recording.
    Tree {
        /// The path to a .yaml, .yml, or .json recording.
        #[arg(required = true)]
        file: PathBuf,
    },
}
