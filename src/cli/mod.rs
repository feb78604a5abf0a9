//! The spec-reporter command-line interface.
//!
//! Loads recorded runs and drives them through the library's reporters.
//! Exit status: 0 for a clean run, 1 when the run had failing assertions,
//! 64-66 when the recording or flags could not be used.

use std::cell::Cell;
use std::path::Path;
use std::process;
use std::rc::Rc;

use clap::Parser;
use log::debug;
use regex::Regex;
use termcolor::ColorChoice;

use crate::cli::args::{ColorMode, Command, ReporterArgs};
use crate::clock::ManualClock;
use crate::config::{line_filter, ReporterConfig};
use crate::errors::{ErrorType, ReplayError};
use crate::replay::Recording;
use crate::reporter::{Reporter, TerminalReporter, VerboseReporter};
use crate::summary::summarize_forest;

pub mod args;
pub mod output;

/// Runs one CLI invocation and exits non-zero on failed runs or errors.
pub fn run() {
    let args = ReporterArgs::parse();

    let result = match args.command {
        Command::Replay {
            file,
            verbose,
            color,
            no_stack_trace,
            stack_filter,
        } => handle_replay(&file, verbose, color, !no_stack_trace, stack_filter.as_deref()),
        Command::Tree { file } => handle_tree(&file).map(|()| false),
    };

    match result {
        Ok(false) => {}
        Ok(true) => process::exit(1),
        Err(err) => {
            let code = exit_code(err.error_type());
            eprintln!("{:?}", miette::Report::new(err));
            process::exit(code);
        }
    }
}

/// sysexits-style codes: 1 stays reserved for runs with failing assertions.
pub fn exit_code(error_type: ErrorType) -> i32 {
    match error_type {
        ErrorType::Usage => 64,
        ErrorType::Parse => 65,
        ErrorType::Io => 66,
    }
}

/// Replays `path` and reports whether the run had failing assertions.
fn handle_replay(
    path: &Path,
    verbose: bool,
    color: ColorMode,
    include_stack_trace: bool,
    stack_filter: Option<&str>,
) -> Result<bool, ReplayError> {
    let replay = Recording::load(path)?.into_replay();
    let clock = ManualClock::new(0);
    let failed = Rc::new(Cell::new(false));

    let flag = failed.clone();
    let mut config = ReporterConfig::default()
        .with_color(color.enabled())
        .with_stack_trace(include_stack_trace)
        .with_clock(clock.clone())
        .with_on_complete(move |runner| flag.set(runner.results().failed_count > 0));

    if let Some(pattern) = stack_filter {
        let regex = Regex::new(pattern).map_err(|source| ReplayError::StackFilter {
            pattern: pattern.to_string(),
            source,
        })?;
        config = config.with_stack_filter(line_filter(regex));
    }

    debug!("replaying {} (verbose: {})", path.display(), verbose);
    let mut reporter: Box<dyn Reporter> = if verbose {
        Box::new(VerboseReporter::new(config))
    } else {
        Box::new(TerminalReporter::new(config))
    };
    replay.drive(reporter.as_mut(), &clock);

    Ok(failed.get())
}

fn handle_tree(path: &Path) -> Result<(), ReplayError> {
    let replay = Recording::load(path)?.into_replay();
    let forest = summarize_forest(replay.runner());
    let choice = if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    output::print_tree(&forest, choice);
    Ok(())
}
