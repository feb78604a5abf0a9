//! Console reporters for spec runners.
//!
//! A runner feeds lifecycle events to a [`Reporter`]; the compact
//! [`TerminalReporter`] prints dot progress and a failure digest, the
//! [`VerboseReporter`] prints a nested tree with per-spec and per-suite
//! timings. Recorded runs can be replayed through either via [`replay`].

pub use crate::config::ReporterConfig;
pub use crate::errors::ReplayError;
pub use crate::reporter::{FailureRecord, Reporter, TerminalReporter, VerboseReporter};
pub use crate::runner::{AssertionResult, Runner, Spec, SpecResults, Suite};

pub mod cli;
pub mod clock;
pub mod config;
pub mod errors;
pub mod output;
pub mod palette;
pub mod replay;
pub mod reporter;
pub mod runner;
pub mod summary;
