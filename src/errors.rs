//! Error types for the outer surfaces: loading recordings and the CLI.
//!
//! The reporters themselves never fail. Everything that can go wrong before a
//! run is replayed is a [`ReplayError`], rendered through `miette`.

use miette::Diagnostic;
use thiserror::Error;

/// Coarse classification of a [`ReplayError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    Io,
    Parse,
    Usage,
}

#[derive(Debug, Error, Diagnostic)]
pub enum ReplayError {
    #[error("failed to read recording '{path}'")]
    #[diagnostic(code(spec_reporter::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("recording '{path}' is not a valid YAML run")]
    #[diagnostic(
        code(spec_reporter::parse::yaml),
        help("a recording needs a top-level `suites` list; children are tagged with `kind: suite` or `kind: spec`")
    )]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("recording '{path}' is not a valid JSON run")]
    #[diagnostic(
        code(spec_reporter::parse::json),
        help("a recording needs a top-level `suites` array; children are tagged with \"kind\": \"suite\" or \"kind\": \"spec\"")
    )]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot tell the format of '{path}'")]
    #[diagnostic(
        code(spec_reporter::format),
        help("use a .yaml, .yml, or .json extension")
    )]
    UnsupportedFormat { path: String },

    #[error("invalid stack filter pattern '{pattern}'")]
    #[diagnostic(code(spec_reporter::stack_filter))]
    StackFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl ReplayError {
    pub fn error_type(&self) -> ErrorType {
        match self {
            ReplayError::Io { .. } => ErrorType::Io,
            ReplayError::Yaml { .. } | ReplayError::Json { .. } => ErrorType::Parse,
            ReplayError::UnsupportedFormat { .. } | ReplayError::StackFilter { .. } => {
                ErrorType::Usage
            }
        }
    }
}
