//! Reporter options.
//!
//! Every option has a documented default, so `ReporterConfig::default()` is a
//! working configuration: plain output to stdout, stack traces included and
//! unfiltered, no completion callback, wall-clock timing.

use regex::Regex;

use crate::clock::{Clock, SystemClock};
use crate::output::{OutputSink, StdoutSink};
use crate::runner::Runner;

pub type StackFilter = Box<dyn Fn(&str) -> String>;
pub type CompletionCallback = Box<dyn FnMut(&Runner)>;

pub struct ReporterConfig {
    pub sink: Box<dyn OutputSink>,
    /// Selects the ANSI palette when true.
    pub color: bool,
    /// Invoked once after the final report has been printed.
    pub on_complete: Option<CompletionCallback>,
    pub include_stack_trace: bool,
    pub stack_filter: StackFilter,
    pub clock: Box<dyn Clock>,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            sink: Box::new(StdoutSink),
            color: false,
            on_complete: None,
            include_stack_trace: true,
            stack_filter: Box::new(|stack: &str| stack.to_string()),
            clock: Box::new(SystemClock),
        }
    }
}

impl ReporterConfig {
    pub fn with_sink(self, sink: impl OutputSink + 'static) -> Self {
        Self {
            sink: Box::new(sink),
            ..self
        }
    }

    pub fn with_color(self, color: bool) -> Self {
        Self { color, ..self }
    }

    pub fn with_on_complete(self, callback: impl FnMut(&Runner) + 'static) -> Self {
        Self {
            on_complete: Some(Box::new(callback)),
            ..self
        }
    }

    pub fn with_stack_trace(self, include_stack_trace: bool) -> Self {
        Self {
            include_stack_trace,
            ..self
        }
    }

    pub fn with_stack_filter(self, filter: impl Fn(&str) -> String + 'static) -> Self {
        Self {
            stack_filter: Box::new(filter),
            ..self
        }
    }

    pub fn with_clock(self, clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            ..self
        }
    }
}

impl std::fmt::Debug for ReporterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReporterConfig")
            .field("color", &self.color)
            .field("on_complete", &self.on_complete.is_some())
            .field("include_stack_trace", &self.include_stack_trace)
            .finish_non_exhaustive()
    }
}

/// Stack filter that drops every line matching `pattern`.
pub fn line_filter(pattern: Regex) -> impl Fn(&str) -> String {
    move |stack: &str| {
        stack
            .lines()
            .filter(|line| !pattern.is_match(line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
