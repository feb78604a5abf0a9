//! Recorded runs and the driver that plays them back through a reporter.
//!
//! A recording is a YAML or JSON description of a finished run:
//!
//! ```yaml
//! suites:
//!   - description: Math
//!     children:
//!       - kind: spec
//!         description: adds
//!         duration_ms: 3
//!         assertions:
//!           - passed: true
//!       - kind: suite
//!         description: division
//!         children:
//!           - kind: spec
//!             description: by zero
//!             skipped: true
//! ```
//!
//! Replaying delivers the same lifecycle events a live runner would, in
//! depth-first declaration order, advancing a [`ManualClock`] by each spec's
//! recorded duration.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::clock::ManualClock;
use crate::errors::ReplayError;
use crate::reporter::Reporter;
use crate::runner::{AssertionResult, Child, Runner, RunnerBuilder, SpecId, SpecResults, SuiteId};

const INLINE_SOURCE: &str = "<inline>";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    #[serde(default)]
    pub suites: Vec<SuiteRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteRecord {
    pub description: String,
    #[serde(default)]
    pub children: Vec<NodeRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecRecord {
    pub description: String,
    #[serde(default)]
    pub skipped: bool,
    /// Overrides the status derived from `assertions`.
    #[serde(default)]
    pub passed: Option<bool>,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub assertions: Vec<AssertionResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeRecord {
    Suite(SuiteRecord),
    Spec(SpecRecord),
}

impl Recording {
    /// Loads a recording, picking the format from the file extension.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let display = path.display().to_string();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        let parse: fn(&str, &str) -> Result<Self, ReplayError> = match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::parse_yaml,
            Some("json") => Self::parse_json,
            _ => return Err(ReplayError::UnsupportedFormat { path: display }),
        };
        let source = fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: display.clone(),
            source,
        })?;
        let recording = parse(&source, &display)?;
        debug!("loaded recording {} with {} suites", display, recording.suites.len());
        Ok(recording)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, ReplayError> {
        Self::parse_yaml(source, INLINE_SOURCE)
    }

    pub fn from_json_str(source: &str) -> Result<Self, ReplayError> {
        Self::parse_json(source, INLINE_SOURCE)
    }

    fn parse_yaml(source: &str, path: &str) -> Result<Self, ReplayError> {
        serde_yaml::from_str(source).map_err(|source| ReplayError::Yaml {
            path: path.to_string(),
            source,
        })
    }

    fn parse_json(source: &str, path: &str) -> Result<Self, ReplayError> {
        serde_json::from_str(source).map_err(|source| ReplayError::Json {
            path: path.to_string(),
            source,
        })
    }

    /// Builds the runner hierarchy. Ids follow declaration order.
    pub fn into_replay(self) -> Replay {
        let mut builder = Runner::builder();
        let mut durations = HashMap::new();
        for suite in self.suites {
            declare_suite(&mut builder, &mut durations, None, suite);
        }
        Replay {
            runner: builder.build(),
            durations,
        }
    }
}

fn declare_suite(
    builder: &mut RunnerBuilder,
    durations: &mut HashMap<SpecId, u64>,
    parent: Option<SuiteId>,
    record: SuiteRecord,
) {
    let id = builder.add_suite(parent, record.description);
    for child in record.children {
        match child {
            NodeRecord::Suite(suite) => declare_suite(builder, durations, Some(id), suite),
            NodeRecord::Spec(spec) => {
                let results = SpecResults {
                    skipped: spec.skipped,
                    status: spec.passed,
                    items: spec.assertions,
                };
                let spec_id = builder.add_spec(id, spec.description, results);
                durations.insert(spec_id, spec.duration_ms);
            }
        }
    }
}

/// A recorded run ready to be driven through a reporter.
#[derive(Debug, Clone)]
pub struct Replay {
    runner: Runner,
    durations: HashMap<SpecId, u64>,
}

impl Replay {
    pub fn runner(&self) -> &Runner {
        &self.runner
    }

    pub fn duration_ms(&self, id: SpecId) -> u64 {
        self.durations.get(&id).copied().unwrap_or(0)
    }

    /// Delivers the full event stream of the run to `reporter`.
    pub fn drive(&self, reporter: &mut dyn Reporter, clock: &ManualClock) {
        reporter.run_starting(&self.runner);
        for suite in self.runner.top_level_suites() {
            self.drive_suite(reporter, clock, suite.id);
        }
        reporter.runner_results(&self.runner);
    }

    fn drive_suite(&self, reporter: &mut dyn Reporter, clock: &ManualClock, id: SuiteId) {
        let Some(suite) = self.runner.suite(id) else {
            return;
        };
        for child in &suite.children {
            match *child {
                Child::Suite(child_id) => self.drive_suite(reporter, clock, child_id),
                Child::Spec(spec_id) => {
                    if let Some(spec) = self.runner.spec(spec_id) {
                        reporter.spec_starting(&self.runner, spec);
                        clock.advance(self.duration_ms(spec_id));
                        reporter.spec_results(&self.runner, spec);
                    }
                }
            }
        }
        reporter.suite_results(&self.runner, suite);
    }
}
