// src/types.rs

use std::fmt;

use clap::ValueEnum;
use serde::Deserialize;

/// What to do with a job that is reachable from the roots via more than
/// one parent.
///
/// - `Reject`: refuse to submit anything; the pipeline author has to
///   restructure the graph or pick another policy (default).
/// - `PerPath`: submit the job once per incoming path, each copy depending
///   on the parent that reached it.
/// - `Merge`: submit the job once, after all of its parents were accepted,
///   depending on every parent's job id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FanInPolicy {
    #[default]
    Reject,
    #[value(name = "per_path")]
    PerPath,
    Merge,
}

/// Opaque job identifier handed out by the scheduler on acceptance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
