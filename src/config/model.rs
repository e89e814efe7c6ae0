// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::submit::DEFAULT_ACK_PATTERN;
use crate::types::FanInPolicy;

/// Raw pipeline file as read from TOML, before validation.
///
/// ```toml
/// [scheduler]
/// command = "sbatch"
/// args = ["--partition=short"]
///
/// [config]
/// fan_in = "reject"
/// roots = ["get_samplelist"]
///
/// [job.get_samplelist]
/// path = "./scripts/get_samplelist.sh"
///
/// [job.fastqc]
/// path = "./scripts/fastqc.sh"
/// after = ["get_samplelist"]
/// ```
///
/// Every section except `[job.<name>]` is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPipelineFile {
    #[serde(default)]
    pub scheduler: SchedulerSection,

    #[serde(default)]
    pub config: ConfigSection,

    /// All jobs from `[job.<name>]`, keyed by job name.
    #[serde(default)]
    pub job: BTreeMap<String, JobConfig>,
}

/// Validated pipeline file.
///
/// Only obtainable through `TryFrom<RawPipelineFile>` (see `validate.rs`).
#[derive(Debug, Clone)]
pub struct PipelineFile {
    pub scheduler: SchedulerSection,
    pub config: ConfigSection,
    pub job: BTreeMap<String, JobConfig>,
}

impl PipelineFile {
    pub(crate) fn new_unchecked(
        scheduler: SchedulerSection,
        config: ConfigSection,
        job: BTreeMap<String, JobConfig>,
    ) -> Self {
        Self {
            scheduler,
            config,
            job,
        }
    }
}

/// `[scheduler]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerSection {
    /// Submission command. Default: `sbatch`.
    #[serde(default = "default_command")]
    pub command: String,

    /// Extra arguments placed before the dependency flag and script path.
    #[serde(default)]
    pub args: Vec<String>,

    /// Regex matched against the command's stdout; its first capture group
    /// is the job id.
    #[serde(default = "default_ack_pattern")]
    pub ack_pattern: String,
}

fn default_command() -> String {
    "sbatch".to_string()
}

fn default_ack_pattern() -> String {
    DEFAULT_ACK_PATTERN.to_string()
}

impl Default for SchedulerSection {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: Vec::new(),
            ack_pattern: default_ack_pattern(),
        }
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigSection {
    /// `"reject"` (default), `"per_path"` or `"merge"`.
    #[serde(default)]
    pub fan_in: FanInPolicy,

    /// Jobs to start submission from. Empty means every job without `after`.
    #[serde(default)]
    pub roots: Vec<String>,
}

/// `[job.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    /// Script handed to the scheduler.
    pub path: String,

    /// Jobs that must succeed before this one starts.
    #[serde(default)]
    pub after: Vec<String>,
}
