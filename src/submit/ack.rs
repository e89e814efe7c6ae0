// src/submit/ack.rs

//! Scheduler acknowledgment parsing and dependency flag formatting.

use regex::Regex;

use crate::errors::{PipelineError, Result};
use crate::types::JobId;

/// Acknowledgment printed by `sbatch` on success.
pub const DEFAULT_ACK_PATTERN: &str = r"Submitted batch job (\d+)";

/// Extracts job ids from scheduler stdout.
///
/// The first capture group of the pattern is the job id. Text around the
/// acknowledgment (banners, warnings, trailing newlines) is ignored.
#[derive(Debug, Clone)]
pub struct AckParser {
    pattern: Regex,
}

impl AckParser {
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| {
            PipelineError::ConfigError(format!("invalid ack_pattern '{}': {}", pattern, e))
        })?;

        if pattern.captures_len() < 2 {
            return Err(PipelineError::ConfigError(format!(
                "ack_pattern '{}' needs a capture group around the job id",
                pattern.as_str()
            )));
        }

        Ok(Self { pattern })
    }

    pub fn parse(&self, stdout: &str) -> Option<JobId> {
        let caps = self.pattern.captures(stdout)?;
        let id = caps.get(1)?.as_str().trim();
        if id.is_empty() {
            None
        } else {
            Some(JobId::new(id))
        }
    }
}

impl Default for AckParser {
    fn default() -> Self {
        Self {
            pattern: Regex::new(DEFAULT_ACK_PATTERN).expect("default ack pattern is valid"),
        }
    }
}

/// `--dependency=afterok:<id>[:<id>...]`, or `None` when there is nothing
/// to wait for.
pub fn dependency_flag(after: &[JobId]) -> Option<String> {
    if after.is_empty() {
        return None;
    }

    let ids: Vec<&str> = after.iter().map(JobId::as_str).collect();
    Some(format!("--dependency=afterok:{}", ids.join(":")))
}
