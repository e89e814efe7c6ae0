// src/config/validate.rs

use crate::config::model::{PipelineFile, RawPipelineFile};
use crate::errors::{PipelineError, Result};
use crate::submit::AckParser;

impl TryFrom<RawPipelineFile> for PipelineFile {
    type Error = PipelineError;

    fn try_from(raw: RawPipelineFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_pipeline(&raw)?;
        Ok(PipelineFile::new_unchecked(raw.scheduler, raw.config, raw.job))
    }
}

fn validate_raw_pipeline(raw: &RawPipelineFile) -> Result<()> {
    ensure_has_jobs(raw)?;
    validate_scheduler(raw)?;
    validate_jobs(raw)?;
    validate_roots(raw)?;
    Ok(())
}

fn ensure_has_jobs(raw: &RawPipelineFile) -> Result<()> {
    if raw.job.is_empty() {
        return Err(PipelineError::ConfigError(
            "pipeline must contain at least one [job.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_scheduler(raw: &RawPipelineFile) -> Result<()> {
    if raw.scheduler.command.trim().is_empty() {
        return Err(PipelineError::ConfigError(
            "[scheduler].command must not be empty".to_string(),
        ));
    }

    AckParser::new(&raw.scheduler.ack_pattern)?;
    Ok(())
}

fn validate_jobs(raw: &RawPipelineFile) -> Result<()> {
    for (name, job) in raw.job.iter() {
        if job.path.trim().is_empty() {
            return Err(PipelineError::ConfigError(format!(
                "job '{}' has an empty `path`",
                name
            )));
        }

        for dep in job.after.iter() {
            if dep == name {
                return Err(PipelineError::ConfigError(format!(
                    "job '{}' cannot depend on itself in `after`",
                    name
                )));
            }
            if !raw.job.contains_key(dep) {
                return Err(PipelineError::ConfigError(format!(
                    "job '{}' has unknown dependency '{}' in `after`",
                    name, dep
                )));
            }
        }
    }
    Ok(())
}

fn validate_roots(raw: &RawPipelineFile) -> Result<()> {
    for root in raw.config.roots.iter() {
        if !raw.job.contains_key(root) {
            return Err(PipelineError::ConfigError(format!(
                "[config].roots names unknown job '{}'",
                root
            )));
        }
    }
    Ok(())
}
