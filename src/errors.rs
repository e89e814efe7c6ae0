// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid pipeline graph: {0}")]
    GraphDefinition(String),

    /// The scheduler command could not be started (`exit_code` is `None`)
    /// or exited with a non-zero status.
    #[error(
        "scheduler rejected job '{job}' ({path}): exit code {}, output: {output:?}",
        exit_code_text(.exit_code)
    )]
    SchedulerInvocation {
        job: String,
        path: String,
        exit_code: Option<i32>,
        output: String,
    },

    /// The scheduler exited successfully but its stdout held no job id.
    #[error("could not find a job id for '{job}' ({path}) in scheduler output {output:?}")]
    AcknowledgmentParse {
        job: String,
        path: String,
        output: String,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;

fn exit_code_text(code: &Option<i32>) -> String {
    match code {
        Some(c) => c.to_string(),
        None => "none".to_string(),
    }
}
