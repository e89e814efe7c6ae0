// src/submit/backend.rs

//! Pluggable scheduler adapter.
//!
//! The submission engine talks to a `SchedulerBackend` instead of spawning
//! processes itself, so tests can swap in a scripted fake.
//!
//! - `SbatchBackend` runs the real scheduler command.
//! - `DryRunBackend` prints what would be run and invents sequential ids.

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::submit::ack::dependency_flag;
use crate::types::JobId;

/// One submission handed to the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    /// Job name, for logging only.
    pub job: String,
    pub path: String,
    /// Jobs that must succeed first. Empty for roots.
    pub after: Vec<JobId>,
}

impl SubmitRequest {
    /// Scheduler arguments: optional dependency flag, then the script path.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(2);
        if let Some(flag) = dependency_flag(&self.after) {
            argv.push(flag);
        }
        argv.push(self.path.clone());
        argv
    }
}

/// What the scheduler command reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerResponse {
    /// `None` if the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl SchedulerResponse {
    /// Successful acknowledgment with the given stdout.
    pub fn accepted(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Trait abstracting how a job reaches the scheduler.
///
/// An `Err` means the scheduler could not be invoked at all; a rejection
/// is an `Ok` response with a non-zero exit code.
pub trait SchedulerBackend: Send {
    fn submit<'a>(
        &'a mut self,
        request: &'a SubmitRequest,
    ) -> Pin<Box<dyn Future<Output = io::Result<SchedulerResponse>> + Send + 'a>>;
}

/// Runs `<command> [args...] [--dependency=...] <path>` and captures its output.
///
/// There is no timeout: a hanging scheduler command hangs the run.
#[derive(Debug, Clone)]
pub struct SbatchBackend {
    command: String,
    args: Vec<String>,
}

impl SbatchBackend {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }
}

impl SchedulerBackend for SbatchBackend {
    fn submit<'a>(
        &'a mut self,
        request: &'a SubmitRequest,
    ) -> Pin<Box<dyn Future<Output = io::Result<SchedulerResponse>> + Send + 'a>> {
        Box::pin(async move {
            let mut cmd = Command::new(&self.command);
            cmd.args(&self.args)
                .args(request.argv())
                .stdin(Stdio::null())
                .kill_on_drop(true);

            debug!(job = %request.job, command = ?cmd.as_std(), "invoking scheduler");

            let output = cmd.output().await?;

            Ok(SchedulerResponse {
                exit_code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        })
    }
}

/// Prints each scheduler command line instead of running it and answers
/// with `Submitted batch job <n>` for n = 1, 2, ...
#[derive(Debug, Clone)]
pub struct DryRunBackend {
    command: String,
    args: Vec<String>,
    next_id: u64,
}

impl DryRunBackend {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            next_id: 1,
        }
    }
}

impl SchedulerBackend for DryRunBackend {
    fn submit<'a>(
        &'a mut self,
        request: &'a SubmitRequest,
    ) -> Pin<Box<dyn Future<Output = io::Result<SchedulerResponse>> + Send + 'a>> {
        let id = self.next_id;
        self.next_id += 1;

        let mut line = vec![self.command.clone()];
        line.extend(self.args.iter().cloned());
        line.extend(request.argv());
        println!("[dry-run] {}", line.join(" "));

        Box::pin(async move {
            Ok(SchedulerResponse::accepted(format!(
                "Submitted batch job {id}\n"
            )))
        })
    }
}
