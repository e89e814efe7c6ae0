// src/submit/mod.rs

//! Submission engine.
//!
//! - [`engine`] walks the job graph and submits each job once its parent
//!   was accepted.
//! - [`backend`] provides the `SchedulerBackend` trait plus the real
//!   `sbatch` and dry-run implementations; tests plug in a fake.
//! - [`ack`] turns scheduler output into job ids and job ids into
//!   dependency flags.
//! - [`report`] collects what was accepted.

pub mod ack;
pub mod backend;
pub mod engine;
pub mod report;

pub use ack::{AckParser, DEFAULT_ACK_PATTERN, dependency_flag};
pub use backend::{DryRunBackend, SbatchBackend, SchedulerBackend, SchedulerResponse, SubmitRequest};
pub use engine::Submitter;
pub use report::{SubmissionReport, SubmittedJob};
