// src/submit/report.rs

use crate::types::JobId;

/// A job the scheduler accepted during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedJob {
    pub name: String,
    pub path: String,
    pub job_id: JobId,
    /// Ids this job was told to wait for.
    pub after: Vec<JobId>,
}

/// Accepted jobs in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionReport {
    jobs: Vec<SubmittedJob>,
}

impl SubmissionReport {
    pub(crate) fn push(&mut self, job: SubmittedJob) {
        self.jobs.push(job);
    }

    pub fn jobs(&self) -> &[SubmittedJob] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Job id of the first submission of `name`.
    pub fn job_id_of(&self, name: &str) -> Option<&JobId> {
        self.jobs.iter().find(|j| j.name == name).map(|j| &j.job_id)
    }

    /// Submission order by job name (names repeat under `per_path` fan-in).
    pub fn order(&self) -> Vec<&str> {
        self.jobs.iter().map(|j| j.name.as_str()).collect()
    }
}
