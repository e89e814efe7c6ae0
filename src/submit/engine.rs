// src/submit/engine.rs

use std::collections::HashMap;

use tracing::{debug, error, info, warn};

use crate::dag::{JobGraph, NodeId};
use crate::errors::{PipelineError, Result};
use crate::submit::ack::{AckParser, dependency_flag};
use crate::submit::backend::{SchedulerBackend, SubmitRequest};
use crate::submit::report::{SubmissionReport, SubmittedJob};
use crate::types::{FanInPolicy, JobId};

/// Pending entry on the traversal worklist.
#[derive(Debug)]
struct Frame {
    node: NodeId,
    /// Ids this submission waits for. Unused for non-start nodes under
    /// [`FanInPolicy::Merge`], where they come from the accepted parents.
    after: Vec<JobId>,
}

/// Walks a [`JobGraph`] depth-first and submits every reachable job.
///
/// Exactly one scheduler call is in flight at a time. A job's successors
/// are only submitted after the scheduler accepted the job itself, left to
/// right in declaration order, each successor's subtree before the next
/// sibling. Any failure aborts the walk; jobs accepted so far stay queued.
pub struct Submitter<B: SchedulerBackend> {
    backend: B,
    ack: AckParser,
    fan_in: FanInPolicy,
}

impl<B: SchedulerBackend> std::fmt::Debug for Submitter<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Submitter")
            .field("ack", &self.ack)
            .field("fan_in", &self.fan_in)
            .finish_non_exhaustive()
    }
}

impl<B: SchedulerBackend> Submitter<B> {
    pub fn new(backend: B, ack: AckParser, fan_in: FanInPolicy) -> Self {
        Self {
            backend,
            ack,
            fan_in,
        }
    }

    /// Submit `node` (waiting for `after`, if given) and everything below it.
    pub async fn submit(
        &mut self,
        graph: &JobGraph,
        node: NodeId,
        after: Option<JobId>,
    ) -> Result<SubmissionReport> {
        graph.validate(&[node], self.fan_in)?;

        let start = Frame {
            node,
            after: after.into_iter().collect(),
        };
        self.walk(graph, vec![start]).await
    }

    /// Submit every root without an initial dependency, one after another.
    ///
    /// A root listed more than once is submitted once, at its first position.
    pub async fn submit_roots(
        &mut self,
        graph: &JobGraph,
        roots: &[NodeId],
    ) -> Result<SubmissionReport> {
        let mut unique: Vec<NodeId> = Vec::with_capacity(roots.len());
        for &root in roots {
            if unique.contains(&root) {
                warn!(job = %graph.node(root).name(), "root listed twice; submitting it once");
                continue;
            }
            unique.push(root);
        }

        graph.validate(&unique, self.fan_in)?;

        let starts = unique
            .into_iter()
            .map(|node| Frame {
                node,
                after: Vec::new(),
            })
            .collect();
        self.walk(graph, starts).await
    }

    async fn walk(&mut self, graph: &JobGraph, starts: Vec<Frame>) -> Result<SubmissionReport> {
        let start_ids: Vec<NodeId> = starts.iter().map(|f| f.node).collect();
        let in_scope = graph.reachable_from(&start_ids);

        let mut report = SubmissionReport::default();
        let mut accepted: HashMap<NodeId, JobId> = HashMap::new();

        // Reverse so the first start (and first successor) is popped first.
        let mut stack: Vec<Frame> = starts.into_iter().rev().collect();

        while let Some(frame) = stack.pop() {
            let after = match self.fan_in {
                FanInPolicy::Merge => {
                    if accepted.contains_key(&frame.node) {
                        continue;
                    }
                    match merged_after(graph, &in_scope, &accepted, &frame) {
                        Some(after) => after,
                        None => {
                            // The last parent to be accepted pushes it again.
                            debug!(
                                job = %graph.node(frame.node).name(),
                                "deferring job until all parents are accepted"
                            );
                            continue;
                        }
                    }
                }
                FanInPolicy::Reject | FanInPolicy::PerPath => frame.after,
            };

            let job_id = self.submit_one(graph, frame.node, &after).await?;

            let node = graph.node(frame.node);
            report.push(SubmittedJob {
                name: node.name().to_string(),
                path: node.path().to_string(),
                job_id: job_id.clone(),
                after,
            });

            for &succ in node.successors().iter().rev() {
                let after = match self.fan_in {
                    FanInPolicy::Merge => Vec::new(),
                    FanInPolicy::Reject | FanInPolicy::PerPath => vec![job_id.clone()],
                };
                stack.push(Frame { node: succ, after });
            }

            accepted.insert(frame.node, job_id);
        }

        info!(jobs = report.len(), "all jobs accepted by the scheduler");
        Ok(report)
    }

    /// One scheduler round-trip: invoke, check the exit status, parse the id.
    async fn submit_one(&mut self, graph: &JobGraph, id: NodeId, after: &[JobId]) -> Result<JobId> {
        let node = graph.node(id);
        let request = SubmitRequest {
            job: node.name().to_string(),
            path: node.path().to_string(),
            after: after.to_vec(),
        };

        info!(
            job = %request.job,
            path = %request.path,
            dependency = ?dependency_flag(after),
            "submitting job"
        );

        let response = match self.backend.submit(&request).await {
            Ok(response) => response,
            Err(e) => {
                error!(job = %request.job, error = %e, "could not invoke scheduler");
                return Err(PipelineError::SchedulerInvocation {
                    job: request.job,
                    path: request.path,
                    exit_code: None,
                    output: e.to_string(),
                });
            }
        };

        debug!(
            job = %request.job,
            exit_code = ?response.exit_code,
            stdout = %response.stdout.trim_end(),
            stderr = %response.stderr.trim_end(),
            "scheduler responded"
        );

        if !response.success() {
            error!(
                job = %request.job,
                exit_code = ?response.exit_code,
                "scheduler rejected job; aborting run"
            );
            let output = combined_output(response.stdout, &response.stderr);
            return Err(PipelineError::SchedulerInvocation {
                job: request.job,
                path: request.path,
                exit_code: response.exit_code,
                output,
            });
        }

        let Some(job_id) = self.ack.parse(&response.stdout) else {
            error!(job = %request.job, "no job id in scheduler output; aborting run");
            return Err(PipelineError::AcknowledgmentParse {
                job: request.job,
                path: request.path,
                output: response.stdout,
            });
        };

        info!(job = %request.job, job_id = %job_id, "job accepted");
        Ok(job_id)
    }
}

/// Dependencies of `frame.node` under [`FanInPolicy::Merge`]: the frame's
/// own ids followed by the ids of all in-scope parents, or `None` while
/// some parent has not been accepted yet.
fn merged_after(
    graph: &JobGraph,
    in_scope: &[bool],
    accepted: &HashMap<NodeId, JobId>,
    frame: &Frame,
) -> Option<Vec<JobId>> {
    let mut after = frame.after.clone();

    for parent in graph.node(frame.node).predecessors() {
        if !in_scope[parent.index()] {
            continue;
        }
        after.push(accepted.get(parent)?.clone());
    }

    Some(after)
}

/// Scheduler stdout followed by stderr, on separate lines.
fn combined_output(mut stdout: String, stderr: &str) -> String {
    if !stdout.is_empty() && !stderr.is_empty() && !stdout.ends_with('\n') {
        stdout.push('\n');
    }
    stdout.push_str(stderr);
    stdout
}
