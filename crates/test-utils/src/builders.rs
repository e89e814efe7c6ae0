#![allow(dead_code)]

use std::collections::BTreeMap;

use slurmchain::config::{ConfigSection, JobConfig, PipelineFile, RawPipelineFile, SchedulerSection};
use slurmchain::dag::{JobGraph, NodeId};
use slurmchain::types::FanInPolicy;

/// Builder for `PipelineFile` to simplify test setup.
pub struct PipelineFileBuilder {
    raw: RawPipelineFile,
}

impl PipelineFileBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawPipelineFile {
                scheduler: SchedulerSection::default(),
                config: ConfigSection::default(),
                job: BTreeMap::new(),
            },
        }
    }

    /// Add `[job.<name>]` with the given path and `after` list.
    pub fn with_job(mut self, name: &str, path: &str, after: &[&str]) -> Self {
        self.raw.job.insert(
            name.to_string(),
            JobConfig {
                path: path.to_string(),
                after: after.iter().map(|s| s.to_string()).collect(),
            },
        );
        self
    }

    pub fn with_root(mut self, name: &str) -> Self {
        self.raw.config.roots.push(name.to_string());
        self
    }

    pub fn with_fan_in(mut self, policy: FanInPolicy) -> Self {
        self.raw.config.fan_in = policy;
        self
    }

    pub fn build(self) -> PipelineFile {
        PipelineFile::try_from(self.raw).expect("Failed to build valid pipeline from builder")
    }
}

impl Default for PipelineFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a graph from job names and `(child, parent)` edges.
///
/// Each job's path is `./<name>.sh`. Returns the ids in the order given.
pub fn graph_of(jobs: &[&str], edges: &[(&str, &str)]) -> (JobGraph, Vec<NodeId>) {
    let mut graph = JobGraph::new();
    let ids = jobs
        .iter()
        .map(|name| {
            graph
                .add_job(*name, format!("./{name}.sh"))
                .expect("job names in tests are unique")
        })
        .collect();

    for (child, parent) in edges {
        graph
            .declare_dependency_by_name(child, parent)
            .expect("edges in tests name known jobs");
    }

    (graph, ids)
}
