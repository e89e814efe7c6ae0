// src/pipeline.rs

//! Pipeline definitions: a job graph plus the jobs to start from.

use crate::config::PipelineFile;
use crate::dag::{JobGraph, NodeId};
use crate::errors::Result;

/// An owned, fully declared pipeline.
#[derive(Debug, Clone)]
pub struct Pipeline {
    pub graph: JobGraph,
    /// Jobs submitted without a dependency, in this order.
    pub roots: Vec<NodeId>,
}

impl Pipeline {
    /// Use every job without predecessors as a root.
    pub fn with_computed_roots(graph: JobGraph) -> Self {
        let roots = graph.roots();
        Self { graph, roots }
    }

    /// Replace the roots with the named jobs. Repeated names are kept once.
    pub fn set_roots_by_name<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        let mut roots = Vec::with_capacity(names.len());
        for name in names {
            let id = self.graph.require(name.as_ref())?;
            if !roots.contains(&id) {
                roots.push(id);
            }
        }
        self.roots = roots;
        Ok(())
    }

    pub fn root_names(&self) -> Vec<&str> {
        self.roots.iter().map(|&id| self.graph.node(id).name()).collect()
    }
}

/// The RNA-seq pipeline this tool was first written for: a single chain
/// from sample list collection to feature counting.
pub fn reference_pipeline() -> Result<Pipeline> {
    let mut graph = JobGraph::new();

    let get_samplelist = graph.add_job("get_samplelist", "./scripts/get_samplelist.sh")?;
    let fastqc = graph.add_job("fastqc", "./scripts/fastqc.sh")?;
    let multiqc = graph.add_job("multiqc", "./scripts/multiqc.sh")?;
    let make_idx = graph.add_job("make_idx", "./mapping/1-make_index.sh")?;
    let map_reads = graph.add_job("map_reads", "./mapping/2-map_reads.sbatch")?;
    let mapping_qc = graph.add_job("mapping_qc", "./mapping/multiqc.sh")?;
    let feature_count = graph.add_job("feature_count", "./feature_counts/featureCount.sbatch")?;

    graph.declare_dependency(fastqc, get_samplelist);
    graph.declare_dependency(multiqc, fastqc);
    graph.declare_dependency(make_idx, multiqc);
    graph.declare_dependency(map_reads, make_idx);
    graph.declare_dependency(mapping_qc, map_reads);
    graph.declare_dependency(feature_count, mapping_qc);

    Ok(Pipeline {
        graph,
        roots: vec![get_samplelist],
    })
}

impl PipelineFile {
    /// Build the job graph: jobs in name order, edges in `after` order.
    ///
    /// Roots come from `[config].roots`, or are computed when it is empty.
    pub fn to_pipeline(&self) -> Result<Pipeline> {
        let mut graph = JobGraph::new();

        for (name, job) in self.job.iter() {
            graph.add_job(name.clone(), job.path.clone())?;
        }

        for (name, job) in self.job.iter() {
            for parent in job.after.iter() {
                graph.declare_dependency_by_name(name, parent)?;
            }
        }

        let mut pipeline = Pipeline::with_computed_roots(graph);
        if !self.config.roots.is_empty() {
            pipeline.set_roots_by_name(self.config.roots.as_slice())?;
        }
        Ok(pipeline)
    }
}
