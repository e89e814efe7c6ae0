// src/dag/validate.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::dag::graph::JobGraph;
use crate::dag::node::NodeId;
use crate::errors::{PipelineError, Result};
use crate::types::FanInPolicy;

impl JobGraph {
    /// Check that submitting from `roots` under `fan_in` is well defined.
    ///
    /// - the whole graph must be acyclic
    /// - at least one root is required
    /// - with [`FanInPolicy::Reject`], no job reachable from `roots` may be
    ///   reached through more than one parent (another root counts as one)
    pub fn validate(&self, roots: &[NodeId], fan_in: FanInPolicy) -> Result<()> {
        self.ensure_acyclic()?;

        if roots.is_empty() {
            return Err(PipelineError::GraphDefinition(
                "no root jobs to submit".to_string(),
            ));
        }

        if fan_in == FanInPolicy::Reject {
            self.ensure_no_fan_in(roots)?;
        }

        Ok(())
    }

    fn ensure_acyclic(&self) -> Result<()> {
        // Edge direction: parent -> child.
        let mut graph: DiGraphMap<usize, ()> = DiGraphMap::new();

        for (id, node) in self.nodes() {
            graph.add_node(id.index());
            for succ in node.successors() {
                graph.add_edge(id.index(), succ.index(), ());
            }
        }

        match toposort(&graph, None) {
            Ok(_order) => Ok(()),
            Err(cycle) => {
                let node = self.node(NodeId(cycle.node_id()));
                Err(PipelineError::GraphDefinition(format!(
                    "cycle detected in job graph involving job '{}'",
                    node.name()
                )))
            }
        }
    }

    fn ensure_no_fan_in(&self, roots: &[NodeId]) -> Result<()> {
        let reachable = self.reachable_from(roots);

        for (id, node) in self.nodes() {
            if !reachable[id.index()] {
                continue;
            }

            let mut parents: Vec<&str> = node
                .predecessors()
                .iter()
                .filter(|p| reachable[p.index()])
                .map(|p| self.node(*p).name())
                .collect();

            let is_root = roots.contains(&id);
            if is_root {
                parents.push("<root>");
            }

            if parents.len() > 1 {
                return Err(PipelineError::GraphDefinition(format!(
                    "job '{}' would be submitted once per parent ({}); \
                     choose fan_in = \"merge\" or \"per_path\" to allow this",
                    node.name(),
                    parents.join(", ")
                )));
            }
        }

        Ok(())
    }
}
