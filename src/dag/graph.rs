// src/dag/graph.rs

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::dag::node::{JobNode, NodeId};
use crate::errors::{PipelineError, Result};

/// In-memory job DAG.
///
/// Nodes live in an arena and refer to each other by [`NodeId`], so a job
/// can be the successor of several parents without shared ownership.
/// Edges are declared after node creation, in any order, and the graph is
/// only read once submission starts.
#[derive(Debug, Clone, Default)]
pub struct JobGraph {
    nodes: Vec<JobNode>,
    by_name: HashMap<String, NodeId>,
}

impl JobGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a job with an empty successor list.
    ///
    /// `path` is not checked for existence; the scheduler deals with it.
    pub fn add_job(&mut self, name: impl Into<String>, path: impl Into<String>) -> Result<NodeId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(PipelineError::GraphDefinition(format!(
                "job '{}' is defined more than once",
                name
            )));
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(JobNode::new(name.clone(), path.into()));
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// Record that `child` may only run after `parent` succeeded.
    ///
    /// Declaring the same edge twice is a no-op, so a job is never queued
    /// twice under one parent.
    ///
    /// Panics if either id was not created by this graph.
    pub fn declare_dependency(&mut self, child: NodeId, parent: NodeId) {
        if !self.nodes[parent.0].push_successor(child) {
            warn!(
                child = %self.nodes[child.0].name(),
                parent = %self.nodes[parent.0].name(),
                "dependency declared twice; ignoring duplicate"
            );
            return;
        }
        self.nodes[child.0].push_predecessor(parent);

        debug!(
            child = %self.nodes[child.0].name(),
            parent = %self.nodes[parent.0].name(),
            "declared dependency"
        );
    }

    /// Name-based variant of [`declare_dependency`](Self::declare_dependency).
    pub fn declare_dependency_by_name(&mut self, child: &str, parent: &str) -> Result<()> {
        let child = self.require(child)?;
        let parent = self.require(parent)?;
        self.declare_dependency(child, parent);
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> &JobNode {
        &self.nodes[id.0]
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// Like [`find`](Self::find), but an unknown name is an error.
    pub fn require(&self, name: &str) -> Result<NodeId> {
        self.find(name).ok_or_else(|| {
            PipelineError::GraphDefinition(format!("unknown job '{}'", name))
        })
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &JobNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Jobs without predecessors, in creation order.
    pub fn roots(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|(_, node)| node.predecessors().is_empty())
            .map(|(id, _)| id)
            .collect()
    }

    /// Mark every node reachable from `starts` (the starts included).
    pub fn reachable_from(&self, starts: &[NodeId]) -> Vec<bool> {
        let mut seen = vec![false; self.nodes.len()];
        let mut stack: Vec<NodeId> = starts.to_vec();

        while let Some(id) = stack.pop() {
            if seen[id.0] {
                continue;
            }
            seen[id.0] = true;
            stack.extend(self.nodes[id.0].successors().iter().copied());
        }

        seen
    }
}
