// src/dag/node.rs

/// Index of a [`JobNode`] inside the [`JobGraph`](super::JobGraph) that
/// created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One pipeline stage: an external script plus the jobs waiting on it.
#[derive(Debug, Clone)]
pub struct JobNode {
    name: String,
    path: String,
    /// Jobs that may only start once this one succeeded, in declaration order.
    successors: Vec<NodeId>,
    /// Jobs this one waits for, in declaration order.
    predecessors: Vec<NodeId>,
}

impl JobNode {
    pub(crate) fn new(name: String, path: String) -> Self {
        Self {
            name,
            path,
            successors: Vec::new(),
            predecessors: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Script locator handed to the scheduler. Never inspected.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn successors(&self) -> &[NodeId] {
        &self.successors
    }

    pub fn predecessors(&self) -> &[NodeId] {
        &self.predecessors
    }

    pub(crate) fn push_successor(&mut self, child: NodeId) -> bool {
        if self.successors.contains(&child) {
            return false;
        }
        self.successors.push(child);
        true
    }

    pub(crate) fn push_predecessor(&mut self, parent: NodeId) {
        if !self.predecessors.contains(&parent) {
            self.predecessors.push(parent);
        }
    }
}
