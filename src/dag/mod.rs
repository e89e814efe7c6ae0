// src/dag/mod.rs

//! Job graph representation.
//!
//! - [`node`] holds a single job and its edges.
//! - [`graph`] owns all nodes and is the only place edges are declared.
//! - [`validate`] checks a graph before anything is submitted.

pub mod graph;
pub mod node;
pub mod validate;

pub use graph::JobGraph;
pub use node::{JobNode, NodeId};
