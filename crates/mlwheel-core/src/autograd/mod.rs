//! Computation-graph scaffold.
//!
//! Records operations over [`crate::math`] values as an arena of nodes
//! addressed by [`NodeId`]. Gradient propagation is not implemented yet;
//! see [`ComputationGraph::backward`].
pub mod graph;

pub use graph::{ComputationGraph, Node, NodeId, NodeInput, Value};
