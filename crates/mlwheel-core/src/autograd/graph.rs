//! Append-only record of operations for a future reverse-mode pass.

use std::collections::HashSet;
use std::fmt;

use log::{debug, warn};

use crate::error::{MathError, Result};
use crate::math::{Matrix, Vector};

/// Identifier of a node; equal to its insertion index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Payload produced by (or fed into) an operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(f64),
    Vector(Vector),
    Matrix(Matrix),
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(value)
    }
}

impl From<Vector> for Value {
    fn from(value: Vector) -> Self {
        Value::Vector(value)
    }
}

impl From<Matrix> for Value {
    fn from(value: Matrix) -> Self {
        Value::Matrix(value)
    }
}

/// An operation input: either an earlier node or a raw value.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeInput {
    Node(NodeId),
    Value(Value),
}

impl From<NodeId> for NodeInput {
    fn from(id: NodeId) -> Self {
        NodeInput::Node(id)
    }
}

impl From<Value> for NodeInput {
    fn from(value: Value) -> Self {
        NodeInput::Value(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub operation: String,
    pub inputs: Vec<NodeInput>,
    pub output: Value,
    pub gradient: Option<f64>,
}

impl Node {
    /// Ids of the nodes this node reads from, in input order.
    pub fn input_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.inputs.iter().filter_map(|input| match input {
            NodeInput::Node(id) => Some(*id),
            NodeInput::Value(_) => None,
        })
    }

    /// Input nodes recorded before this one. Forward and dangling references
    /// are dropped, which keeps every walk over the graph acyclic.
    pub fn upstream_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        let own = self.id;
        self.input_nodes().filter(move |input| input.0 < own.0)
    }
}

/// Computation graph recording operations in execution order.
///
/// Nodes live in a `Vec` arena and are addressed by [`NodeId`]. Because ids
/// are handed out in insertion order, a node can only sensibly reference
/// nodes recorded before it, so the graph is a DAG as long as callers only
/// pass ids they were given.
///
/// [`ComputationGraph::backward`] is a placeholder: it stores the seed
/// gradient on the requested node and does not propagate to its inputs.
#[derive(Debug, Clone, Default)]
pub struct ComputationGraph {
    nodes: Vec<Node>,
}

impl ComputationGraph {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends a node and returns its id.
    pub fn add_node<S, V>(&mut self, operation: S, inputs: Vec<NodeInput>, output: V) -> NodeId
    where
        S: Into<String>,
        V: Into<Value>,
    {
        let id = NodeId(self.nodes.len());
        let operation = operation.into();
        debug!("graph: recording {} as {}", operation, id);
        self.nodes.push(Node {
            id,
            operation,
            inputs,
            output: output.into(),
            gradient: None,
        });
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Seeds `gradient` on node `id`.
    ///
    /// Only the seed node is touched; inputs keep whatever gradient they had.
    /// This is not reverse-mode differentiation.
    pub fn backward(&mut self, id: NodeId, gradient: f64) -> Result<()> {
        let len = self.nodes.len();
        let node = self.nodes.get_mut(id.0).ok_or(MathError::UnknownNode {
            op: "backward",
            id: id.0,
            len,
        })?;
        if node.input_nodes().next().is_some() {
            warn!(
                "graph: backward from {} does not propagate to its inputs",
                id
            );
        }
        node.gradient = Some(gradient);
        Ok(())
    }

    /// [`ComputationGraph::backward`] with the conventional seed of `1.0`.
    pub fn backward_seed(&mut self, id: NodeId) -> Result<()> {
        self.backward(id, 1.0)
    }

    /// Stored gradient, or `None` for unknown ids and unset gradients.
    pub fn get_gradient(&self, id: NodeId) -> Option<f64> {
        self.nodes.get(id.0).and_then(|node| node.gradient)
    }

    /// `(input, consumer)` pairs for every reference to an earlier node.
    ///
    /// Uses the same filtering as [`ComputationGraph::ancestors`].
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        self.nodes
            .iter()
            .flat_map(|node| node.upstream_nodes().map(move |input| (input, node.id)))
            .collect()
    }

    /// Nodes reachable from `id` through input references, starting with `id`
    /// itself and ordered so that every node precedes all of its inputs.
    ///
    /// Unknown ids, including dangling input references, are skipped.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.node(current) else {
                continue;
            };
            if !seen.insert(current) {
                continue;
            }
            stack.extend(node.upstream_nodes());
        }
        // Inputs always have smaller ids, so descending id order is a reverse
        // topological order.
        let mut order: Vec<NodeId> = seen.into_iter().collect();
        order.sort_unstable_by(|a, b| b.cmp(a));
        order
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(v: f64) -> NodeInput {
        NodeInput::Value(Value::Scalar(v))
    }

    #[test]
    fn ids_follow_insertion_order() {
        let mut graph = ComputationGraph::new();
        let a = graph.add_node("const", vec![], 2.0);
        let b = graph.add_node("const", vec![], 3.0);
        let c = graph.add_node("mul", vec![a.into(), b.into()], 6.0);
        assert_eq!((a, b, c), (NodeId(0), NodeId(1), NodeId(2)));
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.node(c).unwrap().operation, "mul");
    }

    #[test]
    fn inputs_are_stored_verbatim() {
        let mut graph = ComputationGraph::new();
        let a = graph.add_node("const", vec![], 1.0);
        let b = graph.add_node("add", vec![a.into(), scalar(4.0)], 5.0);
        assert_eq!(
            graph.node(b).unwrap().inputs,
            vec![NodeInput::Node(a), scalar(4.0)]
        );
    }

    #[test]
    fn backward_only_touches_seed() {
        let mut graph = ComputationGraph::new();
        let a = graph.add_node("const", vec![], 1.0);
        let b = graph.add_node("relu", vec![a.into()], 1.0);
        graph.backward_seed(b).unwrap();
        assert_eq!(graph.get_gradient(b), Some(1.0));
        assert_eq!(graph.get_gradient(a), None);

        graph.backward(b, 0.25).unwrap();
        assert_eq!(graph.get_gradient(b), Some(0.25));
    }

    #[test]
    fn backward_on_unknown_node_fails() {
        let mut graph = ComputationGraph::new();
        graph.add_node("const", vec![], 1.0);
        let err = graph.backward(NodeId(4), 1.0).unwrap_err();
        assert_eq!(
            err,
            MathError::UnknownNode {
                op: "backward",
                id: 4,
                len: 1
            }
        );
        assert_eq!(graph.get_gradient(NodeId(4)), None);
    }

    #[test]
    fn clear_restarts_ids() {
        let mut graph = ComputationGraph::new();
        graph.add_node("const", vec![], 1.0);
        graph.add_node("const", vec![], 2.0);
        graph.clear();
        assert!(graph.is_empty());
        assert_eq!(graph.add_node("const", vec![], 3.0), NodeId(0));
    }

    #[test]
    fn forward_and_dangling_references_are_not_edges() {
        let mut graph = ComputationGraph::new();
        let x = graph.add_node("const", vec![], 1.0);
        // References to ids not yet (or never) recorded.
        let y = graph.add_node("add", vec![x.into(), NodeId(2).into(), NodeId(50).into()], 1.0);
        let z = graph.add_node("neg", vec![y.into()], -1.0);

        assert_eq!(graph.node(y).unwrap().inputs.len(), 3);
        assert_eq!(graph.edges(), vec![(x, y), (y, z)]);
        assert_eq!(graph.ancestors(y), vec![y, x]);
        assert_eq!(graph.ancestors(z), vec![z, y, x]);
    }

    #[test]
    fn edges_and_ancestors() {
        let mut graph = ComputationGraph::new();
        let x = graph.add_node("const", vec![], 1.0);
        let y = graph.add_node("const", vec![], 2.0);
        let unrelated = graph.add_node("const", vec![], 9.0);
        let s = graph.add_node("add", vec![x.into(), y.into()], 3.0);
        let t = graph.add_node("mul", vec![s.into(), x.into()], 3.0);

        assert_eq!(graph.edges(), vec![(x, s), (y, s), (s, t), (x, t)]);
        assert_eq!(graph.ancestors(t), vec![t, s, y, x]);
        assert_eq!(graph.ancestors(unrelated), vec![unrelated]);
        assert!(graph.ancestors(NodeId(42)).is_empty());
    }
}
