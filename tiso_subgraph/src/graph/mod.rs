//! Adjacency storage for query and target graphs.
//!
//! Nodes are dense ids in `0..num_nodes`. Every node keeps an out-set and an
//! in-set; undirected graphs mirror each inserted edge into both endpoints.

mod sample;
mod temporal;

use std::collections::HashMap;
use std::fmt;

use contracts::requires;
use indexmap::IndexSet;
use thiserror::Error;

pub use self::temporal::{Contact, TemporalGraph, Timestamp};

/// Dense node identifier in `0..num_nodes`.
pub type NodeId = usize;

/// Errors raised by the validating graph factories.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An edge endpoint is not a node of the graph.
    #[error("node {node} is out of range for a graph with {num_nodes} nodes")]
    NodeOutOfRange {
        /// The offending endpoint.
        node: NodeId,
        /// Node count of the graph being built.
        num_nodes: usize,
    },
}

/// A directed or undirected graph without timestamps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    directed: bool,
    out_adj: Vec<IndexSet<NodeId>>,
    in_adj: Vec<IndexSet<NodeId>>,
}

impl Graph {
    /// An edgeless graph with `num_nodes` nodes.
    #[must_use]
    pub fn new(directed: bool, num_nodes: usize) -> Self {
        Self {
            directed,
            out_adj: vec![IndexSet::new(); num_nodes],
            in_adj: vec![IndexSet::new(); num_nodes],
        }
    }

    /// Build a graph from an edge stream, rejecting out-of-range endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeOutOfRange`] for the first edge naming a node
    /// outside `0..num_nodes`.
    pub fn try_from_edges<I>(directed: bool, num_nodes: usize, edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let mut graph = Self::new(directed, num_nodes);
        for (source, dest) in edges {
            graph.check_node(source)?;
            graph.check_node(dest)?;
            graph.add_edge(source, dest);
        }
        Ok(graph)
    }

    /// Build a graph from edges known to be in range.
    ///
    /// # Panics
    ///
    /// Panics if an endpoint is outside `0..num_nodes`.
    #[must_use]
    pub fn from_edges<I>(directed: bool, num_nodes: usize, edges: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let mut graph = Self::new(directed, num_nodes);
        for (source, dest) in edges {
            graph.add_edge(source, dest);
        }
        graph
    }

    pub(crate) fn check_node(&self, node: NodeId) -> Result<(), GraphError> {
        if node < self.out_adj.len() {
            Ok(())
        } else {
            Err(GraphError::NodeOutOfRange {
                node,
                num_nodes: self.out_adj.len(),
            })
        }
    }

    /// Insert `source -> dest`, mirrored when the graph is undirected.
    ///
    /// Inserting an existing edge is a no-op.
    #[requires(source < self.num_nodes() && dest < self.num_nodes(), "edge endpoints must be graph nodes")]
    pub fn add_edge(&mut self, source: NodeId, dest: NodeId) -> &mut Self {
        self.out_adj[source].insert(dest);
        self.in_adj[dest].insert(source);
        if !self.directed {
            self.out_adj[dest].insert(source);
            self.in_adj[source].insert(dest);
        }
        self
    }

    /// Whether edges are directed.
    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    /// Number of nodes.
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.out_adj.len()
    }

    /// Number of distinct edges; an undirected edge counts once.
    #[must_use]
    pub fn num_edges(&self) -> usize {
        let arcs: usize = self.out_adj.iter().map(IndexSet::len).sum();
        if self.directed {
            arcs
        } else {
            let loops = (0..self.num_nodes())
                .filter(|&node| self.out_adj[node].contains(&node))
                .count();
            (arcs + loops) / 2
        }
    }

    /// Out-degree of `node`.
    #[must_use]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.out_adj[node].len()
    }

    /// In-degree of `node`.
    #[must_use]
    pub fn in_degree(&self, node: NodeId) -> usize {
        self.in_adj[node].len()
    }

    /// Whether `source -> dest` is stored.
    #[must_use]
    pub fn has_edge(&self, source: NodeId, dest: NodeId) -> bool {
        self.out_adj[source].contains(&dest)
    }

    /// Successors of `node` in insertion order.
    #[must_use]
    pub fn out_neighbors(&self, node: NodeId) -> &IndexSet<NodeId> {
        &self.out_adj[node]
    }

    /// Predecessors of `node` in insertion order.
    #[must_use]
    pub fn in_neighbors(&self, node: NodeId) -> &IndexSet<NodeId> {
        &self.in_adj[node]
    }

    /// Out-sets of every node, indexed by node id.
    #[must_use]
    pub fn out_adjacency(&self) -> &[IndexSet<NodeId>] {
        &self.out_adj
    }

    /// Neighbours of `node` ignoring direction: successors first, then the
    /// predecessors that are not also successors.
    pub fn undirected_neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let out = &self.out_adj[node];
        out.iter()
            .copied()
            .chain(self.in_adj[node].iter().copied().filter(move |n| !out.contains(n)))
    }

    /// Row-major 0/1 adjacency matrix flattened into one string.
    #[must_use]
    pub fn adjacency_string(&self) -> String {
        let n = self.num_nodes();
        let mut out = String::with_capacity(n * n);
        for source in 0..n {
            for dest in 0..n {
                out.push(if self.has_edge(source, dest) { '1' } else { '0' });
            }
        }
        out
    }

    /// Copy of the subgraph induced by `nodes`, where `nodes[i]` becomes node `i`.
    ///
    /// # Panics
    ///
    /// Panics if a listed node is not part of the graph.
    #[must_use]
    pub fn subgraph(&self, nodes: &[NodeId]) -> Self {
        let position = positions(nodes);
        let mut sub = Self::new(self.directed, nodes.len());
        for (new_source, &old_source) in nodes.iter().enumerate() {
            for old_dest in &self.out_adj[old_source] {
                if let Some(&new_dest) = position.get(old_dest) {
                    sub.add_edge(new_source, new_dest);
                }
            }
        }
        sub
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (node, succ) in self.out_adj.iter().enumerate() {
            write!(f, "{node} -->")?;
            for (i, dest) in succ.iter().enumerate() {
                let sep = if i == 0 { " " } else { "," };
                write!(f, "{sep}{dest}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Map every listed node to its position in `nodes`.
pub(crate) fn positions(nodes: &[NodeId]) -> HashMap<NodeId, NodeId> {
    let position: HashMap<NodeId, NodeId> =
        nodes.iter().enumerate().map(|(new, &old)| (old, new)).collect();
    debug_assert_eq!(position.len(), nodes.len(), "subgraph node list has duplicates");
    position
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Graph {
        Graph::from_edges(true, 5, [(0, 1), (0, 2), (1, 3), (3, 2), (1, 2)])
    }

    #[test]
    fn degrees_and_counts() {
        let g = diamond();
        assert_eq!(g.num_nodes(), 5);
        assert_eq!(g.num_edges(), 5);
        assert_eq!(g.out_degree(1), 2);
        assert_eq!(g.in_degree(2), 3);
        assert!(g.has_edge(3, 2));
        assert!(!g.has_edge(2, 3));
    }

    #[test]
    fn undirected_edges_are_mirrored_and_counted_once() {
        let g = Graph::from_edges(false, 3, [(0, 1), (1, 2), (2, 2)]);
        assert!(g.has_edge(1, 0));
        assert_eq!(g.in_degree(0), 1);
        assert_eq!(g.num_edges(), 3);
    }

    #[test]
    fn duplicate_edges_collapse() {
        let mut g = Graph::new(true, 2);
        g.add_edge(0, 1).add_edge(0, 1);
        assert_eq!(g.num_edges(), 1);
    }

    #[test]
    fn try_from_edges_reports_bad_endpoint() {
        let err = Graph::try_from_edges(true, 2, [(0, 1), (1, 7)]).unwrap_err();
        assert_eq!(err, GraphError::NodeOutOfRange { node: 7, num_nodes: 2 });
    }

    #[test]
    #[should_panic]
    fn add_edge_out_of_range_panics() {
        let mut g = Graph::new(true, 2);
        g.add_edge(0, 2);
    }

    #[test]
    fn adjacency_string_is_row_major() {
        let g = Graph::from_edges(true, 2, [(0, 1)]);
        assert_eq!(g.adjacency_string(), "0100");
    }

    #[test]
    fn subgraph_reindexes_by_position() {
        let g = diamond();
        let sub = g.subgraph(&[3, 2, 1]);
        assert_eq!(sub.num_nodes(), 3);
        assert!(sub.has_edge(0, 1));
        assert!(sub.has_edge(2, 0));
        assert!(sub.has_edge(2, 1));
        assert_eq!(sub.num_edges(), 3);
    }

    #[test]
    fn undirected_neighbors_skip_duplicates() {
        let g = Graph::from_edges(true, 3, [(0, 1), (1, 0), (2, 0)]);
        let neigh: Vec<_> = g.undirected_neighbors(0).collect();
        assert_eq!(neigh, vec![1, 2]);
    }
}
