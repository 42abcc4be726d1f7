use tracing::debug;

use super::{Automorphism, find_automorphisms, find_temporal_automorphisms};
use crate::graph::{Graph, NodeId, TemporalGraph, Timestamp};

/// Ordering constraints that keep one match per automorphism orbit.
///
/// `companions(k)` lists the nodes `i < k` whose image must be smaller than
/// the image of `k`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymmetryConditions {
    companions: Vec<Vec<NodeId>>,
}

impl SymmetryConditions {
    /// No constraints on `num_nodes` nodes.
    #[must_use]
    pub fn none(num_nodes: usize) -> Self {
        Self {
            companions: vec![Vec::new(); num_nodes],
        }
    }

    /// Derive the constraints from an automorphism set.
    ///
    /// Nodes are taken in id order. Once node `i` has been pinned below every
    /// node an unbroken automorphism sends it to, every automorphism moving `i`
    /// is considered broken and stops contributing.
    #[must_use]
    pub fn from_automorphisms(num_nodes: usize, automorphisms: &[Automorphism]) -> Self {
        let mut conditions = Self::none(num_nodes);
        let mut broken = vec![false; automorphisms.len()];
        for i in 0..num_nodes {
            let unbroken_sends_i_to = |k: NodeId| {
                automorphisms
                    .iter()
                    .zip(&broken)
                    .any(|(a, &gone)| !gone && a.image(i) == k)
            };
            let moved = automorphisms
                .iter()
                .zip(&broken)
                .any(|(a, &gone)| !gone && a.image(i) != i);
            if moved {
                for k in (i + 1)..num_nodes {
                    if unbroken_sends_i_to(k) {
                        conditions.companions[k].push(i);
                    }
                }
            }
            for (a, b) in automorphisms.iter().zip(broken.iter_mut()) {
                if a.image(i) != i {
                    *b = true;
                }
            }
        }
        conditions
    }

    /// Constraints from the automorphisms of a plain query.
    #[must_use]
    pub fn of_graph(graph: &Graph) -> Self {
        let conditions = Self::from_automorphisms(graph.num_nodes(), &find_automorphisms(graph));
        debug!(constraints = conditions.len(), "symmetry conditions derived");
        conditions
    }

    /// Constraints from the temporal automorphisms of a query.
    #[must_use]
    pub fn of_temporal_graph(graph: &TemporalGraph, delta: Timestamp) -> Self {
        let automorphisms = find_temporal_automorphisms(graph, delta);
        let conditions = Self::from_automorphisms(graph.num_nodes(), &automorphisms);
        debug!(constraints = conditions.len(), "temporal symmetry conditions derived");
        conditions
    }

    /// Nodes whose image must be below the image of `node`.
    #[must_use]
    pub fn companions(&self, node: NodeId) -> &[NodeId] {
        &self.companions[node]
    }

    /// Every constraint as `(lower, upper)`: image of `lower` < image of `upper`.
    pub fn pairs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.companions
            .iter()
            .enumerate()
            .flat_map(|(upper, lows)| lows.iter().map(move |&lower| (lower, upper)))
    }

    /// Number of constraints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.companions.iter().map(Vec::len).sum()
    }

    /// Whether no constraint was derived.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
