//! Per-query-node candidate sets over the target.
//!
//! A target node is a candidate for a query node when its in- and out-degree
//! are at least the query node's, and, for temporal graphs, when the timing of
//! its contacts can cover the query node's (see
//! [`test_compatibility`](crate::temporal::test_compatibility)). Arc consistency
//! then prunes candidates without a supporting target edge.

mod arc;
mod bitset;

use tiso_common::ArcConsistency;
use tracing::debug;

pub use self::bitset::NodeSet;
use crate::graph::{Graph, NodeId, TemporalGraph, Timestamp};
use crate::temporal::{Conditions, conditions_compatible, node_conditions};

/// Candidate sets, one per query node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Domains {
    sets: Vec<NodeSet>,
}

impl Domains {
    /// Domains of a plain query.
    #[must_use]
    pub fn compute(query: &Graph, target: &Graph, level: ArcConsistency) -> Self {
        Self::compute_with(query, target, level, |_, _| true)
    }

    /// Domains of a temporal query for window `delta`.
    #[must_use]
    pub fn compute_temporal(
        query: &TemporalGraph,
        target: &TemporalGraph,
        level: ArcConsistency,
        delta: Timestamp,
    ) -> Self {
        let query_conditions: Vec<Vec<Conditions>> =
            (0..query.num_nodes()).map(|q| node_conditions(query, q, delta)).collect();
        // target conditions are only built for nodes that pass the degree filter
        let mut target_conditions: Vec<Option<Vec<Conditions>>> = vec![None; target.num_nodes()];
        Self::compute_with(query.topology(), target.topology(), level, |q, t| {
            let conditions = target_conditions[t].get_or_insert_with(|| node_conditions(target, t, delta));
            conditions_compatible(&query_conditions[q], conditions)
        })
    }

    fn compute_with(
        query: &Graph,
        target: &Graph,
        level: ArcConsistency,
        mut admit: impl FnMut(NodeId, NodeId) -> bool,
    ) -> Self {
        let mut sets = vec![NodeSet::new(target.num_nodes()); query.num_nodes()];
        for t in 0..target.num_nodes() {
            for (q, set) in sets.iter_mut().enumerate() {
                if query.out_degree(q) <= target.out_degree(t)
                    && query.in_degree(q) <= target.in_degree(t)
                    && admit(q, t)
                {
                    set.insert(t);
                }
            }
        }
        arc::enforce(level, query, target, &mut sets);

        let domains = Self { sets };
        debug!(sizes = ?domains.sizes(), ?level, "domains computed");
        domains
    }

    /// Candidate set of query node `q`.
    #[must_use]
    pub fn get(&self, q: NodeId) -> &NodeSet {
        &self.sets[q]
    }

    /// Whether `t` is a candidate for `q`.
    #[must_use]
    pub fn contains(&self, q: NodeId, t: NodeId) -> bool {
        self.sets[q].contains(t)
    }

    /// Number of query nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Whether there are no query nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Candidate counts per query node.
    #[must_use]
    pub fn sizes(&self) -> Vec<usize> {
        self.sets.iter().map(NodeSet::len).collect()
    }

    /// Whether some query node has no candidate at all, so no match exists.
    #[must_use]
    pub fn has_empty(&self) -> bool {
        self.sets.iter().any(NodeSet::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_filter() {
        // query: one edge; target: a star out of 0 plus an isolated node
        let query = Graph::from_edges(true, 2, [(0, 1)]);
        let target = Graph::from_edges(true, 4, [(0, 1), (0, 2)]);
        let d = Domains::compute(&query, &target, ArcConsistency::Disabled);
        assert_eq!(d.get(0).iter().collect::<Vec<_>>(), vec![0]);
        assert_eq!(d.get(1).iter().collect::<Vec<_>>(), vec![1, 2]);
        assert!(!d.has_empty());
    }

    #[test]
    fn single_pass_misses_what_fixpoint_catches() {
        // 4 -> 5 -> 6 looks fine for the path head until 5 loses its
        // support, which only happens after node 0's turn in the sweep
        let query = Graph::from_edges(true, 4, [(0, 1), (1, 2), (3, 2)]);
        let target = Graph::from_edges(true, 7, [(0, 1), (1, 2), (3, 2), (4, 5), (5, 6)]);
        let single = Domains::compute(&query, &target, ArcConsistency::SinglePass);
        let fixpoint = Domains::compute(&query, &target, ArcConsistency::Fixpoint);
        assert!(single.contains(0, 4));
        assert!(!single.contains(1, 5));
        assert!(!fixpoint.contains(0, 4));
        assert!(fixpoint.contains(0, 0));
    }

    #[test]
    fn temporal_filter_uses_conditions() {
        let query = TemporalGraph::from_contacts(true, 3, [(0, 1, 1), (1, 2, 2)]);
        // target node 1 relays too late, node 4 relays in time
        let target = TemporalGraph::from_contacts(true, 6, [(0, 1, 1), (1, 2, 30), (3, 4, 1), (4, 5, 2)]);
        let d = Domains::compute_temporal(&query, &target, ArcConsistency::Disabled, 5);
        assert!(!d.contains(1, 1));
        assert!(d.contains(1, 4));
    }
}
