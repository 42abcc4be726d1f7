use contracts::requires;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::graph::{NodeId, TemporalGraph, Timestamp};

/// How the outgoing contacts of a node follow one of its incoming contacts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Conditions {
    /// Outgoing contacts not strictly after the incoming one.
    pub not_time_respecting: usize,
    /// Outgoing contacts after the incoming one by more than `delta`.
    pub delta_not_respected: usize,
    /// Outgoing contacts after the incoming one by at most `delta`.
    pub delta_respected: usize,
}

impl Conditions {
    /// Component-wise `self <= other`.
    #[must_use]
    pub const fn ltoe(&self, other: &Self) -> bool {
        self.not_time_respecting <= other.not_time_respecting
            && self.delta_not_respected <= other.delta_not_respected
            && self.delta_respected <= other.delta_respected
    }
}

/// One [`Conditions`] per incoming contact of `node`, in contact order.
#[must_use]
pub fn node_conditions(graph: &TemporalGraph, node: NodeId, delta: Timestamp) -> Vec<Conditions> {
    graph
        .in_contacts(node)
        .map(|incoming| {
            let mut cond = Conditions::default();
            for outgoing in graph.out_contacts(node) {
                if incoming.time < outgoing.time {
                    if outgoing.time - incoming.time <= delta {
                        cond.delta_respected += 1;
                    } else {
                        cond.delta_not_respected += 1;
                    }
                } else {
                    cond.not_time_respecting += 1;
                }
            }
            cond
        })
        .collect()
}

/// Every query condition must be dominated by at least one target condition.
pub(crate) fn conditions_compatible(query: &[Conditions], target: &[Conditions]) -> bool {
    query.iter().all(|cond| dominated_by_any(cond, target))
}

fn dominated_by_any(cond: &Conditions, pool: &[Conditions]) -> bool {
    #[cfg(feature = "rayon")]
    {
        pool.par_iter().any(|other| cond.ltoe(other))
    }
    #[cfg(not(feature = "rayon"))]
    {
        pool.iter().any(|other| cond.ltoe(other))
    }
}

/// Whether `query_node` may be mapped onto `target_node` as far as the timing
/// of their contacts goes.
#[must_use]
pub fn test_compatibility(
    query: &TemporalGraph,
    target: &TemporalGraph,
    query_node: NodeId,
    target_node: NodeId,
    delta: Timestamp,
) -> bool {
    conditions_compatible(
        &node_conditions(query, query_node, delta),
        &node_conditions(target, target_node, delta),
    )
}

/// [`test_compatibility`] for every query node `q` against `mapping[q]` in
/// `subtarget`.
#[must_use]
#[requires(mapping.len() == query.num_nodes(), "mapping must cover every query node")]
pub fn test_map(query: &TemporalGraph, subtarget: &TemporalGraph, mapping: &[NodeId], delta: Timestamp) -> bool {
    mapping
        .iter()
        .enumerate()
        .all(|(q, &t)| test_compatibility(query, subtarget, q, t, delta))
}

#[cfg(test)]
mod tests {
    use super::*;

    // node 1 receives at 2 and sends at 3, 10 and 1
    fn relay() -> TemporalGraph {
        TemporalGraph::from_contacts(true, 5, [(0, 1, 2), (1, 2, 3), (1, 3, 10), (1, 4, 1)])
    }

    #[test]
    fn conditions_split_by_window() {
        let conds = node_conditions(&relay(), 1, 5);
        assert_eq!(
            conds,
            vec![Conditions { not_time_respecting: 1, delta_not_respected: 1, delta_respected: 1 }]
        );
    }

    #[test]
    fn node_without_incoming_contacts_has_no_conditions() {
        assert!(node_conditions(&relay(), 0, 5).is_empty());
    }

    #[test]
    fn compatibility_needs_a_dominating_target_condition() {
        let target = relay();
        let query = TemporalGraph::from_contacts(true, 3, [(0, 1, 5), (1, 2, 7)]);
        // one respected follow-up in the query, one available in the target
        assert!(test_compatibility(&query, &target, 1, 1, 5));
        // target node 2 never sends, so a same-time follow-up cannot be covered
        let tight = TemporalGraph::from_contacts(true, 3, [(0, 1, 5), (1, 2, 5)]);
        assert!(!test_compatibility(&tight, &target, 1, 2, 5));
        // a query node with no incoming contacts is always compatible
        assert!(test_compatibility(&query, &target, 0, 4, 5));
    }

    #[test]
    fn test_map_checks_every_pair() {
        let g = relay();
        assert!(test_map(&g, &g, &[0, 1, 2, 3, 4], 5));
        assert!(!test_map(&g, &g, &[0, 2, 1, 3, 4], 5));
    }
}
