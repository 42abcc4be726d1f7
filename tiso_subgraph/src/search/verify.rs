use crate::graph::{NodeId, TemporalGraph, Timestamp};
use crate::machine::MatchingMachine;
use crate::search::SearchFrame;
use crate::temporal::test_map;

/// Last word on a complete assignment before it is counted.
pub(crate) trait Verifier {
    fn accept(&self, machine: &MatchingMachine, frame: &SearchFrame) -> bool;
}

/// Plain matching: every assignment that passed the constraints counts.
pub(crate) struct AcceptAll;

impl Verifier for AcceptAll {
    fn accept(&self, _machine: &MatchingMachine, _frame: &SearchFrame) -> bool {
        true
    }
}

/// Rebuild the matched target piece with exactly the query's edges and
/// re-check contact timing node by node on it.
pub(crate) struct TemporalVerifier<'a> {
    query: &'a TemporalGraph,
    target: &'a TemporalGraph,
    delta: Timestamp,
    identity: Vec<NodeId>,
}

impl<'a> TemporalVerifier<'a> {
    pub(crate) fn new(query: &'a TemporalGraph, target: &'a TemporalGraph, delta: Timestamp) -> Self {
        Self {
            query,
            target,
            delta,
            identity: (0..query.num_nodes()).collect(),
        }
    }
}

impl Verifier for TemporalVerifier<'_> {
    fn accept(&self, machine: &MatchingMachine, frame: &SearchFrame) -> bool {
        let Some(by_state) = frame.assignment() else {
            return false;
        };
        let mut by_node = vec![0; by_state.len()];
        for (state, image) in by_state.into_iter().enumerate() {
            by_node[machine.node_of_state(state)] = image;
        }
        let sub = self
            .target
            .subgraph_selected_edges(&by_node, self.query.topology().out_adjacency());
        test_map(self.query, &sub, &self.identity, self.delta)
    }
}
