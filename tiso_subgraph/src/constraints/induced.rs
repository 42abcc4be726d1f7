use indexmap::IndexSet;

use crate::constraints::Constraint;
use crate::graph::{Graph, NodeId};
use crate::machine::{MatchingMachine, StateId};
use crate::search::SearchFrame;

/// No target edge between the candidate and matched nodes beyond the query's.
///
/// Connectivity already guarantees the query's back-edges exist, so counting
/// matched neighbours against the back-edge counts is enough. The candidate
/// is not matched yet, so its own loop is checked separately.
pub(crate) struct InducedConstraint<'a> {
    machine: &'a MatchingMachine,
    target: &'a Graph,
}

impl<'a> InducedConstraint<'a> {
    pub(crate) const fn new(machine: &'a MatchingMachine, target: &'a Graph) -> Self {
        InducedConstraint { machine, target }
    }
}

impl Constraint for InducedConstraint<'_> {
    fn t_candidate_is_valid(&self, frame: &SearchFrame, state: StateId, candidate: NodeId) -> bool {
        if self.target.has_edge(candidate, candidate) && !self.machine.has_self_loop(state) {
            return false;
        }
        let matched = |neighbors: &IndexSet<NodeId>| neighbors.iter().filter(|&&v| frame.is_matched(v)).count();
        matched(self.target.out_neighbors(candidate)) <= self.machine.out_back_count(state)
            && matched(self.target.in_neighbors(candidate)) <= self.machine.in_back_count(state)
    }
}
