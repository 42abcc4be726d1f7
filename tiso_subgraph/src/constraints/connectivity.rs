use crate::constraints::Constraint;
use crate::graph::{Graph, NodeId};
use crate::machine::{MatchingMachine, StateId};
use crate::search::SearchFrame;

/// Every query edge back to an assigned state needs its target edge.
pub(crate) struct ConnectivityConstraint<'a> {
    machine: &'a MatchingMachine,
    target: &'a Graph,
}

impl<'a> ConnectivityConstraint<'a> {
    pub(crate) const fn new(machine: &'a MatchingMachine, target: &'a Graph) -> Self {
        ConnectivityConstraint { machine, target }
    }
}

impl Constraint for ConnectivityConstraint<'_> {
    fn t_candidate_is_valid(&self, frame: &SearchFrame, state: StateId, _candidate: NodeId) -> bool {
        self.machine.back_edges(state).iter().all(|edge| {
            match (frame.image(edge.source), frame.image(edge.target)) {
                (Some(source), Some(dest)) => self.target.has_edge(source, dest),
                _ => false,
            }
        })
    }
}
