use crate::constraints::Constraint;
use crate::graph::{NodeId, TemporalGraph, Timestamp};
use crate::machine::{MatchingMachine, StateId};
use crate::search::SearchFrame;
use crate::temporal::TemporalStructure;

/// Along every timed back-edge, the query destination's temporal structure
/// must be dominated by the target destination's, each seen through its own
/// contact.
pub(crate) struct TemporalConstraint<'a> {
    machine: &'a MatchingMachine,
    target: &'a TemporalGraph,
    delta: Timestamp,
}

impl<'a> TemporalConstraint<'a> {
    pub(crate) const fn new(machine: &'a MatchingMachine, target: &'a TemporalGraph, delta: Timestamp) -> Self {
        TemporalConstraint { machine, target, delta }
    }
}

impl Constraint for TemporalConstraint<'_> {
    fn t_candidate_is_valid(&self, frame: &SearchFrame, state: StateId, _candidate: NodeId) -> bool {
        self.machine.back_edges(state).iter().all(|edge| {
            let Some(query_structure) = edge.query_structure else {
                return true;
            };
            let (Some(source), Some(dest)) = (frame.image(edge.source), frame.image(edge.target)) else {
                return false;
            };
            self.target.contact(source, dest).is_some_and(|contact| {
                query_structure.dominated_by(&TemporalStructure::of(self.target, dest, contact.time, self.delta))
            })
        })
    }
}
