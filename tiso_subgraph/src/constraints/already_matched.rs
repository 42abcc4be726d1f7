use crate::constraints::Constraint;
use crate::graph::NodeId;
use crate::machine::StateId;
use crate::search::SearchFrame;

/// A target node is used by at most one query node.
pub(crate) struct NotAlreadyMatchedConstraint;

impl Constraint for NotAlreadyMatchedConstraint {
    fn t_candidate_is_valid(&self, frame: &SearchFrame, _state: StateId, candidate: NodeId) -> bool {
        !frame.is_matched(candidate)
    }
}
