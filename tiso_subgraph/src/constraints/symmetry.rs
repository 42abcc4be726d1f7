use crate::automorphism::SymmetryConditions;
use crate::constraints::Constraint;
use crate::graph::NodeId;
use crate::machine::{MatchingMachine, StateId};
use crate::search::SearchFrame;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Order {
    /// The candidate must exceed the image of this earlier state.
    Above(StateId),
    /// The candidate must stay below the image of this earlier state.
    Below(StateId),
}

/// Symmetry conditions rearranged by processing order: each condition is
/// checked at whichever of its two states comes later.
pub(crate) struct SymmetryConstraint {
    checks: Vec<Vec<Order>>,
}

impl SymmetryConstraint {
    pub(crate) fn new(machine: &MatchingMachine, conditions: &SymmetryConditions) -> Self {
        let mut checks = vec![Vec::new(); machine.len()];
        for (lower, upper) in conditions.pairs() {
            let (low_state, up_state) = (machine.state_of_node(lower), machine.state_of_node(upper));
            if up_state > low_state {
                checks[up_state].push(Order::Above(low_state));
            } else {
                checks[low_state].push(Order::Below(up_state));
            }
        }
        SymmetryConstraint { checks }
    }
}

impl Constraint for SymmetryConstraint {
    fn t_candidate_is_valid(&self, frame: &SearchFrame, state: StateId, candidate: NodeId) -> bool {
        self.checks[state].iter().all(|order| match *order {
            Order::Above(other) => frame.image(other).is_none_or(|image| candidate > image),
            Order::Below(other) => frame.image(other).is_none_or(|image| candidate < image),
        })
    }
}
