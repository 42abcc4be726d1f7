use crate::constraints::Constraint;
use crate::domain::Domains;
use crate::graph::NodeId;
use crate::machine::{MatchingMachine, StateId};
use crate::search::SearchFrame;

/// Candidates reached through a parent edge may still lie outside the domain.
pub(crate) struct DomainConstraint<'a> {
    machine: &'a MatchingMachine,
    domains: &'a Domains,
}

impl<'a> DomainConstraint<'a> {
    pub(crate) const fn new(machine: &'a MatchingMachine, domains: &'a Domains) -> Self {
        DomainConstraint { machine, domains }
    }
}

impl Constraint for DomainConstraint<'_> {
    fn t_candidate_is_valid(&self, _frame: &SearchFrame, state: StateId, candidate: NodeId) -> bool {
        self.domains.contains(self.machine.node_of_state(state), candidate)
    }
}
