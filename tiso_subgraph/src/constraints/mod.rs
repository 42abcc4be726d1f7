//! Feasibility rules for a tentative `state -> candidate` assignment.
//!
//! Every rule is its own [`Constraint`]; [`Constraints`] runs them in a fixed
//! order, cheapest first, and stops at the first rejection.

mod already_matched;
mod connectivity;
mod domain;
mod induced;
mod symmetry;
mod temporal;

use self::already_matched::NotAlreadyMatchedConstraint;
use self::connectivity::ConnectivityConstraint;
use self::domain::DomainConstraint;
use self::induced::InducedConstraint;
use self::symmetry::SymmetryConstraint;
use self::temporal::TemporalConstraint;
use crate::automorphism::SymmetryConditions;
use crate::domain::Domains;
use crate::graph::{Graph, NodeId, TemporalGraph, Timestamp};
use crate::machine::{MatchingMachine, StateId};
use crate::search::SearchFrame;

pub(crate) trait Constraint {
    /// `frame` already holds `candidate` as the image of `state`.
    fn t_candidate_is_valid(&self, frame: &SearchFrame, state: StateId, candidate: NodeId) -> bool;
}

pub(crate) struct Constraints<'a> {
    not_matched: NotAlreadyMatchedConstraint,
    domain: DomainConstraint<'a>,
    symmetry: SymmetryConstraint,
    connectivity: ConnectivityConstraint<'a>,
    induced: Option<InducedConstraint<'a>>,
    temporal: Option<TemporalConstraint<'a>>,
}

impl<'a> Constraints<'a> {
    pub(crate) fn new(
        machine: &'a MatchingMachine,
        domains: &'a Domains,
        target: &'a Graph,
        symmetry: &SymmetryConditions,
        induced: bool,
    ) -> Self {
        Self {
            not_matched: NotAlreadyMatchedConstraint,
            domain: DomainConstraint::new(machine, domains),
            symmetry: SymmetryConstraint::new(machine, symmetry),
            connectivity: ConnectivityConstraint::new(machine, target),
            induced: induced.then(|| InducedConstraint::new(machine, target)),
            temporal: None,
        }
    }

    /// Also compare temporal structure along timed back-edges.
    pub(crate) fn with_temporal(mut self, machine: &'a MatchingMachine, target: &'a TemporalGraph, delta: Timestamp) -> Self {
        self.temporal = Some(TemporalConstraint::new(machine, target, delta));
        self
    }

    pub(crate) fn t_candidate_is_valid(&self, frame: &SearchFrame, state: StateId, candidate: NodeId) -> bool {
        self.not_matched.t_candidate_is_valid(frame, state, candidate)
            && self.domain.t_candidate_is_valid(frame, state, candidate)
            && self.symmetry.t_candidate_is_valid(frame, state, candidate)
            && self.connectivity.t_candidate_is_valid(frame, state, candidate)
            && self
                .induced
                .as_ref()
                .is_none_or(|c| c.t_candidate_is_valid(frame, state, candidate))
            && self
                .temporal
                .as_ref()
                .is_none_or(|c| c.t_candidate_is_valid(frame, state, candidate))
    }
}
