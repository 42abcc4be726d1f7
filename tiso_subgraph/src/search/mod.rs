//! Iterative depth-first enumeration over the matching machine's states.
//!
//! One [`SearchFrame`] is owned by the running search. Advancing assigns the
//! next feasible candidate to the current state and moves on; running out of
//! candidates steps back and frees the previous state's image. A feasible
//! candidate at the last state is handed to the [`Verifier`] and counted.

mod frame;
mod verify;

use tracing::{info, trace};

pub(crate) use self::frame::SearchFrame;
pub(crate) use self::verify::{AcceptAll, TemporalVerifier, Verifier};
use crate::constraints::Constraints;
use crate::domain::Domains;
use crate::graph::{Graph, NodeId};
use crate::machine::{MatchingMachine, ParentRelation, StateId};

/// Counters collected during one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Occurrences counted.
    pub matches: u64,
    /// Times the search moved one state deeper, the first state included.
    pub states_visited: u64,
    /// Candidates checked against the constraints.
    pub candidates_tried: u64,
    /// Complete assignments turned down by the final verification.
    pub rejected_by_verifier: u64,
}

pub(crate) struct Search<'a, V> {
    machine: &'a MatchingMachine,
    domains: &'a Domains,
    target: &'a Graph,
    constraints: Constraints<'a>,
    verifier: V,
    progress_interval: u64,
}

impl<'a, V: Verifier> Search<'a, V> {
    pub(crate) const fn new(
        machine: &'a MatchingMachine,
        domains: &'a Domains,
        target: &'a Graph,
        constraints: Constraints<'a>,
        verifier: V,
        progress_interval: u64,
    ) -> Self {
        Self {
            machine,
            domains,
            target,
            constraints,
            verifier,
            progress_interval,
        }
    }

    pub(crate) fn run(&self) -> SearchStats {
        let mut stats = SearchStats::default();
        let n = self.machine.len();
        if n == 0 || self.domains.has_empty() {
            return stats;
        }

        let mut frame = SearchFrame::new(n, self.target.num_nodes());
        for state in 0..n {
            if self.machine.parent_relation(state) == ParentRelation::None {
                let node = self.machine.node_of_state(state);
                frame.load(state, self.domains.get(node).iter());
            }
        }

        let mut state: StateId = 0;
        let mut stepped_back = false;
        stats.states_visited = 1;
        loop {
            if stepped_back {
                frame.release(state);
            }
            match self.advance(&mut frame, state, &mut stats) {
                None => {
                    frame.clear(state);
                    if state == 0 {
                        break;
                    }
                    state -= 1;
                    stepped_back = true;
                }
                Some(_) if state + 1 == n => {
                    if self.verifier.accept(self.machine, &frame) {
                        stats.matches += 1;
                        if self.progress_interval > 0 && stats.matches % self.progress_interval == 0 {
                            info!(matches = stats.matches, "found occurrences so far");
                        }
                    } else {
                        stats.rejected_by_verifier += 1;
                    }
                    stepped_back = false;
                }
                Some(_) => {
                    frame.occupy(state);
                    state += 1;
                    self.prepare(&mut frame, state);
                    stats.states_visited += 1;
                    stepped_back = false;
                }
            }
        }
        stats
    }

    /// Move the cursor of `state` to its next feasible candidate.
    fn advance(&self, frame: &mut SearchFrame, state: StateId, stats: &mut SearchStats) -> Option<NodeId> {
        while let Some(candidate) = frame.next_candidate(state) {
            stats.candidates_tried += 1;
            if self.constraints.t_candidate_is_valid(frame, state, candidate) {
                trace!(state, candidate, "candidate accepted");
                return Some(candidate);
            }
        }
        None
    }

    /// Fill the candidate list of a state just entered.
    fn prepare(&self, frame: &mut SearchFrame, state: StateId) {
        let parent_image = self.machine.parent_state(state).and_then(|parent| frame.image(parent));
        match (self.machine.parent_relation(state), parent_image) {
            (ParentRelation::None, _) => frame.rewind(state),
            (ParentRelation::Successor, Some(image)) => {
                frame.load(state, self.target.out_neighbors(image).iter().copied());
            }
            (ParentRelation::Predecessor, Some(image)) => {
                frame.load(state, self.target.in_neighbors(image).iter().copied());
            }
            (_, None) => frame.load(state, std::iter::empty()),
        }
    }
}
