use crate::graph::NodeId;
use crate::machine::StateId;

/// Mutable state of one search: the partial assignment, the used target
/// nodes, and a candidate list with a cursor per state.
#[derive(Clone, Debug)]
pub(crate) struct SearchFrame {
    solution: Vec<Option<NodeId>>,
    matched: Vec<bool>,
    candidates: Vec<Vec<NodeId>>,
    cursor: Vec<usize>,
}

impl SearchFrame {
    pub(crate) fn new(states: usize, target_nodes: usize) -> Self {
        Self {
            solution: vec![None; states],
            matched: vec![false; target_nodes],
            candidates: vec![Vec::new(); states],
            cursor: vec![0; states],
        }
    }

    /// Target node assigned to `state`, if any.
    pub(crate) fn image(&self, state: StateId) -> Option<NodeId> {
        self.solution[state]
    }

    pub(crate) fn is_matched(&self, target: NodeId) -> bool {
        self.matched[target]
    }

    /// Mark the image of `state` as used.
    pub(crate) fn occupy(&mut self, state: StateId) {
        if let Some(target) = self.solution[state] {
            self.matched[target] = true;
        }
    }

    /// Give the image of `state` back.
    pub(crate) fn release(&mut self, state: StateId) {
        if let Some(target) = self.solution[state] {
            self.matched[target] = false;
        }
    }

    pub(crate) fn clear(&mut self, state: StateId) {
        self.solution[state] = None;
    }

    /// Replace the candidates of `state` and start over.
    pub(crate) fn load(&mut self, state: StateId, candidates: impl IntoIterator<Item = NodeId>) {
        let list = &mut self.candidates[state];
        list.clear();
        list.extend(candidates);
        self.cursor[state] = 0;
    }

    /// Start over with the current candidates of `state`.
    pub(crate) fn rewind(&mut self, state: StateId) {
        self.cursor[state] = 0;
    }

    /// Tentatively assign the next untried candidate of `state`.
    pub(crate) fn next_candidate(&mut self, state: StateId) -> Option<NodeId> {
        let candidate = self.candidates[state].get(self.cursor[state]).copied()?;
        self.cursor[state] += 1;
        self.solution[state] = Some(candidate);
        Some(candidate)
    }

    /// Images of all states in state order; `None` unless every state is assigned.
    pub(crate) fn assignment(&self) -> Option<Vec<NodeId>> {
        self.solution.iter().copied().collect()
    }
}
