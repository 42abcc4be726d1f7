//! Automorphisms of query graphs and the ordering constraints derived from them.
//!
//! The enumeration is exhaustive: a support matrix rules out node pairs with
//! different neighbour-degree profiles, then a depth-first extension grows
//! partial mappings one node at a time, always picking the unmapped node with
//! the most mapped neighbours.

mod signature;
mod symmetry;

use tracing::debug;

use self::signature::SupportMatrix;
pub use self::symmetry::SymmetryConditions;
use crate::graph::{Graph, NodeId, TemporalGraph, Timestamp};
use crate::temporal::TemporalStructure;

/// A bijection of the node set onto itself that preserves adjacency.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Automorphism(Vec<NodeId>);

impl Automorphism {
    /// The identity on `num_nodes` nodes.
    #[must_use]
    pub fn identity(num_nodes: usize) -> Self {
        Self((0..num_nodes).collect())
    }

    /// Image of `node`.
    #[must_use]
    pub fn image(&self, node: NodeId) -> NodeId {
        self.0[node]
    }

    /// Number of nodes permuted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the mapping is over an empty graph.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether every node is fixed.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(i, &image)| i == image)
    }

    /// `self ∘ other`: apply `other` first.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        Self(other.0.iter().map(|&mid| self.0[mid]).collect())
    }

    /// Images indexed by node.
    #[must_use]
    pub fn as_slice(&self) -> &[NodeId] {
        &self.0
    }
}

/// Decides whether mapping `m -> n` agrees with an already fixed `j -> fj`.
trait PairCheck {
    fn consistent(&self, m: NodeId, n: NodeId, j: NodeId, fj: NodeId) -> bool;
}

struct Topology<'g>(&'g Graph);

impl PairCheck for Topology<'_> {
    fn consistent(&self, m: NodeId, n: NodeId, j: NodeId, fj: NodeId) -> bool {
        self.0.has_edge(m, j) == self.0.has_edge(n, fj) && self.0.has_edge(j, m) == self.0.has_edge(fj, n)
    }
}

/// Topology plus equal temporal structure at both ends of every matching
/// pair of contacts.
struct Timed<'g> {
    graph: &'g TemporalGraph,
    delta: Timestamp,
}

impl Timed<'_> {
    fn same_structure(&self, (a, at): (NodeId, Timestamp), (b, bt): (NodeId, Timestamp)) -> bool {
        let left = TemporalStructure::of(self.graph, a, at, self.delta);
        let right = TemporalStructure::of(self.graph, b, bt, self.delta);
        left.dominated_by(&right) && right.dominated_by(&left)
    }
}

impl PairCheck for Timed<'_> {
    fn consistent(&self, m: NodeId, n: NodeId, j: NodeId, fj: NodeId) -> bool {
        if !Topology(self.graph.topology()).consistent(m, n, j, fj) {
            return false;
        }
        let forward = match (self.graph.contact(m, j), self.graph.contact(n, fj)) {
            (Some(a), Some(b)) => self.same_structure((j, a.time), (fj, b.time)),
            _ => true,
        };
        let backward = match (self.graph.contact(j, m), self.graph.contact(fj, n)) {
            (Some(a), Some(b)) => self.same_structure((m, a.time), (n, b.time)),
            _ => true,
        };
        forward && backward
    }
}

struct Extender<'g, C> {
    graph: &'g Graph,
    support: SupportMatrix,
    check: C,
    forward: Vec<Option<NodeId>>,
    reverse: Vec<Option<NodeId>>,
    found: Vec<Automorphism>,
}

impl<'g, C: PairCheck> Extender<'g, C> {
    fn new(graph: &'g Graph, check: C) -> Self {
        let n = graph.num_nodes();
        Self {
            graph,
            support: SupportMatrix::build(graph),
            check,
            forward: vec![None; n],
            reverse: vec![None; n],
            found: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Automorphism> {
        let n = self.graph.num_nodes();
        if n == 0 {
            return vec![Automorphism(Vec::new())];
        }
        for image in 0..n {
            if self.support.allows(0, image) && self.check.consistent(0, image, 0, image) {
                self.assign(0, image);
                self.extend(1);
                self.release(0, image);
            }
        }
        self.found
    }

    fn extend(&mut self, mapped: usize) {
        if mapped == self.graph.num_nodes() {
            let images = self.forward.iter().flatten().copied().collect();
            self.found.push(Automorphism(images));
            return;
        }
        let (node, candidates) = self.next_node();
        for image in candidates {
            if self.admissible(node, image) {
                self.assign(node, image);
                self.extend(mapped + 1);
                self.release(node, image);
            }
        }
    }

    /// The next node to map and its candidate images.
    fn next_node(&self) -> (NodeId, Vec<NodeId>) {
        let n = self.graph.num_nodes();
        let mapped: Vec<(NodeId, NodeId)> = (0..n)
            .filter_map(|i| self.forward[i].map(|image| (i, image)))
            .collect();

        let mut count = vec![0usize; n];
        for &(i, _) in &mapped {
            for neighbor in self.graph.undirected_neighbors(i) {
                if self.forward[neighbor].is_none() {
                    count[neighbor] += 1;
                }
            }
        }
        let best = (0..n)
            .filter(|&v| count[v] > 0)
            .max_by(|&a, &b| count[a].cmp(&count[b]).then(b.cmp(&a)));

        match best {
            Some(node) => {
                let mut candidates = Vec::new();
                let mut taken = vec![false; n];
                for &(_, image) in &mapped {
                    for neighbor in self.graph.undirected_neighbors(image) {
                        if !taken[neighbor] && self.reverse[neighbor].is_none() && self.support.allows(node, neighbor) {
                            taken[neighbor] = true;
                            candidates.push(neighbor);
                        }
                    }
                }
                (node, candidates)
            }
            // the mapped part is a union of whole components
            None => {
                let node = (0..n).find(|&v| self.forward[v].is_none()).unwrap_or_default();
                let candidates = (0..n)
                    .filter(|&image| self.reverse[image].is_none() && self.support.allows(node, image))
                    .collect();
                (node, candidates)
            }
        }
    }

    fn admissible(&self, node: NodeId, image: NodeId) -> bool {
        self.check.consistent(node, image, node, image)
            && self
                .forward
                .iter()
                .enumerate()
                .all(|(j, fixed)| fixed.is_none_or(|fj| self.check.consistent(node, image, j, fj)))
    }

    fn assign(&mut self, node: NodeId, image: NodeId) {
        self.forward[node] = Some(image);
        self.reverse[image] = Some(node);
    }

    fn release(&mut self, node: NodeId, image: NodeId) {
        self.forward[node] = None;
        self.reverse[image] = None;
    }
}

/// Every automorphism of `graph`, identity included.
#[must_use]
pub fn find_automorphisms(graph: &Graph) -> Vec<Automorphism> {
    let found = Extender::new(graph, Topology(graph)).run();
    debug!(nodes = graph.num_nodes(), automorphisms = found.len(), "automorphisms enumerated");
    found
}

/// Automorphisms of the topology that also map every contact onto one whose
/// endpoints have identical temporal structure within `delta`.
#[must_use]
pub fn find_temporal_automorphisms(graph: &TemporalGraph, delta: Timestamp) -> Vec<Automorphism> {
    let found = Extender::new(graph.topology(), Timed { graph, delta }).run();
    debug!(nodes = graph.num_nodes(), automorphisms = found.len(), delta, "temporal automorphisms enumerated");
    found
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn closed_under_composition(autos: &[Automorphism]) -> bool {
        let set: HashSet<_> = autos.iter().collect();
        autos.iter().all(|a| autos.iter().all(|b| set.contains(&a.compose(b))))
    }

    #[test]
    fn triangle_has_six() {
        let g = Graph::from_edges(false, 3, [(0, 1), (1, 2), (2, 0)]);
        let autos = find_automorphisms(&g);
        assert_eq!(autos.len(), 6);
        assert!(autos.iter().any(Automorphism::is_identity));
        assert!(closed_under_composition(&autos));
    }

    #[test]
    fn directed_cycle_has_rotations_only() {
        let g = Graph::from_edges(true, 3, [(0, 1), (1, 2), (2, 0)]);
        assert_eq!(find_automorphisms(&g).len(), 3);
    }

    #[test]
    fn directed_path_is_rigid() {
        let g = Graph::from_edges(true, 3, [(0, 1), (1, 2)]);
        assert_eq!(find_automorphisms(&g), vec![Automorphism::identity(3)]);
    }

    #[test]
    fn disconnected_edges_swap() {
        // two disjoint undirected edges: 2 flips per edge, times the swap
        let g = Graph::from_edges(false, 4, [(0, 1), (2, 3)]);
        let autos = find_automorphisms(&g);
        assert_eq!(autos.len(), 8);
        assert!(closed_under_composition(&autos));
    }

    #[test]
    fn isolated_nodes_permute_freely() {
        assert_eq!(find_automorphisms(&Graph::new(true, 3)).len(), 6);
    }

    #[test]
    fn self_loops_are_respected() {
        let g = Graph::from_edges(false, 2, [(0, 1), (0, 0)]);
        assert_eq!(find_automorphisms(&g).len(), 1);
    }

    #[test]
    fn empty_graph_has_the_empty_mapping() {
        let autos = find_automorphisms(&Graph::new(true, 0));
        assert_eq!(autos.len(), 1);
        assert!(autos[0].is_empty());
    }

    #[test]
    fn timing_breaks_symmetry() {
        // undirected path 0 - 1 - 2 reverses, unless the two contacts differ in time
        // relative to the window
        let same = TemporalGraph::from_contacts(false, 3, [(0, 1, 5), (1, 2, 5)]);
        assert_eq!(find_temporal_automorphisms(&same, 2).len(), 2);
        let skewed = TemporalGraph::from_contacts(false, 3, [(0, 1, 1), (1, 2, 9)]);
        assert_eq!(find_temporal_automorphisms(&skewed, 2).len(), 1);
        assert_eq!(find_automorphisms(skewed.topology()).len(), 2);
    }
}
