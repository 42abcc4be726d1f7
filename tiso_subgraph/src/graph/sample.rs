//! Random node samples, used to draw query graphs out of a target.

use std::collections::{HashSet, VecDeque};

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::trace;

use super::{Graph, NodeId, TemporalGraph};

/// Grow a weakly connected node set of size `k` by a shuffled BFS from a
/// random seed. `None` when the seed's component has fewer than `k` nodes.
fn weakly_connected_nodes<R: Rng + ?Sized>(graph: &Graph, k: usize, rng: &mut R) -> Option<Vec<NodeId>> {
    if k == 0 {
        return Some(Vec::new());
    }
    let n = graph.num_nodes();
    if n == 0 {
        return None;
    }

    let start = rng.gen_range(0..n);
    let mut nodes = vec![start];
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while nodes.len() < k {
        let Some(current) = queue.pop_front() else {
            trace!(start, found = nodes.len(), k, "component exhausted");
            return None;
        };
        let mut neighbors: Vec<NodeId> = graph
            .in_neighbors(current)
            .iter()
            .chain(graph.out_neighbors(current))
            .copied()
            .collect();
        neighbors.shuffle(rng);
        for next in neighbors {
            if seen.insert(next) {
                nodes.push(next);
                queue.push_back(next);
                if nodes.len() == k {
                    break;
                }
            }
        }
    }
    Some(nodes)
}

/// One random node from each of `k` consecutive id bands of equal width.
fn stratified_nodes<R: Rng + ?Sized>(num_nodes: usize, k: usize, rng: &mut R) -> Vec<NodeId> {
    if k == 0 || num_nodes == 0 {
        return Vec::new();
    }
    let width = num_nodes.div_ceil(k);
    (0..num_nodes)
        .step_by(width)
        .take(k)
        .map(|low| rng.gen_range(low..(low + width).min(num_nodes)))
        .collect()
}

impl Graph {
    /// Induced subgraph on `k` weakly connected nodes reached from a random seed.
    ///
    /// Returns `None` if the seed's component is smaller than `k`; the caller
    /// decides whether to retry with another draw.
    pub fn random_weakly_connected_subgraph<R: Rng + ?Sized>(&self, k: usize, rng: &mut R) -> Option<Self> {
        weakly_connected_nodes(self, k, rng).map(|nodes| self.subgraph(&nodes))
    }

    /// Induced subgraph on one random node per id band; never fails and need
    /// not be connected.
    pub fn random_subgraph<R: Rng + ?Sized>(&self, k: usize, rng: &mut R) -> Self {
        self.subgraph(&stratified_nodes(self.num_nodes(), k, rng))
    }
}

impl TemporalGraph {
    /// Temporal counterpart of [`Graph::random_weakly_connected_subgraph`].
    pub fn random_weakly_connected_subgraph<R: Rng + ?Sized>(&self, k: usize, rng: &mut R) -> Option<Self> {
        weakly_connected_nodes(self.topology(), k, rng).map(|nodes| self.subgraph(&nodes))
    }

    /// Temporal counterpart of [`Graph::random_subgraph`].
    pub fn random_subgraph<R: Rng + ?Sized>(&self, k: usize, rng: &mut R) -> Self {
        self.subgraph(&stratified_nodes(self.num_nodes(), k, rng))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn path(n: usize) -> Graph {
        Graph::from_edges(true, n, (1..n).map(|i| (i - 1, i)))
    }

    #[test]
    fn connected_sample_has_requested_size() {
        let g = path(10);
        let mut rng = StdRng::seed_from_u64(7);
        for k in 1..=10 {
            let sub = g.random_weakly_connected_subgraph(k, &mut rng).unwrap();
            assert_eq!(sub.num_nodes(), k);
            // a connected k-node piece of a path keeps k - 1 edges
            assert_eq!(sub.num_edges(), k - 1);
        }
    }

    #[test]
    fn small_component_gives_none() {
        let g = Graph::from_edges(true, 4, [(0, 1), (2, 3)]);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(g.random_weakly_connected_subgraph(3, &mut rng).is_none());
        assert!(Graph::new(true, 0).random_weakly_connected_subgraph(1, &mut rng).is_none());
    }

    #[test]
    fn stratified_picks_one_per_band() {
        let mut rng = StdRng::seed_from_u64(3);
        let nodes = stratified_nodes(10, 3, &mut rng);
        assert_eq!(nodes.len(), 3);
        assert!(nodes[0] < 4);
        assert!((4..8).contains(&nodes[1]));
        assert!((8..10).contains(&nodes[2]));
    }

    #[test]
    fn stratified_caps_at_node_count() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(stratified_nodes(3, 5, &mut rng), vec![0, 1, 2]);
    }

    #[test]
    fn temporal_sample_keeps_contacts() {
        let g = TemporalGraph::from_contacts(true, 3, [(0, 1, 4), (1, 2, 6)]);
        let mut rng = StdRng::seed_from_u64(11);
        let sub = g.random_weakly_connected_subgraph(3, &mut rng).unwrap();
        assert_eq!(sub.num_edges(), 2);
        let mut times: Vec<_> = (0..3).flat_map(|n| sub.out_contacts(n).map(|c| c.time)).collect();
        times.sort_unstable();
        assert_eq!(times, vec![4, 6]);
    }
}
