//! Graphs whose edges carry a contact time.

use std::hash::{Hash, Hasher};

use contracts::requires;
use indexmap::{IndexMap, IndexSet};

use super::{Graph, GraphError, NodeId, positions};

/// Contact time of a timed edge.
pub type Timestamp = i64;

/// One timestamped incidence seen from a node: the other endpoint and the time.
///
/// Identity is the neighbour alone, so two contacts with the same neighbour
/// compare equal whatever their times.
#[derive(Clone, Copy, Debug)]
pub struct Contact {
    /// The other endpoint.
    pub neighbor: NodeId,
    /// When the contact happened.
    pub time: Timestamp,
}

impl Contact {
    /// Create a contact.
    #[must_use]
    pub const fn new(neighbor: NodeId, time: Timestamp) -> Self {
        Self { neighbor, time }
    }
}

impl PartialEq for Contact {
    fn eq(&self, other: &Self) -> bool {
        self.neighbor == other.neighbor
    }
}

impl Eq for Contact {}

impl Hash for Contact {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.neighbor.hash(state);
    }
}

/// A graph with at most one stored contact per ordered node pair.
///
/// The plain topology is kept alongside the contacts, so untimed edges can be
/// mixed in with [`TemporalGraph::add_edge`]. A later contact between the same
/// ordered pair replaces the earlier one's time.
#[derive(Clone, Debug)]
pub struct TemporalGraph {
    topology: Graph,
    out_contacts: Vec<IndexMap<NodeId, Contact>>,
    in_contacts: Vec<IndexMap<NodeId, Contact>>,
    num_edges: usize,
}

impl TemporalGraph {
    /// A contactless graph with `num_nodes` nodes.
    #[must_use]
    pub fn new(directed: bool, num_nodes: usize) -> Self {
        Self {
            topology: Graph::new(directed, num_nodes),
            out_contacts: vec![IndexMap::new(); num_nodes],
            in_contacts: vec![IndexMap::new(); num_nodes],
            num_edges: 0,
        }
    }

    /// Build a temporal graph from `(source, dest, time)` triples.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeOutOfRange`] for the first contact naming a
    /// node outside `0..num_nodes`.
    pub fn try_from_contacts<I>(directed: bool, num_nodes: usize, contacts: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (NodeId, NodeId, Timestamp)>,
    {
        let mut graph = Self::new(directed, num_nodes);
        for (source, dest, time) in contacts {
            graph.topology.check_node(source)?;
            graph.topology.check_node(dest)?;
            graph.add_contact(source, dest, time);
        }
        Ok(graph)
    }

    /// Build a temporal graph from contacts known to be in range.
    ///
    /// # Panics
    ///
    /// Panics if an endpoint is outside `0..num_nodes`.
    #[must_use]
    pub fn from_contacts<I>(directed: bool, num_nodes: usize, contacts: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId, Timestamp)>,
    {
        let mut graph = Self::new(directed, num_nodes);
        for (source, dest, time) in contacts {
            graph.add_contact(source, dest, time);
        }
        graph
    }

    /// Insert an untimed edge. No contact is recorded and the edge counter is
    /// left alone.
    pub fn add_edge(&mut self, source: NodeId, dest: NodeId) -> &mut Self {
        self.topology.add_edge(source, dest);
        self
    }

    /// Insert `source -> dest` at `time`, mirrored when undirected.
    #[requires(source < self.num_nodes() && dest < self.num_nodes(), "contact endpoints must be graph nodes")]
    pub fn add_contact(&mut self, source: NodeId, dest: NodeId, time: Timestamp) -> &mut Self {
        self.topology.add_edge(source, dest);
        self.out_contacts[source].insert(dest, Contact::new(dest, time));
        self.in_contacts[dest].insert(source, Contact::new(source, time));
        if !self.topology.is_directed() {
            self.out_contacts[dest].insert(source, Contact::new(source, time));
            self.in_contacts[source].insert(dest, Contact::new(dest, time));
        }
        self.num_edges += 1;
        self
    }

    /// The untimed structure.
    #[must_use]
    pub const fn topology(&self) -> &Graph {
        &self.topology
    }

    /// Whether edges are directed.
    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.topology.is_directed()
    }

    /// Number of nodes.
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.topology.num_nodes()
    }

    /// Number of [`add_contact`](Self::add_contact) calls, overwrites included.
    #[must_use]
    pub const fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// The contact stored for `source -> dest`, if any.
    #[must_use]
    pub fn contact(&self, source: NodeId, dest: NodeId) -> Option<&Contact> {
        self.out_contacts[source].get(&dest)
    }

    /// Outgoing contacts of `node`.
    pub fn out_contacts(&self, node: NodeId) -> impl ExactSizeIterator<Item = &Contact> + Clone + '_ {
        self.out_contacts[node].values()
    }

    /// Incoming contacts of `node`; `neighbor` is the source.
    pub fn in_contacts(&self, node: NodeId) -> impl ExactSizeIterator<Item = &Contact> + Clone + '_ {
        self.in_contacts[node].values()
    }

    /// Copy of the subgraph induced by `nodes`, keeping contact times.
    #[must_use]
    pub fn subgraph(&self, nodes: &[NodeId]) -> Self {
        self.select(nodes, |_, _| true)
    }

    /// Like [`subgraph`](Self::subgraph), but an edge `i -> j` between new
    /// indices is kept only when `allowed[i]` contains `j`. For undirected
    /// graphs either orientation in `allowed` keeps the edge.
    #[must_use]
    pub fn subgraph_selected_edges(&self, nodes: &[NodeId], allowed: &[IndexSet<NodeId>]) -> Self {
        debug_assert_eq!(nodes.len(), allowed.len());
        self.select(nodes, |source, dest| allowed[source].contains(&dest))
    }

    fn select(&self, nodes: &[NodeId], keep: impl Fn(NodeId, NodeId) -> bool) -> Self {
        let position = positions(nodes);
        let directed = self.is_directed();
        let mut sub = Self::new(directed, nodes.len());
        for (new_source, &old_source) in nodes.iter().enumerate() {
            for &old_dest in self.topology.out_neighbors(old_source) {
                let Some(&new_dest) = position.get(&old_dest) else {
                    continue;
                };
                // mirrored arcs of an undirected edge are visited twice
                if !directed && new_dest < new_source {
                    continue;
                }
                if !(keep(new_source, new_dest) || (!directed && keep(new_dest, new_source))) {
                    continue;
                }
                match self.contact(old_source, old_dest) {
                    Some(contact) => sub.add_contact(new_source, new_dest, contact.time),
                    None => sub.add_edge(new_source, new_dest),
                };
            }
        }
        sub
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_contact_overwrites_time() {
        let mut g = TemporalGraph::new(true, 2);
        g.add_contact(0, 1, 3).add_contact(0, 1, 9);
        assert_eq!(g.contact(0, 1).map(|c| c.time), Some(9));
        assert_eq!(g.out_contacts(0).len(), 1);
        assert_eq!(g.num_edges(), 2);
        assert_eq!(g.topology().num_edges(), 1);
    }

    #[test]
    fn untimed_edges_have_no_contact() {
        let mut g = TemporalGraph::new(true, 2);
        g.add_edge(0, 1);
        assert!(g.topology().has_edge(0, 1));
        assert!(g.contact(0, 1).is_none());
        assert_eq!(g.num_edges(), 0);
    }

    #[test]
    fn contacts_compare_by_neighbor_only() {
        assert_eq!(Contact::new(4, 1), Contact::new(4, 99));
        assert_ne!(Contact::new(4, 1), Contact::new(5, 1));
    }

    #[test]
    fn undirected_contacts_are_mirrored() {
        let g = TemporalGraph::from_contacts(false, 2, [(0, 1, 7)]);
        assert_eq!(g.contact(1, 0).map(|c| c.time), Some(7));
        assert_eq!(g.in_contacts(0).next().map(|c| c.neighbor), Some(1));
    }

    #[test]
    fn subgraph_keeps_times() {
        let g = TemporalGraph::from_contacts(true, 4, [(0, 1, 1), (1, 2, 2), (2, 3, 3), (3, 0, 4)]);
        let sub = g.subgraph(&[2, 3, 0]);
        assert_eq!(sub.contact(0, 1).map(|c| c.time), Some(3));
        assert_eq!(sub.contact(1, 2).map(|c| c.time), Some(4));
        assert!(sub.contact(2, 0).is_none());
        assert_eq!(sub.num_edges(), 2);
    }

    #[test]
    fn selected_edges_filter_by_new_index() {
        let g = TemporalGraph::from_contacts(true, 3, [(0, 1, 1), (1, 2, 2), (0, 2, 5)]);
        let allowed: Vec<IndexSet<NodeId>> =
            vec![[1].into_iter().collect(), [2].into_iter().collect(), IndexSet::new()];
        let sub = g.subgraph_selected_edges(&[0, 1, 2], &allowed);
        assert!(sub.contact(0, 1).is_some());
        assert!(sub.contact(1, 2).is_some());
        assert!(sub.contact(0, 2).is_none());
    }

    #[test]
    fn undirected_selection_accepts_either_orientation() {
        let g = TemporalGraph::from_contacts(false, 3, [(0, 1, 1), (1, 2, 2), (0, 2, 5)]);
        // 1-0 and 2-1 listed from the larger end only
        let allowed: Vec<IndexSet<NodeId>> =
            vec![IndexSet::new(), [0].into_iter().collect(), [1].into_iter().collect()];
        let sub = g.subgraph_selected_edges(&[0, 1, 2], &allowed);
        assert_eq!(sub.contact(0, 1).map(|c| c.time), Some(1));
        assert_eq!(sub.contact(2, 1).map(|c| c.time), Some(2));
        assert!(sub.contact(0, 2).is_none());
        assert_eq!(sub.num_edges(), 2);
    }

    #[test]
    fn try_from_contacts_rejects_bad_node() {
        let err = TemporalGraph::try_from_contacts(true, 2, [(0, 2, 1)]).unwrap_err();
        assert_eq!(err, GraphError::NodeOutOfRange { node: 2, num_nodes: 2 });
    }
}
