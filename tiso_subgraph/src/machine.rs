//! The node processing order of a query and the edges checked at each step.
//!
//! States are positions in the order. The first state of every connected
//! component takes its candidates from its domain; every later state is reached
//! from a parent state through one query edge, and takes its candidates from the
//! target neighbours of the parent's image along that edge.

use tracing::debug;

use crate::graph::{Graph, NodeId, TemporalGraph, Timestamp};
use crate::temporal::TemporalStructure;

/// Position of a node in the processing order.
pub type StateId = usize;

/// How a state's candidates are derived from its parent's image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ParentRelation {
    /// Component root: candidates come from the domain.
    #[default]
    None,
    /// Discovered through an edge into the parent: candidates are the
    /// in-neighbours of the parent's image.
    Predecessor,
    /// Discovered through an edge out of the parent: candidates are the
    /// out-neighbours of the parent's image.
    Successor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NodeFlag {
    Core,
    Frontier,
    Unvisited,
}

/// A query edge between a state and an earlier (or the same) state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BackEdge {
    /// State of the edge's source node.
    pub source: StateId,
    /// State of the edge's destination node.
    pub target: StateId,
    /// Contact time of the query edge, for timed edges.
    pub time: Option<Timestamp>,
    /// Temporal structure of the destination node seen through this contact.
    pub query_structure: Option<TemporalStructure>,
}

/// Ordering weights; larger is picked first.
#[derive(Clone, Copy, Debug, Default)]
struct Weight {
    core: usize,
    frontier: usize,
    degree: usize,
}

impl Weight {
    fn key(self) -> (usize, usize, usize) {
        (self.core, self.frontier, self.degree)
    }
}

/// Processing order plus per-state parent and back-edge data for one query.
#[derive(Clone, Debug)]
pub struct MatchingMachine {
    node_of_state: Vec<NodeId>,
    state_of_node: Vec<StateId>,
    parent_state: Vec<Option<StateId>>,
    parent_relation: Vec<ParentRelation>,
    back_edges: Vec<Vec<BackEdge>>,
    out_back_count: Vec<usize>,
    in_back_count: Vec<usize>,
    self_loop: Vec<bool>,
}

impl MatchingMachine {
    /// Machine for a plain query.
    #[must_use]
    pub fn build(query: &Graph) -> Self {
        Self::build_with(query, |_, _| None)
    }

    /// Machine for a temporal query. Timed back-edges carry the query-side
    /// temporal structure of their destination for window `delta`.
    #[must_use]
    pub fn build_temporal(query: &TemporalGraph, delta: Timestamp) -> Self {
        Self::build_with(query.topology(), |source, dest| {
            query.contact(source, dest).map(|contact| {
                (contact.time, TemporalStructure::of(query, dest, contact.time, delta))
            })
        })
    }

    fn build_with(query: &Graph, timed: impl Fn(NodeId, NodeId) -> Option<(Timestamp, TemporalStructure)>) -> Self {
        let n = query.num_nodes();
        let order = processing_order(query);

        let mut state_of_node = vec![0; n];
        for (state, &node) in order.nodes.iter().enumerate() {
            state_of_node[node] = state;
        }

        let mut machine = Self {
            parent_state: order
                .nodes
                .iter()
                .map(|&node| order.parent[node].map(|p| state_of_node[p]))
                .collect(),
            parent_relation: order.nodes.iter().map(|&node| order.relation[node]).collect(),
            node_of_state: order.nodes,
            state_of_node,
            back_edges: Vec::with_capacity(n),
            out_back_count: Vec::with_capacity(n),
            in_back_count: Vec::with_capacity(n),
            self_loop: Vec::with_capacity(n),
        };

        for state in 0..n {
            let node = machine.node_of_state[state];
            let edge = |source: NodeId, dest: NodeId| {
                let stamp = timed(source, dest);
                BackEdge {
                    source: machine.state_of_node[source],
                    target: machine.state_of_node[dest],
                    time: stamp.map(|(time, _)| time),
                    query_structure: stamp.map(|(_, structure)| structure),
                }
            };
            let mut edges = Vec::new();
            let mut out_count = 0;
            let mut in_count = 0;
            let mut looped = false;
            for &dest in query.out_neighbors(node) {
                if dest == node {
                    edges.push(edge(node, node));
                    looped = true;
                } else if machine.state_of_node[dest] < state {
                    edges.push(edge(node, dest));
                    out_count += 1;
                }
            }
            for &source in query.in_neighbors(node) {
                if source != node && machine.state_of_node[source] < state {
                    edges.push(edge(source, node));
                    in_count += 1;
                }
            }
            machine.back_edges.push(edges);
            machine.out_back_count.push(out_count);
            machine.in_back_count.push(in_count);
            machine.self_loop.push(looped);
        }

        debug!(order = ?machine.node_of_state, "matching machine built");
        machine
    }

    /// Number of states, equal to the number of query nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.node_of_state.len()
    }

    /// Whether the query is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node_of_state.is_empty()
    }

    /// Query nodes in processing order.
    #[must_use]
    pub fn order(&self) -> &[NodeId] {
        &self.node_of_state
    }

    /// Query node processed at `state`.
    #[must_use]
    pub fn node_of_state(&self, state: StateId) -> NodeId {
        self.node_of_state[state]
    }

    /// State at which `node` is processed.
    #[must_use]
    pub fn state_of_node(&self, node: NodeId) -> StateId {
        self.state_of_node[node]
    }

    /// Parent state, `None` for component roots.
    #[must_use]
    pub fn parent_state(&self, state: StateId) -> Option<StateId> {
        self.parent_state[state]
    }

    /// How candidates of `state` follow from its parent.
    #[must_use]
    pub fn parent_relation(&self, state: StateId) -> ParentRelation {
        self.parent_relation[state]
    }

    /// Query edges between `state` and earlier states, self-loops included.
    #[must_use]
    pub fn back_edges(&self, state: StateId) -> &[BackEdge] {
        &self.back_edges[state]
    }

    /// Back-edges leaving `state` towards earlier states.
    #[must_use]
    pub fn out_back_count(&self, state: StateId) -> usize {
        self.out_back_count[state]
    }

    /// Back-edges entering `state` from earlier states.
    #[must_use]
    pub fn in_back_count(&self, state: StateId) -> usize {
        self.in_back_count[state]
    }

    /// Whether the node of `state` has a self-loop.
    #[must_use]
    pub fn has_self_loop(&self, state: StateId) -> bool {
        self.self_loop[state]
    }
}

struct Order {
    nodes: Vec<NodeId>,
    parent: Vec<Option<NodeId>>,
    relation: Vec<ParentRelation>,
}

/// Neighbours with the direction they were reached through, skipping self-loops.
fn incident(query: &Graph, node: NodeId) -> impl Iterator<Item = (NodeId, ParentRelation)> + '_ {
    let out = query.out_neighbors(node).iter().map(|&v| (v, ParentRelation::Successor));
    let inc = query.in_neighbors(node).iter().map(|&v| (v, ParentRelation::Predecessor));
    out.chain(inc).filter(move |&(v, _)| v != node)
}

/// Greedy order: the queue holds frontier nodes; the best-weighted one becomes
/// core next. An empty queue starts a new component at the unvisited node of
/// highest degree.
fn processing_order(query: &Graph) -> Order {
    let n = query.num_nodes();
    let mut flags = vec![NodeFlag::Unvisited; n];
    let mut weights: Vec<Weight> = (0..n)
        .map(|v| Weight {
            degree: query.out_degree(v) + query.in_degree(v),
            ..Weight::default()
        })
        .collect();
    let mut parent = vec![None; n];
    let mut relation = vec![ParentRelation::None; n];
    let mut queue: Vec<NodeId> = Vec::with_capacity(n);
    let mut head = 0;

    // larger weights first, then the smaller id
    let better = |w: &[Weight], a: NodeId, b: NodeId| w[a].key().cmp(&w[b].key()).then(b.cmp(&a));

    while head < n {
        if head == queue.len() {
            let root = (0..n)
                .filter(|&v| flags[v] == NodeFlag::Unvisited)
                .max_by(|&a, &b| weights[a].degree.cmp(&weights[b].degree).then(b.cmp(&a)));
            let Some(root) = root else { break };
            flags[root] = NodeFlag::Frontier;
            queue.push(root);
            for (v, _) in incident(query, root) {
                weights[v].frontier += 1;
            }
        }

        let best = (head..queue.len())
            .max_by(|&a, &b| better(&weights, queue[a], queue[b]))
            .unwrap_or(head);
        queue.swap(head, best);
        let node = queue[head];
        head += 1;
        flags[node] = NodeFlag::Core;

        for (v, rel) in incident(query, node) {
            weights[v].core += 1;
            weights[v].frontier -= 1;
            if flags[v] == NodeFlag::Unvisited {
                flags[v] = NodeFlag::Frontier;
                parent[v] = Some(node);
                relation[v] = rel;
                queue.push(v);
                for (w, _) in incident(query, v) {
                    weights[w].frontier += 1;
                }
            }
        }
    }

    debug_assert!(flags.iter().all(|&f| f == NodeFlag::Core));
    Order {
        nodes: queue,
        parent,
        relation,
    }
}
