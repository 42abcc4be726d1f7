//! Batch drivers: match a list of queries, or draw random queries.

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tiso_common::{Config, GraphSize, QueryReport};
use tiso_subgraph::{Graph, Solver, TemporalGraph, TemporalSolver, Timestamp};
use tracing::{info, warn};

use crate::io::NamedQuery;

fn size_of(graph: &Graph) -> GraphSize {
    GraphSize::new(graph.num_nodes(), graph.num_edges())
}

fn temporal_size_of(graph: &TemporalGraph) -> GraphSize {
    GraphSize::new(graph.num_nodes(), graph.num_edges())
}

/// Count every query in `target`, one report per query, in input order.
pub fn match_queries(target: &Graph, queries: &[NamedQuery<Graph>], config: &Config) -> Vec<QueryReport> {
    let solver = Solver::new(target, config);
    queries
        .iter()
        .map(|query| {
            let start = Instant::now();
            let matches = solver.solve(&query.graph);
            let report = QueryReport::new(
                query.id.clone(),
                size_of(&query.graph),
                size_of(target),
                matches,
                start.elapsed(),
            );
            info!("{report}");
            report
        })
        .collect()
}

/// Temporal counterpart of [`match_queries`].
pub fn match_temporal_queries(
    target: &TemporalGraph,
    queries: &[NamedQuery<TemporalGraph>],
    config: &Config,
    delta: Timestamp,
) -> Vec<QueryReport> {
    let solver = TemporalSolver::new(target, config);
    queries
        .iter()
        .map(|query| {
            let start = Instant::now();
            let matches = solver.solve(&query.graph, delta);
            let report = QueryReport::new(
                query.id.clone(),
                temporal_size_of(&query.graph),
                temporal_size_of(target),
                matches,
                start.elapsed(),
            );
            info!("{report}");
            report
        })
        .collect()
}

/// Graphs that random queries can be drawn from.
pub trait Sampleable: Sized {
    /// One random weakly connected `k`-node subgraph, `None` when the drawn
    /// component is too small.
    fn draw_connected(&self, k: usize, rng: &mut StdRng) -> Option<Self>;
    /// One node from each of `k` id bands.
    fn draw_stratified(&self, k: usize, rng: &mut StdRng) -> Self;
    /// Identifier a drawn query is reported under.
    fn query_id(&self) -> String;
}

impl Sampleable for Graph {
    fn draw_connected(&self, k: usize, rng: &mut StdRng) -> Option<Self> {
        self.random_weakly_connected_subgraph(k, rng)
    }

    fn draw_stratified(&self, k: usize, rng: &mut StdRng) -> Self {
        self.random_subgraph(k, rng)
    }

    fn query_id(&self) -> String {
        self.adjacency_string()
    }
}

impl Sampleable for TemporalGraph {
    fn draw_connected(&self, k: usize, rng: &mut StdRng) -> Option<Self> {
        self.random_weakly_connected_subgraph(k, rng)
    }

    fn draw_stratified(&self, k: usize, rng: &mut StdRng) -> Self {
        self.random_subgraph(k, rng)
    }

    fn query_id(&self) -> String {
        self.topology().adjacency_string()
    }
}

/// How queries are drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SamplePlan {
    /// Query sizes, in nodes.
    pub sizes: Vec<usize>,
    /// Queries per size.
    pub per_size: usize,
    /// Seed of the first attempt; every attempt after it uses the next seed.
    pub seed: u64,
    /// Attempts allowed for one connected draw before it is skipped.
    pub max_attempts: usize,
    /// Draw one node per id band instead of a connected component.
    pub stratified: bool,
}

/// Draw the queries described by `plan` from `graph`.
///
/// Connected draws that keep landing in components smaller than the
/// requested size are skipped with a warning after `max_attempts` seeds.
pub fn sample_queries<G: Sampleable>(graph: &G, plan: &SamplePlan) -> Vec<NamedQuery<G>> {
    let mut seed = plan.seed;
    let mut queries = Vec::with_capacity(plan.sizes.len() * plan.per_size);
    for &size in &plan.sizes {
        for _ in 0..plan.per_size {
            let mut drawn = None;
            for _ in 0..plan.max_attempts.max(1) {
                let mut rng = StdRng::seed_from_u64(seed);
                seed = seed.wrapping_add(1);
                drawn = if plan.stratified {
                    Some(graph.draw_stratified(size, &mut rng))
                } else {
                    graph.draw_connected(size, &mut rng)
                };
                if drawn.is_some() {
                    break;
                }
            }
            match drawn {
                Some(query) => queries.push(NamedQuery {
                    id: query.query_id(),
                    graph: query,
                }),
                None => warn!(size, attempts = plan.max_attempts, "no connected sample found"),
            }
        }
    }
    queries
}
