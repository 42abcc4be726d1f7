//! Entry points: count the occurrences of a query in a fixed target.

use std::time::Instant;

use tiso_common::Config;
use tracing::{debug, info};

use crate::automorphism::SymmetryConditions;
use crate::constraints::Constraints;
use crate::domain::Domains;
use crate::graph::{Graph, TemporalGraph, Timestamp};
use crate::machine::MatchingMachine;
use crate::search::{AcceptAll, Search, SearchStats, TemporalVerifier};

/// Occurrence counter for plain graphs.
///
/// ```
/// use tiso_common::Config;
/// use tiso_subgraph::{Graph, Solver};
///
/// let target = Graph::from_edges(false, 4, [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
/// let triangle = Graph::from_edges(false, 3, [(0, 1), (1, 2), (2, 0)]);
/// let config = Config::default();
/// assert_eq!(Solver::new(&target, &config).solve(&triangle), 4);
/// ```
pub struct Solver<'t, 'cfg> {
    target: &'t Graph,
    config: &'cfg Config,
}

impl<'t, 'cfg> Solver<'t, 'cfg> {
    /// Solver over `target` with the given settings.
    #[must_use]
    pub const fn new(target: &'t Graph, config: &'cfg Config) -> Self {
        Self { target, config }
    }

    /// Number of occurrences of `query`.
    #[must_use]
    pub fn solve(&self, query: &Graph) -> u64 {
        self.solve_with_stats(query).matches
    }

    /// Number of occurrences of `query`, with search counters.
    #[must_use]
    pub fn solve_with_stats(&self, query: &Graph) -> SearchStats {
        let start = Instant::now();
        info!(
            query_nodes = query.num_nodes(),
            query_edges = query.num_edges(),
            target_nodes = self.target.num_nodes(),
            target_edges = self.target.num_edges(),
            "solving"
        );

        let domains = Domains::compute(query, self.target, self.config.arc_consistency);
        let machine = MatchingMachine::build(query);
        let symmetry = if self.config.symmetry_breaking {
            SymmetryConditions::of_graph(query)
        } else {
            SymmetryConditions::none(query.num_nodes())
        };
        let constraints = Constraints::new(&machine, &domains, self.target, &symmetry, self.config.induced);
        let stats = Search::new(
            &machine,
            &domains,
            self.target,
            constraints,
            AcceptAll,
            self.config.progress_interval,
        )
        .run();

        debug!(?stats, "search finished");
        info!(matches = stats.matches, elapsed = ?start.elapsed(), "solved");
        stats
    }
}

/// Occurrence counter for temporal graphs.
///
/// A match must satisfy the plain constraints, dominate the target's temporal
/// structure along every timed query edge, and pass a final per-node timing
/// check on the matched piece of the target.
pub struct TemporalSolver<'t, 'cfg> {
    target: &'t TemporalGraph,
    config: &'cfg Config,
}

impl<'t, 'cfg> TemporalSolver<'t, 'cfg> {
    /// Solver over `target` with the given settings.
    #[must_use]
    pub const fn new(target: &'t TemporalGraph, config: &'cfg Config) -> Self {
        Self { target, config }
    }

    /// Number of occurrences of `query` for time window `delta`.
    #[must_use]
    pub fn solve(&self, query: &TemporalGraph, delta: Timestamp) -> u64 {
        self.solve_with_stats(query, delta).matches
    }

    /// Number of occurrences of `query` for time window `delta`, with search
    /// counters.
    #[must_use]
    pub fn solve_with_stats(&self, query: &TemporalGraph, delta: Timestamp) -> SearchStats {
        let start = Instant::now();
        info!(
            query_nodes = query.num_nodes(),
            query_edges = query.num_edges(),
            target_nodes = self.target.num_nodes(),
            target_edges = self.target.num_edges(),
            delta,
            "solving temporal"
        );

        let domains = Domains::compute_temporal(query, self.target, self.config.arc_consistency, delta);
        let machine = MatchingMachine::build_temporal(query, delta);
        let symmetry = if self.config.symmetry_breaking {
            SymmetryConditions::of_temporal_graph(query, delta)
        } else {
            SymmetryConditions::none(query.num_nodes())
        };
        let topology = self.target.topology();
        let constraints = Constraints::new(&machine, &domains, topology, &symmetry, self.config.induced)
            .with_temporal(&machine, self.target, delta);
        let stats = Search::new(
            &machine,
            &domains,
            topology,
            constraints,
            TemporalVerifier::new(query, self.target, delta),
            self.config.progress_interval,
        )
        .run();

        debug!(?stats, "temporal search finished");
        info!(matches = stats.matches, elapsed = ?start.elapsed(), "solved temporal");
        stats
    }
}
