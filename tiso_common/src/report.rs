//! Per-query result records.
//!
//! The engine only produces a match count; the caller measures elapsed time
//! and assembles one [`QueryReport`] per query. Encoding is left to the sink
//! (the CLI writes them as CSV rows).

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Size of one side of a match: node and edge counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSize {
    /// Number of nodes.
    pub nodes: usize,
    /// Number of edges (timed contacts for temporal graphs).
    pub edges: usize,
}

impl GraphSize {
    /// Create a size record.
    #[must_use]
    pub const fn new(nodes: usize, edges: usize) -> Self {
        Self { nodes, edges }
    }
}

/// Outcome of matching one query against one target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueryReport {
    /// Caller-chosen identifier for the query.
    pub query_id: String,
    /// Number of query nodes.
    pub query_nodes: usize,
    /// Number of query edges.
    pub query_edges: usize,
    /// Number of target nodes.
    pub target_nodes: usize,
    /// Number of target edges.
    pub target_edges: usize,
    /// Occurrences found.
    pub matches: u64,
    /// Wall time spent in the solver, in seconds.
    pub seconds: f64,
}

impl QueryReport {
    /// Assemble a report from the sizes, the count and the measured time.
    #[must_use]
    pub fn new(
        query_id: impl Into<String>,
        query: GraphSize,
        target: GraphSize,
        matches: u64,
        elapsed: Duration,
    ) -> Self {
        Self {
            query_id: query_id.into(),
            query_nodes: query.nodes,
            query_edges: query.edges,
            target_nodes: target.nodes,
            target_edges: target.edges,
            matches,
            seconds: elapsed.as_secs_f64(),
        }
    }
}

impl fmt::Display for QueryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} matches ({}n/{}e in {}n/{}e) in {:.3}s",
            self.query_id,
            self.matches,
            self.query_nodes,
            self.query_edges,
            self.target_nodes,
            self.target_edges,
            self.seconds
        )
    }
}
