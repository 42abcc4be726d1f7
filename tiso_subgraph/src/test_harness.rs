#![allow(dead_code)]

use std::sync::Once;

use tiso_common::{Config, ConfigBuilder};

use crate::{Graph, Solver, TemporalGraph, TemporalSolver, Timestamp};

static INIT: Once = Once::new();

/// Configures logging for the test runner.
pub fn setup_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Inputs and expected count of a counting test on plain graphs.
pub struct TestSpec<'a> {
    /// The pattern.
    pub query: &'a Graph,
    /// The host graph.
    pub target: &'a Graph,
    /// Number of occurrences expected.
    pub expected_count: u64,
    /// Optional configuration builder to override defaults.
    pub config_fn: Option<fn(ConfigBuilder) -> ConfigBuilder>,
}

/// Inputs and expected count of a counting test on temporal graphs.
pub struct TemporalTestSpec<'a> {
    /// The pattern.
    pub query: &'a TemporalGraph,
    /// The host graph.
    pub target: &'a TemporalGraph,
    /// Time window.
    pub delta: Timestamp,
    /// Number of occurrences expected.
    pub expected_count: u64,
    /// Optional configuration builder to override defaults.
    pub config_fn: Option<fn(ConfigBuilder) -> ConfigBuilder>,
}

fn build_config(config_fn: Option<fn(ConfigBuilder) -> ConfigBuilder>) -> Config {
    let mut builder = Config::builder();
    if let Some(f) = config_fn {
        builder = f(builder);
    }
    builder.build()
}

fn compare(found: u64, expected: u64) -> Result<(), Box<dyn std::error::Error>> {
    if found != expected {
        tracing::error!("Expected {} matches, found {}", expected, found);
        return Err(format!("Expected {expected} matches, found {found}").into());
    }
    Ok(())
}

/// Count the query in the target and compare with the expectation.
#[track_caller]
pub fn run_count_test(spec: TestSpec) -> Result<(), Box<dyn std::error::Error>> {
    setup_test_logging();
    let config = build_config(spec.config_fn);
    let found = Solver::new(spec.target, &config).solve(spec.query);
    compare(found, spec.expected_count)
}

/// Temporal counterpart of [`run_count_test`].
#[track_caller]
pub fn run_temporal_count_test(spec: TemporalTestSpec) -> Result<(), Box<dyn std::error::Error>> {
    setup_test_logging();
    let config = build_config(spec.config_fn);
    let found = TemporalSolver::new(spec.target, &config).solve(spec.query, spec.delta);
    compare(found, spec.expected_count)
}

/// Query of the reference temporal scenario: a 4-node pattern with five timed edges.
#[must_use]
pub fn temporal_fixture_query() -> TemporalGraph {
    TemporalGraph::from_contacts(true, 4, [(1, 0, 2), (0, 2, 8), (2, 1, 3), (1, 3, 1), (3, 0, 4)])
}

/// Target of the reference temporal scenario; with `delta = 5` it holds two
/// occurrences of [`temporal_fixture_query`].
#[must_use]
pub fn temporal_fixture_target() -> TemporalGraph {
    TemporalGraph::from_contacts(
        true,
        14,
        [
            (0, 1, 1),
            (0, 3, 2),
            (1, 4, 3),
            (1, 3, 5),
            (2, 0, 4),
            (3, 2, 10),
            (4, 5, 4),
            (5, 6, 6),
            (5, 3, 2),
            (6, 3, 4),
            (6, 8, 12),
            (6, 10, 9),
            (7, 6, 6),
            (7, 9, 5),
            (8, 7, 7),
            (9, 6, 9),
            (10, 12, 2),
            (11, 10, 3),
            (11, 12, 1),
            (11, 13, 8),
            (13, 10, 20),
        ],
    )
}

/// Defines a counting test on plain graphs.
#[macro_export]
macro_rules! count_test {
    (
        name: $test_name:ident,
        query: $query:expr,
        target: $target:expr,
        expect: $count:expr
    ) => {
        #[test]
        fn $test_name() -> Result<(), Box<dyn std::error::Error>> {
            $crate::test_harness::run_count_test($crate::test_harness::TestSpec {
                query: &$query,
                target: &$target,
                expected_count: $count,
                config_fn: None,
            })
        }
    };

    (
        name: $test_name:ident,
        query: $query:expr,
        target: $target:expr,
        expect: $count:expr,
        config: $cfg_closure:expr
    ) => {
        #[test]
        fn $test_name() -> Result<(), Box<dyn std::error::Error>> {
            $crate::test_harness::run_count_test($crate::test_harness::TestSpec {
                query: &$query,
                target: &$target,
                expected_count: $count,
                config_fn: Some($cfg_closure),
            })
        }
    };
}
