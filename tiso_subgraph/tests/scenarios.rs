use rstest::rstest;
use tiso_common::{ArcConsistency, Config, ConfigBuilder};
use tiso_subgraph::count_test;
use tiso_subgraph::test_harness::{
    TemporalTestSpec, run_temporal_count_test, setup_test_logging, temporal_fixture_query, temporal_fixture_target,
};
use tiso_subgraph::{Graph, Solver, TemporalGraph};

lazy_static::lazy_static! {
    static ref DIAMOND: Graph = Graph::from_edges(true, 4, [(0, 1), (0, 2), (1, 3), (3, 2), (1, 2)]);
    static ref K4: Graph = Graph::from_edges(false, 4, [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    static ref TRIANGLE: Graph = Graph::from_edges(false, 3, [(0, 1), (1, 2), (2, 0)]);
}

fn no_symmetry(c: ConfigBuilder) -> ConfigBuilder {
    c.symmetry_breaking(false)
}

fn induced(c: ConfigBuilder) -> ConfigBuilder {
    c.induced(true)
}

count_test!(
    name: test_diamond_in_itself,
    query: *DIAMOND,
    target: *DIAMOND,
    expect: 1
);

count_test!(
    name: test_diamond_in_itself_induced,
    query: *DIAMOND,
    target: *DIAMOND,
    expect: 1,
    config: induced
);

count_test!(
    name: test_triangle_in_k4,
    query: *TRIANGLE,
    target: *K4,
    expect: 4
);

count_test!(
    name: test_triangle_in_k4_without_symmetry_breaking,
    query: *TRIANGLE,
    target: *K4,
    expect: 24,
    config: no_symmetry
);

#[rstest]
#[case::single_pass(ArcConsistency::SinglePass)]
#[case::fixpoint(ArcConsistency::Fixpoint)]
#[case::disabled(ArcConsistency::Disabled)]
fn temporal_fixture_has_two_matches(#[case] level: ArcConsistency) -> Result<(), Box<dyn std::error::Error>> {
    let query = temporal_fixture_query();
    let target = temporal_fixture_target();
    let config_fn: fn(ConfigBuilder) -> ConfigBuilder = match level {
        ArcConsistency::Disabled => |c| c.arc_consistency(ArcConsistency::Disabled),
        ArcConsistency::SinglePass => |c| c.arc_consistency(ArcConsistency::SinglePass),
        ArcConsistency::Fixpoint => |c| c.arc_consistency(ArcConsistency::Fixpoint),
    };
    run_temporal_count_test(TemporalTestSpec {
        query: &query,
        target: &target,
        delta: 5,
        expected_count: 2,
        config_fn: Some(config_fn),
    })
}

#[test]
fn temporal_fixture_query_in_itself() -> Result<(), Box<dyn std::error::Error>> {
    let query = temporal_fixture_query();
    run_temporal_count_test(TemporalTestSpec {
        query: &query,
        target: &query,
        delta: 5,
        expected_count: 1,
        config_fn: None,
    })
}

#[rstest]
#[case::edge(Graph::from_edges(false, 2, [(0, 1)]), 6)]
#[case::path(Graph::from_edges(false, 3, [(0, 1), (1, 2)]), 12)]
#[case::triangle(TRIANGLE.clone(), 4)]
#[case::star(Graph::from_edges(false, 4, [(0, 1), (0, 2), (0, 3)]), 4)]
#[case::square(Graph::from_edges(false, 4, [(0, 1), (1, 2), (2, 3), (3, 0)]), 3)]
#[case::k4(K4.clone(), 1)]
fn undirected_patterns_in_k4(#[case] query: Graph, #[case] expected: u64) {
    setup_test_logging();
    let config = Config::default();
    assert_eq!(Solver::new(&K4, &config).solve(&query), expected);
}

#[rstest]
#[case::edge(Graph::from_edges(false, 2, [(0, 1)]), 6)]
#[case::path(Graph::from_edges(false, 3, [(0, 1), (1, 2)]), 0)]
#[case::k4(K4.clone(), 1)]
fn induced_patterns_in_k4(#[case] query: Graph, #[case] expected: u64) {
    let config = Config::induced();
    assert_eq!(Solver::new(&K4, &config).solve(&query), expected);
}

#[test]
fn temporal_solver_without_timing_constraints_counts_like_plain() {
    // contacts far apart in time with a huge window behave like untimed edges
    let plain_target = Graph::from_edges(true, 5, [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4)]);
    let target = TemporalGraph::from_contacts(true, 5, [(0, 1, 1), (1, 2, 2), (2, 0, 3), (2, 3, 4), (3, 4, 5)]);
    let plain_query = Graph::from_edges(true, 2, [(0, 1)]);
    let query = TemporalGraph::from_contacts(true, 2, [(0, 1, 1)]);
    let config = Config::default();
    let plain = Solver::new(&plain_target, &config).solve(&plain_query);
    let temporal = tiso_subgraph::TemporalSolver::new(&target, &config).solve(&query, 1_000);
    assert_eq!(plain, 5);
    assert_eq!(temporal, plain);
}
