use std::collections::HashSet;

use quickcheck::{Arbitrary, Gen, quickcheck};
use tiso_common::{ArcConsistency, Config};
use tiso_subgraph::{Domains, Graph, Solver, TemporalGraph, find_automorphisms};

/// A small directed or undirected graph with random edges, loops included.
#[derive(Clone, Debug)]
struct SmallGraph(Graph);

fn random_graph(g: &mut Gen, max_nodes: usize, directed: bool) -> Graph {
    let n = usize::arbitrary(g) % max_nodes + 1;
    let edges = usize::arbitrary(g) % (n * 2 + 1);
    let pairs: Vec<(usize, usize)> = (0..edges)
        .map(|_| (usize::arbitrary(g) % n, usize::arbitrary(g) % n))
        .collect();
    Graph::from_edges(directed, n, pairs)
}

impl Arbitrary for SmallGraph {
    fn arbitrary(g: &mut Gen) -> Self {
        let directed = bool::arbitrary(g);
        Self(random_graph(g, 6, directed))
    }
}

/// A query of up to four nodes and a target of up to seven, both directed or
/// both undirected.
#[derive(Clone, Debug)]
struct Instance {
    query: Graph,
    target: Graph,
}

impl Arbitrary for Instance {
    fn arbitrary(g: &mut Gen) -> Self {
        let directed = bool::arbitrary(g);
        Self {
            query: random_graph(g, 4, directed),
            target: random_graph(g, 7, directed),
        }
    }
}

/// A small temporal graph with random contact times in `0..20`.
#[derive(Clone, Debug)]
struct SmallTemporalGraph(TemporalGraph);

impl Arbitrary for SmallTemporalGraph {
    fn arbitrary(g: &mut Gen) -> Self {
        let directed = bool::arbitrary(g);
        let n = usize::arbitrary(g) % 6 + 1;
        let edges = usize::arbitrary(g) % (n * 2 + 1);
        let contacts: Vec<(usize, usize, i64)> = (0..edges)
            .map(|_| (usize::arbitrary(g) % n, usize::arbitrary(g) % n, i64::from(u8::arbitrary(g) % 20)))
            .collect();
        Self(TemporalGraph::from_contacts(directed, n, contacts))
    }
}

fn count(query: &Graph, target: &Graph, config: &Config) -> u64 {
    Solver::new(target, config).solve(query)
}

/// Injective maps extending `image` that keep every query edge, and with
/// `induced` also every non-edge.
fn embeddings(query: &Graph, target: &Graph, induced: bool, image: &mut Vec<usize>, used: &mut [bool]) -> u64 {
    let q = image.len();
    if q == query.num_nodes() {
        return 1;
    }
    let mut total = 0;
    for t in 0..target.num_nodes() {
        if used[t] {
            continue;
        }
        image.push(t);
        let consistent = (0..=q).all(|p| {
            [(p, q), (q, p)].into_iter().all(|(a, b)| {
                let wanted = query.has_edge(a, b);
                let present = target.has_edge(image[a], image[b]);
                if induced { wanted == present } else { !wanted || present }
            })
        });
        if consistent {
            used[t] = true;
            total += embeddings(query, target, induced, image, used);
            used[t] = false;
        }
        image.pop();
    }
    total
}

fn brute_force(query: &Graph, target: &Graph, induced: bool) -> u64 {
    embeddings(query, target, induced, &mut Vec::new(), &mut vec![false; target.num_nodes()])
}

quickcheck! {
    fn prop_domains_respect_degrees(inst: Instance) -> bool {
        let domains = Domains::compute(&inst.query, &inst.target, ArcConsistency::SinglePass);
        (0..inst.query.num_nodes()).all(|q| {
            domains.get(q).iter().all(|t| {
                inst.target.out_degree(t) >= inst.query.out_degree(q)
                    && inst.target.in_degree(t) >= inst.query.in_degree(q)
            })
        })
    }

    fn prop_fixpoint_domains_are_arc_consistent(inst: Instance) -> bool {
        let (q, t) = (&inst.query, &inst.target);
        let domains = Domains::compute(q, t, ArcConsistency::Fixpoint);
        (0..q.num_nodes()).all(|qa| {
            domains.get(qa).iter().all(|ra| {
                q.out_neighbors(qa)
                    .iter()
                    .all(|&qb| t.out_neighbors(ra).iter().any(|&rb| domains.contains(qb, rb)))
            })
        })
    }

    fn prop_arc_consistency_level_keeps_counts(inst: Instance) -> bool {
        let counts: HashSet<u64> = [ArcConsistency::Disabled, ArcConsistency::SinglePass, ArcConsistency::Fixpoint]
            .into_iter()
            .map(|level| count(&inst.query, &inst.target, &Config::builder().arc_consistency(level).build()))
            .collect();
        counts.len() == 1
    }

    fn prop_automorphisms_form_a_group(graph: SmallGraph) -> bool {
        let autos = find_automorphisms(&graph.0);
        let set: HashSet<_> = autos.iter().collect();
        autos.iter().any(|a| a.is_identity())
            && autos.iter().all(|a| autos.iter().all(|b| set.contains(&a.compose(b))))
    }

    fn prop_symmetry_breaking_divides_by_automorphisms(inst: Instance) -> bool {
        let autos = find_automorphisms(&inst.query).len() as u64;
        let with = count(&inst.query, &inst.target, &Config::default());
        let without = count(&inst.query, &inst.target, &Config::builder().symmetry_breaking(false).build());
        without == autos * with
    }

    fn prop_counts_match_exhaustive_enumeration(inst: Instance) -> bool {
        [false, true].into_iter().all(|induced| {
            let config = Config::builder().induced(induced).symmetry_breaking(false).build();
            count(&inst.query, &inst.target, &config) == brute_force(&inst.query, &inst.target, induced)
        })
    }

    fn prop_induced_never_exceeds_non_induced(inst: Instance) -> bool {
        count(&inst.query, &inst.target, &Config::induced()) <= count(&inst.query, &inst.target, &Config::non_induced())
    }

    fn prop_full_subgraph_round_trips(graph: SmallTemporalGraph) -> bool {
        let g = &graph.0;
        let all: Vec<usize> = (0..g.num_nodes()).collect();
        let sub = g.subgraph(&all);
        sub.topology() == g.topology()
            && (0..g.num_nodes()).all(|v| {
                g.out_contacts(v).all(|c| sub.contact(v, c.neighbor).map(|s| s.time) == Some(c.time))
            })
    }

    fn prop_query_embeds_in_itself(graph: SmallGraph) -> bool {
        count(&graph.0, &graph.0, &Config::default()) == 1
    }
}
