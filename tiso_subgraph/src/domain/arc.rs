use tiso_common::ArcConsistency;
use tracing::trace;

use super::NodeSet;
use crate::graph::Graph;

/// Drop every `ra` from `domain(qa)` that has no target successor in
/// `domain(qb)` for some query edge `qa -> qb`. Returns whether anything
/// was removed.
fn sweep(query: &Graph, target: &Graph, sets: &mut [NodeSet]) -> bool {
    let mut changed = false;
    for qa in 0..query.num_nodes() {
        let unsupported: Vec<_> = sets[qa]
            .iter()
            .filter(|&ra| {
                query.out_neighbors(qa).iter().any(|&qb| {
                    !target.out_neighbors(ra).iter().any(|&rb| sets[qb].contains(rb))
                })
            })
            .collect();
        for ra in unsupported {
            sets[qa].remove(ra);
            changed = true;
        }
    }
    changed
}

/// Run the sweep as often as `level` asks.
pub(super) fn enforce(level: ArcConsistency, query: &Graph, target: &Graph, sets: &mut [NodeSet]) {
    match level {
        ArcConsistency::Disabled => {}
        ArcConsistency::SinglePass => {
            sweep(query, target, sets);
        }
        ArcConsistency::Fixpoint => {
            let mut rounds = 1;
            while sweep(query, target, sets) {
                rounds += 1;
            }
            trace!(rounds, "arc consistency reached a fixpoint");
        }
    }
}
