use crate::graph::{NodeId, TemporalGraph, Timestamp};

/// Contact counts of one node relative to a reference time `t`.
///
/// `*_inf` count contacts at or before `t`, `*_sup` those after it. The two
/// `delta_*` buckets are shared by both sides: an earlier incoming contact or
/// a later outgoing contact is "respected" when it lies within `delta` of `t`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TemporalStructure {
    /// Incoming contacts at or before `t`.
    pub in_inf: usize,
    /// Incoming contacts after `t`.
    pub in_sup: usize,
    /// Outgoing contacts at or before `t`.
    pub out_inf: usize,
    /// Outgoing contacts after `t`.
    pub out_sup: usize,
    /// Earlier incoming or later outgoing contacts more than `delta` away.
    pub delta_not_respected: usize,
    /// Earlier incoming or later outgoing contacts within `delta`.
    pub delta_respected: usize,
}

impl TemporalStructure {
    /// Vector of `node` observed through a contact at `time`.
    #[must_use]
    pub fn of(graph: &TemporalGraph, node: NodeId, time: Timestamp, delta: Timestamp) -> Self {
        let mut s = Self::default();
        for contact in graph.in_contacts(node) {
            if contact.time > time {
                s.in_sup += 1;
            } else {
                s.in_inf += 1;
                s.bucket(time - contact.time <= delta);
            }
        }
        for contact in graph.out_contacts(node) {
            if contact.time > time {
                s.out_sup += 1;
                s.bucket(contact.time - time <= delta);
            } else {
                s.out_inf += 1;
            }
        }
        s
    }

    const fn bucket(&mut self, respected: bool) {
        if respected {
            self.delta_respected += 1;
        } else {
            self.delta_not_respected += 1;
        }
    }

    /// Component-wise `self <= other`.
    #[must_use]
    pub const fn dominated_by(&self, other: &Self) -> bool {
        self.in_inf <= other.in_inf
            && self.in_sup <= other.in_sup
            && self.out_inf <= other.out_inf
            && self.out_sup <= other.out_sup
            && self.delta_not_respected <= other.delta_not_respected
            && self.delta_respected <= other.delta_respected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_relative_to_reference_time() {
        // node 1: in at 1 and 8, out at 4, 5 and 20
        let g = TemporalGraph::from_contacts(true, 5, [(0, 1, 1), (2, 1, 8), (1, 3, 4), (1, 4, 20), (1, 0, 5)]);
        let s = TemporalStructure::of(&g, 1, 4, 3);
        assert_eq!(
            s,
            TemporalStructure {
                in_inf: 1,
                in_sup: 1,
                out_inf: 1,
                out_sup: 2,
                // in at 1 is 3 before, out at 5 is 1 after; out at 20 is 16 after
                delta_not_respected: 1,
                delta_respected: 2,
            }
        );
    }

    #[test]
    fn dominance_is_componentwise() {
        let small = TemporalStructure { in_inf: 1, ..Default::default() };
        let big = TemporalStructure { in_inf: 1, out_sup: 2, ..Default::default() };
        assert!(small.dominated_by(&big));
        assert!(!big.dominated_by(&small));
        assert!(big.dominated_by(&big));
    }
}
