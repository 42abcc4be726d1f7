use crate::graph::NodeId;

const WORD: usize = u64::BITS as usize;

/// Fixed-capacity set of target nodes packed into 64-bit words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeSet {
    words: Vec<u64>,
    capacity: usize,
}

impl NodeSet {
    /// Empty set over `0..capacity`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(WORD)],
            capacity,
        }
    }

    /// Upper bound (exclusive) on stored ids.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Add `node`.
    pub fn insert(&mut self, node: NodeId) {
        debug_assert!(node < self.capacity);
        self.words[node / WORD] |= 1u64 << (node % WORD);
    }

    /// Remove `node`; returns whether it was present.
    pub fn remove(&mut self, node: NodeId) -> bool {
        let word = &mut self.words[node / WORD];
        let mask = 1u64 << (node % WORD);
        let present = *word & mask != 0;
        *word &= !mask;
        present
    }

    /// Membership test; ids past the capacity are never members.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        node < self.capacity && self.words[node / WORD] & (1u64 << (node % WORD)) != 0
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Members in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.words.iter().enumerate().flat_map(|(i, &word)| {
            let mut t = word;
            std::iter::from_fn(move || {
                if t == 0 {
                    return None;
                }
                let bit = t.trailing_zeros() as usize;
                t &= t - 1;
                Some(i * WORD + bit)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_remove_iterate() {
        let mut set = NodeSet::new(130);
        for v in [0, 63, 64, 129, 5] {
            set.insert(v);
        }
        assert_eq!(set.len(), 5);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 5, 63, 64, 129]);
        assert!(set.remove(63));
        assert!(!set.remove(63));
        assert!(!set.contains(63));
        assert!(!set.contains(1000));
        assert!(!set.is_empty());
    }

    #[test]
    fn zero_capacity_is_empty() {
        let set = NodeSet::new(0);
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);
    }
}
