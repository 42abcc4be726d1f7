use itertools::iproduct;

use crate::graph::{Graph, NodeId};

/// Which node pairs may be exchanged by an automorphism, judged by a cheap
/// invariant: the sorted list of neighbour degrees seen from each node.
#[derive(Clone, Debug)]
pub(crate) struct SupportMatrix {
    n: usize,
    cells: Vec<bool>,
}

impl SupportMatrix {
    pub(crate) fn build(graph: &Graph) -> Self {
        let n = graph.num_nodes();
        let degree: Vec<usize> = (0..n).map(|j| graph.undirected_neighbors(j).count()).collect();
        let rows: Vec<Vec<usize>> = (0..n)
            .map(|i| {
                let mut row = vec![0; n];
                for j in graph.undirected_neighbors(i) {
                    row[j] = degree[j];
                }
                row.sort_unstable();
                row
            })
            .collect();

        let cells = iproduct!(0..n, 0..n).map(|(i, j)| rows[i] == rows[j]).collect();
        Self { n, cells }
    }

    pub(crate) fn allows(&self, from: NodeId, to: NodeId) -> bool {
        self.cells[from * self.n + to]
    }
}
