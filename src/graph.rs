//! Immutable CSR adjacency. Built once by [`crate::builder::Builder`], then
//! shared read-only by every kernel; `row_ptr` and `col_idx` are never
//! touched after construction.

use crate::types::*;

pub struct CsrGraph {
    n: NodeId,
    m: EdgeOffset,
    row_ptr: Box<[EdgeOffset]>,
    col_idx: Box<[NodeId]>,
}

impl CsrGraph {
    /// Assembles a graph from finished arrays. The builder is the only
    /// caller; the debug assertions spell out what it must have guaranteed.
    pub(crate) fn from_parts(
        n: NodeId,
        row_ptr: Vec<EdgeOffset>,
        col_idx: Vec<NodeId>,
    ) -> Self {
        debug_assert_eq!(row_ptr.len(), n as usize + 1);
        debug_assert_eq!(row_ptr[0], 0);
        debug_assert_eq!(row_ptr[n as usize], col_idx.len() as EdgeOffset);
        debug_assert!(row_ptr.windows(2).all(|w| w[0] <= w[1]));
        debug_assert!(col_idx.iter().all(|&v| v >= 0 && v < n));

        Self {
            n,
            m: col_idx.len() as EdgeOffset,
            row_ptr: row_ptr.into_boxed_slice(),
            col_idx: col_idx.into_boxed_slice(),
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.n as usize
    }

    /// Stored (directed) edge count; twice the undirected count after
    /// symmetrization.
    pub fn num_edges(&self) -> usize {
        self.m as usize
    }

    pub fn out_degree(&self, u: NodeId) -> usize {
        (self.row_ptr[u as usize + 1] - self.row_ptr[u as usize]) as usize
    }

    pub fn out_neigh(&self, u: NodeId) -> &[NodeId] {
        let start = self.row_ptr[u as usize] as usize;
        let end = self.row_ptr[u as usize + 1] as usize;
        &self.col_idx[start..end]
    }

    pub fn row_ptr(&self) -> &[EdgeOffset] {
        &self.row_ptr
    }

    pub fn col_idx(&self) -> &[NodeId] {
        &self.col_idx
    }

    /// Walks every stored edge in `(u, v)` order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.n).flat_map(move |u| self.out_neigh(u).iter().map(move |&v| (u, v)))
    }

    pub fn print_stats(&self) {
        let n = self.num_nodes().max(1);
        log::info!(
            "graph: {} vertices, {} directed edges, avg degree {:.2}",
            self.num_nodes(),
            self.num_edges(),
            self.num_edges() as f64 / n as f64,
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::Builder;

    #[test]
    fn adjacency_slices_are_sorted_and_loop_free() {
        let edges = vec![(2, 0), (0, 1), (1, 2), (1, 1), (0, 1)];
        let g = Builder::new().from_edges(&edges).unwrap();

        assert_eq!(g.num_nodes(), 3);
        for u in 0..g.num_nodes() as i32 {
            let neigh = g.out_neigh(u);
            assert!(neigh.windows(2).all(|w| w[0] < w[1]));
            assert!(neigh.iter().all(|&v| v != u));
        }
    }

    #[test]
    fn edges_walk_matches_row_ptr() {
        let g = Builder::new().from_edges(&[(0, 1), (1, 2)]).unwrap();
        assert_eq!(g.edges().count(), g.num_edges());
        assert_eq!(g.out_degree(1), 2);
    }
}
