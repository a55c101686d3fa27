//! Edge ingest and normalization: raw coordinate records in, CSR out.
//! Symmetrizes directed records, drops self-loops and parallel edges, then
//! lays out the row-pointer / column-index pair in one counting pass.

use rayon::iter::IntoParallelRefIterator;
use rayon::iter::ParallelIterator;
use rayon::slice::ParallelSliceMut;

use crate::error::Result;
use crate::graph::CsrGraph;
use crate::types::*;

pub struct Builder {
    symmetrize: bool,
    drop_self_loops: bool,
    num_nodes: Option<NodeId>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    pub fn new() -> Self {
        Self {
            symmetrize: true,
            drop_self_loops: true,
            num_nodes: None,
        }
    }

    /// Mirror every non-loop record. On for every undirected benchmark
    /// input; symmetric Matrix Market files require it because they store a
    /// single triangle.
    pub fn symmetrize(mut self, yes: bool) -> Self {
        self.symmetrize = yes;
        self
    }

    pub fn drop_self_loops(mut self, yes: bool) -> Self {
        self.drop_self_loops = yes;
        self
    }

    /// Fixes the vertex count up front (e.g. `max(M, N)` from a size line).
    /// Without it the count is derived from the largest ID seen.
    pub fn num_nodes(mut self, n: NodeId) -> Self {
        self.num_nodes = Some(n);
        self
    }

    pub fn find_max_node_id(records: &[Edge]) -> NodeId {
        records.par_iter().map(|&(u, v)| u.max(v)).max().unwrap_or(-1)
    }

    pub fn from_edges(&self, records: &[Edge]) -> Result<CsrGraph> {
        let n = match self.num_nodes {
            Some(n) => n,
            None => Self::find_max_node_id(records) + 1,
        };

        // Worst case doubling when mirroring; dedup trims the rest.
        let mut edges: EdgeList = Vec::new();
        edges.try_reserve_exact(records.len() * if self.symmetrize { 2 } else { 1 })?;

        for &(u, v) in records {
            if u < 0 || v < 0 || u >= n || v >= n {
                continue;
            }
            edges.push((u, v));
            if self.symmetrize && u != v {
                edges.push((v, u));
            }
        }

        edges.par_sort_unstable();

        // Single in-place sweep: skip self-loops, skip records equal to
        // their predecessor.
        let mut write = 0;
        for read in 0..edges.len() {
            let e = edges[read];
            if self.drop_self_loops && e.0 == e.1 {
                continue;
            }
            if write == 0 || edges[write - 1] != e {
                edges[write] = e;
                write += 1;
            }
        }
        edges.truncate(write);

        let mut row_ptr: Vec<EdgeOffset> = Vec::new();
        row_ptr.try_reserve_exact(n as usize + 1)?;
        row_ptr.resize(n as usize + 1, 0);
        for &(u, _) in &edges {
            row_ptr[u as usize + 1] += 1;
        }
        for i in 0..n as usize {
            row_ptr[i + 1] += row_ptr[i];
        }

        let mut col_idx: Vec<NodeId> = Vec::new();
        col_idx.try_reserve_exact(edges.len())?;
        col_idx.resize(edges.len(), 0);

        let mut head: Vec<EdgeOffset> = Vec::new();
        head.try_reserve_exact(n as usize)?;
        head.extend_from_slice(&row_ptr[..n as usize]);

        for &(u, v) in &edges {
            col_idx[head[u as usize] as usize] = v;
            head[u as usize] += 1;
        }

        log::debug!(
            "built CSR: {} vertices, {} records in, {} edges kept",
            n,
            records.len(),
            edges.len(),
        );

        Ok(CsrGraph::from_parts(n, row_ptr, col_idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_layout() {
        let g = Builder::new()
            .from_edges(&[(0, 1), (1, 2), (0, 2)])
            .unwrap();

        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.num_edges(), 6);
        assert_eq!(g.row_ptr(), &[0, 2, 4, 6]);
        assert_eq!(g.col_idx(), &[1, 2, 0, 2, 0, 1]);
    }

    #[test]
    fn self_loops_and_duplicates_are_eliminated() {
        let g = Builder::new()
            .from_edges(&[(0, 0), (0, 1), (0, 1), (1, 0), (2, 2)])
            .unwrap();

        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.num_edges(), 2);
        assert_eq!(g.out_neigh(0), &[1]);
        assert_eq!(g.out_neigh(1), &[0]);
        assert_eq!(g.out_neigh(2), &[] as &[i32]);
    }

    #[test]
    fn out_of_range_records_are_discarded() {
        let g = Builder::new()
            .num_nodes(2)
            .from_edges(&[(0, 1), (0, 5), (-1, 0), (3, 1)])
            .unwrap();

        assert_eq!(g.num_nodes(), 2);
        assert_eq!(g.num_edges(), 2);
    }

    #[test]
    fn directed_build_keeps_orientation() {
        let g = Builder::new()
            .symmetrize(false)
            .from_edges(&[(0, 1), (1, 2)])
            .unwrap();

        assert_eq!(g.num_edges(), 2);
        assert_eq!(g.out_neigh(0), &[1]);
        assert_eq!(g.out_neigh(1), &[2]);
        assert_eq!(g.out_neigh(2), &[] as &[i32]);
    }

    #[test]
    fn rebuild_from_walked_edges_is_identity() {
        let g = Builder::new()
            .from_edges(&[(0, 1), (1, 2), (0, 2), (4, 3)])
            .unwrap();

        let edges: Vec<_> = g.edges().collect();
        let h = Builder::new()
            .num_nodes(g.num_nodes() as NodeId)
            .from_edges(&edges)
            .unwrap();

        assert_eq!(g.row_ptr(), h.row_ptr());
        assert_eq!(g.col_idx(), h.col_idx());
    }

    #[test]
    fn empty_input() {
        let g = Builder::new().from_edges(&[]).unwrap();
        assert_eq!(g.num_nodes(), 0);
        assert_eq!(g.num_edges(), 0);
        assert_eq!(g.row_ptr(), &[0]);
    }

    #[test]
    fn isolated_tail_vertices_get_empty_rows() {
        let g = Builder::new().num_nodes(5).from_edges(&[(0, 1)]).unwrap();
        assert_eq!(g.num_nodes(), 5);
        assert_eq!(g.out_degree(4), 0);
    }
}
