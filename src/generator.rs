//! Generates uniform random edge lists `Vec<(u, v)>` for benches and tests.
//! Seeded from [`crate::K_RAND_SEED`], so every consumer sees the same graph
//! for the same scale/degree pair.

use rand::prelude::*;

use crate::builder::Builder;
use crate::error::Result;
use crate::graph::CsrGraph;
use crate::types::*;

pub struct Generator {
    num_nodes: usize,
    num_edges: usize,
}

impl Generator {
    /// `2^scale` vertices with `degree` undirected record per vertex on
    /// average (before symmetrization and dedup).
    pub fn new(scale: u32, degree: usize) -> Self {
        let num_nodes = 1usize << scale;
        Self {
            num_nodes,
            num_edges: num_nodes * degree,
        }
    }

    pub fn uniform_edge_list(&self) -> EdgeList {
        let mut rng = StdRng::seed_from_u64(crate::K_RAND_SEED);
        let uniform = rand::distributions::Uniform::from(0..self.num_nodes as NodeId);

        (0..self.num_edges)
            .map(|_| (uniform.sample(&mut rng), uniform.sample(&mut rng)))
            .collect()
    }

    pub fn build_graph(&self) -> Result<CsrGraph> {
        Builder::new()
            .num_nodes(self.num_nodes as NodeId)
            .from_edges(&self.uniform_edge_list())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_count_matches_scale_and_degree() {
        let edge_list = Generator::new(6, 4).uniform_edge_list();
        assert_eq!(edge_list.len(), (1 << 6) * 4);
    }

    #[test]
    fn records_stay_in_range() {
        let n = 1 << 5;
        assert!(Generator::new(5, 8)
            .uniform_edge_list()
            .iter()
            .all(|&(u, v)| (0..n).contains(&u) && (0..n).contains(&v)));
    }

    #[test]
    fn generation_is_deterministic() {
        let a = Generator::new(7, 3).uniform_edge_list();
        let b = Generator::new(7, 3).uniform_edge_list();
        assert_eq!(a, b);
    }

    #[test]
    fn built_graph_is_symmetric() {
        let g = Generator::new(5, 4).build_graph().unwrap();
        for (u, v) in g.edges() {
            assert!(g.out_neigh(v).binary_search(&u).is_ok());
        }
    }
}
