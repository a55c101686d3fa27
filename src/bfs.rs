//! Multi-source BFS labelling. Labels every vertex with a dense component ID
//! in `[0, k)`, assigned in discovery order. The slowest way to find
//! components in parallel and the simplest way to find them sequentially,
//! which makes it the oracle the propagation kernels are checked against.

use crate::graph::CsrGraph;
use crate::types::*;

const UNVISITED: Label = -1;

pub fn compute_bfs(graph: &CsrGraph, labels: &mut [Label]) {
    let n = graph.num_nodes();
    debug_assert_eq!(labels.len(), n);
    if n == 0 {
        return;
    }

    labels.fill(UNVISITED);

    // Flat queue with a read cursor; every vertex enters at most once.
    let mut queue: Vec<NodeId> = Vec::with_capacity(n);
    let mut current = 0;

    for source in 0..n as NodeId {
        if labels[source as usize] != UNVISITED {
            continue;
        }

        labels[source as usize] = current;
        queue.clear();
        queue.push(source);

        let mut head = 0;
        while head < queue.len() {
            let u = queue[head];
            head += 1;
            for &v in graph.out_neigh(u) {
                if labels[v as usize] == UNVISITED {
                    labels[v as usize] = current;
                    queue.push(v);
                }
            }
        }

        current += 1;
    }
}
