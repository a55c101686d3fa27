//! Label propagation on an explicit worker pool. A fixed set of scoped OS
//! threads advances in rounds through one reusable barrier; work is handed
//! out either as one static block per thread (`chunk_size == 1`) or in
//! dynamic chunks claimed from a shared atomic counter. Labels are relaxed
//! atomics lowered by CAS, the frontier pair is a byte map per round parity
//! (the racing stores of `1` must be atomic to be defined, and both race
//! outcomes are acceptable), and the leader thread alone decides
//! convergence, signalling it through a `-1` sentinel in the change flag.

use std::sync::atomic::{AtomicI32, AtomicU8, Ordering};
use std::sync::Barrier;
use std::thread;

use crate::graph::CsrGraph;
use crate::labels::store_labels;
use crate::types::*;

/// Sentinel stored in the change flag once the leader has witnessed a
/// change-free round.
const CONVERGED: i32 = -1;

/// Work handout discipline, decoded once from the public chunk-size
/// parameter (`1` is the static-partitioning sentinel).
enum Schedule {
    StaticBlocks,
    DynamicChunks(i32),
}

/// CAS relax step. Lowers `u` toward the minimum label of its closed
/// neighborhood, then pushes that minimum out to every higher-labelled
/// neighbor. The push runs even when `u` itself did not improve: a vertex
/// that was lowered *by* a push still has to hand the value on, and it is
/// the push loop of its next activation that does so. Every vertex this
/// step strictly lowers is marked in `next_active`.
fn relax_vertex(
    graph: &CsrGraph,
    labels: &[AtomicI32],
    next_active: &[AtomicU8],
    u: NodeId,
) -> bool {
    let old_label = labels[u as usize].load(Ordering::Relaxed);
    let mut new_label = old_label;

    for &v in graph.out_neigh(u) {
        new_label = new_label.min(labels[v as usize].load(Ordering::Relaxed));
    }

    let mut changed = false;

    if new_label < old_label {
        let mut seen = old_label;
        while seen > new_label {
            match labels[u as usize].compare_exchange_weak(
                seen,
                new_label,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(now) => seen = now,
            }
        }
        next_active[u as usize].store(1, Ordering::Relaxed);
        changed = true;
    }

    for &v in graph.out_neigh(u) {
        let mut seen = labels[v as usize].load(Ordering::Relaxed);
        while seen > new_label {
            match labels[v as usize].compare_exchange_weak(
                seen,
                new_label,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => {
                    next_active[v as usize].store(1, Ordering::Relaxed);
                    changed = true;
                    break;
                }
                Err(now) => seen = now,
            }
        }
    }

    changed
}

pub fn compute_lp_parallel_pool(
    graph: &CsrGraph,
    labels: &mut [Label],
    num_threads: usize,
    chunk_size: usize,
) {
    let n = graph.num_nodes();
    debug_assert_eq!(labels.len(), n);
    if n == 0 {
        return;
    }
    let num_threads = num_threads.max(1);

    let schedule = if chunk_size <= 1 {
        Schedule::StaticBlocks
    } else {
        Schedule::DynamicChunks(chunk_size as i32)
    };
    let block = (n + num_threads - 1) / num_threads;

    let atomic_labels: Vec<AtomicI32> = (0..n as Label).map(AtomicI32::new).collect();
    // Frontier pair indexed by round parity: everything active up front,
    // nothing queued for the round after.
    let frontiers: [Vec<AtomicU8>; 2] = [
        (0..n).map(|_| AtomicU8::new(1)).collect(),
        (0..n).map(|_| AtomicU8::new(0)).collect(),
    ];

    let any_changed = AtomicI32::new(0);
    let next_vertex = AtomicI32::new(0);
    let barrier = Barrier::new(num_threads);

    thread::scope(|scope| {
        for t in 0..num_threads {
            let atomic_labels = &atomic_labels;
            let frontiers = &frontiers;
            let any_changed = &any_changed;
            let next_vertex = &next_vertex;
            let barrier = &barrier;
            let schedule = &schedule;

            scope.spawn(move || {
                let block_start = (t * block).min(n);
                let block_end = ((t + 1) * block).min(n);
                let mut round = 0usize;

                loop {
                    let mut local_changed = false;

                    if t == 0 {
                        next_vertex.store(0, Ordering::Relaxed);
                    }
                    barrier.wait();

                    let active = &frontiers[round & 1];
                    let next_active = &frontiers[(round & 1) ^ 1];

                    match *schedule {
                        Schedule::StaticBlocks => {
                            for u in block_start..block_end {
                                if active[u].load(Ordering::Relaxed) != 0 {
                                    local_changed |= relax_vertex(
                                        graph,
                                        atomic_labels,
                                        next_active,
                                        u as NodeId,
                                    );
                                }
                            }
                        }
                        Schedule::DynamicChunks(chunk) => loop {
                            let start = next_vertex.fetch_add(chunk, Ordering::Relaxed);
                            if start >= n as i32 {
                                break;
                            }
                            let end = (start + chunk).min(n as i32);
                            for u in start..end {
                                if active[u as usize].load(Ordering::Relaxed) != 0 {
                                    local_changed |=
                                        relax_vertex(graph, atomic_labels, next_active, u);
                                }
                            }
                        },
                    }

                    // One publishing store per worker per round.
                    if local_changed {
                        any_changed.store(1, Ordering::Relaxed);
                    }
                    barrier.wait();

                    if t == 0 {
                        if any_changed.load(Ordering::Acquire) == 0 {
                            any_changed.store(CONVERGED, Ordering::Release);
                        } else {
                            any_changed.store(0, Ordering::Relaxed);
                            // The frontier just consumed becomes the next
                            // round's next-frontier; clear it while the
                            // other threads are parked at the barrier.
                            for flag in active.iter() {
                                flag.store(0, Ordering::Relaxed);
                            }
                        }
                    }
                    barrier.wait();

                    if any_changed.load(Ordering::Acquire) == CONVERGED {
                        break;
                    }
                    round += 1;
                }
            });
        }
    });

    store_labels(&atomic_labels, labels);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use crate::generator::Generator;
    use crate::labels::count_unique;
    use crate::lp::compute_lp_sequential;

    fn pool_labels(edges: &[Edge], n: NodeId, threads: usize, chunk: usize) -> Vec<Label> {
        let graph = Builder::new().num_nodes(n).from_edges(edges).unwrap();
        let mut labels = vec![0; graph.num_nodes()];
        compute_lp_parallel_pool(&graph, &mut labels, threads, chunk);
        labels
    }

    #[test]
    fn triangle_every_configuration() {
        for threads in [1, 2, 4, 8] {
            for chunk in [1, 32, 1024] {
                assert_eq!(
                    pool_labels(&[(0, 1), (1, 2), (0, 2)], 3, threads, chunk),
                    vec![0, 0, 0],
                    "threads {threads} chunk {chunk}"
                );
            }
        }
    }

    #[test]
    fn two_disjoint_edges() {
        assert_eq!(pool_labels(&[(0, 1), (2, 3)], 4, 4, 1), vec![0, 0, 2, 2]);
        assert_eq!(pool_labels(&[(0, 1), (2, 3)], 4, 4, 32), vec![0, 0, 2, 2]);
    }

    #[test]
    fn path_spanning_thread_blocks() {
        // Static mode with more threads than a block can hold: the chain
        // crosses every block boundary.
        let edges: Vec<Edge> = (0..9).map(|i| (i, i + 1)).collect();
        assert_eq!(pool_labels(&edges, 10, 4, 1), vec![0; 10]);
    }

    #[test]
    fn more_threads_than_vertices() {
        assert_eq!(pool_labels(&[(0, 1)], 2, 8, 1), vec![0, 0]);
    }

    #[test]
    fn matches_sequential_on_random_graphs() {
        let graph = Generator::new(8, 4).build_graph().unwrap();
        let mut expected = vec![0; graph.num_nodes()];
        compute_lp_sequential(&graph, &mut expected);
        let k = count_unique(&expected);

        for threads in [1, 2, 4, 8] {
            for chunk in [1, 32, 1024] {
                let mut labels = vec![0; graph.num_nodes()];
                compute_lp_parallel_pool(&graph, &mut labels, threads, chunk);
                assert_eq!(labels, expected, "threads {threads} chunk {chunk}");
                assert_eq!(count_unique(&labels), k);
            }
        }
    }

    #[test]
    fn empty_graph() {
        let graph = Builder::new().from_edges(&[]).unwrap();
        compute_lp_parallel_pool(&graph, &mut [], 4, 32);
    }
}
