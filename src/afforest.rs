//! Afforest connected components: a parallel union-find that samples a few
//! neighbors per vertex first, skips the giant component that sampling
//! reveals, and only then pays for the remaining edges \[1\]. Extends the
//! Shiloach-Vishkin hooking scheme \[2\].
//!
//! ## Sources
//! \[1\] Michael Sutton, Tal Ben-Nun, and Amnon Barak. "Optimizing Parallel
//!     Graph Connectivity Computation via Subgraph Sampling" Symposium on
//!     Parallel and Distributed Processing, IPDPS 2018.
//! \[2\] Yossi Shiloach and Uzi Vishkin. "An o(logn) parallel connectivity
//!     algorithm" Journal of Algorithms, 3(1):57-67, 1982.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Barrier;
use std::thread;

use rand::prelude::*;

use crate::graph::CsrGraph;
use crate::labels::store_labels;
use crate::types::*;

const NUM_SAMPLES: usize = 1024;

/// Find with path splitting: every probed vertex is re-pointed at its
/// grandparent on the way up.
fn find(parent: &[AtomicI32], mut x: NodeId) -> NodeId {
    let mut p = parent[x as usize].load(Ordering::Relaxed);
    while p != x {
        let grandparent = parent[p as usize].load(Ordering::Relaxed);
        if grandparent != p {
            parent[x as usize].store(grandparent, Ordering::Relaxed);
        }
        x = p;
        p = grandparent;
    }
    x
}

/// Hooks the larger root under the smaller, so every root converges on the
/// minimum vertex ID of its component. The CAS only succeeds while the
/// larger vertex is still its own parent; anything else means another
/// thread won the race and we retry from fresh roots.
fn union(parent: &[AtomicI32], u: NodeId, v: NodeId) {
    loop {
        let root_u = find(parent, u);
        let root_v = find(parent, v);
        if root_u == root_v {
            return;
        }

        let (high, low) = if root_u > root_v {
            (root_u, root_v)
        } else {
            (root_v, root_u)
        };

        if parent[high as usize]
            .compare_exchange(high, low, Ordering::Relaxed, Ordering::Relaxed)
            .is_ok()
        {
            return;
        }
    }
}

fn compress_range(parent: &[AtomicI32], start: usize, end: usize) {
    for u in start..end {
        let root = find(parent, u as NodeId);
        parent[u].store(root, Ordering::Relaxed);
    }
}

/// Estimates the most frequent component ID from a fixed number of random
/// probes; the full phase skips its members entirely.
fn sample_frequent_element(parent: &[AtomicI32]) -> NodeId {
    let mut sample_counts: HashMap<NodeId, usize> = HashMap::with_capacity(32);
    let mut rng = StdRng::seed_from_u64(crate::K_RAND_SEED);
    let uniform = rand::distributions::Uniform::from(0..parent.len());

    for _ in 0..NUM_SAMPLES {
        let v = uniform.sample(&mut rng);
        *sample_counts
            .entry(parent[v].load(Ordering::Relaxed))
            .or_insert(0) += 1;
    }

    let (most_frequent, count) = sample_counts
        .into_iter()
        .max_by_key(|&(_, count)| count)
        .unwrap_or((0, 0));

    log::debug!(
        "skipping largest intermediate component (id {}, ~{}% of sample)",
        most_frequent,
        count * 100 / NUM_SAMPLES,
    );

    most_frequent
}

pub fn compute_afforest(
    graph: &CsrGraph,
    labels: &mut [Label],
    num_threads: usize,
    neighbor_rounds: Option<usize>,
) {
    let n = graph.num_nodes();
    debug_assert_eq!(labels.len(), n);
    if n == 0 {
        return;
    }
    let num_threads = num_threads.max(1);
    let neighbor_rounds = neighbor_rounds.unwrap_or(2);
    let block = (n + num_threads - 1) / num_threads;

    let parent: Vec<AtomicI32> = (0..n as NodeId).map(AtomicI32::new).collect();
    let skip_root = AtomicI32::new(0);
    let barrier = Barrier::new(num_threads);

    thread::scope(|scope| {
        for t in 0..num_threads {
            let parent = &parent;
            let skip_root = &skip_root;
            let barrier = &barrier;

            scope.spawn(move || {
                let start = (t * block).min(n);
                let end = ((t + 1) * block).min(n);

                // Sampling phase: in round r, union each vertex with its
                // r-th neighbor only. Most vertices join the giant
                // component within a couple of rounds.
                for r in 0..neighbor_rounds {
                    for u in start..end {
                        if let Some(&v) = graph.out_neigh(u as NodeId).get(r) {
                            union(parent, u as NodeId, v);
                        }
                    }
                    barrier.wait();
                    compress_range(parent, start, end);
                    barrier.wait();
                }

                if t == 0 {
                    skip_root.store(sample_frequent_element(parent), Ordering::Relaxed);
                }
                barrier.wait();
                let skip = skip_root.load(Ordering::Relaxed);

                // Full phase over the remaining neighbors, skipping members
                // of the sampled giant component.
                for u in start..end {
                    if parent[u].load(Ordering::Relaxed) == skip {
                        continue;
                    }
                    for &v in graph.out_neigh(u as NodeId).iter().skip(neighbor_rounds) {
                        union(parent, u as NodeId, v);
                    }
                }
                barrier.wait();
                compress_range(parent, start, end);
            });
        }
    });

    store_labels(&parent, labels);
}
