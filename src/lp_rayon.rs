//! Loop-parallel label propagation. The iteration space is carved into
//! fixed-size chunks executed on the rayon pool; labels live in an array of
//! relaxed atomics that only ever decrease, so racing relaxations commute
//! and any value a thread observes is a safe upper bound. Each chunk keeps a
//! local change flag and publishes it with a single store; the round
//! terminates through the shared flag read after the parallel-for join.

use rayon::iter::IndexedParallelIterator;
use rayon::iter::IntoParallelIterator;
use rayon::iter::ParallelIterator;
use rayon::slice::ParallelSlice;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use crate::graph::CsrGraph;
use crate::labels::store_labels;
use crate::types::*;

/// One inspection of `u`'s closed neighborhood. Lowers `u` to the minimum
/// label in sight and, when that is an improvement, pushes the new label out
/// to every neighbor as well, so a hub drags its whole neighborhood down in
/// one visit.
fn relax_vertex(graph: &CsrGraph, labels: &[AtomicI32], u: NodeId) -> bool {
    let old_label = labels[u as usize].load(Ordering::Relaxed);
    let mut new_label = old_label;

    for &v in graph.out_neigh(u) {
        new_label = new_label.min(labels[v as usize].load(Ordering::Relaxed));
    }

    if new_label >= old_label {
        return false;
    }

    labels[u as usize].fetch_min(new_label, Ordering::Relaxed);
    for &v in graph.out_neigh(u) {
        labels[v as usize].fetch_min(new_label, Ordering::Relaxed);
    }
    true
}

pub fn compute_lp_parallel_loop(graph: &CsrGraph, labels: &mut [Label], chunk_size: usize) {
    let n = graph.num_nodes();
    debug_assert_eq!(labels.len(), n);
    if n == 0 {
        return;
    }
    let chunk_size = chunk_size.max(1);

    let mut atomic_labels: Vec<AtomicI32> = Vec::with_capacity(n);
    (0..n as Label)
        .into_par_iter()
        .map(AtomicI32::new)
        .collect_into_vec(&mut atomic_labels);

    let any_changed = AtomicBool::new(true);
    while any_changed.load(Ordering::Acquire) {
        any_changed.store(false, Ordering::Relaxed);

        atomic_labels
            .par_chunks(chunk_size)
            .enumerate()
            .for_each(|(chunk, slots)| {
                let base = chunk * chunk_size;
                let mut local_changed = false;

                for offset in 0..slots.len() {
                    local_changed |=
                        relax_vertex(graph, &atomic_labels, (base + offset) as NodeId);
                }

                if local_changed {
                    any_changed.store(true, Ordering::Relaxed);
                }
            });
    }

    store_labels(&atomic_labels, labels);
}
