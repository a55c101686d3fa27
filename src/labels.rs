//! Label bookkeeping shared by the kernels and their callers: unique-label
//! counting, canonical renaming for partition comparison, copy-out from the
//! atomic vectors the parallel kernels relax, and a BFS oracle that checks a
//! labelling really is the component partition.

use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicI32, Ordering};

use crate::graph::CsrGraph;
use crate::types::*;

/// Number of distinct labels. Every kernel keeps label values inside
/// `[0, n)`, so a flag array indexed by value suffices.
pub fn count_unique(labels: &[Label]) -> usize {
    let mut seen = vec![false; labels.len()];
    let mut unique = 0;

    for &label in labels {
        if !seen[label as usize] {
            seen[label as usize] = true;
            unique += 1;
        }
    }
    unique
}

/// Renames labels to dense `[0, k)` in order of first appearance. Two label
/// vectors describe the same partition exactly when they canonicalize to the
/// same vector.
pub fn canonicalize(labels: &mut [Label]) {
    let mut remap: Vec<Label> = vec![-1; labels.len()];
    let mut next = 0;

    for label in labels.iter_mut() {
        let value = *label as usize;
        if remap[value] < 0 {
            remap[value] = next;
            next += 1;
        }
        *label = remap[value];
    }
}

pub fn same_partition(a: &[Label], b: &[Label]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut ca = a.to_vec();
    let mut cb = b.to_vec();
    canonicalize(&mut ca);
    canonicalize(&mut cb);
    ca == cb
}

/// Copies a converged atomic label vector into the caller's plain buffer.
pub fn store_labels(atomic_labels: &[AtomicI32], labels: &mut [Label]) {
    debug_assert_eq!(atomic_labels.len(), labels.len());
    for (label, slot) in labels.iter_mut().zip(atomic_labels) {
        *label = slot.load(Ordering::Relaxed);
    }
}

/// Checks a labelling against the graph itself: a BFS seeded from one
/// representative per label must never leave its label class, and together
/// the searches must reach every vertex. Test oracle; not on any hot path.
pub fn verify_components(graph: &CsrGraph, labels: &[Label]) -> bool {
    let mut label_to_source = HashMap::new();
    for v in 0..graph.num_nodes() {
        label_to_source.insert(labels[v], v as NodeId);
    }

    let mut visited = vec![false; graph.num_nodes()];
    let mut frontier: VecDeque<NodeId> = VecDeque::new();

    for (label, source) in label_to_source {
        frontier.clear();
        frontier.push_back(source);
        visited[source as usize] = true;

        while let Some(u) = frontier.pop_front() {
            for &v in graph.out_neigh(u) {
                if labels[v as usize] != label {
                    return false;
                }
                if !visited[v as usize] {
                    visited[v as usize] = true;
                    frontier.push_back(v);
                }
            }
        }
    }

    visited.into_iter().all(|seen| seen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bfs::compute_bfs;
    use crate::builder::Builder;
    use crate::lp::compute_lp_sequential;

    #[test]
    fn count_unique_counts_each_value_once() {
        assert_eq!(count_unique(&[0, 0, 2, 2, 1]), 3);
        assert_eq!(count_unique(&[]), 0);
        assert_eq!(count_unique(&[3, 2, 1, 0]), 4);
    }

    #[test]
    fn canonicalize_uses_first_appearance_order() {
        let mut labels = vec![5, 5, 2, 5, 2, 0];
        canonicalize(&mut labels);
        assert_eq!(labels, vec![0, 0, 1, 0, 1, 2]);
    }

    #[test]
    fn canonicalize_is_idempotent() {
        let mut labels = vec![3, 3, 0, 1];
        canonicalize(&mut labels);
        let again = labels.clone();
        canonicalize(&mut labels);
        assert_eq!(labels, again);
    }

    #[test]
    fn same_partition_ignores_label_values() {
        assert!(same_partition(&[0, 0, 2, 2], &[7, 7, 1, 1]));
        assert!(!same_partition(&[0, 0, 1, 1], &[0, 1, 1, 0]));
        assert!(!same_partition(&[0, 0], &[0, 0, 0]));
    }

    #[test]
    fn lp_and_bfs_agree_up_to_renaming() {
        let graph = Builder::new()
            .from_edges(&[(1, 2), (2, 3), (5, 6)])
            .unwrap();

        let mut lp = vec![0; graph.num_nodes()];
        let mut bfs = vec![0; graph.num_nodes()];
        compute_lp_sequential(&graph, &mut lp);
        compute_bfs(&graph, &mut bfs);

        assert!(same_partition(&lp, &bfs));
        let mut canonical_lp = lp.clone();
        canonicalize(&mut canonical_lp);
        assert_eq!(canonical_lp, bfs);
    }

    #[test]
    fn verifier_accepts_correct_labellings() {
        let graph = Builder::new().from_edges(&[(0, 1), (2, 3)]).unwrap();
        let mut labels = vec![0; graph.num_nodes()];
        compute_bfs(&graph, &mut labels);
        assert!(verify_components(&graph, &labels));
    }

    #[test]
    fn verifier_rejects_split_and_merged_components() {
        let graph = Builder::new().from_edges(&[(0, 1), (2, 3)]).unwrap();
        // Edge (0, 1) straddles two label classes.
        assert!(!verify_components(&graph, &[0, 1, 2, 2]));
        // Disconnected vertices share a label.
        assert!(!verify_components(&graph, &[0, 0, 0, 0]));
    }
}
