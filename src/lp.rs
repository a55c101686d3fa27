//! Sequential label propagation with a frontier. Every vertex starts
//! labelled with its own ID and repeatedly adopts the minimum label in its
//! closed neighborhood; at the fixed point each label is the smallest vertex
//! ID in the component. Rounds are synchronous over a double-buffered label
//! pair, and the frontier bitmaps restrict each round to vertices whose
//! neighborhood could actually have improved. The parallel kernels reproduce
//! exactly this round shape.

use bit_vec::BitVec;

use crate::graph::CsrGraph;
use crate::types::*;

pub fn compute_lp_sequential(graph: &CsrGraph, labels: &mut [Label]) {
    let n = graph.num_nodes();
    debug_assert_eq!(labels.len(), n);
    if n == 0 {
        return;
    }

    for (v, label) in labels.iter_mut().enumerate() {
        *label = v as Label;
    }
    let mut aux: Vec<Label> = (0..n as Label).collect();

    let mut active = BitVec::from_elem(n, true);
    let mut next_active = BitVec::from_elem(n, false);

    let mut cur: &mut [Label] = labels;
    let mut next: &mut [Label] = &mut aux;

    loop {
        let mut changed = false;

        for u in 0..n {
            let mut new_label = cur[u];
            if active[u] {
                for &v in graph.out_neigh(u as NodeId) {
                    new_label = new_label.min(cur[v as usize]);
                }
                if new_label < cur[u] {
                    changed = true;
                    // u improved, so u and everything around it must be
                    // revisited next round.
                    next_active.set(u, true);
                    for &v in graph.out_neigh(u as NodeId) {
                        next_active.set(v as usize, true);
                    }
                }
            }
            next[u] = new_label;
        }

        if !changed {
            // The terminating round rewrote `next` with values identical to
            // `cur`, so both buffers hold the converged labels and the
            // caller's slice is complete whichever role it plays.
            break;
        }

        std::mem::swap(&mut cur, &mut next);
        std::mem::swap(&mut active, &mut next_active);
        next_active.clear();
    }
}
