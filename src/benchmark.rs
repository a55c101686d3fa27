//! Performs the benchmarks: runs a kernel `R` times over the same graph and
//! the same label buffer, timing each invocation with the monotonic clock.
//! Aggregation and persistence are the caller's business.

use std::time::{Duration, Instant};

use crate::graph::CsrGraph;
use crate::types::*;

/// Invokes `kernel` `runs` times, reusing one caller-visible label buffer,
/// and returns the final labels together with every per-run duration.
pub fn benchmark_kernel<K>(graph: &CsrGraph, mut kernel: K, runs: usize) -> (Vec<Label>, Vec<Duration>)
where
    K: FnMut(&CsrGraph, &mut [Label]),
{
    let mut labels = vec![0; graph.num_nodes()];
    let mut durations = Vec::with_capacity(runs);

    for run in 0..runs {
        let start = Instant::now();
        kernel(graph, &mut labels);
        let elapsed = start.elapsed();
        log::debug!("run {}: {:.6} seconds", run + 1, elapsed.as_secs_f64());
        durations.push(elapsed);
    }

    (labels, durations)
}

pub fn average_seconds(durations: &[Duration]) -> f64 {
    if durations.is_empty() {
        return 0.0;
    }
    durations.iter().map(Duration::as_secs_f64).sum::<f64>() / durations.len() as f64
}
