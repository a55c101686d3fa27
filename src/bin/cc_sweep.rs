//! Parameter sweep for the thread-pool kernel. Crosses lists/ranges of
//! thread counts and chunk sizes, runs each configuration several times, and
//! emits a compact `threads,chunk_size,average_seconds` CSV suitable for
//! surface plots.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use ccbench::benchmark::{average_seconds, benchmark_kernel};
use ccbench::labels::count_unique;
use ccbench::lp_pool::compute_lp_parallel_pool;
use ccbench::opts::parse_range_list;
use ccbench::{mtx, results};

#[derive(Parser, Debug)]
#[command(
    name = "cc_sweep",
    about = "Sweeps the thread-pool kernel across thread counts and chunk sizes."
)]
struct Args {
    /// Path to the Matrix Market (.mtx) file.
    matrix: PathBuf,

    /// Thread counts to sweep (comma list or start:end[:step]).
    #[arg(short, long, default_value = "1")]
    threads: String,

    /// Chunk sizes to sweep (comma list or start:end[:step]).
    #[arg(short, long, default_value = "4096")]
    chunk_size: String,

    /// Runs per configuration.
    #[arg(short, long, default_value_t = 100)]
    runs: usize,

    /// Directory for the result CSV.
    #[arg(short, long, default_value = "results")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .try_init()?;

    let args = Args::parse();
    if args.runs == 0 {
        bail!("run count must be positive");
    }

    let thread_counts = parse_range_list(&args.threads, "thread count")?;
    let chunk_sizes = parse_range_list(&args.chunk_size, "chunk size")?;

    results::ensure_directory(&args.output).with_context(|| {
        format!("failed to create output directory {}", args.output.display())
    })?;

    println!("Loading graph: {}", args.matrix.display());
    let graph = mtx::load_graph(&args.matrix, true, true)
        .with_context(|| format!("failed to load graph from {}", args.matrix.display()))?;
    graph.print_stats();

    let configurations = thread_counts.len() * chunk_sizes.len();
    println!(
        "Sweeping {} configuration{} with {} run{} each...",
        configurations,
        if configurations == 1 { "" } else { "s" },
        args.runs,
        if args.runs == 1 { "" } else { "s" }
    );

    let mut components = None;
    let mut surface = Vec::with_capacity(configurations);
    for &num_threads in &thread_counts {
        for &chunk_size in &chunk_sizes {
            let (labels, durations) = benchmark_kernel(
                &graph,
                |g, out| compute_lp_parallel_pool(g, out, num_threads, chunk_size),
                args.runs,
            );
            let average = average_seconds(&durations);
            println!(
                "threads={num_threads} chunk_size={chunk_size} average={average:.6} seconds"
            );

            // The component count is schedule-invariant; any drift between
            // configurations means a kernel bug.
            let k = count_unique(&labels);
            match components {
                None => components = Some(k),
                Some(expected) => {
                    if expected != k {
                        bail!("component count changed across configurations ({expected} vs {k})");
                    }
                }
            }

            surface.push((num_threads, chunk_size, average));
        }
    }

    if let Some(k) = components {
        println!("Number of connected components: {k}");
    }

    let csv_path = results::results_path(&args.output, "sweep", &args.matrix);
    results::write_surface_csv(&csv_path, &surface)
        .with_context(|| format!("failed to write {}", csv_path.display()))?;
    println!("Sweep results written to {}", csv_path.display());

    Ok(())
}
