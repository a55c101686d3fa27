//! Connected-components benchmark runner. Loads a Matrix Market graph, runs
//! the selected kernel a number of times, writes the label file and appends
//! the per-run timings as a new CSV column. Thread counts accept the same
//! comma/range syntax as the sweep tool but must resolve to a single value
//! here.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use ccbench::benchmark::{average_seconds, benchmark_kernel};
use ccbench::bfs::compute_bfs;
use ccbench::labels::count_unique;
use ccbench::lp::compute_lp_sequential;
use ccbench::lp_pool::compute_lp_parallel_pool;
use ccbench::lp_rayon::compute_lp_parallel_loop;
use ccbench::opts::parse_range_list;
use ccbench::{mtx, results};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Algorithm {
    /// Label propagation: sequential for one thread, worker pool otherwise.
    Lp,
    /// Sequential BFS labelling (correctness baseline).
    Bfs,
    /// Label propagation on the rayon loop scheduler.
    LpPar,
}

#[derive(Parser, Debug)]
#[command(
    name = "cc",
    about = "Computes connected components of a sparse matrix graph and records timings."
)]
struct Args {
    /// Path to the Matrix Market (.mtx) file.
    matrix: PathBuf,

    /// Algorithm to execute.
    #[arg(short, long, value_enum, default_value_t = Algorithm::Lp)]
    algorithm: Algorithm,

    /// Number of runs to average.
    #[arg(short, long, default_value_t = 1)]
    runs: usize,

    /// Thread count (comma/range syntax accepted, must resolve to one value).
    #[arg(short, long, default_value = "1")]
    threads: String,

    /// Chunk size for dynamic scheduling (1 selects static blocks).
    #[arg(short, long, default_value_t = 4096)]
    chunk_size: usize,

    /// Output directory for labels and timing CSVs.
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
    if args.chunk_size == 0 {
        bail!("chunk size must be positive");
    }

    let thread_counts = parse_range_list(&args.threads, "thread count")?;
    if thread_counts.len() != 1 {
        bail!("specify exactly one thread count for this binary (use cc_sweep for sweeps)");
    }
    let num_threads = thread_counts[0];

    results::ensure_directory(&args.output).with_context(|| {
        format!("failed to create output directory {}", args.output.display())
    })?;

    println!("Loading graph: {}", args.matrix.display());
    let graph = mtx::load_graph(&args.matrix, true, true)
        .with_context(|| format!("failed to load graph from {}", args.matrix.display()))?;
    graph.print_stats();

    println!(
        "Computing connected components ({} run{})...",
        args.runs,
        if args.runs == 1 { "" } else { "s" }
    );

    let chunk_size = args.chunk_size;
    let (labels, durations, column, prefix, labels_file) = match args.algorithm {
        Algorithm::Bfs => {
            let (labels, durations) =
                benchmark_kernel(&graph, |g, out| compute_bfs(g, out), args.runs);
            (labels, durations, "BFS".to_string(), "results_bfs", "bfs_labels.txt")
        }
        Algorithm::Lp if num_threads == 1 => {
            let (labels, durations) =
                benchmark_kernel(&graph, |g, out| compute_lp_sequential(g, out), args.runs);
            (
                labels,
                durations,
                "1 Thread".to_string(),
                "results_lp",
                "lp_labels.txt",
            )
        }
        Algorithm::Lp => {
            let (labels, durations) = benchmark_kernel(
                &graph,
                |g, out| compute_lp_parallel_pool(g, out, num_threads, chunk_size),
                args.runs,
            );
            (
                labels,
                durations,
                format!("{num_threads} Threads"),
                "results_pool",
                "pool_labels.txt",
            )
        }
        Algorithm::LpPar => {
            let (labels, durations) = benchmark_kernel(
                &graph,
                |g, out| compute_lp_parallel_loop(g, out, chunk_size),
                args.runs,
            );
            (
                labels,
                durations,
                "Rayon".to_string(),
                "results_par",
                "par_labels.txt",
            )
        }
    };

    for (run, duration) in durations.iter().enumerate() {
        println!("Run {} time: {:.6} seconds", run + 1, duration.as_secs_f64());
    }
    println!(
        "Average time over {} run{}: {:.6} seconds",
        args.runs,
        if args.runs == 1 { "" } else { "s" },
        average_seconds(&durations)
    );

    println!("Number of connected components: {}", count_unique(&labels));

    let labels_path = args.output.join(labels_file);
    results::write_labels(&labels_path, &labels)
        .with_context(|| format!("failed to write labels to {}", labels_path.display()))?;
    println!("Labels written to {}", labels_path.display());

    let seconds: Vec<f64> = durations.iter().map(Duration::as_secs_f64).collect();
    let csv_path = results::results_path(&args.output, prefix, &args.matrix);
    match results::append_times_column(&csv_path, &column, &seconds) {
        Ok(()) => println!("Time results written to {}", csv_path.display()),
        Err(err) => log::warn!("failed to update {}: {err}", csv_path.display()),
    }

    Ok(())
}
