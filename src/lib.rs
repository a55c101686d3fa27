/// Seed for every random structure in the crate (generated graphs, sampling).
pub const K_RAND_SEED: u64 = 27491095;

/// Runs kernels repeatedly and collects per-run wall-clock durations
pub mod benchmark;
/// Builds and squishes a graph (removes self-loops and parallel edges)
pub mod builder;
/// Error taxonomy shared by ingest, parsing and the result writers
pub mod error;
/// Generates uniform random edge lists for benches and tests
pub mod generator;
/// Immutable compressed-sparse-row graph representation
pub mod graph;
/// Label utilities: unique counts, canonical renaming, partition checks
pub mod labels;
/// Matrix Market coordinate reader
pub mod mtx;
/// Comma/range list parsing for thread and chunk specifications
pub mod opts;
/// Result artifacts: label files, timings CSV, sweep surface CSV
pub mod results;
/// Scoped wall-clock timer
pub mod timer;
/// Common types for vertices, labels and edge lists
pub mod types;

/// # Connected Components (CC) - Afforest union-find
pub mod afforest;
/// # Connected Components (CC) - multi-source BFS labelling
pub mod bfs;
/// # Connected Components (CC) - sequential label propagation with frontier
pub mod lp;
/// # Connected Components (CC) - thread-pool label propagation
pub mod lp_pool;
/// # Connected Components (CC) - loop-parallel label propagation
pub mod lp_rayon;
