use std::collections::TryReserveError;

use thiserror::Error;

/// Everything that can go wrong between an input file and a finished
/// benchmark. Kernels themselves do not fail; they run to convergence.
#[derive(Error, Debug)]
pub enum Error {
    /// Header, size line or coordinate record could not be parsed.
    #[error("bad format: {0}")]
    BadFormat(String),

    /// The input is a Matrix Market object we do not handle.
    #[error("unsupported matrix: {0}")]
    Unsupported(String),

    /// A buffer reservation failed.
    #[error("out of memory: {0}")]
    OutOfMemory(#[from] TryReserveError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid option value (run count, thread or chunk specification, ...).
    #[error("bad argument: {0}")]
    BadArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
