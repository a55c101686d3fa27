//! Result artifacts: the per-vertex labels file, the timings CSV that grows
//! one column per benchmarked configuration, and the sweep surface CSV. The
//! timings CSV is rewritten whole on each append; existing columns are kept
//! and row-count mismatches are padded with empty cells in both directions.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::*;

pub fn ensure_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// File name without directory or extension; used to key result files to
/// their input matrix.
pub fn matrix_stem(matrix_path: &Path) -> String {
    matrix_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "matrix".to_string())
}

pub fn results_path(output_dir: &Path, prefix: &str, matrix_path: &Path) -> PathBuf {
    output_dir.join(format!("{prefix}_{}.csv", matrix_stem(matrix_path)))
}

/// One label per line, newline-terminated, in vertex order.
pub fn write_labels(path: &Path, labels: &[Label]) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for label in labels {
        writeln!(out, "{label}")?;
    }
    out.flush()?;
    Ok(())
}

/// Appends one column of per-run timings (seconds) to a CSV, creating the
/// file if needed.
pub fn append_times_column(path: &Path, column_name: &str, values: &[f64]) -> Result<()> {
    let mut table: Vec<Vec<String>> = match fs::read_to_string(path) {
        Ok(text) => text
            .lines()
            .map(|line| line.split(',').map(str::to_string).collect())
            .collect(),
        Err(err) if err.kind() == ErrorKind::NotFound => Vec::new(),
        Err(err) => return Err(err.into()),
    };

    // Normalize whatever is on disk to a rectangle before widening it.
    let width = table.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut table {
        row.resize(width, String::new());
    }
    if table.is_empty() {
        table.push(Vec::new());
    }
    while table.len() < 1 + values.len() {
        table.push(vec![String::new(); width]);
    }

    table[0].push(column_name.to_string());
    for (i, row) in table.iter_mut().enumerate().skip(1) {
        let cell = values
            .get(i - 1)
            .map(|seconds| format!("{seconds:.6}"))
            .unwrap_or_default();
        row.push(cell);
    }

    let mut out = BufWriter::new(File::create(path)?);
    for row in &table {
        writeln!(out, "{}", row.join(","))?;
    }
    out.flush()?;
    Ok(())
}

/// Sweep output: one row per (threads, chunk_size) configuration.
pub fn write_surface_csv(path: &Path, rows: &[(usize, usize, f64)]) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "threads,chunk_size,average_seconds")?;
    for &(threads, chunk_size, average_seconds) in rows {
        writeln!(out, "{threads},{chunk_size},{average_seconds:.6}")?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_file_is_one_value_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.txt");
        write_labels(&path, &[0, 0, 2]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "0\n0\n2\n");
    }

    #[test]
    fn first_column_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("times.csv");
        append_times_column(&path, "1 Thread", &[0.5, 0.25]).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "1 Thread\n0.500000\n0.250000\n"
        );
    }

    #[test]
    fn appending_preserves_existing_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("times.csv");
        append_times_column(&path, "1 Thread", &[0.5, 0.25]).unwrap();
        append_times_column(&path, "2 Threads", &[0.125, 0.0625]).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "1 Thread,2 Threads\n0.500000,0.125000\n0.250000,0.062500\n"
        );
    }

    #[test]
    fn shorter_new_column_is_padded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("times.csv");
        append_times_column(&path, "a", &[1.0, 2.0]).unwrap();
        append_times_column(&path, "b", &[3.0]).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "a,b\n1.000000,3.000000\n2.000000,\n"
        );
    }

    #[test]
    fn longer_new_column_pads_existing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("times.csv");
        append_times_column(&path, "a", &[1.0]).unwrap();
        append_times_column(&path, "b", &[2.0, 3.0]).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "a,b\n1.000000,2.000000\n,3.000000\n"
        );
    }

    #[test]
    fn surface_csv_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.csv");
        write_surface_csv(&path, &[(1, 1, 0.5), (2, 4096, 0.25)]).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "threads,chunk_size,average_seconds\n1,1,0.500000\n2,4096,0.250000\n"
        );
    }

    #[test]
    fn results_path_uses_the_matrix_stem() {
        let path = results_path(
            Path::new("results"),
            "results_lp",
            Path::new("data/road_usa.mtx"),
        );
        assert_eq!(path, Path::new("results/results_lp_road_usa.csv"));
    }
}
