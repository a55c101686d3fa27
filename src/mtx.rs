//! Matrix Market coordinate reader. Only the structure of the matrix is
//! used: values on real/integer entries are parsed past and thrown away.
//! Indices are 1-based in the file and 0-based from here on.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::builder::Builder;
use crate::error::{Error, Result};
use crate::graph::CsrGraph;
use crate::timer::ScopedTimer;
use crate::types::*;

#[derive(Debug)]
pub struct MtxHeader {
    pub rows: NodeId,
    pub cols: NodeId,
    pub entries: usize,
    /// `pattern` field: records carry no value column.
    pub pattern: bool,
    /// symmetric / skew-symmetric / hermitian: the file stores one triangle,
    /// so the builder must mirror regardless of what the caller asked for.
    pub symmetric: bool,
}

fn parse_banner(line: &str) -> Result<(bool, bool)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 5 || !fields[0].eq_ignore_ascii_case("%%MatrixMarket") {
        return Err(Error::BadFormat(format!("not a Matrix Market banner: {line:?}")));
    }
    if !fields[1].eq_ignore_ascii_case("matrix") {
        return Err(Error::Unsupported(format!("object {:?} is not a matrix", fields[1])));
    }
    if !fields[2].eq_ignore_ascii_case("coordinate") {
        return Err(Error::Unsupported(format!(
            "format {:?} is not sparse coordinate",
            fields[2]
        )));
    }

    let pattern = match fields[3].to_ascii_lowercase().as_str() {
        "pattern" => true,
        "real" | "integer" | "complex" => false,
        other => return Err(Error::BadFormat(format!("unknown field type {other:?}"))),
    };
    let symmetric = match fields[4].to_ascii_lowercase().as_str() {
        "general" => false,
        "symmetric" | "skew-symmetric" | "hermitian" => true,
        other => return Err(Error::BadFormat(format!("unknown symmetry {other:?}"))),
    };

    Ok((pattern, symmetric))
}

/// Reads the banner, size line and all coordinate records. The records come
/// back raw: 0-based, unsymmetrized, self-loops intact.
pub fn read_edge_list<R: BufRead>(reader: R) -> Result<(MtxHeader, EdgeList)> {
    let mut lines = reader.lines();

    let banner = lines
        .next()
        .ok_or_else(|| Error::BadFormat("empty file".into()))??;
    let (pattern, symmetric) = parse_banner(&banner)?;

    // Comment block, then the single size line.
    let size_line = loop {
        let line = lines
            .next()
            .ok_or_else(|| Error::BadFormat("missing size line".into()))??;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }
        break line;
    };

    let dims: Vec<i64> = size_line
        .split_whitespace()
        .map(|t| t.parse::<i64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| Error::BadFormat(format!("malformed size line: {size_line:?}")))?;
    let (rows, cols, entries) = match dims[..] {
        [rows, cols, entries] => (rows, cols, entries),
        _ => return Err(Error::BadFormat(format!("malformed size line: {size_line:?}"))),
    };
    if rows < 0 || cols < 0 || entries < 0 || rows > NodeId::MAX as i64 || cols > NodeId::MAX as i64
    {
        return Err(Error::BadFormat(format!("size line out of range: {size_line:?}")));
    }

    let header = MtxHeader {
        rows: rows as NodeId,
        cols: cols as NodeId,
        entries: entries as usize,
        pattern,
        symmetric,
    };

    let mut edges: EdgeList = Vec::new();
    edges.try_reserve_exact(header.entries)?;

    while edges.len() < header.entries {
        let line = lines
            .next()
            .ok_or_else(|| {
                Error::BadFormat(format!(
                    "expected {} records, file ended after {}",
                    header.entries,
                    edges.len()
                ))
            })??;
        if line.trim().is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let (Some(i), Some(j)) = (tokens.next(), tokens.next()) else {
            return Err(Error::BadFormat(format!("malformed record: {line:?}")));
        };
        let (Ok(i), Ok(j)) = (i.parse::<NodeId>(), j.parse::<NodeId>()) else {
            return Err(Error::BadFormat(format!("malformed record: {line:?}")));
        };

        edges.push((i - 1, j - 1));
    }

    Ok((header, edges))
}

/// Loads a `.mtx` file into a CSR graph, with `n = max(M, N)`.
pub fn load_graph(path: &Path, symmetrize: bool, drop_self_loops: bool) -> Result<CsrGraph> {
    let _timer = ScopedTimer::new("load graph");

    let file = File::open(path)?;
    let (header, edges) = read_edge_list(BufReader::new(file))?;

    log::info!(
        "{}: {} x {} matrix, {} entries{}",
        path.display(),
        header.rows,
        header.cols,
        header.entries,
        if header.symmetric { " (symmetric)" } else { "" },
    );

    Builder::new()
        .symmetrize(header.symmetric || symmetrize)
        .drop_self_loops(drop_self_loops)
        .num_nodes(header.rows.max(header.cols))
        .from_edges(&edges)
}
