//! Centralized limits and input helpers.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

/// Maximum number of data rows accepted from any single input table
pub const MAX_TABLE_ROWS: usize = 1_000_000;

/// Hard upper bound on the configurable expansion cap (4^15 ≈ 1.07e9 candidates)
pub const MAX_AMBIGUOUS_CEILING: usize = 15;

/// Check if adding another row would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new row.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_row_limit(count: usize) -> Option<String> {
    if count >= MAX_TABLE_ROWS {
        Some(format!(
            "Too many rows: adding another would exceed maximum of {MAX_TABLE_ROWS}"
        ))
    } else {
        None
    }
}

/// Whether the path names a gzip-compressed file
pub fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz") || e.eq_ignore_ascii_case("bgz"))
}

/// Read a whole text file, transparently decompressing `.gz`/`.bgz`.
///
/// Every gzip member is decoded, so concatenated and BGZF files are read in full.
///
/// # Errors
///
/// Returns any I/O or decompression error.
pub fn read_text(path: &Path) -> std::io::Result<String> {
    let file = File::open(path)?;
    let mut reader: Box<dyn Read> = if is_gzipped(path) {
        Box::new(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    Ok(content)
}

/// Split a comma-separated CLI list, dropping empty entries
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
