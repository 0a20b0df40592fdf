use std::path::Path;

use crate::core::evidence::{EvidenceTable, GeoEvidenceRow};
use crate::core::types::Position;
use crate::parsing::table::{data_lines, ParseError};
use crate::utils::validation::read_text;

/// Parse an allele count file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_allele_counts_file(path: &Path) -> Result<EvidenceTable, ParseError> {
    let content = read_text(path)?;
    parse_allele_counts_text(&content)
}

/// Parse allele counts in long format: `chrom  pos  allele  count`.
///
/// Allele order within a position follows the file. An empty file is valid and
/// yields an empty table.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` on short rows, empty alleles, or
/// non-numeric positions and counts.
pub fn parse_allele_counts_text(text: &str) -> Result<EvidenceTable, ParseError> {
    let mut table = EvidenceTable::new();

    for line in data_lines(text, '\t', &["chrom", "chr"])? {
        if line.fields.len() < 4 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {} has fewer than 4 fields",
                line.line_num
            )));
        }

        let chrom = line.field(0, "chrom")?;
        let pos = line.parse_u64(1, "position")?;
        let allele = line.field(2, "allele")?;
        if allele.is_empty() {
            return Err(ParseError::InvalidFormat(format!(
                "Empty allele on line {}",
                line.line_num
            )));
        }
        let count = line.parse_u64(3, "count")?;

        table.add(Position::new(chrom, pos), allele, count);
    }

    Ok(table)
}

/// Parse a geographic evidence file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_geo_evidence_file(path: &Path) -> Result<Vec<GeoEvidenceRow>, ParseError> {
    let content = read_text(path)?;
    parse_geo_evidence_text(&content)
}

/// Parse geographic evidence rows: `region  marker  support`.
///
/// Support may be an integer or a float but must be finite and non-negative.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` on short rows or invalid support values.
pub fn parse_geo_evidence_text(text: &str) -> Result<Vec<GeoEvidenceRow>, ParseError> {
    let mut rows = Vec::new();

    for line in data_lines(text, '\t', &["region"])? {
        if line.fields.len() < 3 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {} has fewer than 3 fields",
                line.line_num
            )));
        }

        let support = line.parse_f64(2, "support")?;
        if !support.is_finite() || support < 0.0 {
            return Err(ParseError::InvalidFormat(format!(
                "Support must be a non-negative number on line {}",
                line.line_num
            )));
        }

        rows.push(GeoEvidenceRow::new(
            line.field(0, "region")?,
            line.field(1, "marker")?,
            support,
        ));
    }

    Ok(rows)
}
