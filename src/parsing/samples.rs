use std::path::{Path, PathBuf};

use crate::parsing::table::{data_lines, ParseError};
use crate::utils::validation::read_text;

/// One sample of a batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleEntry {
    pub id: String,
    pub allele_counts: PathBuf,
    pub geo_evidence: Option<PathBuf>,
}

/// Parse a sample sheet, resolving relative paths against the sheet's directory.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_sample_sheet_file(path: &Path) -> Result<Vec<SampleEntry>, ParseError> {
    let content = read_text(path)?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    parse_sample_sheet_text(&content, base)
}

/// Parse sample sheet rows: `id  allele_counts  [geo_evidence]`.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` on short rows, duplicate sample ids, or
/// an empty sheet.
pub fn parse_sample_sheet_text(text: &str, base: &Path) -> Result<Vec<SampleEntry>, ParseError> {
    let mut samples: Vec<SampleEntry> = Vec::new();

    for line in data_lines(text, '\t', &["id", "sample"])? {
        if line.fields.len() < 2 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {} has fewer than 2 fields",
                line.line_num
            )));
        }

        let id = line.field(0, "id")?.to_string();
        if samples.iter().any(|s| s.id == id) {
            return Err(ParseError::InvalidFormat(format!(
                "Duplicate sample id '{id}' on line {}",
                line.line_num
            )));
        }

        let allele_counts = base.join(line.field(1, "allele_counts")?);
        let geo_evidence = line
            .fields
            .get(2)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| base.join(s));

        samples.push(SampleEntry {
            id,
            allele_counts,
            geo_evidence,
        });
    }

    if samples.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No samples found in sample sheet".to_string(),
        ));
    }

    Ok(samples)
}
