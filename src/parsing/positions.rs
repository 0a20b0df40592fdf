use std::path::Path;

use crate::core::types::Position;
use crate::parsing::table::{data_lines, ParseError};
use crate::utils::validation::read_text;

/// Parse a barcode position file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_positions_file(path: &Path) -> Result<Vec<Position>, ParseError> {
    let content = read_text(path)?;
    parse_positions_text(&content)
}

/// Parse barcode positions in file order.
///
/// Rows are BED-like (`chrom  start  end  ...`) and the barcode offset is taken
/// from the `end` column. Two-column rows (`chrom  pos`) are also accepted.
/// Duplicates are kept so that they can be reported as a configuration error.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` on short rows or non-numeric offsets,
/// or if no positions are found.
pub fn parse_positions_text(text: &str) -> Result<Vec<Position>, ParseError> {
    let mut positions = Vec::new();

    for line in data_lines(text, '\t', &["chrom", "chr", "chromosome"])? {
        let chrom = line.field(0, "chrom")?;
        let pos = match line.fields.len() {
            0 | 1 => {
                return Err(ParseError::InvalidFormat(format!(
                    "Line {} has fewer than 2 fields",
                    line.line_num
                )))
            }
            2 => line.parse_u64(1, "position")?,
            _ => line.parse_u64(2, "end")?,
        };
        positions.push(Position::new(chrom, pos));
    }

    if positions.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No barcode positions found in file".to_string(),
        ));
    }

    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bed_positions() {
        let bed = "Pf3D7_01_v3\t145514\t145515\tAfrica\tA\t5\n\
                   Pf3D7_02_v3\t200\t201\tAsia\tG\t3\n";
        let positions = parse_positions_text(bed).unwrap();
        assert_eq!(
            positions,
            vec![
                Position::new("Pf3D7_01_v3", 145_515),
                Position::new("Pf3D7_02_v3", 201)
            ]
        );
    }

    #[test]
    fn test_parse_two_column_positions() {
        let text = "chrom\tpos\nchr1\t100\nchr1\t200\n";
        let positions = parse_positions_text(text).unwrap();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[1], Position::new("chr1", 200));
    }

    #[test]
    fn test_keeps_file_order_and_duplicates() {
        let text = "chr2\t5\nchr1\t9\nchr2\t5\n";
        let positions = parse_positions_text(text).unwrap();
        assert_eq!(positions.len(), 3);
        assert_eq!(positions[0], positions[2]);
    }

    #[test]
    fn test_rejects_bad_rows() {
        assert!(parse_positions_text("chr1\n").is_err());
        assert!(parse_positions_text("chr1\t10\tnot_a_number\n").is_err());
        assert!(parse_positions_text("# only comments\n").is_err());
    }
}
