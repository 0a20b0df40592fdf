use std::path::Path;

use crate::core::types::RegionRule;
use crate::parsing::table::{data_lines, ParseError};
use crate::utils::validation::read_text;

/// Parse a region threshold file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_rules_file(path: &Path) -> Result<Vec<RegionRule>, ParseError> {
    let content = read_text(path)?;
    parse_rules_text(&content)
}

/// Parse region rules, one per row, in file order.
///
/// Two layouts are accepted, per row:
///
/// | Columns | Region column | Threshold column |
/// |---------|---------------|------------------|
/// | 2       | 1             | 2                |
/// | ≥ 6     | 4             | 6                |
///
/// The second is the combined barcode BED (`chrom start end region allele threshold`),
/// which repeats a region's rule on every one of its marker rows. Repeats are
/// returned as-is and collapsed by the classifier.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` for rows with 3–5 columns, non-numeric
/// thresholds, or a file without rules.
pub fn parse_rules_text(text: &str) -> Result<Vec<RegionRule>, ParseError> {
    let mut rules = Vec::new();

    for line in data_lines(text, '\t', &["region", "chrom"])? {
        let rule = match line.fields.len() {
            2 => RegionRule::new(line.field(0, "region")?, line.parse_u64(1, "threshold")?),
            n if n >= 6 => {
                RegionRule::new(line.field(3, "region")?, line.parse_u64(5, "threshold")?)
            }
            n => {
                return Err(ParseError::InvalidFormat(format!(
                    "Line {} has {n} fields; expected 2 (region, threshold) or at least 6 (barcode BED)",
                    line.line_num
                )))
            }
        };
        rules.push(rule);
    }

    if rules.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No region rules found in file".to_string(),
        ));
    }

    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_column_rules() {
        let text = "region\tthreshold\nWest\t5\nEast\t3\n";
        let rules = parse_rules_text(text).unwrap();
        assert_eq!(rules, vec![RegionRule::new("West", 5), RegionRule::new("East", 3)]);
    }

    #[test]
    fn test_parse_barcode_bed_rules() {
        let text = "chr1\t99\t100\tWest\tA\t5\n\
                    chr1\t199\t200\tWest\tG\t5\n\
                    chr2\t9\t10\tEast\tT\t2\n";
        let rules = parse_rules_text(text).unwrap();
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0], rules[1]);
        assert_eq!(rules[2], RegionRule::new("East", 2));
    }

    #[test]
    fn test_rejects_ambiguous_layout() {
        let err = parse_rules_text("chr1\t99\t100\tWest\n").unwrap_err();
        assert!(err.to_string().contains("has 4 fields"));
    }

    #[test]
    fn test_rejects_negative_threshold() {
        assert!(parse_rules_text("West\t-1\n").is_err());
    }
}
