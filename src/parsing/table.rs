use thiserror::Error;

use crate::utils::validation::{check_row_limit, MAX_TABLE_ROWS};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid table format: {0}")]
    InvalidFormat(String),

    #[error("Too many rows: {0} exceeds maximum allowed ({MAX_TABLE_ROWS})")]
    TooManyRows(usize),
}

/// A non-comment, non-header row of a delimited table
#[derive(Debug)]
pub struct DataLine<'a> {
    /// 1-based line number in the source text
    pub line_num: usize,
    pub fields: Vec<&'a str>,
}

impl DataLine<'_> {
    /// Field `i`, trimmed, or an error naming the line
    pub fn field(&self, i: usize, name: &str) -> Result<&str, ParseError> {
        self.fields.get(i).map(|s| s.trim()).ok_or_else(|| {
            ParseError::InvalidFormat(format!(
                "Line {} is missing the {name} column",
                self.line_num
            ))
        })
    }

    pub fn parse_u64(&self, i: usize, name: &str) -> Result<u64, ParseError> {
        let raw = self.field(i, name)?;
        raw.parse().map_err(|_| {
            ParseError::InvalidFormat(format!(
                "Invalid {name} on line {}: '{raw}'",
                self.line_num
            ))
        })
    }

    pub fn parse_f64(&self, i: usize, name: &str) -> Result<f64, ParseError> {
        let raw = self.field(i, name)?;
        raw.parse().map_err(|_| {
            ParseError::InvalidFormat(format!(
                "Invalid {name} on line {}: '{raw}'",
                self.line_num
            ))
        })
    }
}

/// Split delimited text into data lines.
///
/// Blank lines and `#` comments are skipped. Fields are split on the raw line,
/// so empty leading or trailing fields are preserved. The first remaining line is treated
/// as a header, and skipped, when its first field (case-insensitive) is one of
/// `header_keys`.
///
/// # Errors
///
/// Returns `ParseError::TooManyRows` if the table exceeds [`MAX_TABLE_ROWS`].
pub fn data_lines<'a>(
    text: &'a str,
    delimiter: char,
    header_keys: &[&str],
) -> Result<Vec<DataLine<'a>>, ParseError> {
    let mut lines = Vec::new();
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.trim_end_matches('\r').split(delimiter).collect();

        if first_data_line {
            first_data_line = false;
            let first = fields.first().map(|s| s.trim().to_lowercase()).unwrap_or_default();
            if header_keys.contains(&first.as_str()) {
                continue;
            }
        }

        if check_row_limit(lines.len()).is_some() {
            return Err(ParseError::TooManyRows(lines.len()));
        }

        lines.push(DataLine {
            line_num: i + 1,
            fields,
        });
    }

    Ok(lines)
}
