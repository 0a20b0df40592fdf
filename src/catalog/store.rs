use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::core::haplotype::HaplotypeRecord;
use crate::core::types::ConsensusSymbol;
use crate::utils::validation::{check_row_limit, is_gzipped, read_text, MAX_TABLE_ROWS};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Failed to parse catalog table: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid catalog: {0}")]
    InvalidFormat(String),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Column holding the haplotype sequence
pub const HAPLOTYPE_COLUMN: &str = "haplotype";

/// Metadata columns that are not category weights
pub const METADATA_COLUMNS: &[&str] = &["nsamples", "n_samples", "sample_count"];

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    pub records: Vec<HaplotypeRecord>,
}

/// The haplotype catalogue with a sequence index
#[derive(Debug, Default)]
pub struct HaplotypeCatalog {
    /// All records, in source order
    pub records: Vec<HaplotypeRecord>,

    /// Category labels in first-seen column order
    categories: Vec<String>,

    /// Index: haplotype sequence -> indices of records carrying it
    pub sequence_to_records: HashMap<String, Vec<usize>>,

    /// Length shared by every haplotype
    haplotype_length: Option<usize>,
}

impl HaplotypeCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog, choosing the format from the file name.
    ///
    /// `.json` files are read as exported catalogs, `.csv` as comma-separated
    /// tables, and anything else as tab-separated. A compression suffix
    /// (`.gz`, `.bgz`) is ignored for format detection.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = read_text(path)?;
        let name = if is_gzipped(path) {
            path.file_stem()
        } else {
            path.file_name()
        }
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();

        let catalog = if name.ends_with(".json") {
            Self::from_json(&content)?
        } else if name.ends_with(".csv") {
            Self::from_delimited_text(&content, b',')?
        } else {
            Self::from_delimited_text(&content, b'\t')?
        };

        info!(
            path = %path.display(),
            records = catalog.len(),
            categories = catalog.categories.len(),
            "Loaded haplotype catalog"
        );
        Ok(catalog)
    }

    /// Parse a delimited table with a `haplotype` column, one weight column per
    /// category, and optional metadata columns (e.g. `nsamples`).
    ///
    /// Fields may be quoted, lines starting with `#` are comments, and every
    /// row must have as many fields as the header.
    pub fn from_delimited_text(text: &str, delimiter: u8) -> Result<Self, CatalogError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(false)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if header.is_empty() {
            return Err(CatalogError::InvalidFormat("Catalog is empty".to_string()));
        }

        let haplotype_col = header
            .iter()
            .position(|h| h.eq_ignore_ascii_case(HAPLOTYPE_COLUMN))
            .ok_or_else(|| {
                CatalogError::InvalidFormat(format!(
                    "Catalog header has no '{HAPLOTYPE_COLUMN}' column"
                ))
            })?;
        let metadata_col = header
            .iter()
            .position(|h| METADATA_COLUMNS.contains(&h.to_lowercase().as_str()));

        let mut catalog = Self::new();

        for result in reader.records() {
            let row = result?;
            if check_row_limit(catalog.len()).is_some() {
                return Err(CatalogError::InvalidFormat(format!(
                    "Catalog exceeds the maximum of {MAX_TABLE_ROWS} rows"
                )));
            }
            let line = row.position().map_or(0, csv::Position::line);

            let mut record = HaplotypeRecord::new(&row[haplotype_col]);
            for (i, column) in header.iter().enumerate() {
                if i == haplotype_col {
                    continue;
                }
                let raw = &row[i];
                if Some(i) == metadata_col {
                    if !raw.is_empty() {
                        record.nsamples = Some(parse_field(raw, column, line)?);
                    }
                    continue;
                }
                record.weights.push((column.clone(), parse_field(raw, column, line)?));
            }

            catalog.add_record(record)?;
        }

        Ok(catalog)
    }

    /// Parse catalog from JSON string
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            warn!(
                expected = CATALOG_VERSION,
                found = %data.version,
                "Catalog version mismatch"
            );
        }

        let mut catalog = Self::new();
        for record in data.records {
            catalog.add_record(record)?;
        }

        Ok(catalog)
    }

    /// Add a record, indexing it by sequence.
    ///
    /// Haplotypes must be non-empty strings over A/C/G/T, all of the same length.
    pub fn add_record(&mut self, mut record: HaplotypeRecord) -> Result<(), CatalogError> {
        record.haplotype = record.haplotype.to_ascii_uppercase();
        let valid = !record.haplotype.is_empty()
            && record
                .haplotype
                .chars()
                .all(|c| ConsensusSymbol::from_char(c).is_some_and(ConsensusSymbol::is_nucleotide));
        if !valid {
            return Err(CatalogError::InvalidFormat(format!(
                "Haplotype '{}' must contain only A, C, G and T",
                record.haplotype
            )));
        }

        let length = record.haplotype.len();
        match self.haplotype_length {
            Some(expected) if expected != length => {
                return Err(CatalogError::InvalidFormat(format!(
                    "Haplotype '{}' has length {length}, expected {expected}",
                    record.haplotype
                )));
            }
            _ => self.haplotype_length = Some(length),
        }

        for (category, _) in &record.weights {
            if !self.categories.contains(category) {
                self.categories.push(category.clone());
            }
        }

        let index = self.records.len();
        self.sequence_to_records
            .entry(record.haplotype.clone())
            .or_default()
            .push(index);
        self.records.push(record);
        Ok(())
    }

    /// Records carrying an exact haplotype sequence
    pub fn get(&self, haplotype: &str) -> Vec<&HaplotypeRecord> {
        self.sequence_to_records
            .get(haplotype)
            .map(|indices| indices.iter().map(|&i| &self.records[i]).collect())
            .unwrap_or_default()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Barcode length the catalog expects, if it has any records
    pub fn haplotype_length(&self) -> Option<usize> {
        self.haplotype_length
    }

    /// Export catalog to JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            records: self.records.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of records in catalog
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn parse_field<T: std::str::FromStr>(raw: &str, column: &str, line: u64) -> Result<T, CatalogError> {
    raw.parse().map_err(|_| {
        CatalogError::InvalidFormat(format!("Invalid {column} on line {line}: '{raw}'"))
    })
}
