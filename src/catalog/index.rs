use std::collections::BTreeSet;

use super::store::HaplotypeCatalog;

/// Finds catalog records whose haplotype appears among candidate sequences
pub struct CandidateFinder<'a> {
    catalog: &'a HaplotypeCatalog,
}

impl<'a> CandidateFinder<'a> {
    pub fn new(catalog: &'a HaplotypeCatalog) -> Self {
        Self { catalog }
    }

    /// Look up each candidate sequence in the index.
    ///
    /// Returns record indices in catalog order, each at most once, however
    /// often a sequence repeats among the candidates.
    pub fn find_records<I, S>(&self, candidates: I) -> Vec<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut hits = BTreeSet::new();

        // Candidates of the wrong length can never hit the index
        let expected_len = self.catalog.haplotype_length();

        for candidate in candidates {
            let candidate = candidate.as_ref();
            if expected_len.is_some_and(|len| len != candidate.len()) {
                continue;
            }
            if let Some(indices) = self.catalog.sequence_to_records.get(candidate) {
                hits.extend(indices.iter().copied());
            }
        }

        hits.into_iter().collect()
    }
}
