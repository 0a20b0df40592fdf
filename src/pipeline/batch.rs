use rayon::prelude::*;
use tracing::{info, warn};

use crate::parsing::evidence::{parse_allele_counts_file, parse_geo_evidence_file};
use crate::parsing::samples::SampleEntry;
use crate::parsing::ParseError;
use crate::pipeline::profile::{Profiler, SampleInput, SampleOutcome};

/// Read a sample's allele counts and, if listed, its geographic evidence
///
/// # Errors
///
/// Returns the first read or parse failure.
pub fn load_sample(entry: &SampleEntry) -> Result<SampleInput, ParseError> {
    let allele_counts = parse_allele_counts_file(&entry.allele_counts)?;
    let mut sample = SampleInput::new(entry.id.clone(), allele_counts);
    if let Some(path) = &entry.geo_evidence {
        sample = sample.with_geo_evidence(parse_geo_evidence_file(path)?);
    }
    Ok(sample)
}

/// Load and profile every sample of a sheet in parallel.
///
/// A sample whose files cannot be read is reported as failed, exactly like a
/// sample that fails profiling. Outcomes are returned in sheet order.
pub fn profile_entries(profiler: &Profiler<'_>, entries: &[SampleEntry]) -> Vec<SampleOutcome> {
    let outcomes: Vec<SampleOutcome> = entries
        .par_iter()
        .map(|entry| match load_sample(entry) {
            Ok(sample) => profiler.outcome(&entry.id, profiler.profile(&sample)),
            Err(e) => {
                warn!(sample = %entry.id, error = %e, "Sample failed to load");
                SampleOutcome::Failed {
                    id: entry.id.clone(),
                    reason: format!("Failed to load sample: {e}"),
                }
            }
        })
        .collect();

    let profiled = outcomes.iter().filter(|o| o.profile().is_some()).count();
    info!(
        samples = entries.len(),
        profiled,
        failed = entries.len() - profiled,
        "Profiled sample sheet"
    );
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::HaplotypeCatalog;
    use crate::core::config::ProfilerConfig;
    use crate::core::types::{Position, RegionRule};
    use std::fs;

    #[test]
    fn test_profile_entries_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let counts = dir.path().join("s1.counts.tsv");
        fs::write(&counts, "chr1\t100\tA\t20\nchr1\t200\tC\t20\n").unwrap();
        let geo = dir.path().join("s1.geo.tsv");
        fs::write(&geo, "West\tm1\t4\n").unwrap();

        let entries = vec![
            SampleEntry {
                id: "S1".to_string(),
                allele_counts: counts,
                geo_evidence: Some(geo),
            },
            SampleEntry {
                id: "S2".to_string(),
                allele_counts: dir.path().join("absent.tsv"),
                geo_evidence: None,
            },
        ];

        let catalog =
            HaplotypeCatalog::from_delimited_text("haplotype,West\nAC,1.0\n", b',').unwrap();
        let positions = vec![Position::new("chr1", 100), Position::new("chr1", 200)];
        let profiler = Profiler::new(positions, &catalog, &ProfilerConfig::default())
            .unwrap()
            .with_region_rules(vec![RegionRule::new("West", 4)])
            .unwrap();

        let outcomes = profile_entries(&profiler, &entries);
        let profile = outcomes[0].profile().unwrap();
        assert_eq!(profile.barcode.to_string(), "AC");
        assert_eq!(profile.haplotype_matches.haplotypes(), &["AC"]);
        assert_eq!(profile.geoclassification.as_ref().unwrap().regions, vec!["West"]);

        match &outcomes[1] {
            SampleOutcome::Failed { id, reason } => {
                assert_eq!(id, "S2");
                assert!(reason.starts_with("Failed to load sample"));
            }
            SampleOutcome::Profiled(_) => panic!("expected load failure"),
        }
    }
}
