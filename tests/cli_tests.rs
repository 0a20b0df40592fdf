//! End-to-end tests for the geo-profiler command-line interface.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const POSITIONS: &str = "chr1\t99\t100\nchr1\t199\t200\n";
const CATALOG: &str = "haplotype,West,East,nsamples\nAA,0.9,0.1,10\nAC,0.0,1.0,3\nGG,1.0,0.0,1\n";
const RULES: &str = "West\t5\nEast\t5\n";

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("Failed to write fixture");
    path
}

fn fixture() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write(dir.path(), "barcode.bed", POSITIONS);
    write(dir.path(), "haplotypes.csv", CATALOG);
    write(dir.path(), "rules.tsv", RULES);
    // First position calls A; second is an even A/C split and becomes N
    write(
        dir.path(),
        "s1.counts.tsv",
        "chrom\tpos\tallele\tcount\nchr1\t100\tA\t15\nchr1\t100\tG\t2\nchr1\t200\tA\t3\nchr1\t200\tC\t3\n",
    );
    write(
        dir.path(),
        "s2.counts.tsv",
        "chr1\t100\tG\t30\nchr1\t200\tG\t30\n",
    );
    dir
}

fn geo_profiler() -> Command {
    Command::cargo_bin("geo-profiler").expect("binary should be built")
}

#[test]
fn test_barcode_with_ambiguous_position_matches_two_haplotypes() {
    let dir = fixture();
    geo_profiler()
        .current_dir(dir.path())
        .args([
            "barcode",
            "--positions",
            "barcode.bed",
            "--catalog",
            "haplotypes.csv",
            "s1.counts.tsv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Barcode: AN"))
        .stdout(predicate::str::contains("Matching haplotypes: 2"))
        .stdout(predicate::str::contains("AA"))
        .stdout(predicate::str::contains("AC"));
}

#[test]
fn test_barcode_tsv_omits_zero_weights() {
    let dir = fixture();
    let output = geo_profiler()
        .current_dir(dir.path())
        .args([
            "--format",
            "tsv",
            "barcode",
            "--positions",
            "barcode.bed",
            "--catalog",
            "haplotypes.csv",
            "s1.counts.tsv",
        ])
        .output()
        .expect("Failed to run");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows: Vec<&str> = stdout.lines().skip(1).collect();
    assert_eq!(rows.len(), 3);
    assert!(rows.contains(&"sample\tAN\tAA\tWest\t0.9"));
    assert!(rows.contains(&"sample\tAN\tAA\tEast\t0.1"));
    assert!(rows.contains(&"sample\tAN\tAC\tEast\t1"));
}

#[test]
fn test_barcode_json_reports_no_match() {
    let dir = fixture();
    write(dir.path(), "tt.counts.tsv", "chr1\t100\tT\t20\nchr1\t200\tT\t20\n");
    geo_profiler()
        .current_dir(dir.path())
        .args([
            "--format",
            "json",
            "barcode",
            "--positions",
            "barcode.bed",
            "--catalog",
            "haplotypes.csv",
            "tt.counts.tsv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"barcode\": \"TT\""))
        .stdout(predicate::str::contains("\"status\": \"no_match\""));
}

#[test]
fn test_barcode_missing_position_fails() {
    let dir = fixture();
    write(dir.path(), "short.counts.tsv", "chr1\t100\tA\t20\n");
    geo_profiler()
        .current_dir(dir.path())
        .args([
            "barcode",
            "--positions",
            "barcode.bed",
            "--catalog",
            "haplotypes.csv",
            "short.counts.tsv",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("chr1:200"));
}

#[test]
fn test_barcode_expansion_limit() {
    let dir = fixture();
    write(dir.path(), "low.counts.tsv", "chr1\t100\tA\t2\nchr1\t200\tA\t2\n");
    geo_profiler()
        .current_dir(dir.path())
        .args([
            "barcode",
            "--positions",
            "barcode.bed",
            "--catalog",
            "haplotypes.csv",
            "--max-ambiguous",
            "1",
            "low.counts.tsv",
        ])
        .assert()
        .failure();
}

#[test]
fn test_region_unassigned_when_nothing_passes() {
    let dir = fixture();
    write(dir.path(), "weak.geo.tsv", "West\tm1\t2\nEast\tm2\t4\n");
    geo_profiler()
        .current_dir(dir.path())
        .args([
            "region",
            "--rules",
            "rules.tsv",
            "--priority",
            "West,East",
            "weak.geo.tsv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Region: Unassigned"));
}

#[test]
fn test_region_tsv_reports_unassigned() {
    let dir = fixture();
    write(dir.path(), "weak.geo.tsv", "West\tm1\t2\nEast\tm2\t4\n");
    let output = geo_profiler()
        .current_dir(dir.path())
        .args([
            "--format",
            "tsv",
            "region",
            "--rules",
            "rules.tsv",
            "--priority",
            "West,East",
            "weak.geo.tsv",
        ])
        .output()
        .expect("Failed to run");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines[0],
        "region\tthreshold\tsupport\tpassed\tassigned\tclassification"
    );
    assert_eq!(lines[1], "West\t5\t2\tfalse\tfalse\tUnassigned");
    assert_eq!(lines[2], "East\t5\t4\tfalse\tfalse\tUnassigned");
}

#[test]
fn test_region_without_priority_reports_passing_as_is() {
    let dir = fixture();
    write(dir.path(), "weak.geo.tsv", "West\tm1\t2\n");
    geo_profiler()
        .current_dir(dir.path())
        .args(["region", "--rules", "rules.tsv", "weak.geo.tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Region: none"));

    write(dir.path(), "both.geo.tsv", "West\tm1\t5\nEast\tm2\t6\n");
    geo_profiler()
        .current_dir(dir.path())
        .args(["region", "--rules", "rules.tsv", "both.geo.tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Region: West, East"));
}

#[test]
fn test_region_threshold_is_inclusive() {
    let dir = fixture();
    write(dir.path(), "west.geo.tsv", "West\tm1\t3\nWest\tm2\t2\nEast\tm3\t1\n");
    geo_profiler()
        .current_dir(dir.path())
        .args(["region", "--rules", "rules.tsv", "west.geo.tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Region: West"));
}

#[test]
fn test_region_tie_uses_priority() {
    let dir = fixture();
    write(dir.path(), "both.geo.tsv", "West\tm1\t5\nEast\tm2\t6\n");
    geo_profiler()
        .current_dir(dir.path())
        .args([
            "region",
            "--rules",
            "rules.tsv",
            "--priority",
            "East,West",
            "both.geo.tsv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Region: East"));
}

#[test]
fn test_region_tie_without_priority_fails() {
    let dir = fixture();
    write(dir.path(), "both.geo.tsv", "West\tm1\t5\nEast\tm2\t6\n");
    geo_profiler()
        .current_dir(dir.path())
        .args(["region", "--rules", "rules.tsv", "--priority", "East", "both.geo.tsv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("West"));
}

#[test]
fn test_profile_batch_isolates_failed_sample() {
    let dir = fixture();
    write(dir.path(), "s1.geo.tsv", "West\tm1\t6\n");
    write(
        dir.path(),
        "samples.tsv",
        "id\tallele_counts\tgeo_evidence\nS1\ts1.counts.tsv\ts1.geo.tsv\nS2\tabsent.tsv\t\nS3\ts2.counts.tsv\t\n",
    );

    geo_profiler()
        .current_dir(dir.path())
        .args([
            "--format",
            "tsv",
            "profile",
            "--positions",
            "barcode.bed",
            "--catalog",
            "haplotypes.csv",
            "--rules",
            "rules.tsv",
            "samples.tsv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("S1\tAN\t1\tAA,AC\tWest"))
        .stdout(predicate::str::contains("S3\tGG\t0\tGG\t"))
        .stdout(predicate::str::contains("S2").not())
        .stderr(predicate::str::contains("Sample failed to load"))
        .stderr(predicate::str::contains("Sample 'S2' failed"));
}

#[test]
fn test_profile_strict_fails_on_any_sample() {
    let dir = fixture();
    write(dir.path(), "samples.tsv", "S1\ts1.counts.tsv\nS2\tabsent.tsv\n");

    geo_profiler()
        .current_dir(dir.path())
        .args([
            "profile",
            "--positions",
            "barcode.bed",
            "--catalog",
            "haplotypes.csv",
            "--strict",
            "samples.tsv",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 2 samples failed"));
}

#[test]
fn test_profile_json_includes_timestamp() {
    let dir = fixture();
    write(dir.path(), "samples.tsv", "S1\ts1.counts.tsv\n");

    geo_profiler()
        .current_dir(dir.path())
        .args([
            "--format",
            "json",
            "profile",
            "--positions",
            "barcode.bed",
            "--catalog",
            "haplotypes.csv",
            "samples.tsv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"generated_at\""))
        .stdout(predicate::str::contains("\"status\": \"profiled\""));
}

#[test]
fn test_catalog_export_round_trips_through_json() {
    let dir = fixture();
    geo_profiler()
        .current_dir(dir.path())
        .args(["catalog", "export", "catalog.json", "--catalog", "haplotypes.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 haplotypes"));

    geo_profiler()
        .current_dir(dir.path())
        .args(["catalog", "show", "ac", "--catalog", "catalog.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Haplotype: AC"))
        .stdout(predicate::str::contains("Samples:   3"));
}

#[test]
fn test_catalog_show_unknown_haplotype() {
    let dir = fixture();
    geo_profiler()
        .current_dir(dir.path())
        .args(["catalog", "show", "TT", "--catalog", "haplotypes.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
