//! Tests for split module

use super::*;
use crate::output::CreateMode;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;
use test_case::test_case;

const HEADER: &str = "report_period_start,report_period_end,pod,namespace";

fn write_csv(path: &Path, rows: &[&str]) {
    let mut body = String::from(HEADER);
    body.push('\n');
    for row in rows {
        body.push_str(row);
        body.push('\n');
    }
    fs::write(path, body).unwrap();
}

fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .unwrap();
    let header = reader.headers().unwrap().iter().map(String::from).collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    (header, rows)
}

fn rows_of(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("2020-01-01,2020-02-01,pod-{i:04},ns"))
        .collect()
}

// ============================================================================
// SizeEstimator Tests
// ============================================================================

#[test_case(&[], 0.0 ; "empty record")]
#[test_case(&["abc"], 3.09 ; "single field")]
#[test_case(&["a", "b"], 3.09 ; "delimiter counted")]
#[test_case(&["", "", ""], 2.06 ; "empty fields keep delimiters")]
#[test_case(&["héllo"], 5.15 ; "characters not bytes")]
fn test_estimate(fields: &[&str], expected: f64) {
    let estimate = SizeEstimator::new().estimate(fields.iter().copied());
    assert!((estimate - expected).abs() < 1e-9, "{estimate} != {expected}");
}

#[test]
fn test_estimate_overestimates_plain_rows() {
    let estimator = SizeEstimator::new();
    let row = "2020-01-01,2020-02-01,pod-0001,ns";
    let estimate = estimator.estimate(row.split(','));
    assert!(estimate > row.len() as f64);
    assert_eq!(estimator.variance(), SIZE_VARIANCE);
}

#[test]
fn test_estimate_custom_variance() {
    let estimate = SizeEstimator::new()
        .with_variance(0.5)
        .estimate(["abcd"].iter().copied());
    assert!((estimate - 6.0).abs() < 1e-9);
}

// ============================================================================
// Part Naming Tests
// ============================================================================

#[test_case("/batch/usage.csv", 1, "/batch/usage_1.csv" ; "simple")]
#[test_case("/batch/usage.2020.csv", 12, "/batch/usage.2020_12.csv" ; "dotted stem")]
#[test_case("/batch/usage", 3, "/batch/usage_3" ; "no extension")]
fn test_part_path(source: &str, number: usize, expected: &str) {
    assert_eq!(part_path(Path::new(source), number), PathBuf::from(expected));
}

// ============================================================================
// RecordSplitter Tests
// ============================================================================

#[test]
fn test_needs_split_at_threshold() {
    let splitter = RecordSplitter::new(100);
    assert!(!splitter.needs_split(99));
    assert!(splitter.needs_split(100));
    assert!(splitter.needs_split(101));
    assert_eq!(splitter.max_bytes(), 100);
}

#[test]
fn test_split_preserves_header_and_rows() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("usage.csv");
    let rows = rows_of(200);
    let row_refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    write_csv(&source, &row_refs);

    let outcome = RecordSplitter::new(1024).split(&source).unwrap();

    assert!(!source.exists(), "source is removed after splitting");
    assert!(!outcome.capped);
    assert!(outcome.parts.len() >= 2);
    assert_eq!(outcome.total_rows(), 200);

    let numbers: Vec<usize> = outcome.parts.iter().map(|p| p.number).collect();
    let expected: Vec<usize> = (1..=outcome.parts.len()).collect();
    assert_eq!(numbers, expected);

    let mut all_rows = Vec::new();
    for part in &outcome.parts {
        assert_eq!(part.path, part_path(&source, part.number));
        let (header, part_rows) = read_csv(&part.path);
        assert_eq!(header.join(","), HEADER);
        assert_eq!(part_rows.len() as u64, part.rows);
        all_rows.extend(part_rows.into_iter().map(|r| r.join(",")));
    }
    assert_eq!(all_rows, rows);
}

#[test]
fn test_split_parts_stay_near_threshold() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("usage.csv");
    let rows = rows_of(500);
    let row_refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    write_csv(&source, &row_refs);

    let threshold = 2048u64;
    let outcome = RecordSplitter::new(threshold).split(&source).unwrap();

    let longest_row = SizeEstimator::new().estimate(rows[0].split(','));
    for part in &outcome.parts {
        // Only the row that crossed the threshold may exceed it
        assert!(part.estimated_bytes < threshold as f64 + longest_row + 1.0);
        let on_disk = fs::metadata(&part.path).unwrap().len();
        assert!(on_disk as f64 <= threshold as f64 * 1.1 + HEADER.len() as f64);
    }
    // All parts except the last reached the threshold
    for part in &outcome.parts[..outcome.parts.len() - 1] {
        assert!(part.estimated_bytes >= threshold as f64);
    }
}

#[test]
fn test_split_keeps_crossing_row_in_current_part() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("data.csv");
    fs::write(&source, "h\naaaa\nbbbb\ncccc\n").unwrap();

    // Each row estimates to 4.12: the second row crosses 6
    let outcome = RecordSplitter::new(6).split(&source).unwrap();

    let rows: Vec<u64> = outcome.parts.iter().map(|p| p.rows).collect();
    assert_eq!(rows, vec![2, 1]);
}

#[test]
fn test_split_no_trailing_header_only_part() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("data.csv");
    fs::write(&source, "h\naaaa\nbbbb\ncccc\ndddd\n").unwrap();

    let outcome = RecordSplitter::new(8).split(&source).unwrap();

    assert_eq!(outcome.parts.len(), 2);
    assert!(!part_path(&source, 3).exists());
}

#[test]
fn test_split_header_only_source() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("empty.csv");
    fs::write(&source, "a,b,c\n").unwrap();

    let outcome = RecordSplitter::new(1).split(&source).unwrap();

    assert_eq!(outcome.parts.len(), 1);
    assert_eq!(outcome.total_rows(), 0);
    let (header, rows) = read_csv(&outcome.parts[0].path);
    assert_eq!(header, vec!["a", "b", "c"]);
    assert!(rows.is_empty());
}

#[test]
fn test_split_stops_at_part_cap() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("data.csv");
    fs::write(&source, "h\naaaa\nbbbb\ncccc\ndddd\neeee\nffff\n").unwrap();

    let outcome = RecordSplitter::new(8)
        .with_max_parts(2)
        .split(&source)
        .unwrap();

    assert!(outcome.capped);
    assert_eq!(outcome.parts.len(), 2);
    assert_eq!(outcome.total_rows(), 4);
    assert!(!part_path(&source, 3).exists());
    assert!(!source.exists());
}

#[test]
fn test_split_collision_keeps_source() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("data.csv");
    fs::write(&source, "h\naaaa\nbbbb\ncccc\ndddd\n").unwrap();
    fs::write(part_path(&source, 2), "already here").unwrap();

    let err = RecordSplitter::new(8).split(&source).unwrap_err();

    assert!(err.is_collision());
    assert!(source.exists(), "source survives a failed split");
    assert!(part_path(&source, 1).exists(), "partial parts are not rolled back");
    assert_eq!(
        fs::read_to_string(part_path(&source, 2)).unwrap(),
        "already here"
    );
}

#[test]
fn test_split_overwrite_replaces_parts() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("data.csv");
    fs::write(&source, "h\naaaa\nbbbb\n").unwrap();
    fs::write(part_path(&source, 1), "stale").unwrap();

    let outcome = RecordSplitter::new(1000)
        .with_mode(CreateMode::Overwrite)
        .split(&source)
        .unwrap();

    assert_eq!(outcome.parts.len(), 1);
    let (_, rows) = read_csv(&outcome.parts[0].path);
    assert_eq!(rows, vec![vec!["aaaa"], vec!["bbbb"]]);
}

#[test]
fn test_split_preserves_quoted_fields() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("quoted.csv");
    fs::write(
        &source,
        "name,note\n\"Smith, J\",\"line one\nline two\"\nplain,\"say \"\"hi\"\"\"\n",
    )
    .unwrap();

    let outcome = RecordSplitter::new(5).split(&source).unwrap();

    let mut rows = Vec::new();
    for part in &outcome.parts {
        rows.extend(read_csv(&part.path).1);
    }
    assert_eq!(
        rows,
        vec![
            vec!["Smith, J".to_string(), "line one\nline two".to_string()],
            vec!["plain".to_string(), "say \"hi\"".to_string()],
        ]
    );
}

#[test]
fn test_split_keeps_blank_lines_in_order() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("gaps.csv");
    fs::write(&source, "h1,h2\na,b\n\nc,d\n").unwrap();

    let outcome = RecordSplitter::new(1).split(&source).unwrap();

    assert_eq!(outcome.total_rows(), 3);
    let contents: Vec<String> = outcome
        .part_paths()
        .into_iter()
        .map(|path| fs::read_to_string(path).unwrap())
        .collect();
    assert_eq!(contents, vec!["h1,h2\na,b\n", "h1,h2\n\nc,d\n"]);
}

#[test]
fn test_split_blank_lines_crlf_trailing_and_quoted() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("gaps.csv");
    fs::write(&source, "h1,h2\r\na,b\r\n\r\n\"x\n\ny\",z\r\n\n").unwrap();

    let outcome = RecordSplitter::new(1000).split(&source).unwrap();

    assert_eq!(outcome.parts.len(), 1);
    assert_eq!(outcome.total_rows(), 4);
    assert_eq!(
        fs::read_to_string(&outcome.parts[0].path).unwrap(),
        "h1,h2\na,b\n\n\"x\n\ny\",z\n\n"
    );
}

#[test]
fn test_split_blank_lines_add_nothing_to_estimate() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("gaps.csv");
    fs::write(&source, "h\naaaa\n\n\nbbbb\ncccc\n").unwrap();

    let outcome = RecordSplitter::new(8)
        .with_estimator(SizeEstimator::new().with_variance(0.0))
        .split(&source)
        .unwrap();

    let rows: Vec<u64> = outcome.parts.iter().map(|p| p.rows).collect();
    assert_eq!(rows, vec![4, 1]);
    assert_eq!(outcome.parts[0].estimated_bytes, 8.0);
}

#[test]
fn test_split_empty_source_is_error() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("blank.csv");
    fs::write(&source, "").unwrap();

    let err = RecordSplitter::new(1).split(&source).unwrap_err();
    assert!(matches!(err, crate::Error::Split { .. }));
    assert!(source.exists());
}

// ============================================================================
// ThresholdEvaluator Tests
// ============================================================================

#[test]
fn test_threshold_under_limit() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.csv"), vec![b'x'; 30]).unwrap();
    fs::write(dir.path().join("b.csv"), vec![b'x'; 30]).unwrap();

    assert!(!ThresholdEvaluator::new(100).is_oversized(dir.path()).unwrap());
}

#[test]
fn test_threshold_single_file_at_limit() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.csv"), vec![b'x'; 100]).unwrap();

    assert!(ThresholdEvaluator::new(100).is_oversized(dir.path()).unwrap());
}

#[test]
fn test_threshold_total_reaches_limit() {
    let dir = tempdir().unwrap();
    for name in ["a.csv", "b.csv", "c.csv"] {
        fs::write(dir.path().join(name), vec![b'x'; 40]).unwrap();
    }

    assert!(ThresholdEvaluator::new(100).is_oversized(dir.path()).unwrap());
}

#[test]
fn test_threshold_empty_and_missing_dirs() {
    let dir = tempdir().unwrap();
    let evaluator = ThresholdEvaluator::new(1);

    assert!(!evaluator.is_oversized(dir.path()).unwrap());
    assert!(!evaluator.is_oversized(&dir.path().join("absent")).unwrap());
}
