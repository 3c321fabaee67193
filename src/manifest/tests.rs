//! Tests for manifest module

use super::*;
use crate::output::CreateMode;
use chrono::{NaiveDateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;
use uuid::Uuid;

const CLUSTER_ID: &str = "bbb0b82b-e40d-41eb-8354-e07bc6a26a38";

fn fixed_identity() -> BatchIdentity {
    let uuid = Uuid::parse_str("5a2d6a1e-94cb-4d0b-9a43-2a4d5d2f9e10").unwrap();
    let at = Utc.with_ymd_and_hms(2020, 3, 4, 5, 6, 7).unwrap();
    BatchIdentity::from_parts(uuid, at)
}

// ============================================================================
// BatchIdentity Tests
// ============================================================================

#[test]
fn test_identity_generate_is_v4() {
    let identity = BatchIdentity::generate();
    assert_eq!(identity.uuid().get_version_num(), 4);
    assert_ne!(identity.uuid(), BatchIdentity::generate().uuid());
}

#[test]
fn test_identity_date_format() {
    assert_eq!(fixed_identity().date_string(), "2020-03-04T05:06:07.000000");
}

#[test]
fn test_identity_date_parses_back() {
    let identity = BatchIdentity::generate();
    let parsed = NaiveDateTime::parse_from_str(&identity.date_string(), MANIFEST_DATE_FORMAT)
        .unwrap();
    assert_eq!(parsed.and_utc().timestamp(), identity.generated_at().timestamp());
}

// ============================================================================
// Manifest Tests
// ============================================================================

#[test]
fn test_manifest_json_layout() {
    let manifest = Manifest::new(&fixed_identity(), CLUSTER_ID, vec!["a.csv".to_string()]);
    let json = manifest.to_json().unwrap();

    assert_eq!(
        json,
        format!(
            r#"{{"files":["a.csv"],"date":"2020-03-04T05:06:07.000000","uuid":"5a2d6a1e-94cb-4d0b-9a43-2a4d5d2f9e10","cluster_id":"{CLUSTER_ID}"}}"#
        )
    );
}

// ============================================================================
// ManifestBuilder Tests
// ============================================================================

#[test]
fn test_build_lists_files_without_manifest() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.csv"), "x").unwrap();
    fs::write(dir.path().join("a.csv"), "x").unwrap();
    fs::write(dir.path().join("manifest.json"), "{}").unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();

    let manifest = ManifestBuilder::new(fixed_identity(), CLUSTER_ID)
        .build(dir.path())
        .unwrap();

    assert_eq!(manifest.files, vec!["a.csv", "b.csv"]);
    assert_eq!(manifest.cluster_id, CLUSTER_ID);
}

#[test]
fn test_write_manifest() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("usage_1.csv"), "x").unwrap();
    fs::write(dir.path().join("usage_2.csv"), "x").unwrap();

    let (path, manifest) = ManifestBuilder::new(fixed_identity(), CLUSTER_ID)
        .write(dir.path())
        .unwrap();

    assert_eq!(path, dir.path().join("manifest.json"));
    assert_eq!(Manifest::from_path(&path).unwrap(), manifest);

    let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    for key in ["files", "date", "uuid", "cluster_id"] {
        assert!(raw.get(key).is_some(), "missing {key}");
    }
    assert_eq!(raw["files"], serde_json::json!(["usage_1.csv", "usage_2.csv"]));
}

#[test]
fn test_write_creates_missing_directory() {
    let dir = tempdir().unwrap();
    let batch = dir.path().join("collect").join(CLUSTER_ID);

    let (path, manifest) = ManifestBuilder::new(fixed_identity(), CLUSTER_ID)
        .write(&batch)
        .unwrap();

    assert!(batch.is_dir());
    assert!(path.is_file());
    assert!(manifest.files.is_empty());
}

#[test]
fn test_write_refuses_existing_manifest() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("manifest.json");
    fs::write(&path, "previous").unwrap();

    let err = ManifestBuilder::new(fixed_identity(), CLUSTER_ID)
        .write(dir.path())
        .unwrap_err();

    assert!(err.is_collision());
    assert_eq!(fs::read_to_string(&path).unwrap(), "previous");
}

#[test]
fn test_write_overwrites_when_requested() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("manifest.json");
    fs::write(&path, "previous").unwrap();

    ManifestBuilder::new(fixed_identity(), CLUSTER_ID)
        .with_mode(CreateMode::Overwrite)
        .write(dir.path())
        .unwrap();

    let manifest = Manifest::from_path(&path).unwrap();
    assert_eq!(manifest.uuid, fixed_identity().uuid());
    assert!(manifest.files.is_empty());
}
