// tests/unit_export.rs
use std::fs;

use taxon_core::config::{Config, ExportConfig};
use taxon_core::io::{csv, load_str};

#[test]
fn test_save_vertices_and_edges() {
    let d = tempfile::tempdir().unwrap();
    let t = load_str("1\n2;1\n3;1\n", Default::default()).unwrap();
    let config = ExportConfig::default();

    let vertices = d.path().join("vertices.csv");
    let edges = d.path().join("edges.csv");
    csv::save_vertices(&t, &config, &vertices).unwrap();
    csv::save_edges(&t, &config, &edges).unwrap();

    let v = fs::read_to_string(&vertices).unwrap();
    assert_eq!(v.lines().count(), 4);
    assert!(v.lines().nth(2).unwrap().starts_with("2;;1;"));

    let e = fs::read_to_string(&edges).unwrap();
    let rows: Vec<_> = e.lines().skip(1).collect();
    assert_eq!(rows, vec!["1;2;0;0", "1;3;0;0"]);
}

#[test]
fn test_unwritable_target_is_io_error() {
    let d = tempfile::tempdir().unwrap();
    let t = load_str("1\n", Default::default()).unwrap();
    let target = d.path().join("missing-dir").join("out.csv");
    let err = csv::save_vertices(&t, &ExportConfig::default(), &target).unwrap_err();
    assert!(matches!(err, taxon_core::TaxonomyError::Io { .. }));
}

#[test]
fn test_config_round_trip_through_file() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("taxon.toml");
    let mut config = Config::new();
    config.export.separator = ",".to_string();
    config.taxonomy.parallel_warmup = false;
    config.save(&path).unwrap();

    let loaded = Config::from_path(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_missing_config_file_gives_defaults() {
    let d = tempfile::tempdir().unwrap();
    let loaded = Config::from_path(&d.path().join("taxon.toml")).unwrap();
    assert_eq!(loaded, Config::default());
}
