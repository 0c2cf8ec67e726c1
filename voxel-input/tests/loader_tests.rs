use std::fs;
use tempfile::tempdir;
use voxel_input::{load_from_file, load_with_parser, DelimitedFormatParser, LoadError};

// Helper function to create the full path to test data
fn test_data_path(filename: &str) -> std::path::PathBuf {
    let mut path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(filename);
    path
}

#[test]
fn test_load_two_points() {
    let rows = load_from_file(&test_data_path("two_points.txt")).unwrap();
    assert_eq!(rows, vec![vec![1, 1, 1], vec![2, 2, 2]]);
}

#[test]
fn test_load_plus_shapes() {
    let rows = load_from_file(&test_data_path("plus_shapes.txt")).unwrap();
    assert_eq!(rows.len(), 13);
    assert!(rows.iter().all(|r| r.len() == 3));
    assert_eq!(rows[8], vec![2, 2, 6]);
}

#[test]
fn test_load_with_custom_delimiter() {
    let parser = DelimitedFormatParser::with_delimiter(';').unwrap();
    let rows = load_with_parser(&test_data_path("semicolons.txt"), &parser).unwrap();
    assert_eq!(rows, vec![vec![0, 0, 0], vec![1, 0, 0]]);
}

#[test]
fn test_load_bad_token() {
    let result = load_from_file(&test_data_path("bad_token.txt"));
    match result.err().unwrap() {
        LoadError::ParseError(msg) => {
            assert!(msg.contains("line 2"), "Error message missing line: {msg}");
            assert!(msg.contains("\"x\""), "Error message missing token: {msg}");
        }
        other => panic!("Expected ParseError for bad token, got {other:?}"),
    }
}

#[test]
fn test_load_ragged() {
    let result = load_from_file(&test_data_path("ragged.txt"));
    assert!(matches!(result, Err(LoadError::InvalidData(_))));
}

#[test]
fn test_load_empty_file() {
    let rows = load_from_file(&test_data_path("empty.txt")).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn test_load_file_not_found() {
    let path = test_data_path("non_existent_file.txt");
    match load_from_file(&path).err().unwrap() {
        LoadError::Io(_) => { /* Expected */ }
        other => panic!("Expected Io error for non-existent file, got {other:?}"),
    }
}

#[test]
fn test_load_invalid_utf8() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("binary.txt");
    fs::write(&path, [b'1', b',', 0xFF, b'\n']).unwrap();
    match load_from_file(&path).err().unwrap() {
        LoadError::ParseError(msg) => assert!(msg.contains("UTF-8")),
        other => panic!("Expected ParseError for invalid UTF-8, got {other:?}"),
    }
}

#[test]
fn test_load_negative_values_are_kept() {
    // Sign checks belong to grid construction, not loading.
    let dir = tempdir().unwrap();
    let path = dir.path().join("negative.txt");
    fs::write(&path, "-1,0,3\n").unwrap();
    assert_eq!(load_from_file(&path).unwrap(), vec![vec![-1, 0, 3]]);
}
