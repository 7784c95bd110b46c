//! Boundary Tests for egov-viewer
//!
//! 空の入力、壊れた入力、想定外のファイルが混在する入力を検証する。

use std::fs;
use std::io::Write;

use egov_viewer::{RawFileSet, ViewerBuilder, ViewerError};
use tempfile::TempDir;
use zip::write::{FileOptions, ZipWriter};

#[test]
fn test_empty_directory() {
    let dir = TempDir::new().unwrap();

    let viewer = ViewerBuilder::new().build().unwrap();
    let mut output = Vec::new();
    let summary = viewer.convert(dir.path(), &mut output).unwrap();

    assert_eq!(summary.files_loaded, 0);
    let html = String::from_utf8(output).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(!html.contains("class=\"document"));
}

#[test]
fn test_empty_zip_archive() {
    let dir = TempDir::new().unwrap();
    let zip_path = dir.path().join("EMPTY.ZIP");
    let mut zip = ZipWriter::new(fs::File::create(&zip_path).unwrap());
    zip.finish().unwrap();

    let viewer = ViewerBuilder::new().build().unwrap();
    let html = viewer.convert_to_string(&zip_path).unwrap();

    assert!(html.contains("<body>"));
    assert!(!html.contains("class=\"document"));
}

#[test]
fn test_missing_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing");

    let viewer = ViewerBuilder::new().build().unwrap();
    match viewer.convert_to_string(&missing) {
        Err(ViewerError::Stat { path, .. }) => assert_eq!(path, missing),
        other => panic!("Expected Stat error, got {:?}", other),
    }
}

#[test]
fn test_corrupted_zip_archive() {
    let dir = TempDir::new().unwrap();
    let zip_path = dir.path().join("broken.zip");
    fs::write(&zip_path, b"PK\x03\x04 definitely not a zip").unwrap();

    let viewer = ViewerBuilder::new().build().unwrap();
    let result = viewer.convert_to_string(&zip_path);

    assert!(matches!(result, Err(ViewerError::ArchiveOpen { .. })));
}

#[test]
fn test_all_xml_files_malformed() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.xml"), "<DOC><BODY>").unwrap();
    fs::write(dir.path().join("増減内訳書.xml"), "not xml at all <").unwrap();
    fs::write(dir.path().join("c.xml"), "<OTHER/>").unwrap();

    let viewer = ViewerBuilder::new().build().unwrap();
    let mut output = Vec::new();
    let summary = viewer.convert(dir.path(), &mut output).unwrap();

    assert_eq!(summary.notices, 0);
    assert_eq!(summary.breakdown_statements, 0);
    assert_eq!(summary.report.skipped_count(), 3);
}

#[test]
fn test_notice_without_body() {
    let files: RawFileSet = vec![("empty.xml", b"<DOC/>".to_vec())].into_iter().collect();

    let viewer = ViewerBuilder::new().build().unwrap();
    let mut output = Vec::new();
    let summary = viewer.convert_files(&files, &mut output).unwrap();

    assert_eq!(summary.notices, 1);
    let html = String::from_utf8(output).unwrap();
    assert!(html.contains("<h1></h1>"));
    assert!(html.contains("発信者:</span>（）"));
    assert!(!html.contains("<h2>本文</h2>"));
}

#[test]
fn test_ragged_and_empty_csv() {
    let files: RawFileSet = vec![
        ("empty.csv", Vec::new()),
        ("header_only.csv", b"a,b".to_vec()),
        ("ragged.csv", b"a,b\n1,2,3".to_vec()),
        ("stray_quote.csv", b"name,amount\nAl\"ice,1\n".to_vec()),
    ]
    .into_iter()
    .collect();

    let viewer = ViewerBuilder::new().build().unwrap();
    let mut output = Vec::new();
    let summary = viewer.convert_files(&files, &mut output).unwrap();

    assert_eq!(summary.tables, 4);
    let html = String::from_utf8(output).unwrap();
    assert!(html.contains("<h2>CSV: empty.csv</h2>"));
    assert!(html.contains("<h2>CSV: ragged.csv</h2>"));
    assert!(html.contains("<h2>CSV: stray_quote.csv</h2>"));
    assert!(!html.contains("ice</td>"));
    // ヘッダーだけの表は描画され、空・不正な表はボタンも表も出さない
    assert_eq!(html.matches("class=\"transpose-btn\"").count(), 1);
    assert!(html.contains("<th>a</th>"));
}

#[test]
fn test_case_sensitive_extensions_are_ignored() {
    let files: RawFileSet = vec![
        ("NOTICE.XML", b"<DOC/>".to_vec()),
        ("DATA.CSV", b"a\n1".to_vec()),
    ]
    .into_iter()
    .collect();

    let viewer = ViewerBuilder::new().build().unwrap();
    let mut output = Vec::new();
    let summary = viewer.convert_files(&files, &mut output).unwrap();

    assert_eq!(summary.notices, 0);
    assert_eq!(summary.tables, 0);
    assert_eq!(summary.report.unrecognized.len(), 2);
}

#[test]
fn test_zip_with_directory_entries_and_duplicate_names() {
    let dir = TempDir::new().unwrap();
    let zip_path = dir.path().join("dup.zip");
    {
        let mut zip = ZipWriter::new(fs::File::create(&zip_path).unwrap());
        zip.add_directory("a/", FileOptions::default()).unwrap();
        zip.start_file("a/data.csv", FileOptions::default()).unwrap();
        zip.write_all(b"v\nfirst").unwrap();
        zip.start_file("b/data.csv", FileOptions::default()).unwrap();
        zip.write_all(b"v\nsecond").unwrap();
        zip.finish().unwrap();
    }

    let viewer = ViewerBuilder::new().build().unwrap();
    let mut output = Vec::new();
    let summary = viewer.convert(&zip_path, &mut output).unwrap();

    // ベース名が同じファイルは後のエントリが残る
    assert_eq!(summary.files_loaded, 1);
    let html = String::from_utf8(output).unwrap();
    assert!(html.contains("<td>second</td>"));
    assert!(!html.contains("<td>first</td>"));
}
