//! Tests for CSV dataset reading.

use std::fs;
use std::path::{Path, PathBuf};

use qrbatch_ingest::{IngestError, ReadOptions, read_records};
use qrbatch_model::{FieldNames, InputFormat};

const HEADER: &str = "NO IDENTITAS,NOMOR KK,NAMA LENGKAP,KECAMATAN,KELURAHAN,KODE QR";

fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    path
}

fn options() -> ReadOptions {
    ReadOptions::default().requiring_fields(&FieldNames::default())
}

#[test]
fn reads_records_keyed_by_header() {
    let dir = tempfile::tempdir().expect("temp dir");
    let contents = format!(
        "{HEADER},EXTRA\n1234567890123456,6543210987654321,Jane Doe,North,Central,HELLO,ignored\n"
    );
    let path = write_file(dir.path(), "people.csv", contents.as_bytes());

    let dataset = read_records(&path, &options()).expect("read csv");

    assert_eq!(dataset.format, InputFormat::Delimited);
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.skipped_rows, 0);
    let record = &dataset.records[0];
    assert_eq!(record.get("NO IDENTITAS"), Some("1234567890123456"));
    assert_eq!(record.get("NAMA LENGKAP"), Some("Jane Doe"));
    assert_eq!(record.get("KODE QR"), Some("HELLO"));
    assert_eq!(record.get("EXTRA"), Some("ignored"));
}

#[test]
fn malformed_rows_are_skipped_without_aborting() {
    let dir = tempfile::tempdir().expect("temp dir");
    let contents = format!(
        "{HEADER}\n\
         1111111111111111,2222222222222222,A,K,L,one\n\
         3333333333333333,4444444444444444,B\n\
         5555555555555555,6666666666666666,C,K,L,three,surplus\n\
         7777777777777777,8888888888888888,D,K,L,four\n"
    );
    let path = write_file(dir.path(), "mixed.csv", contents.as_bytes());

    let dataset = read_records(&path, &options()).expect("read csv");

    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.skipped_rows, 2);
    assert_eq!(dataset.records[0].value("KODE QR"), "one");
    assert_eq!(dataset.records[1].value("KODE QR"), "four");
}

#[test]
fn header_only_is_empty_dataset() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(dir.path(), "header.csv", format!("{HEADER}\n").as_bytes());

    let err = read_records(&path, &options()).expect_err("no data rows");
    assert!(matches!(err, IngestError::EmptyDataset { .. }));
}

#[test]
fn missing_required_column_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(
        dir.path(),
        "partial.csv",
        b"NO IDENTITAS,NAMA LENGKAP\n1234567890123456,Jane\n",
    );

    let err = read_records(&path, &options()).expect_err("missing columns");
    match err {
        IngestError::MissingColumns { columns, .. } => {
            assert_eq!(columns, vec!["NOMOR KK".to_string(), "KODE QR".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn bom_header_and_latin1_cells_are_normalized() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut contents = Vec::new();
    contents.extend_from_slice("\u{feff}".as_bytes());
    contents.extend_from_slice(HEADER.as_bytes());
    contents.extend_from_slice(b"\n1234567890123456,6543210987654321,Jos\xe9,North,Central, HELLO \n");
    let path = write_file(dir.path(), "latin1.csv", &contents);

    let dataset = read_records(&path, &options()).expect("read csv");

    assert_eq!(dataset.headers[0], "NO IDENTITAS");
    let record = &dataset.records[0];
    assert_eq!(record.value("NAMA LENGKAP"), "José");
    assert_eq!(record.value("KODE QR"), "HELLO");
}

#[test]
fn unknown_extension_is_format_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(dir.path(), "people.json", b"[]");

    let err = read_records(&path, &options()).expect_err("json rejected");
    assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
}

#[test]
fn oversized_input_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let contents = format!("{HEADER}\n1,2,3,4,5,6\n");
    let path = write_file(dir.path(), "big.csv", contents.as_bytes());

    let err = read_records(&path, &options().with_max_file_size(10)).expect_err("too large");
    assert!(matches!(err, IngestError::FileTooLarge { .. }));
}
