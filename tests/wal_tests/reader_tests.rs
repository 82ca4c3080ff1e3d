//! Tests for WalReader

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use registrar::config::WalSyncStrategy;
use registrar::wal::{Operation, WalReader, WalWriter};
use registrar::StoreError;
use tempfile::TempDir;

fn write_entries(path: &Path, count: usize) {
    let mut writer = WalWriter::open(path, WalSyncStrategy::EveryWrite).unwrap();
    for i in 0..count {
        writer
            .append(Operation::Insert {
                key: format!("key{}", i),
                value: vec![i as u8; 4],
            })
            .unwrap();
    }
}

#[test]
fn test_reader_empty_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("test.wal");
    File::create(&path).unwrap();

    let mut reader = WalReader::open(&path).unwrap();

    assert!(reader.next_entry().unwrap().is_none());
}

#[test]
fn test_reader_reads_in_order() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("test.wal");
    write_entries(&path, 3);

    let lsns: Vec<u64> = WalReader::open(&path)
        .unwrap()
        .entries()
        .map(|e| e.unwrap().lsn)
        .collect();

    assert_eq!(lsns, vec![1, 2, 3]);
}

#[test]
fn test_reader_position_tracks_valid_bytes() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("test.wal");
    write_entries(&path, 2);
    let len = std::fs::metadata(&path).unwrap().len();

    let mut reader = WalReader::open(&path).unwrap();
    while reader.next_entry().unwrap().is_some() {}

    assert_eq!(reader.position(), len);
}

#[test]
fn test_reader_partial_entry_is_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("test.wal");
    write_entries(&path, 1);
    OpenOptions::new()
        .append(true)
        .open(&path)
        .unwrap()
        .write_all(&[1, 2, 3])
        .unwrap();

    let results: Vec<_> = WalReader::open(&path).unwrap().entries().collect();

    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(StoreError::WalCorruption(_))));
}

#[test]
fn test_reader_repeated_lsn_is_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("test.wal");
    write_entries(&path, 1);
    let len = std::fs::metadata(&path).unwrap().len();
    let frame = registrar::wal::WalEntry::new(
        1,
        Operation::Insert {
            key: "again".to_string(),
            value: Vec::new(),
        },
    )
    .serialize()
    .unwrap();
    OpenOptions::new()
        .append(true)
        .open(&path)
        .unwrap()
        .write_all(&frame)
        .unwrap();

    let mut reader = WalReader::open(&path).unwrap();
    assert_eq!(reader.next_entry().unwrap().unwrap().lsn, 1);
    assert!(matches!(reader.next_entry(), Err(StoreError::WalCorruption(_))));
    assert_eq!(reader.position(), len);
}
