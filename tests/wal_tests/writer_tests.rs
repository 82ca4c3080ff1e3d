//! Tests for WalWriter

use std::fs;

use registrar::config::WalSyncStrategy;
use registrar::wal::{Operation, WalRecovery, WalWriter};
use tempfile::TempDir;

fn insert(i: usize) -> Operation {
    Operation::Insert {
        key: format!("key{}", i),
        value: format!("value{}", i).into_bytes(),
    }
}

#[test]
fn test_writer_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("test.wal");

    let writer = WalWriter::open(&path, WalSyncStrategy::EveryWrite).unwrap();

    assert!(path.exists());
    assert_eq!(writer.current_lsn(), 0);
}

#[test]
fn test_writer_lsn_increments() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("test.wal");
    let mut writer = WalWriter::open(&path, WalSyncStrategy::EveryWrite).unwrap();

    assert_eq!(writer.append(insert(0)).unwrap(), 1);
    assert_eq!(writer.append(insert(1)).unwrap(), 2);
    assert_eq!(writer.current_lsn(), 2);
}

#[test]
fn test_writer_reopen_continues_lsn() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("test.wal");

    {
        let mut writer = WalWriter::open(&path, WalSyncStrategy::EveryWrite).unwrap();
        writer.append(insert(0)).unwrap();
        writer.append(insert(1)).unwrap();
    }

    let mut writer = WalWriter::open(&path, WalSyncStrategy::EveryWrite).unwrap();
    assert_eq!(writer.current_lsn(), 2);
    assert_eq!(writer.append(insert(2)).unwrap(), 3);
}

#[test]
fn test_writer_batched_sync() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("test.wal");
    let mut writer =
        WalWriter::open(&path, WalSyncStrategy::EveryNEntries { count: 3 }).unwrap();

    for i in 0..5 {
        writer.append(insert(i)).unwrap();
    }
    writer.sync().unwrap();

    let (entries, _) = WalRecovery::recover(&path).unwrap();
    assert_eq!(entries.len(), 5);
}

#[test]
fn test_writer_file_grows_per_append() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("test.wal");
    let mut writer = WalWriter::open(&path, WalSyncStrategy::EveryWrite).unwrap();

    writer.append(insert(0)).unwrap();
    let one = fs::metadata(&path).unwrap().len();
    writer.append(insert(1)).unwrap();
    let two = fs::metadata(&path).unwrap().len();

    assert!(one > 0);
    assert_eq!(two, one * 2);
}

#[cfg(target_os = "linux")]
#[test]
fn test_writer_out_of_space_consumes_no_lsn() {
    // Every write to /dev/full fails with ENOSPC
    let path = std::path::Path::new("/dev/full");
    if !path.exists() {
        return;
    }
    let mut writer = WalWriter::resume(path, WalSyncStrategy::EveryWrite, 0).unwrap();

    assert!(writer.append(insert(0)).is_err());
    assert_eq!(writer.current_lsn(), 0);
    assert_eq!(writer.valid_len(), 0);

    assert!(writer.append(insert(1)).is_err());
    assert_eq!(writer.current_lsn(), 0);
}

#[test]
fn test_writer_valid_len_tracks_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("test.wal");
    let mut writer = WalWriter::open(&path, WalSyncStrategy::EveryWrite).unwrap();

    writer.append(insert(0)).unwrap();
    writer.append(insert(1)).unwrap();

    assert_eq!(writer.valid_len(), fs::metadata(&path).unwrap().len());
}
