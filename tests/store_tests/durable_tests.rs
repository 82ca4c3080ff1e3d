//! Tests for DurableStore and restart behavior
//!
//! These tests verify:
//! - Records survive close/reopen
//! - Later inserts of the same key win on replay
//! - A torn tail is dropped and the store stays writable
//! - A registrar reopened on the same directory sees earlier records

use std::fs::OpenOptions;
use std::io::Write;

use registrar::config::{Config, WalSyncStrategy};
use registrar::store::DurableStore;
use registrar::{Course, RecordStore, Registrar};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn course(id: &str, credits: u64) -> Course {
    Course {
        id_course: id.to_string(),
        name_course: format!("course {}", id),
        semester_credit_semester: credits,
        created_at: 1,
        updated_at: 1,
    }
}

fn open(dir: &TempDir) -> DurableStore<Course> {
    DurableStore::open(dir.path(), "courses", WalSyncStrategy::EveryWrite).unwrap()
}

// =============================================================================
// DurableStore
// =============================================================================

#[test]
fn test_durable_open_creates_log() {
    let temp = TempDir::new().unwrap();

    let store = open(&temp);

    assert!(store.is_empty());
    assert_eq!(store.name(), "courses");
    assert!(temp.path().join("courses.wal").exists());
}

#[test]
fn test_durable_survives_reopen() {
    let temp = TempDir::new().unwrap();

    {
        let store = open(&temp);
        store.insert("c1", course("c1", 3)).unwrap();
        store.insert("c2", course("c2", 4)).unwrap();
    }

    let store = open(&temp);
    assert_eq!(store.len(), 2);
    assert_eq!(store.get("c1"), Some(course("c1", 3)));
    assert_eq!(store.get("c2"), Some(course("c2", 4)));
}

#[test]
fn test_durable_last_insert_wins() {
    let temp = TempDir::new().unwrap();

    {
        let store = open(&temp);
        store.insert("c1", course("c1", 3)).unwrap();
        store.insert("c1", course("c1", 5)).unwrap();
    }

    let store = open(&temp);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("c1").unwrap().semester_credit_semester, 5);
}

#[test]
fn test_durable_batched_sync_survives_drop() {
    let temp = TempDir::new().unwrap();

    {
        let store: DurableStore<Course> = DurableStore::open(
            temp.path(),
            "courses",
            WalSyncStrategy::EveryNEntries { count: 100 },
        )
        .unwrap();
        store.insert("c1", course("c1", 3)).unwrap();
    }

    assert_eq!(open(&temp).get("c1"), Some(course("c1", 3)));
}

#[test]
fn test_durable_drops_torn_tail() {
    let temp = TempDir::new().unwrap();

    {
        let store = open(&temp);
        store.insert("c1", course("c1", 3)).unwrap();
    }

    // Simulate a crash halfway through the next frame header
    {
        let mut file = OpenOptions::new()
            .append(true)
            .open(temp.path().join("courses.wal"))
            .unwrap();
        file.write_all(&[0, 0, 0, 0, 0, 0, 0, 2, 0xAB]).unwrap();
    }

    {
        let store = open(&temp);
        assert_eq!(store.len(), 1);
        store.insert("c2", course("c2", 4)).unwrap();
    }

    let store = open(&temp);
    assert_eq!(store.len(), 2);
    assert_eq!(store.get("c2"), Some(course("c2", 4)));
}

// =============================================================================
// Registrar over durable stores
// =============================================================================

#[test]
fn test_registrar_reopen_keeps_records() {
    let temp = TempDir::new().unwrap();
    let config = Config::builder().data_dir(temp.path()).build();

    let (student, paid_id) = {
        let registrar = Registrar::open(config.clone()).unwrap();
        registrar.create_course("Algorithms", 4).unwrap();
        let student = registrar.create_student("Alice", "S1").unwrap();
        let other = registrar.create_student("Bob", "S1").unwrap();
        registrar.payment(&other.id_student, 4_000_000).unwrap();
        (student, other.id_student)
    };

    let registrar = Registrar::open(config).unwrap();

    assert_eq!(registrar.get_all_courses().len(), 1);
    assert_eq!(registrar.get_all_students().len(), 2);
    assert_eq!(
        registrar.get_once_student(&student.id_student).unwrap(),
        student
    );
    assert!(registrar.get_once_student(&paid_id).unwrap().already_pay);
}

#[test]
fn test_registrar_open_creates_store_files() {
    let temp = TempDir::new().unwrap();
    let data_dir = temp.path().join("records");
    let config = Config::builder().data_dir(&data_dir).build();

    let _registrar = Registrar::open(config).unwrap();

    assert!(data_dir.join("courses.wal").exists());
    assert!(data_dir.join("students.wal").exists());
    assert!(data_dir.join("semesters.wal").exists());
}
