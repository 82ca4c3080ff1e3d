//! Store Module
//!
//! Keyed record storage behind the handlers.
//!
//! ## Responsibilities
//! - Insert (overwriting any previous record under the same key)
//! - Point lookup returning an owned copy
//! - Enumerate all values in key order
//!
//! ## Implementations
//! - `MemoryStore`: BTreeMap in a RwLock, nothing survives the process
//! - `DurableStore`: `MemoryStore` rebuilt from, and written through, a WAL
//!
//! Lookups hand out copies, so mutating a fetched record has no effect on
//! the store until it is inserted again.

mod durable;
mod memory;

use crate::config::Config;
use crate::error::Result;
use crate::record::{Course, Semester, Student};

pub use durable::DurableStore;
pub use memory::MemoryStore;

/// An ordered mapping from string key to record
pub trait RecordStore<V>: Send + Sync {
    /// Insert or overwrite the record under `key`
    fn insert(&self, key: &str, value: V) -> Result<()>;

    /// Look up a record by key
    fn get(&self, key: &str) -> Option<V>;

    /// All records in key order
    fn values(&self) -> Vec<V>;

    /// Number of records
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The three record stores a registrar works against
pub struct Stores {
    pub courses: Box<dyn RecordStore<Course>>,
    pub students: Box<dyn RecordStore<Student>>,
    pub semesters: Box<dyn RecordStore<Semester>>,
}

impl Stores {
    pub const COURSES: &'static str = "courses";
    pub const STUDENTS: &'static str = "students";
    pub const SEMESTERS: &'static str = "semesters";

    /// Empty, process-local stores
    pub fn in_memory() -> Self {
        Self {
            courses: Box::new(MemoryStore::<Course>::new()),
            students: Box::new(MemoryStore::<Student>::new()),
            semesters: Box::new(MemoryStore::<Semester>::new()),
        }
    }

    /// Open (or create) durable stores under `config.data_dir`
    pub fn open(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;

        let dir = &config.data_dir;
        let sync = config.wal_sync_strategy;

        Ok(Self {
            courses: Box::new(DurableStore::<Course>::open(dir, Self::COURSES, sync)?),
            students: Box::new(DurableStore::<Student>::open(dir, Self::STUDENTS, sync)?),
            semesters: Box::new(DurableStore::<Semester>::open(dir, Self::SEMESTERS, sync)?),
        })
    }
}
