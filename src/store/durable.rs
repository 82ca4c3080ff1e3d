//! WAL-backed record store
//!
//! Every insert is appended to `{dir}/{name}.wal` before it becomes
//! visible. On open the log is replayed into memory; later inserts of the
//! same key win.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::WalSyncStrategy;
use crate::error::{Result, StoreError};
use crate::wal::{Operation, WalRecovery, WalWriter};
use super::{MemoryStore, RecordStore};

/// A record store that survives restarts
pub struct DurableStore<V> {
    name: String,
    path: PathBuf,

    /// Current state of every key
    table: MemoryStore<V>,

    /// Serializes appends
    wal: Mutex<WalWriter>,
}

impl<V> DurableStore<V>
where
    V: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Open or create the store named `name` inside `dir`
    pub fn open(dir: &Path, name: &str, sync_strategy: WalSyncStrategy) -> Result<Self> {
        let path = dir.join(format!("{}.wal", name));
        let table = MemoryStore::new();

        let last_lsn = if path.exists() {
            let (entries, result) = WalRecovery::recover(&path)?;

            if result.entries_recovered > 0 || result.entries_corrupted > 0 {
                tracing::info!(
                    "Store {}: {} entries recovered, {} corrupted, last_lsn={}",
                    name,
                    result.entries_recovered,
                    result.entries_corrupted,
                    result.last_lsn
                );
            }

            for entry in entries {
                match entry.operation {
                    Operation::Insert { key, value } => {
                        let record: V = bincode::deserialize(&value).map_err(|e| {
                            StoreError::WalCorruption(format!(
                                "store {}: undecodable record at LSN {}: {}",
                                name, entry.lsn, e
                            ))
                        })?;
                        table.insert(&key, record)?;
                    }
                }
            }

            result.last_lsn
        } else {
            0
        };

        let wal = WalWriter::resume(&path, sync_strategy, last_lsn)?;

        Ok(Self {
            name: name.to_string(),
            path,
            table,
            wal: Mutex::new(wal),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the backing log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Force the log to disk
    pub fn sync(&self) -> Result<()> {
        self.wal.lock().sync()
    }
}

impl<V> RecordStore<V> for DurableStore<V>
where
    V: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    fn insert(&self, key: &str, value: V) -> Result<()> {
        let bytes = bincode::serialize(&value)?;

        // Hold the log lock across the memory update so replay order
        // matches visibility order.
        let mut wal = self.wal.lock();
        wal.append(Operation::Insert {
            key: key.to_string(),
            value: bytes,
        })?;
        self.table.insert(key, value)
    }

    fn get(&self, key: &str) -> Option<V> {
        self.table.get(key)
    }

    fn values(&self) -> Vec<V> {
        self.table.values()
    }

    fn len(&self) -> usize {
        self.table.len()
    }
}
