//! WAL Writer
//!
//! Handles appending entries to the WAL file.
//!
//! Each frame is serialized in memory and handed to the file in one
//! `write_all`. If the write or its sync fails, the file is cut back to the
//! end of the last acknowledged frame so a rejected entry never reaches
//! disk. When that truncation also fails the writer refuses further
//! appends.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::config::WalSyncStrategy;
use crate::error::{Result, StoreError};
use super::{Operation, WalEntry, WalRecovery};

/// Writes entries to the WAL file
pub struct WalWriter {
    file: File,
    current_lsn: u64,
    sync_strategy: WalSyncStrategy,

    /// File length after the last acknowledged append
    valid_len: u64,

    /// Entries written since the last fsync
    unsynced: usize,

    /// Set when a failed append could not be rolled back
    failed: bool,
}

impl WalWriter {
    /// Open or create a WAL file
    ///
    /// An existing file is recovered first so appends continue after the
    /// last valid entry.
    pub fn open(path: &Path, sync_strategy: WalSyncStrategy) -> Result<Self> {
        let last_lsn = if path.exists() {
            WalRecovery::recover(path)?.1.last_lsn
        } else {
            0
        };
        Self::resume(path, sync_strategy, last_lsn)
    }

    /// Open a WAL file that has already been recovered
    pub fn resume(path: &Path, sync_strategy: WalSyncStrategy, last_lsn: u64) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let valid_len = file.metadata()?.len();
        Ok(Self {
            file,
            current_lsn: last_lsn,
            sync_strategy,
            valid_len,
            unsynced: 0,
            failed: false,
        })
    }

    /// Append an entry to the WAL, returning its LSN
    ///
    /// On error nothing from this entry remains in the file and the LSN is
    /// not consumed.
    pub fn append(&mut self, operation: Operation) -> Result<u64> {
        if self.failed {
            return Err(StoreError::WalWrite(format!(
                "writer disabled after a failed append at offset {}",
                self.valid_len
            )));
        }

        let lsn = self.current_lsn + 1;
        let frame = WalEntry::new(lsn, operation).serialize()?;

        if let Err(e) = self.write_frame(&frame) {
            self.rollback();
            return Err(e);
        }

        self.valid_len += frame.len() as u64;
        self.current_lsn = lsn;
        Ok(lsn)
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        self.file.write_all(frame)?;

        let due = match self.sync_strategy {
            WalSyncStrategy::EveryWrite => true,
            WalSyncStrategy::EveryNEntries { count } => self.unsynced + 1 >= count,
        };
        if due {
            self.file.sync_data()?;
            self.unsynced = 0;
        } else {
            self.unsynced += 1;
        }
        Ok(())
    }

    /// Cut the file back to the last acknowledged frame
    fn rollback(&mut self) {
        if let Err(e) = self.file.set_len(self.valid_len) {
            tracing::error!(
                "WAL rollback to offset {} failed, disabling writer: {}",
                self.valid_len,
                e
            );
            self.failed = true;
        }
    }

    /// Force sync to disk
    pub fn sync(&mut self) -> Result<()> {
        self.file.sync_data()?;
        self.unsynced = 0;
        Ok(())
    }

    /// Get the current LSN
    pub fn current_lsn(&self) -> u64 {
        self.current_lsn
    }

    /// File length covered by acknowledged appends
    pub fn valid_len(&self) -> u64 {
        self.valid_len
    }
}

impl Drop for WalWriter {
    fn drop(&mut self) {
        if self.unsynced > 0 && !self.failed {
            if let Err(e) = self.sync() {
                tracing::warn!("WAL sync on close failed: {}", e);
            }
        }
    }
}
