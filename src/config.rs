//! Configuration for the registrar
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Tuition owed by a freshly created student
pub const DEFAULT_INITIAL_TUITION: u64 = 4_000_000;

/// Highest credit total a student may carry after enrolling
pub const DEFAULT_MAX_CREDIT_TOTAL: u64 = 25;

/// Surcharge added when a student exceeds their semester's credit threshold
pub const DEFAULT_OVERLOAD_PENALTY: u64 = 1_000_000;

/// Main configuration for a registrar instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all data files
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── courses.wal
    ///     ├── students.wal
    ///     └── semesters.wal
    pub data_dir: PathBuf,

    /// Sync strategy: how often to fsync the store logs
    pub wal_sync_strategy: WalSyncStrategy,

    // -------------------------------------------------------------------------
    // Business Rules
    // -------------------------------------------------------------------------
    /// Amount owed by a new student
    pub initial_tuition: u64,

    /// Credit cap checked on enrollment
    pub max_credit_total: u64,

    /// Surcharge for exceeding the semester threshold
    pub overload_penalty: u64,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen address
    pub listen_addr: String,

    /// Number of connection worker threads
    pub max_connections: usize,

    /// Connection read timeout (milliseconds, 0 disables)
    pub read_timeout_ms: u64,

    /// Connection write timeout (milliseconds, 0 disables)
    pub write_timeout_ms: u64,
}

/// WAL sync strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalSyncStrategy {
    /// fsync after every write (safest, slowest)
    EveryWrite,

    /// fsync after N uncommitted entries (balanced durability/performance)
    EveryNEntries { count: usize },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./registrar_data"),
            wal_sync_strategy: WalSyncStrategy::EveryWrite,
            initial_tuition: DEFAULT_INITIAL_TUITION,
            max_credit_total: DEFAULT_MAX_CREDIT_TOTAL,
            overload_penalty: DEFAULT_OVERLOAD_PENALTY,
            listen_addr: "127.0.0.1:7878".to_string(),
            max_connections: 16,
            read_timeout_ms: 30_000,
            write_timeout_ms: 5000,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for all store logs)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the WAL sync strategy
    pub fn wal_sync_strategy(mut self, strategy: WalSyncStrategy) -> Self {
        self.config.wal_sync_strategy = strategy;
        self
    }

    pub fn initial_tuition(mut self, amount: u64) -> Self {
        self.config.initial_tuition = amount;
        self
    }

    pub fn max_credit_total(mut self, credits: u64) -> Self {
        self.config.max_credit_total = credits;
        self
    }

    pub fn overload_penalty(mut self, amount: u64) -> Self {
        self.config.overload_penalty = amount;
        self
    }

    /// Set the TCP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the number of connection workers
    pub fn max_connections(mut self, count: usize) -> Self {
        self.config.max_connections = count;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
