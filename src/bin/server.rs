//! Registrar Server Binary
//!
//! Opens the record stores and starts the TCP server.

use clap::Parser;
use registrar::config::WalSyncStrategy;
use registrar::network::Server;
use registrar::{Config, Registrar};
use tracing_subscriber::{fmt, EnvFilter};

/// Registrar Server
#[derive(Parser, Debug)]
#[command(name = "registrar-server")]
#[command(about = "Student, course and semester record service")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./registrar_data")]
    data_dir: String,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:7878")]
    listen: String,

    /// Number of connection worker threads
    #[arg(short, long, default_value = "16")]
    max_connections: usize,

    /// Fsync the store logs only every N inserts (default: every insert)
    #[arg(long)]
    sync_every: Option<usize>,

    /// Tuition owed by a new student
    #[arg(long, default_value_t = registrar::config::DEFAULT_INITIAL_TUITION)]
    initial_tuition: u64,

    /// Maximum credit total after enrollment
    #[arg(long, default_value_t = registrar::config::DEFAULT_MAX_CREDIT_TOTAL)]
    max_credits: u64,

    /// Surcharge when enrollment passes the semester's credit threshold
    #[arg(long, default_value_t = registrar::config::DEFAULT_OVERLOAD_PENALTY)]
    overload_penalty: u64,
}

impl Args {
    fn config(&self) -> Config {
        let sync = match self.sync_every {
            Some(count) if count > 1 => WalSyncStrategy::EveryNEntries { count },
            _ => WalSyncStrategy::EveryWrite,
        };

        Config::builder()
            .data_dir(&self.data_dir)
            .listen_addr(&self.listen)
            .max_connections(self.max_connections)
            .wal_sync_strategy(sync)
            .initial_tuition(self.initial_tuition)
            .max_credit_total(self.max_credits)
            .overload_penalty(self.overload_penalty)
            .build()
    }
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,registrar=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("Registrar Server v{}", registrar::VERSION);
    tracing::info!("Data directory: {}", args.data_dir);
    tracing::info!("Listen address: {}", args.listen);

    let config = args.config();

    let registrar = match Registrar::open(config.clone()) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to open stores: {}", e);
            std::process::exit(1);
        }
    };

    let server = match Server::bind(config, registrar) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", args.listen, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
