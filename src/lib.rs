//! # Registrar
//!
//! A student, course and semester record service with:
//! - Student and course creation with input validation
//! - Tuition payment
//! - Course enrollment checked against a credit cap and payment state
//! - WAL-backed record stores that survive restarts
//! - TCP-based client protocol
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │                  (Multiple Clients)                          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Registrar                               │
//! │             (handlers, one command at a time)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!      ┌────────────────┼────────────────┐
//!      ▼                ▼                ▼
//! ┌──────────┐    ┌──────────┐    ┌───────────┐
//! │ Courses  │    │ Students │    │ Semesters │
//! └────┬─────┘    └────┬─────┘    └─────┬─────┘
//!      │               │                │
//!      ▼               ▼                ▼
//! ┌─────────────────────────────────────────────┐
//! │        WAL per store (append + replay)       │
//! └─────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;
pub mod env;

pub mod record;
pub mod wal;
pub mod store;
pub mod registrar;
pub mod network;
pub mod protocol;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Operation, OperationError, RecordError, Result, StoreError};
pub use config::Config;
pub use record::{Course, PaymentReceipt, Semester, Student};
pub use registrar::Registrar;
pub use store::{RecordStore, Stores};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the registrar
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
