//! Network Module
//!
//! TCP server and client handling.
//!
//! ## Architecture
//! - Single acceptor thread
//! - Fixed pool of worker threads, fed connections over a bounded channel
//! - Commands routed through one `Registrar` behind a mutex, so handler
//!   invocations never interleave

mod server;
mod connection;
mod client;

pub use server::{Server, ShutdownHandle};
pub use connection::Connection;
pub use client::{Client, Reply};
