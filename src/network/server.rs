//! TCP Server
//!
//! Accepts connections and dispatches to worker threads.
//!
//! At most `max_connections` clients are served at once. A client arriving
//! while every slot is taken gets one ERROR response and is closed, so the
//! acceptor never blocks and keeps watching the shutdown flag.

use std::io::{self, Read};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver, Sender, TrySendError};
use parking_lot::Mutex;

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::protocol::{write_response, Response};
use crate::registrar::Registrar;
use super::Connection;

/// How long the acceptor sleeps when no connection is pending
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// How long a rejected client gets to receive the busy response
const REJECT_LINGER: Duration = Duration::from_millis(100);

/// TCP server for the registrar
pub struct Server {
    config: Config,
    registrar: Arc<Mutex<Registrar>>,
    listener: TcpListener,
    shutdown: Arc<AtomicBool>,

    /// Connections queued or being served
    active: AtomicUsize,
}

/// Stops a running server from another thread
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_shutdown(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

impl Server {
    /// Bind the listen address from `config`
    pub fn bind(config: Config, registrar: Registrar) -> Result<Self> {
        if config.max_connections == 0 {
            return Err(StoreError::Config(
                "max_connections must be at least 1".to_string(),
            ));
        }

        let listener = TcpListener::bind(&config.listen_addr)?;
        listener.set_nonblocking(true)?;

        Ok(Self {
            config,
            registrar: Arc::new(Mutex::new(registrar)),
            listener,
            shutdown: Arc::new(AtomicBool::new(false)),
            active: AtomicUsize::new(0),
        })
    }

    /// The address actually bound (useful with port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            flag: Arc::clone(&self.shutdown),
        }
    }

    /// Start the server (blocking until shutdown)
    pub fn run(&self) -> Result<()> {
        let workers = self.config.max_connections;
        let (tx, rx) = channel::bounded::<TcpStream>(workers);

        tracing::info!(
            "Listening on {} with {} workers",
            self.local_addr()?,
            workers
        );

        thread::scope(|scope| {
            for id in 0..workers {
                let rx = rx.clone();
                scope.spawn(move || self.worker_loop(id, rx));
            }
            drop(rx);

            let result = self.accept_loop(&tx);

            // Closing the channel lets idle workers exit.
            drop(tx);
            result
        })?;

        tracing::info!("Server stopped accepting connections");
        Ok(())
    }

    /// Signal the server to shutdown gracefully
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    fn accept_loop(&self, tx: &Sender<TcpStream>) -> Result<()> {
        while !self.shutdown.load(Ordering::SeqCst) {
            match self.listener.accept() {
                Ok((stream, addr)) => {
                    tracing::debug!("Accepted connection from {}", addr);
                    stream.set_nonblocking(false)?;
                    self.dispatch(tx, stream)?;
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                    thread::sleep(ACCEPT_POLL_INTERVAL);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::warn!("Accept failed: {}", e);
                    thread::sleep(ACCEPT_POLL_INTERVAL);
                }
            }
        }
        Ok(())
    }

    /// Hand `stream` to a worker, or turn it away when all are busy
    fn dispatch(&self, tx: &Sender<TcpStream>, stream: TcpStream) -> Result<()> {
        let limit = self.config.max_connections;
        if self.active.fetch_add(1, Ordering::SeqCst) >= limit {
            self.active.fetch_sub(1, Ordering::SeqCst);
            reject(stream, limit);
            return Ok(());
        }

        match tx.try_send(stream) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(stream)) => {
                self.active.fetch_sub(1, Ordering::SeqCst);
                reject(stream, limit);
                Ok(())
            }
            Err(TrySendError::Disconnected(_)) => {
                self.active.fetch_sub(1, Ordering::SeqCst);
                Err(StoreError::Network("worker pool closed".to_string()))
            }
        }
    }

    fn worker_loop(&self, id: usize, rx: Receiver<TcpStream>) {
        while let Ok(stream) = rx.recv() {
            self.serve(id, stream);
            self.active.fetch_sub(1, Ordering::SeqCst);
        }
        tracing::trace!("Worker {} exiting", id);
    }

    fn serve(&self, id: usize, stream: TcpStream) {
        let registrar = Arc::clone(&self.registrar);
        let mut connection = match Connection::new(stream, registrar, Arc::clone(&self.shutdown)) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("Worker {}: failed to set up connection: {}", id, e);
                return;
            }
        };

        if let Err(e) =
            connection.set_timeouts(self.config.read_timeout_ms, self.config.write_timeout_ms)
        {
            tracing::warn!("Worker {}: failed to set timeouts: {}", id, e);
            return;
        }

        if let Err(e) = connection.handle() {
            tracing::warn!(
                "Worker {}: connection {} ended with error: {}",
                id,
                connection.peer_addr(),
                e
            );
        }
    }
}

/// Send a busy ERROR and close
///
/// The write half is shut first and pending request bytes are drained for
/// `REJECT_LINGER`, so the close does not reset the connection before the
/// client reads the response.
fn reject(mut stream: TcpStream, limit: usize) {
    let peer = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    tracing::warn!("Rejecting {}: all {} connections in use", peer, limit);

    let response = Response::error(&format!("server busy: all {} connections in use", limit));
    let _ = stream.set_write_timeout(Some(REJECT_LINGER));
    if let Err(e) = write_response(&mut stream, &response) {
        tracing::debug!("Busy response to {} failed: {}", peer, e);
        return;
    }
    let _ = stream.shutdown(Shutdown::Write);

    let deadline = Instant::now() + REJECT_LINGER;
    let _ = stream.set_read_timeout(Some(ACCEPT_POLL_INTERVAL));
    let mut sink = [0u8; 512];
    while Instant::now() < deadline {
        match stream.read(&mut sink) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {}
            Err(_) => break,
        }
    }
}
