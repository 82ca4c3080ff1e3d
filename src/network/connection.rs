//! Connection Handler
//!
//! Handles individual client connections.
//!
//! Between commands the connection polls its socket in short slices so a
//! server shutdown is noticed even when the client stays idle.

use std::io::{self, BufRead, BufReader, BufWriter};
use std::net::TcpStream;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::error::{Result, StoreError};
use crate::protocol::{read_command, write_response, Command, Response};
use crate::registrar::Registrar;

/// How often an idle connection rechecks the shutdown flag
const SHUTDOWN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Why the wait for the next command ended
enum Wait {
    Ready,
    Closed,
    Idle,
    Shutdown,
}

/// Handles a single client connection
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Shared handlers; the lock serializes every command
    registrar: Arc<Mutex<Registrar>>,

    /// Server-wide shutdown flag
    shutdown: Arc<AtomicBool>,

    /// Longest wait for a command or frame (`None` waits forever)
    read_timeout: Option<Duration>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Create a new connection handler
    pub fn new(
        stream: TcpStream,
        registrar: Arc<Mutex<Registrar>>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            registrar,
            shutdown,
            read_timeout: None,
            peer_addr,
        })
    }

    /// Configure connection timeouts (0 leaves a direction unbounded)
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        self.read_timeout = (read_ms > 0).then(|| Duration::from_millis(read_ms));
        self.reader.get_ref().set_read_timeout(self.read_timeout)?;
        if write_ms > 0 {
            self.writer
                .get_ref()
                .set_write_timeout(Some(Duration::from_millis(write_ms)))?;
        }
        Ok(())
    }

    /// Handle the connection (blocking until closed)
    ///
    /// Reads commands in a loop and sends responses.
    /// Returns when the client disconnects, stays idle past the read
    /// timeout, the server shuts down, or an error occurs.
    pub fn handle(&mut self) -> Result<()> {
        tracing::debug!("Connection established from {}", self.peer_addr);

        loop {
            match self.wait_for_command()? {
                Wait::Ready => {}
                Wait::Closed => {
                    tracing::debug!("Client {} disconnected", self.peer_addr);
                    return Ok(());
                }
                Wait::Idle => {
                    tracing::debug!("Read timeout for client {}", self.peer_addr);
                    return Ok(());
                }
                Wait::Shutdown => {
                    tracing::debug!("Closing {} for shutdown", self.peer_addr);
                    return Ok(());
                }
            }

            let command = match read_command(&mut self.reader) {
                Ok(cmd) => cmd,
                Err(StoreError::Io(ref e)) if is_disconnect(e) => {
                    tracing::debug!("Client {} disconnected", self.peer_addr);
                    return Ok(());
                }
                Err(StoreError::Io(ref e)) if is_timeout(e) => {
                    tracing::debug!("Read timeout for client {}", self.peer_addr);
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!("Error reading from {}: {}", self.peer_addr, e);
                    let _ = self.send_response(Response::error(&e.to_string()));
                    return Err(e);
                }
            };

            tracing::trace!("Received command from {}: {:?}", self.peer_addr, command);

            let response = self.execute_command(command);

            if let Err(e) = self.send_response(response) {
                if let StoreError::Io(ref io_err) = e {
                    if is_disconnect(io_err) {
                        tracing::debug!(
                            "Client {} disconnected before response could be sent: {}",
                            self.peer_addr,
                            e
                        );
                        return Ok(());
                    }
                }
                tracing::warn!("Error writing to {}: {}", self.peer_addr, e);
                return Err(e);
            }
        }
    }

    /// Block until the next command starts arriving
    ///
    /// Buffered bytes count as ready. The socket is read in
    /// `SHUTDOWN_POLL_INTERVAL` slices, and the configured read timeout is
    /// restored before returning `Ready`.
    fn wait_for_command(&mut self) -> Result<Wait> {
        let started = Instant::now();
        self.reader
            .get_ref()
            .set_read_timeout(Some(SHUTDOWN_POLL_INTERVAL))?;

        loop {
            if self.shutdown.load(Ordering::SeqCst) {
                return Ok(Wait::Shutdown);
            }

            match self.reader.fill_buf() {
                Ok(buf) if buf.is_empty() => return Ok(Wait::Closed),
                Ok(_) => break,
                Err(e) if is_timeout(&e) => {
                    if let Some(limit) = self.read_timeout {
                        if started.elapsed() >= limit {
                            return Ok(Wait::Idle);
                        }
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) if is_disconnect(&e) => return Ok(Wait::Closed),
                Err(e) => return Err(e.into()),
            }
        }

        self.reader.get_ref().set_read_timeout(self.read_timeout)?;
        Ok(Wait::Ready)
    }

    fn execute_command(&self, command: Command) -> Response {
        self.registrar.lock().execute(command)
    }

    fn send_response(&mut self, response: Response) -> Result<()> {
        write_response(&mut self.writer, &response)
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

fn is_disconnect(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::UnexpectedEof
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe
    )
}

// Windows reports TimedOut where unix reports WouldBlock
fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut)
}
