//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ### Request (Command) Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Cmd (1)  │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Response Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │Status(1) │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```

use std::io::{Read, Write};

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{Result, StoreError};
use super::{Command, CommandType, Response, Status};

/// Header size: 1 byte command/status + 4 bytes length
pub const HEADER_SIZE: usize = 5;

/// Maximum payload size (16 MB)
pub const MAX_PAYLOAD_SIZE: u32 = 16 * 1024 * 1024;

// =============================================================================
// Command Encoding/Decoding
// =============================================================================

/// Encode a command to bytes
///
/// Format: cmd_type (1) + payload_len (4) + payload
pub fn encode_command(command: &Command) -> Vec<u8> {
    let mut payload = BytesMut::new();

    match command {
        Command::CreateStudent { name, semester } => {
            put_str(&mut payload, name);
            put_str(&mut payload, semester);
        }
        Command::CreateCourse {
            name_course,
            credit_semester,
        } => {
            put_str(&mut payload, name_course);
            payload.put_u64(*credit_semester);
        }
        Command::GetOnceStudent { id } => put_str(&mut payload, id),
        Command::Payment { id_student, total } => {
            put_str(&mut payload, id_student);
            payload.put_u64(*total);
        }
        Command::AddCourseStudent { id_user, id_course } => {
            put_str(&mut payload, id_user);
            put_str(&mut payload, id_course);
        }
        Command::GetAllStudents
        | Command::GetAllCourses
        | Command::GetAllSemesters
        | Command::Ping => {}
    }

    frame(command.command_type() as u8, &payload)
}

/// Decode a command from bytes
pub fn decode_command(bytes: &[u8]) -> Result<Command> {
    let (cmd_byte, payload) = split_frame(bytes, "command")?;

    let cmd_type = CommandType::from_byte(cmd_byte).ok_or_else(|| {
        StoreError::Protocol(format!("Unknown command type: 0x{:02x}", cmd_byte))
    })?;

    let mut buf = payload;
    let command = match cmd_type {
        CommandType::CreateStudent => Command::CreateStudent {
            name: take_str(&mut buf, "CREATE_STUDENT name")?,
            semester: take_str(&mut buf, "CREATE_STUDENT semester")?,
        },
        CommandType::CreateCourse => Command::CreateCourse {
            name_course: take_str(&mut buf, "CREATE_COURSE name")?,
            credit_semester: take_u64(&mut buf, "CREATE_COURSE credit")?,
        },
        CommandType::GetAllStudents => Command::GetAllStudents,
        CommandType::GetAllCourses => Command::GetAllCourses,
        CommandType::GetAllSemesters => Command::GetAllSemesters,
        CommandType::GetOnceStudent => Command::GetOnceStudent {
            id: take_str(&mut buf, "GET_ONCE_STUDENT id")?,
        },
        CommandType::Payment => Command::Payment {
            id_student: take_str(&mut buf, "PAYMENT id")?,
            total: take_u64(&mut buf, "PAYMENT total")?,
        },
        CommandType::AddCourseStudent => Command::AddCourseStudent {
            id_user: take_str(&mut buf, "ADD_COURSE_STUDENT student id")?,
            id_course: take_str(&mut buf, "ADD_COURSE_STUDENT course id")?,
        },
        CommandType::Ping => Command::Ping,
    };

    if buf.has_remaining() {
        return Err(StoreError::Protocol(format!(
            "{:?} command: unexpected trailing {} bytes",
            cmd_type,
            buf.remaining()
        )));
    }

    Ok(command)
}

fn put_str(buf: &mut BytesMut, value: &str) {
    buf.put_u32(value.len() as u32);
    buf.put_slice(value.as_bytes());
}

fn take_u64(buf: &mut &[u8], field: &str) -> Result<u64> {
    if buf.remaining() < 8 {
        return Err(StoreError::Protocol(format!("{}: missing u64", field)));
    }
    Ok(buf.get_u64())
}

fn take_str(buf: &mut &[u8], field: &str) -> Result<String> {
    if buf.remaining() < 4 {
        return Err(StoreError::Protocol(format!("{}: missing length", field)));
    }
    let len = buf.get_u32() as usize;

    if buf.remaining() < len {
        return Err(StoreError::Protocol(format!(
            "{}: incomplete string (expected {}, got {})",
            field,
            len,
            buf.remaining()
        )));
    }

    let bytes = buf[..len].to_vec();
    buf.advance(len);

    String::from_utf8(bytes)
        .map_err(|e| StoreError::Protocol(format!("{}: invalid UTF-8: {}", field, e)))
}

// =============================================================================
// Response Encoding/Decoding
// =============================================================================

/// Encode a response to bytes
///
/// Format: status (1) + payload_len (4) + payload
pub fn encode_response(response: &Response) -> Vec<u8> {
    let payload = response.payload.as_deref().unwrap_or(&[]);
    frame(response.status as u8, payload)
}

/// Decode a response from bytes
pub fn decode_response(bytes: &[u8]) -> Result<Response> {
    let (status_byte, payload) = split_frame(bytes, "response")?;

    let status = match status_byte {
        0x00 => Status::Ok,
        0x01 => Status::NotFound,
        0x02 => Status::Error,
        _ => {
            return Err(StoreError::Protocol(format!(
                "Unknown response status: 0x{:02x}",
                status_byte
            )))
        }
    };

    let payload = if payload.is_empty() {
        None
    } else {
        Some(payload.to_vec())
    };

    Ok(Response { status, payload })
}

// =============================================================================
// Framing
// =============================================================================

fn frame(kind: u8, payload: &[u8]) -> Vec<u8> {
    let mut message = BytesMut::with_capacity(HEADER_SIZE + payload.len());
    message.put_u8(kind);
    message.put_u32(payload.len() as u32);
    message.put_slice(payload);
    message.to_vec()
}

/// Validate a frame header and return (kind byte, payload)
fn split_frame<'a>(bytes: &'a [u8], what: &str) -> Result<(u8, &'a [u8])> {
    if bytes.len() < HEADER_SIZE {
        return Err(StoreError::Protocol(format!(
            "Incomplete {} header: expected {} bytes, got {}",
            what,
            HEADER_SIZE,
            bytes.len()
        )));
    }

    let kind = bytes[0];
    let payload_len = payload_len(&bytes[..HEADER_SIZE], what)?;

    let total_len = HEADER_SIZE + payload_len;
    if bytes.len() < total_len {
        return Err(StoreError::Protocol(format!(
            "Incomplete {} payload: expected {} bytes, got {}",
            what,
            total_len,
            bytes.len()
        )));
    }

    Ok((kind, &bytes[HEADER_SIZE..total_len]))
}

fn payload_len(header: &[u8], what: &str) -> Result<usize> {
    let len = u32::from_be_bytes([header[1], header[2], header[3], header[4]]);
    if len > MAX_PAYLOAD_SIZE {
        return Err(StoreError::Protocol(format!(
            "{} payload too large: {} bytes (max {})",
            what, len, MAX_PAYLOAD_SIZE
        )));
    }
    Ok(len as usize)
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read one whole frame (header + payload) from a stream
fn read_frame<R: Read>(reader: &mut R, what: &str) -> Result<Vec<u8>> {
    let mut header = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header)?;

    let len = payload_len(&header, what)?;

    let mut message = vec![0u8; HEADER_SIZE + len];
    message[..HEADER_SIZE].copy_from_slice(&header);
    if len > 0 {
        reader.read_exact(&mut message[HEADER_SIZE..])?;
    }
    Ok(message)
}

/// Read a complete command from a stream
///
/// Blocks until a complete command is received or an error occurs
pub fn read_command<R: Read>(reader: &mut R) -> Result<Command> {
    let message = read_frame(reader, "command")?;
    decode_command(&message)
}

/// Write a command to a stream
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    writer.write_all(&encode_command(command))?;
    writer.flush()?;
    Ok(())
}

/// Read a complete response from a stream
pub fn read_response<R: Read>(reader: &mut R) -> Result<Response> {
    let message = read_frame(reader, "response")?;
    decode_response(&message)
}

/// Write a response to a stream
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    writer.write_all(&encode_response(response))?;
    writer.flush()?;
    Ok(())
}
