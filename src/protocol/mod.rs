//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Protocol Format (V1 - Simple Binary)
//!
//! ### Request Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Cmd (1)  │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Commands
//! - 0x01: CREATE_STUDENT      - Payload: name (str) + semester (str)
//! - 0x02: CREATE_COURSE       - Payload: name (str) + credit (u64)
//! - 0x03: GET_ALL_STUDENTS    - Payload: empty
//! - 0x04: GET_ALL_COURSES     - Payload: empty
//! - 0x05: GET_ALL_SEMESTERS   - Payload: empty
//! - 0x06: GET_ONCE_STUDENT    - Payload: id (str)
//! - 0x07: PAYMENT             - Payload: id (str) + total (u64)
//! - 0x08: ADD_COURSE_STUDENT  - Payload: student id (str) + course id (str)
//! - 0x09: PING                - Payload: empty
//!
//! `str` is a 4-byte length followed by UTF-8 bytes; `u64` is 8 bytes.
//! All integers are big-endian.
//!
//! ### Response Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │Status(1) │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Status Codes
//! - 0x00: OK         - Payload: JSON record(s)
//! - 0x01: NOT_FOUND  - Payload: message
//! - 0x02: ERROR      - Payload: message

mod command;
mod response;
mod codec;

pub use command::{Command, CommandType};
pub use response::{Response, Status};
pub use codec::{
    encode_command, decode_command, encode_response, decode_response,
    read_command, write_command, read_response, write_response,
    HEADER_SIZE, MAX_PAYLOAD_SIZE,
};
