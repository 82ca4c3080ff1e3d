//! Tests for the write-ahead log

mod reader_tests;
mod writer_tests;
