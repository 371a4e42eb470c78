//! Tests for the record format (entry encoding, reader, writer)

mod reader_tests;
