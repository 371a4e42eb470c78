//! Record Writer
//!
//! Streams encoded entries into a file or any other `Write` sink.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use bytes::BytesMut;

use crate::error::{RecipeError, Result};

use super::encode_entry;

/// Writes entries in record format
pub struct RecordWriter<W: Write> {
    /// Destination
    writer: W,
    /// Reused encode buffer
    scratch: BytesMut,
    /// Number of entries written
    entry_count: usize,
    /// Number of bytes written
    bytes_written: u64,
}

impl RecordWriter<BufWriter<File>> {
    /// Create or truncate the file at `path`
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }

    /// Flush buffered entries and return the underlying file
    pub fn finish_file(self) -> Result<File> {
        self.finish()?
            .into_inner()
            .map_err(|e| RecipeError::Io(e.into_error()))
    }
}

impl<W: Write> RecordWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            scratch: BytesMut::new(),
            entry_count: 0,
            bytes_written: 0,
        }
    }

    /// Append one (identifier, value) entry
    pub fn write_entry(&mut self, id: &[u8], value: &[u8]) -> Result<()> {
        self.scratch.clear();
        encode_entry(&mut self.scratch, id, value);
        self.writer.write_all(&self.scratch)?;

        self.entry_count += 1;
        self.bytes_written += self.scratch.len() as u64;
        Ok(())
    }

    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush and return the underlying writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
