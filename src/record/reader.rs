//! Record Reader
//!
//! Decodes entries one at a time. End of file exactly at an entry boundary
//! ends the record; end of file anywhere else is a truncation error.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use bytes::Buf;

use crate::error::{RecipeError, Result};

use super::{needs_padding, RecordEntry, LENGTH_SIZE};

/// Payload reads grow the buffer in steps instead of trusting the length field
const MAX_PREALLOC: u64 = 64 * 1024;

/// Identifier and value length of an entry whose value is still unread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryHeader {
    /// Raw identifier bytes
    pub id: Vec<u8>,

    /// Length of the value that follows
    pub value_len: u64,
}

impl EntryHeader {
    /// Identifier as UTF-8, if it is valid UTF-8
    pub fn id_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.id).ok()
    }
}

/// Reads entries in record format
pub struct RecordReader<R: Read> {
    /// Source
    reader: R,
    /// Bytes consumed so far
    offset: u64,
    /// Set after end of record or a decode error
    done: bool,
}

impl RecordReader<BufReader<File>> {
    /// Open a record file for reading
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            offset: 0,
            done: false,
        }
    }

    /// Byte offset of the next unread byte
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read the next entry
    ///
    /// Returns:
    /// - `Ok(Some(entry))` — a complete entry
    /// - `Ok(None)` — clean end of record
    /// - `Err(Truncated)` — the file ends inside an entry
    pub fn next_entry(&mut self) -> Result<Option<RecordEntry>> {
        let header = match self.next_header()? {
            Some(header) => header,
            None => return Ok(None),
        };
        let value = self.read_value(&header)?;
        Ok(Some(RecordEntry {
            id: header.id,
            value,
        }))
    }

    /// Read the identifier and value length of the next entry
    ///
    /// Must be followed by [`read_value`](Self::read_value) or
    /// [`skip_value`](Self::skip_value) for the same header before the
    /// next call.
    pub fn next_header(&mut self) -> Result<Option<EntryHeader>> {
        let id_len = match self.read_first_len()? {
            Some(len) => len,
            None => return Ok(None),
        };
        let id = self.read_bytes(id_len, "identifier")?;
        let value_len = self.read_u64("value length")?;

        Ok(Some(EntryHeader { id, value_len }))
    }

    /// Read the value and pad byte belonging to `header`
    pub fn read_value(&mut self, header: &EntryHeader) -> Result<Vec<u8>> {
        let value = self.read_bytes(header.value_len, "value")?;
        self.skip_padding(header)?;
        Ok(value)
    }

    /// Discard the value and pad byte belonging to `header` without
    /// buffering them
    pub fn skip_value(&mut self, header: &EntryHeader) -> Result<()> {
        self.skip_bytes(header.value_len, "value")?;
        self.skip_padding(header)
    }

    fn skip_padding(&mut self, header: &EntryHeader) -> Result<()> {
        if needs_padding(header.id.len() as u64, header.value_len) {
            self.skip_bytes(1, "padding byte")?;
        }
        Ok(())
    }

    /// Read the identifier length. `Ok(None)` if the record ends cleanly
    /// before the first byte of the field.
    fn read_first_len(&mut self) -> Result<Option<u64>> {
        let mut raw = [0u8; LENGTH_SIZE];
        let filled = self.fill(&mut raw)?;

        if filled == 0 {
            return Ok(None);
        }
        if filled < LENGTH_SIZE {
            return Err(RecipeError::Truncated {
                offset: self.offset,
                context: "identifier length",
            });
        }
        Ok(Some((&raw[..]).get_u64_le()))
    }

    /// Read a u64 length field that must be present
    fn read_u64(&mut self, context: &'static str) -> Result<u64> {
        let mut raw = [0u8; LENGTH_SIZE];
        if self.fill(&mut raw)? < LENGTH_SIZE {
            return Err(RecipeError::Truncated {
                offset: self.offset,
                context,
            });
        }
        Ok((&raw[..]).get_u64_le())
    }

    /// Read until `raw` is full or the source ends; returns bytes read
    fn fill(&mut self, raw: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < raw.len() {
            match self.reader.read(&mut raw[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        self.offset += filled as u64;
        Ok(filled)
    }

    /// Read exactly `len` bytes without preallocating `len` up front
    fn read_bytes(&mut self, len: u64, context: &'static str) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(len.min(MAX_PREALLOC) as usize);
        let read = (&mut self.reader).take(len).read_to_end(&mut buf)?;
        self.offset += read as u64;

        if (read as u64) < len {
            return Err(RecipeError::Truncated {
                offset: self.offset,
                context,
            });
        }
        Ok(buf)
    }

    /// Consume exactly `len` bytes, discarding them
    fn skip_bytes(&mut self, len: u64, context: &'static str) -> Result<()> {
        let skipped = io::copy(&mut (&mut self.reader).take(len), &mut io::sink())?;
        self.offset += skipped;

        if skipped < len {
            return Err(RecipeError::Truncated {
                offset: self.offset,
                context,
            });
        }
        Ok(())
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<RecordEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_entry() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
