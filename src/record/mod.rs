//! Record Module
//!
//! On-disk format of a recipe file.
//!
//! ## Responsibilities
//! - Encode (identifier, value) pairs as length-prefixed entries
//! - Decode entries back, stopping cleanly at end of file
//! - Report files that end in the middle of an entry
//!
//! ## File Format
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Entry 1                                                  │
//! │ ┌──────────┬─────────┬───────────┬───────────┬─────────┐ │
//! │ │IdLen (8) │ Id      │ ValLen (8)│ Value     │ Pad 0/1 │ │
//! │ └──────────┴─────────┴───────────┴───────────┴─────────┘ │
//! ├──────────────────────────────────────────────────────────┤
//! │ Entry 2                                                  │
//! │ ...                                                      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! - Lengths are u64 little-endian.
//! - One zero pad byte follows the value iff `IdLen + ValLen` is odd,
//!   so every entry has an even size.
//! - No header, no entry count, no checksum. End of file ends the record.

mod entry;
mod reader;
mod writer;

use std::path::Path;

use crate::error::Result;

pub use entry::{encode_entry, RecordEntry};
pub use reader::{EntryHeader, RecordReader};
pub use writer::RecordWriter;

// =============================================================================
// Shared Constants (used by entry, reader, writer)
// =============================================================================

/// Size of each length field in bytes
pub const LENGTH_SIZE: usize = 8;

/// Value written for the alignment byte
pub(crate) const PAD_BYTE: u8 = 0;

/// True if an entry with these field lengths carries a pad byte
pub fn needs_padding(id_len: u64, value_len: u64) -> bool {
    (id_len.wrapping_add(value_len)) % 2 != 0
}

/// Decode every entry of the record file at `path`
pub fn read_entries(path: &Path) -> Result<Vec<RecordEntry>> {
    RecordReader::open(path)?.collect()
}
