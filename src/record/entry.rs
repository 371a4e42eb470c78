//! Record entry definitions

use bytes::{BufMut, Bytes, BytesMut};

use super::{needs_padding, LENGTH_SIZE, PAD_BYTE};

/// A single decoded entry of a record file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEntry {
    /// Raw identifier bytes
    pub id: Vec<u8>,

    /// Raw value bytes
    pub value: Vec<u8>,
}

impl RecordEntry {
    pub fn new(id: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }

    /// Identifier as UTF-8, if it is valid UTF-8
    pub fn id_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.id).ok()
    }

    /// Whether this entry carries a pad byte on disk
    pub fn is_padded(&self) -> bool {
        needs_padding(self.id.len() as u64, self.value.len() as u64)
    }

    /// Size of this entry on disk, including length fields and padding
    pub fn encoded_len(&self) -> usize {
        encoded_len(self.id.len(), self.value.len())
    }

    /// Encode to the on-disk representation
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        encode_entry(&mut buf, &self.id, &self.value);
        buf.freeze()
    }
}

/// Append one encoded entry to `buf`
///
/// `[id_len: u64][id][value_len: u64][value][pad?]`
pub fn encode_entry(buf: &mut BytesMut, id: &[u8], value: &[u8]) {
    buf.reserve(encoded_len(id.len(), value.len()));
    buf.put_u64_le(id.len() as u64);
    buf.put_slice(id);
    buf.put_u64_le(value.len() as u64);
    buf.put_slice(value);
    if needs_padding(id.len() as u64, value.len() as u64) {
        buf.put_u8(PAD_BYTE);
    }
}

fn encoded_len(id_len: usize, value_len: usize) -> usize {
    let pad = usize::from(needs_padding(id_len as u64, value_len as u64));
    2 * LENGTH_SIZE + id_len + value_len + pad
}
