//! Tests for RecordReader
//!
//! These tests verify:
//! - Clean end of record on empty input and at entry boundaries
//! - Pad bytes are skipped
//! - Truncation anywhere inside an entry is reported, never read past
//! - Corrupt length fields do not cause huge allocations

use std::io::Cursor;

use recipe_store::record::{EntryHeader, RecordEntry, RecordReader};
use recipe_store::RecipeError;

// =============================================================================
// Helper Functions
// =============================================================================

fn encode_all(entries: &[RecordEntry]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for entry in entries {
        bytes.extend_from_slice(&entry.encode());
    }
    bytes
}

fn sample_entries() -> Vec<RecordEntry> {
    vec![
        RecordEntry::new("integer", 69i32.to_le_bytes().to_vec()),
        RecordEntry::new("long thing", 6969i64.to_le_bytes().to_vec()),
        RecordEntry::new("odd", vec![1u8, 2]),
        RecordEntry::new("empty", Vec::new()),
    ]
}

fn expect_truncated(bytes: Vec<u8>) -> (u64, &'static str) {
    let mut reader = RecordReader::new(Cursor::new(bytes));
    loop {
        match reader.next_entry() {
            Ok(Some(_)) => continue,
            Ok(None) => panic!("expected truncation, got clean end of record"),
            Err(RecipeError::Truncated { offset, context }) => return (offset, context),
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
}

// =============================================================================
// Clean Read Tests
// =============================================================================

#[test]
fn test_read_empty_input() {
    let mut reader = RecordReader::new(Cursor::new(Vec::new()));

    assert!(reader.next_entry().unwrap().is_none());
    assert_eq!(reader.offset(), 0);
}

#[test]
fn test_read_all_entries() {
    let entries = sample_entries();
    let bytes = encode_all(&entries);

    let reader = RecordReader::new(Cursor::new(bytes));
    let decoded: Vec<RecordEntry> = reader.collect::<Result<_, _>>().unwrap();

    assert_eq!(decoded, entries);
}

#[test]
fn test_offset_tracks_entry_boundaries() {
    let entries = sample_entries();
    let bytes = encode_all(&entries);
    let mut reader = RecordReader::new(Cursor::new(bytes.clone()));

    let mut expected = 0u64;
    for entry in &entries {
        reader.next_entry().unwrap().unwrap();
        expected += entry.encoded_len() as u64;
        assert_eq!(reader.offset(), expected);
    }
    assert!(reader.next_entry().unwrap().is_none());
    assert_eq!(reader.offset(), bytes.len() as u64);
}

#[test]
fn test_pad_byte_value_is_ignored() {
    let mut bytes = RecordEntry::new("abc", vec![7u8; 4]).encode().to_vec();
    let last = bytes.len() - 1;
    bytes[last] = 0xEE;
    bytes.extend_from_slice(&RecordEntry::new("next", vec![1u8; 2]).encode());

    let mut reader = RecordReader::new(Cursor::new(bytes));

    assert_eq!(reader.next_entry().unwrap().unwrap().id, b"abc");
    assert_eq!(reader.next_entry().unwrap().unwrap().id, b"next");
    assert!(reader.next_entry().unwrap().is_none());
}

// =============================================================================
// Truncation Tests
// =============================================================================

#[test]
fn test_truncated_in_identifier_length() {
    let bytes = vec![3u8, 0, 0];

    let (offset, context) = expect_truncated(bytes);

    assert_eq!(offset, 3);
    assert_eq!(context, "identifier length");
}

#[test]
fn test_truncated_in_identifier() {
    let mut bytes = 10u64.to_le_bytes().to_vec();
    bytes.extend_from_slice(b"short");

    let (offset, context) = expect_truncated(bytes);

    assert_eq!(offset, 13);
    assert_eq!(context, "identifier");
}

#[test]
fn test_truncated_in_value_length() {
    let full = RecordEntry::new("ab", vec![1u8; 4]).encode();
    let bytes = full[..14].to_vec();

    let (_, context) = expect_truncated(bytes);

    assert_eq!(context, "value length");
}

#[test]
fn test_truncated_in_value() {
    let full = RecordEntry::new("ab", vec![1u8; 4]).encode();
    let bytes = full[..full.len() - 1].to_vec();

    let (offset, context) = expect_truncated(bytes);

    assert_eq!(offset, 21);
    assert_eq!(context, "value");
}

#[test]
fn test_truncated_missing_pad_byte() {
    let full = RecordEntry::new("abc", vec![1u8; 4]).encode();
    assert_eq!(full.len(), 24);
    let bytes = full[..23].to_vec();

    let (_, context) = expect_truncated(bytes);

    assert_eq!(context, "padding byte");
}

#[test]
fn test_truncated_after_valid_entries() {
    let mut bytes = encode_all(&sample_entries());
    let complete = bytes.len() as u64;
    bytes.extend_from_slice(&[1, 0, 0, 0]);

    let (offset, context) = expect_truncated(bytes);

    assert_eq!(offset, complete + 4);
    assert_eq!(context, "identifier length");
}

#[test]
fn test_huge_length_field_is_truncation() {
    let mut bytes = u64::MAX.to_le_bytes().to_vec();
    bytes.extend_from_slice(b"tiny");

    let (_, context) = expect_truncated(bytes);

    assert_eq!(context, "identifier");
}

// =============================================================================
// Iterator Tests
// =============================================================================

#[test]
fn test_iterator_stops_after_error() {
    let mut bytes = encode_all(&sample_entries()[..1]);
    bytes.extend_from_slice(&[0xFF; 5]);

    let mut reader = RecordReader::new(Cursor::new(bytes));

    assert!(reader.next().unwrap().is_ok());
    assert!(reader.next().unwrap().is_err());
    assert!(reader.next().is_none());
}

// =============================================================================
// Header / Skip Tests
// =============================================================================

#[test]
fn test_header_then_skip_keeps_alignment() {
    let bytes = encode_all(&[
        RecordEntry::new("big", vec![0xAAu8; 100_000]),
        RecordEntry::new("abc", vec![1u8; 4]),
        RecordEntry::new("last", vec![2u8; 2]),
    ]);
    let mut reader = RecordReader::new(Cursor::new(bytes));

    let header = reader.next_header().unwrap().unwrap();
    assert_eq!(
        header,
        EntryHeader {
            id: b"big".to_vec(),
            value_len: 100_000,
        }
    );
    reader.skip_value(&header).unwrap();

    // Padded entry skipped as well
    let header = reader.next_header().unwrap().unwrap();
    assert_eq!(header.id_str(), Some("abc"));
    reader.skip_value(&header).unwrap();

    let header = reader.next_header().unwrap().unwrap();
    assert_eq!(reader.read_value(&header).unwrap(), vec![2u8; 2]);
    assert!(reader.next_header().unwrap().is_none());
}

#[test]
fn test_skip_truncated_value() {
    let full = RecordEntry::new("ab", vec![1u8; 4]).encode();
    let bytes = full[..full.len() - 1].to_vec();
    let mut reader = RecordReader::new(Cursor::new(bytes));

    let header = reader.next_header().unwrap().unwrap();
    let err = reader.skip_value(&header).unwrap_err();

    assert!(matches!(err, RecipeError::Truncated { offset: 21, context: "value" }));
}

#[test]
fn test_skip_missing_pad_byte() {
    let full = RecordEntry::new("abc", vec![1u8; 4]).encode();
    let bytes = full[..full.len() - 1].to_vec();
    let mut reader = RecordReader::new(Cursor::new(bytes));

    let header = reader.next_header().unwrap().unwrap();
    let err = reader.skip_value(&header).unwrap_err();

    assert!(matches!(err, RecipeError::Truncated { context: "padding byte", .. }));
}
