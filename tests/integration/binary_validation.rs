//! Negative tests for binary format validation.
//!
//! The decoder must reject malformed, truncated, or corrupted input with
//! [`IndexError::Decode`] and never panic or return a partial index.
//!
//! Hand-built files go through [`seal`], which wraps a body in a valid
//! header and footer so that only the body defect is under test.

use fastsearch::binary::{
    decode_varint, encode_positions, encode_str, encode_varint, IndexFooter, IndexHeader,
    FOOTER_MAGIC, MAGIC, VERSION,
};
use fastsearch::{read_header, IndexError, InvertedIndex, Position, RESERVED_DOC_ID};

use crate::common::scenario_index;

fn seal(term_count: u32, body: &[u8]) -> Vec<u8> {
    let header = IndexHeader::new(term_count, body.len() as u32);
    let mut out = header.to_bytes().to_vec();
    out.extend_from_slice(body);
    let footer = IndexFooter::for_content(&out);
    out.extend_from_slice(&footer.to_bytes());
    out
}

fn term_entry(term: &str, positions: &[Position], body: &mut Vec<u8>) {
    encode_str(term, body);
    encode_positions(positions, body);
}

fn assert_decode_error(bytes: &[u8]) {
    match InvertedIndex::decode(bytes) {
        Err(IndexError::Decode(_)) => {}
        other => panic!("expected a decode error, got {:?}", other.map(|i| i.term_count())),
    }
}

// ============================================================================
// VARINT REJECTION
// ============================================================================

#[test]
fn test_varint_empty_buffer() {
    assert!(decode_varint(&[]).is_err());
}

#[test]
fn test_varint_unterminated() {
    assert!(decode_varint(&[0x80, 0x80, 0x80]).is_err());
}

#[test]
fn test_varint_too_long() {
    assert!(decode_varint(&[0xFF; 11]).is_err());
}

#[test]
fn test_varint_u64_overflow() {
    // Tenth byte may only carry the top bit of a u64.
    let mut bytes = vec![0xFF; 9];
    bytes.push(0x02);
    assert!(decode_varint(&bytes).is_err());
}

// ============================================================================
// HEADER AND FOOTER
// ============================================================================

#[test]
fn test_sealed_body_is_accepted() {
    let mut body = Vec::new();
    term_entry("alpha", &[Position::new(1, 0), Position::new(1, 4)], &mut body);
    term_entry("beta", &[Position::new(2, 1)], &mut body);
    let index = InvertedIndex::decode(&seal(2, &body)).unwrap();
    assert_eq!(index.term_count(), 2);
    assert_eq!(index.doc_freq("alpha"), 1);
}

#[test]
fn test_empty_input() {
    assert_decode_error(&[]);
    assert_decode_error(&MAGIC);
}

#[test]
fn test_wrong_magic() {
    let mut bytes = scenario_index().encode();
    bytes[0] = b'X';
    assert_decode_error(&bytes);
    assert!(read_header(&bytes).is_err());
}

#[test]
fn test_unsupported_version() {
    let mut bytes = scenario_index().encode();
    bytes[MAGIC.len()] = VERSION + 1;
    assert_decode_error(&bytes);
}

#[test]
fn test_unknown_flags() {
    let mut bytes = scenario_index().encode();
    bytes[MAGIC.len() + 1] = 0b1000_0000;
    assert_decode_error(&bytes);
}

#[test]
fn test_wrong_footer_magic() {
    let mut bytes = scenario_index().encode();
    let n = bytes.len();
    bytes[n - FOOTER_MAGIC.len()] ^= 0xFF;
    assert_decode_error(&bytes);
}

#[test]
fn test_crc_mismatch() {
    let mut bytes = scenario_index().encode();
    bytes[IndexHeader::SIZE + 2] ^= 0x01;
    assert_decode_error(&bytes);
}

#[test]
fn test_trailing_bytes() {
    let mut bytes = scenario_index().encode();
    bytes.push(0);
    assert_decode_error(&bytes);
}

#[test]
fn test_every_truncation() {
    let bytes = scenario_index().encode();
    for len in 0..bytes.len() {
        assert_decode_error(&bytes[..len]);
    }
}

// ============================================================================
// BODY REJECTION
// ============================================================================

#[test]
fn test_terms_out_of_order() {
    let mut body = Vec::new();
    term_entry("beta", &[Position::new(1, 0)], &mut body);
    term_entry("alpha", &[Position::new(1, 1)], &mut body);
    assert_decode_error(&seal(2, &body));
}

#[test]
fn test_duplicate_term() {
    let mut body = Vec::new();
    term_entry("alpha", &[Position::new(1, 0)], &mut body);
    term_entry("alpha", &[Position::new(2, 0)], &mut body);
    assert_decode_error(&seal(2, &body));
}

#[test]
fn test_term_count_too_high() {
    let mut body = Vec::new();
    term_entry("alpha", &[Position::new(1, 0)], &mut body);
    assert_decode_error(&seal(2, &body));
}

#[test]
fn test_term_count_too_low() {
    let mut body = Vec::new();
    term_entry("alpha", &[Position::new(1, 0)], &mut body);
    term_entry("beta", &[Position::new(1, 1)], &mut body);
    assert_decode_error(&seal(1, &body));
}

#[test]
fn test_empty_postings_list() {
    let mut body = Vec::new();
    encode_str("alpha", &mut body);
    encode_varint(0, &mut body);
    assert_decode_error(&seal(1, &body));
}

#[test]
fn test_duplicate_position() {
    // Same doc, offset gap 0.
    let mut body = Vec::new();
    encode_str("alpha", &mut body);
    for v in [2, 1, 3, 0, 0] {
        encode_varint(v, &mut body);
    }
    assert_decode_error(&seal(1, &body));
}

#[test]
fn test_reserved_doc_id() {
    let mut body = Vec::new();
    encode_str("alpha", &mut body);
    encode_varint(1, &mut body);
    encode_varint(u64::from(RESERVED_DOC_ID), &mut body);
    encode_varint(0, &mut body);
    assert_decode_error(&seal(1, &body));
}

#[test]
fn test_doc_id_overflow() {
    let mut body = Vec::new();
    encode_str("alpha", &mut body);
    encode_varint(2, &mut body);
    encode_varint(u64::from(u32::MAX - 2), &mut body);
    encode_varint(0, &mut body);
    encode_varint(10, &mut body);
    encode_varint(0, &mut body);
    assert_decode_error(&seal(1, &body));
}

#[test]
fn test_oversized_position_count() {
    let mut body = Vec::new();
    encode_str("alpha", &mut body);
    encode_varint(1_000_000, &mut body);
    encode_varint(1, &mut body);
    encode_varint(0, &mut body);
    assert_decode_error(&seal(1, &body));
}

#[test]
fn test_invalid_utf8_term() {
    let mut body = Vec::new();
    encode_varint(2, &mut body);
    body.extend_from_slice(&[0xC3, 0x28]);
    encode_positions(&[Position::new(1, 0)], &mut body);
    assert_decode_error(&seal(1, &body));
}

#[test]
fn test_garbage_never_panics() {
    // Deterministic pseudo-random bodies behind a valid envelope.
    let mut state = 0x2545_F491_4F6C_DD1Du64;
    for len in 0..200 {
        let body: Vec<u8> = (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                state as u8
            })
            .collect();
        let _ = InvertedIndex::decode(&seal(3, &body));
    }
}
