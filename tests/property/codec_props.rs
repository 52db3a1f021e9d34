//! Binary codec property tests.
//!
//! - Position lists and whole indexes survive encode/decode unchanged
//! - Encoding is deterministic regardless of ingestion order
//! - Any truncation or single-byte corruption is rejected, never a panic

use std::collections::BTreeSet;

use fastsearch::binary::{decode_positions, decode_varint, encode_positions, encode_varint, MAX_VARINT_BYTES};
use fastsearch::{Cursor, InvertedIndex, Position};
use proptest::prelude::*;

use crate::common::{corpus_strategy, index_token_docs, position_set_strategy};

// ============================================================================
// VARINTS AND POSITION LISTS
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Property: varints are reversible and bounded in size.
    #[test]
    fn prop_varint_roundtrip(value: u64) {
        let mut buf = Vec::new();
        encode_varint(value, &mut buf);
        prop_assert!(buf.len() <= MAX_VARINT_BYTES);
        let (decoded, consumed) = decode_varint(&buf).unwrap();
        prop_assert_eq!(decoded, value);
        prop_assert_eq!(consumed, buf.len());
    }

    /// Property: the decoder never panics on arbitrary bytes.
    #[test]
    fn prop_decode_positions_total(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        if let Ok((positions, consumed)) = decode_positions(&bytes) {
            prop_assert!(consumed <= bytes.len());
            prop_assert!(!positions.is_empty());
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: sorted position lists survive the gap encoding, with large
    /// doc ids and offsets included.
    #[test]
    fn prop_positions_roundtrip(
        pairs in prop::collection::btree_set((0u32..u32::MAX, any::<u32>()), 1..80),
    ) {
        let positions: Vec<Position> = pairs.into_iter().map(Position::from).collect();
        let mut buf = Vec::new();
        encode_positions(&positions, &mut buf);
        let (decoded, consumed) = decode_positions(&buf).unwrap();
        prop_assert_eq!(decoded, positions);
        prop_assert_eq!(consumed, buf.len());
    }
}

// ============================================================================
// WHOLE INDEX
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: decode(encode(index)) answers every cursor query the same.
    #[test]
    fn prop_index_roundtrip(docs in corpus_strategy(), probes in position_set_strategy(20)) {
        let index = index_token_docs(&docs);
        let restored = InvertedIndex::decode(&index.encode()).unwrap();
        prop_assert_eq!(restored.snapshot(), index.snapshot());

        for term in index.terms() {
            for &p in &probes {
                prop_assert_eq!(restored.next(&term, p), index.next(&term, p));
                prop_assert_eq!(restored.previous(&term, p), index.previous(&term, p));
            }
            prop_assert_eq!(restored.next(&term, Cursor::Bof), index.next(&term, Cursor::Bof));
            prop_assert_eq!(restored.previous(&term, Cursor::Eof), index.previous(&term, Cursor::Eof));
        }
    }

    /// Property: the same content encodes to the same bytes.
    #[test]
    fn prop_encoding_deterministic(docs in corpus_strategy()) {
        let mut reversed = docs.clone();
        reversed.reverse();
        prop_assert_eq!(index_token_docs(&docs).encode(), index_token_docs(&reversed).encode());
    }

    /// Property: every proper prefix is rejected.
    #[test]
    fn prop_truncation_rejected(docs in corpus_strategy(), cut in any::<prop::sample::Index>()) {
        let bytes = index_token_docs(&docs).encode();
        let len = cut.index(bytes.len());
        prop_assert!(InvertedIndex::decode(&bytes[..len]).is_err());
    }

    /// Property: changing any single byte is detected.
    #[test]
    fn prop_corruption_rejected(
        docs in corpus_strategy(),
        at in any::<prop::sample::Index>(),
        xor in 1u8..=255,
    ) {
        let mut bytes = index_token_docs(&docs).encode();
        let i = at.index(bytes.len());
        bytes[i] ^= xor;
        prop_assert!(InvertedIndex::decode(&bytes).is_err());
    }
}

#[test]
fn test_distinct_terms_survive() {
    let index = InvertedIndex::new();
    index.index(1, "alpha beta gamma alpha");
    let restored = InvertedIndex::decode(&index.encode()).unwrap();
    let terms: BTreeSet<String> = restored.terms().into_iter().collect();
    assert_eq!(terms.len(), 3);
    assert_eq!(restored.find("alpha", Position::new(1, 3)).unwrap(), Position::new(1, 3));
}
