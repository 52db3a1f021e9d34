// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Positional postings encoding.
//!
//! Positions are sorted by `(doc_id, offset)`, so both fields delta-code
//! well. Doc ids are stored as the gap from the previous position's doc id.
//! Offsets restart in every new document: the first offset in a document is
//! stored as-is, later ones as the gap from the previous offset.
//!
//! ```text
//! positions: 1:1  1:4  3:0  3:2
//! stream:    [1,1] [0,3] [2,0] [0,2]
//!             ^ doc gap, then offset (raw when the gap is nonzero)
//! ```
//!
//! Strict ordering falls out of the format: a zero doc gap must be followed
//! by a nonzero offset gap, and the decoder rejects anything else.
//!
//! # References
//!
//! - **Delta Encoding for Postings**: Zobel & Moffat (2006): "Inverted Files
//!   for Text Search Engines", ACM Computing Surveys 38(2).

use std::io;

use super::encoding::{decode_varint, decode_varint_u32, encode_varint};
use crate::types::{Position, RESERVED_DOC_ID};

/// Smallest possible encoding of one position (two 1-byte varints).
const MIN_POSITION_BYTES: usize = 2;

/// Encode a strictly increasing position list.
///
/// Format:
/// - count: varint
/// - For each position: doc_gap varint, offset (or offset gap) varint
pub fn encode_positions(positions: &[Position], buf: &mut Vec<u8>) {
    encode_varint(positions.len() as u64, buf);

    let mut prev: Option<Position> = None;
    for &p in positions {
        match prev {
            Some(q) if q.doc_id == p.doc_id => {
                encode_varint(0, buf);
                encode_varint(u64::from(p.offset - q.offset), buf);
            }
            Some(q) => {
                encode_varint(u64::from(p.doc_id - q.doc_id), buf);
                encode_varint(u64::from(p.offset), buf);
            }
            None => {
                encode_varint(u64::from(p.doc_id), buf);
                encode_varint(u64::from(p.offset), buf);
            }
        }
        prev = Some(p);
    }
}

/// Decode a position list, returning (positions, bytes_consumed).
///
/// Rejects empty lists, out-of-order or duplicate positions, u32 overflow,
/// and the reserved doc id.
pub fn decode_positions(bytes: &[u8]) -> io::Result<(Vec<Position>, usize)> {
    let (count, mut pos) = decode_varint(bytes)?;
    if count == 0 {
        return Err(invalid("Empty postings list".to_string()));
    }

    // Security: each position needs at least 2 bytes, so a count larger than
    // that can only come from a corrupt or hostile length.
    let remaining = bytes.len() - pos;
    let count = usize::try_from(count)
        .ok()
        .filter(|&c| c <= remaining / MIN_POSITION_BYTES)
        .ok_or_else(|| {
            invalid(format!(
                "Postings count {} exceeds available bytes {}",
                count, remaining
            ))
        })?;

    let mut positions = Vec::with_capacity(count);
    let mut prev: Option<Position> = None;

    for i in 0..count {
        let (doc_gap, used) = decode_varint_u32(&bytes[pos..], "doc gap")?;
        pos += used;
        let (value, used) = decode_varint_u32(&bytes[pos..], "offset")?;
        pos += used;

        let position = match prev {
            Some(q) if doc_gap == 0 => {
                if value == 0 {
                    return Err(invalid(format!("Duplicate position at entry {}", i)));
                }
                let offset = q
                    .offset
                    .checked_add(value)
                    .ok_or_else(|| invalid(format!("Offset overflow at entry {}", i)))?;
                Position::new(q.doc_id, offset)
            }
            Some(q) => {
                let doc_id = q
                    .doc_id
                    .checked_add(doc_gap)
                    .ok_or_else(|| invalid(format!("Doc id overflow at entry {}", i)))?;
                Position::new(doc_id, value)
            }
            None => Position::new(doc_gap, value),
        };

        if position.doc_id == RESERVED_DOC_ID {
            return Err(invalid(format!(
                "Reserved doc id {} at entry {}",
                RESERVED_DOC_ID, i
            )));
        }
        positions.push(position);
        prev = Some(position);
    }

    Ok((positions, pos))
}

fn invalid(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}
