// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary encoding primitives: varints and length-prefixed strings.
//!
//! Nothing fancy here. Varint for integers that are usually small, which
//! after delta coding is nearly all of them. Every decoder takes a slice and
//! returns `(value, bytes_consumed)`, so callers thread one offset through
//! the body and never copy.
//!
//! # References
//!
//! - **Varint (LEB128)**: Little-endian base-128 variable-length integer encoding.
//!   Originally from DWARF debugging format (1992+), popularized by Protocol Buffers.
//!   See: DWARF4 specification §7.6 "Variable Length Data", and
//!   Google Protocol Buffers encoding: <https://protobuf.dev/programming-guides/encoding/>

use std::io;

use super::header::{MAX_TERM_LEN, MAX_VARINT_BYTES};

// ============================================================================
// VARINT ENCODING
// ============================================================================

/// Encode a varint to bytes
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        }
        buf.push(byte | 0x80);
    }
}

/// Decode a varint from bytes, returning (value, bytes_consumed)
///
/// Returns an error if:
/// - Buffer is empty or ends mid-varint
/// - Varint runs past MAX_VARINT_BYTES or overflows u64
pub fn decode_varint(bytes: &[u8]) -> io::Result<(u64, usize)> {
    if bytes.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "Empty buffer for varint",
        ));
    }

    let mut result: u64 = 0;
    let mut shift = 0u32;

    for (i, &byte) in bytes.iter().take(MAX_VARINT_BYTES).enumerate() {
        let chunk = u64::from(byte & 0x7F);
        // 10th byte may only carry the top bit of a u64
        if shift == 63 && chunk > 1 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Varint overflows u64",
            ));
        }
        result |= chunk << shift;
        if byte & 0x80 == 0 {
            return Ok((result, i + 1));
        }
        shift += 7;
    }

    if bytes.len() >= MAX_VARINT_BYTES {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "Varint exceeds maximum length (possible corruption)",
        ))
    } else {
        Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "Incomplete varint",
        ))
    }
}

/// Decode a varint that must fit in a u32.
pub fn decode_varint_u32(bytes: &[u8], what: &str) -> io::Result<(u32, usize)> {
    let (value, consumed) = decode_varint(bytes)?;
    let value = u32::try_from(value).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} {} does not fit in u32", what, value),
        )
    })?;
    Ok((value, consumed))
}

// ============================================================================
// STRING ENCODING
// ============================================================================

/// Encode a length-prefixed UTF-8 string
pub fn encode_str(s: &str, buf: &mut Vec<u8>) {
    encode_varint(s.len() as u64, buf);
    buf.extend_from_slice(s.as_bytes());
}

/// Decode a length-prefixed UTF-8 string, returning (string, bytes_consumed)
pub fn decode_str(bytes: &[u8]) -> io::Result<(String, usize)> {
    let (len, mut pos) = decode_varint(bytes)?;
    let len = usize::try_from(len)
        .ok()
        .filter(|&len| len <= MAX_TERM_LEN)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("String length {} exceeds maximum {}", len, MAX_TERM_LEN),
            )
        })?;

    let end = pos + len;
    if end > bytes.len() {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("Truncated string (expected {} bytes)", len),
        ));
    }

    let s = std::str::from_utf8(&bytes[pos..end])
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Invalid UTF-8: {}", e)))?
        .to_string();
    pos = end;
    Ok((s, pos))
}
