// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for varint (LEB128) encoding/decoding.
//!
//! Every number in the index body is a varint. Garbage must come back as
//! Err, and anything that decodes must re-encode to the same value.

#![no_main]

use fastsearch::binary::{decode_varint, encode_varint, MAX_VARINT_BYTES};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok((value, consumed)) = decode_varint(data) {
        assert!(consumed <= MAX_VARINT_BYTES);
        assert!(consumed <= data.len());

        let mut reencoded = Vec::new();
        encode_varint(value, &mut reencoded);
        let (redecoded, reconsumed) =
            decode_varint(&reencoded).expect("canonical varint should decode");
        assert_eq!(value, redecoded);
        assert_eq!(reconsumed, reencoded.len());
        // Canonical form is never longer than what we parsed.
        assert!(reencoded.len() <= consumed);
    }
});
