// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for whole-index decoding.
//!
//! Index files may come from disk or the network. Decoding arbitrary bytes
//! must never panic, and anything accepted must be well formed and survive
//! a second round trip unchanged.

#![no_main]

use fastsearch::InvertedIndex;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(index) = InvertedIndex::decode(data) else {
        return;
    };

    for (term, positions) in index.snapshot() {
        assert!(!positions.is_empty(), "accepted empty list for {:?}", term);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    // Non-minimal varints decode fine, so compare content, not bytes.
    let again = InvertedIndex::decode(&index.encode()).expect("re-encoded index should decode");
    assert_eq!(again.snapshot(), index.snapshot());
});
