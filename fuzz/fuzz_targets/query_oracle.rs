// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for phrase search against a brute-force scan.
//!
//! Documents are short token sequences over a four-word vocabulary so
//! matches are common. Every phrase the scanner finds must be reported by
//! `all_phrases`, in order, and nothing else.

#![no_main]

use arbitrary::Arbitrary;
use fastsearch::{InvertedIndex, Position};
use libfuzzer_sys::fuzz_target;

const VOCAB: [&str; 4] = ["w", "x", "y", "z"];

#[derive(Debug, Arbitrary)]
struct Input {
    docs: Vec<Vec<u8>>,
    phrase: Vec<u8>,
}

fn words(raw: &[u8]) -> Vec<&'static str> {
    raw.iter().take(32).map(|b| VOCAB[usize::from(b % 4)]).collect()
}

fuzz_target!(|input: Input| {
    let phrase = words(&input.phrase);
    if phrase.is_empty() || phrase.len() > 4 {
        return;
    }

    let index = InvertedIndex::new();
    let docs: Vec<Vec<&str>> = input.docs.iter().take(8).map(|d| words(d)).collect();
    for (i, tokens) in docs.iter().enumerate() {
        index.concurrent_index(i as u32, tokens);
    }

    let mut expected = Vec::new();
    for (i, tokens) in docs.iter().enumerate() {
        for start in 0..tokens.len().saturating_sub(phrase.len() - 1) {
            if tokens[start..start + phrase.len()] == phrase[..] {
                expected.push(
                    (start..start + phrase.len())
                        .map(|o| Position::new(i as u32, o as u32))
                        .collect::<Vec<_>>(),
                );
            }
        }
    }

    let found = index.all_phrases(&phrase).expect("non-empty phrase");
    assert_eq!(found, expected);
});
