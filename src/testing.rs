// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides the canonical fixtures so every test agrees on what
//! "the three-document corpus" means.

#![doc(hidden)]

use crate::index::InvertedIndex;
use crate::types::{DocId, Position};

/// The canonical three-document corpus, ids 1 to 3.
pub const SCENARIO_DOCS: [(DocId, &str); 3] = [
    (1, "hello, my name is BATMAN!"),
    (2, "I have come to save Gotham!"),
    (3, "What is your name"),
];

/// An index over [`SCENARIO_DOCS`] with the default analyzer.
pub fn scenario_index() -> InvertedIndex {
    let index = InvertedIndex::new();
    for (doc_id, text) in SCENARIO_DOCS {
        index.index(doc_id, text);
    }
    index
}

/// `[(doc, offset), ...]` → positions.
pub fn positions(pairs: &[(DocId, u32)]) -> Vec<Position> {
    pairs.iter().map(|&(d, o)| Position::new(d, o)).collect()
}
