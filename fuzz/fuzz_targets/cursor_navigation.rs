// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for postings list cursors.
//!
//! Random inserts (any order, duplicates included) followed by random
//! probes. `next`/`previous` are compared against a linear scan, with skip
//! pointers forced on by a tiny interval.

#![no_main]

use arbitrary::Arbitrary;
use fastsearch::{Cursor, Position, PostingsList};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    interval: u8,
    inserts: Vec<(u8, u16)>,
    probes: Vec<(u8, u16)>,
}

fuzz_target!(|input: Input| {
    let interval = usize::from(input.interval % 16).max(2);
    let mut list = PostingsList::with_skip(interval, interval);
    for &(doc, offset) in &input.inserts {
        list.insert(Position::new(u32::from(doc), u32::from(offset)));
    }

    let stored = list.positions().to_vec();
    assert!(stored.windows(2).all(|w| w[0] < w[1]));

    for &(doc, offset) in &input.probes {
        let p = Position::new(u32::from(doc), u32::from(offset));

        let expected_next = stored.iter().find(|&&q| q > p).copied();
        assert_eq!(list.next(Cursor::At(p)), expected_next.map_or(Cursor::Eof, Cursor::At));

        let expected_prev = stored.iter().rev().find(|&&q| q < p).copied();
        assert_eq!(list.previous(Cursor::At(p)), expected_prev.map_or(Cursor::Bof, Cursor::At));

        assert_eq!(list.find(p).is_some(), stored.contains(&p));
    }
});
