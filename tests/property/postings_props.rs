//! Postings list property tests.
//!
//! These tests check the cursor primitives against a sorted-set oracle:
//! - Insertion order never changes the stored list
//! - `next` / `previous` return the nearest neighbour or a sentinel
//! - Stepping back then forward returns to the same position
//! - Skip pointers never change an answer

use std::collections::BTreeSet;

use fastsearch::{Cursor, InvertedIndex, Position, PostingsList};
use proptest::prelude::*;

use crate::common::position_set_strategy;

fn oracle_next(set: &BTreeSet<Position>, current: Cursor) -> Cursor {
    match current {
        Cursor::Bof => set.iter().next().copied().map_or(Cursor::Eof, Cursor::At),
        Cursor::At(p) => set
            .range((std::ops::Bound::Excluded(p), std::ops::Bound::Unbounded))
            .next()
            .copied()
            .map_or(Cursor::Eof, Cursor::At),
        Cursor::Eof => Cursor::Eof,
    }
}

fn oracle_previous(set: &BTreeSet<Position>, current: Cursor) -> Cursor {
    match current {
        Cursor::Bof => Cursor::Bof,
        Cursor::At(p) => set.range(..p).next_back().copied().map_or(Cursor::Bof, Cursor::At),
        Cursor::Eof => set.iter().next_back().copied().map_or(Cursor::Bof, Cursor::At),
    }
}

fn build(positions: &[Position], interval: usize) -> PostingsList {
    // Low threshold so the skip index is live on small inputs.
    let mut list = PostingsList::with_skip(interval, interval);
    for &p in positions {
        list.insert(p);
    }
    list
}

// ============================================================================
// ORDERING
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Property: stored list equals the sorted, deduplicated input.
    #[test]
    fn prop_insert_order_irrelevant(
        positions in position_set_strategy(120),
        interval in 2usize..9,
    ) {
        let list = build(&positions, interval);
        let expected: Vec<Position> = positions.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        prop_assert_eq!(list.positions(), expected.as_slice());
    }

    /// Property: index ingestion keeps every list strictly increasing,
    /// whatever order documents arrive in.
    #[test]
    fn prop_index_sorted_under_any_doc_order(
        docs in prop::collection::vec(
            (1u32..50, prop::collection::vec(prop::sample::select(&["x", "y", "z"][..]), 1..10)),
            1..20,
        ),
    ) {
        let index = InvertedIndex::new();
        for (doc_id, tokens) in &docs {
            index.concurrent_index(*doc_id, tokens);
        }
        crate::common::assert_index_well_formed(&index);
    }
}

// ============================================================================
// CURSORS
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Property: next/previous agree with the oracle for arbitrary targets,
    /// including positions that are not stored.
    #[test]
    fn prop_cursors_match_oracle(
        positions in position_set_strategy(150),
        probes in prop::collection::vec((0u32..10, 0u32..220), 1..40),
        interval in 2usize..9,
    ) {
        let list = build(&positions, interval);
        let set: BTreeSet<Position> = positions.iter().copied().collect();

        let mut cursors = vec![Cursor::Bof, Cursor::Eof];
        cursors.extend(probes.into_iter().map(|(d, o)| Cursor::at(d, o)));
        for cursor in cursors {
            prop_assert_eq!(list.next(cursor), oracle_next(&set, cursor), "next({})", cursor);
            prop_assert_eq!(list.previous(cursor), oracle_previous(&set, cursor), "previous({})", cursor);
        }
    }

    /// Property: every stored position is found; stepping away and back
    /// lands on it again unless a sentinel intervenes.
    #[test]
    fn prop_cursor_round_trip(positions in position_set_strategy(150), interval in 2usize..9) {
        let list = build(&positions, interval);
        let stored = list.positions().to_vec();

        for (i, &p) in stored.iter().enumerate() {
            prop_assert_eq!(list.find(p), Some(p));

            let before = list.previous(Cursor::At(p));
            if i == 0 {
                prop_assert_eq!(before, Cursor::Bof);
            } else {
                prop_assert_eq!(list.next(before), Cursor::At(p));
            }

            let after = list.next(Cursor::At(p));
            if i + 1 == stored.len() {
                prop_assert_eq!(after, Cursor::Eof);
            } else {
                prop_assert_eq!(list.previous(after), Cursor::At(p));
            }
        }
    }

    /// Property: positions outside the list are never found.
    #[test]
    fn prop_find_absent(positions in position_set_strategy(80), doc in 0u32..10, offset in 0u32..220) {
        let list = build(&positions, 4);
        let target = Position::new(doc, offset);
        let expected = positions.contains(&target).then_some(target);
        prop_assert_eq!(list.find(target), expected);
    }
}

// ============================================================================
// SENTINELS
// ============================================================================

#[test]
fn test_sentinels_on_empty_list() {
    let list = PostingsList::new();
    assert_eq!(list.next(Cursor::Bof), Cursor::Eof);
    assert_eq!(list.previous(Cursor::Eof), Cursor::Bof);
    assert_eq!(list.next(Cursor::Eof), Cursor::Eof);
    assert_eq!(list.previous(Cursor::Bof), Cursor::Bof);
    assert_eq!(list.find(Position::new(1, 0)), None);
}
