// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-term postings lists and the cursor primitives over them.
//!
//! Everything above this module (phrase search, covers, ranking) touches
//! postings only through `find`, `next` and `previous`. None of them copy or
//! scan the list: each is a skip-index descent plus a binary search over one
//! block, so walking a long document stays O(k log n) for k steps.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **STRICTLY_INCREASING**: `positions[i] < positions[i + 1]` under
//!    `(doc_id, offset)` order. No duplicates.
//! 2. **SKIP_IN_SYNC**: when present, the skip index describes exactly the
//!    current `positions`. Every mutation path refreshes it.

mod skip;

pub use skip::{SkipEntry, SkipIndex};

use std::io;

use crate::config::{IndexConfig, DEFAULT_SKIP_INTERVAL, DEFAULT_SKIP_THRESHOLD};
use crate::types::{Cursor, DocId, Position};

#[derive(Debug, Clone)]
pub struct PostingsList {
    positions: Vec<Position>,
    skip: Option<SkipIndex>,
    skip_interval: usize,
    skip_threshold: usize,
}

impl Default for PostingsList {
    fn default() -> Self {
        Self::new()
    }
}

/// Equality is over stored positions only; the skip index is derived data.
impl PartialEq for PostingsList {
    fn eq(&self, other: &Self) -> bool {
        self.positions == other.positions
    }
}

impl Eq for PostingsList {}

impl PostingsList {
    pub fn new() -> Self {
        Self::with_skip(DEFAULT_SKIP_INTERVAL, DEFAULT_SKIP_THRESHOLD)
    }

    pub fn with_config(config: &IndexConfig) -> Self {
        Self::with_skip(config.skip_interval, config.skip_threshold)
    }

    pub fn with_skip(skip_interval: usize, skip_threshold: usize) -> Self {
        Self {
            positions: Vec::new(),
            skip: None,
            skip_interval: skip_interval.max(2),
            skip_threshold,
        }
    }

    /// Adopt an already sorted list (decoder path).
    ///
    /// Rejects input that is not strictly increasing.
    pub fn from_sorted(positions: Vec<Position>, config: &IndexConfig) -> io::Result<Self> {
        if let Some(i) = positions.windows(2).position(|w| w[0] >= w[1]) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "positions not strictly increasing at {}: {} >= {}",
                    i + 1,
                    positions[i],
                    positions[i + 1]
                ),
            ));
        }
        let mut list = Self::with_config(config);
        list.positions = positions;
        list.rebuild_skip();
        Ok(list)
    }

    // ------------------------------------------------------------------------
    // Cursor primitives
    // ------------------------------------------------------------------------

    /// Exact lookup. `None` when `target` is not stored.
    pub fn find(&self, target: Position) -> Option<Position> {
        let i = self.lower_bound(target);
        self.positions.get(i).copied().filter(|p| *p == target)
    }

    /// Smallest stored position strictly greater than `current`, else `Eof`.
    pub fn next(&self, current: Cursor) -> Cursor {
        let i = match current {
            Cursor::Bof => 0,
            Cursor::At(p) => self.upper_bound(p),
            Cursor::Eof => return Cursor::Eof,
        };
        self.positions.get(i).map_or(Cursor::Eof, |&p| Cursor::At(p))
    }

    /// Largest stored position strictly less than `current`, else `Bof`.
    pub fn previous(&self, current: Cursor) -> Cursor {
        let i = match current {
            Cursor::Bof => return Cursor::Bof,
            Cursor::At(p) => self.lower_bound(p),
            Cursor::Eof => self.positions.len(),
        };
        match i {
            0 => Cursor::Bof,
            _ => Cursor::At(self.positions[i - 1]),
        }
    }

    // ------------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------------

    /// Add one position. Appends when it sorts last, otherwise inserts in
    /// place. Returns `false` if it was already present.
    pub fn insert(&mut self, position: Position) -> bool {
        self.insert_sorted(&[position]) == 1
    }

    /// Add a strictly increasing run of positions (typically one document's
    /// occurrences of this term). Returns how many were new.
    pub fn insert_sorted(&mut self, run: &[Position]) -> usize {
        debug_assert!(run.windows(2).all(|w| w[0] < w[1]));
        let Some(&head) = run.first() else {
            return 0;
        };

        let old_len = self.positions.len();
        if self.positions.last().map_or(true, |&last| head > last) {
            // Common case: documents arrive in id order.
            self.positions.extend_from_slice(run);
            self.refresh_skip_after_append(old_len);
            return run.len();
        }

        let mut added = 0;
        for &p in run {
            let i = self.positions.partition_point(|&q| q < p);
            if self.positions.get(i) != Some(&p) {
                self.positions.insert(i, p);
                added += 1;
            }
        }
        if added > 0 {
            self.rebuild_skip();
        }
        added
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn first(&self) -> Option<Position> {
        self.positions.first().copied()
    }

    pub fn last(&self) -> Option<Position> {
        self.positions.last().copied()
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> + '_ {
        self.positions.iter()
    }

    pub fn skip_index(&self) -> Option<&SkipIndex> {
        self.skip.as_ref()
    }

    /// Number of distinct documents containing this term.
    pub fn doc_freq(&self) -> usize {
        let mut count = 0;
        let mut prev: Option<DocId> = None;
        for p in &self.positions {
            if prev != Some(p.doc_id) {
                count += 1;
                prev = Some(p.doc_id);
            }
        }
        count
    }

    pub fn contains_doc(&self, doc_id: DocId) -> bool {
        let i = self.lower_bound(Position::new(doc_id, 0));
        self.positions.get(i).is_some_and(|p| p.doc_id == doc_id)
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    /// Index of the first position `>= target`.
    fn lower_bound(&self, target: Position) -> usize {
        let (lo, hi) = self.window(target);
        lo + self.positions[lo..hi].partition_point(|&p| p < target)
    }

    /// Index of the first position `> target`.
    fn upper_bound(&self, target: Position) -> usize {
        let (lo, hi) = self.window(target);
        lo + self.positions[lo..hi].partition_point(|&p| p <= target)
    }

    fn window(&self, target: Position) -> (usize, usize) {
        match &self.skip {
            Some(skip) => skip.seek(target, self.positions.len()),
            None => (0, self.positions.len()),
        }
    }

    fn refresh_skip_after_append(&mut self, old_len: usize) {
        match &mut self.skip {
            Some(skip) => skip.extend(&self.positions, old_len),
            None => self.rebuild_skip(),
        }
    }

    fn rebuild_skip(&mut self) {
        self.skip = if self.positions.len() >= self.skip_threshold {
            Some(SkipIndex::build(&self.positions, self.skip_interval))
        } else {
            None
        };
    }
}
