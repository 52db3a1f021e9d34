// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sparse multi-level skip index over a sorted position list.
//!
//! Level 0 samples every `interval`-th position. Level k samples every
//! `interval`-th entry of level k-1. A lookup scans at most `interval` entries
//! per level on the way down, then binary-searches one block of the postings
//! list. Memory overhead is about `n / (interval - 1)` entries, not one link
//! per element.
//!
//! # References
//!
//! - **Skip Lists**: Pugh (1990): "Skip Lists: A Probabilistic Alternative to
//!   Balanced Trees", Communications of the ACM 33(6). This is the
//!   deterministic, array-backed flavor used by most inverted index formats.

use crate::types::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipEntry {
    /// First position of the block this entry starts.
    pub position: Position,
    /// Index into the level below (level 0: index into the postings).
    pub target: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipIndex {
    interval: usize,
    /// `levels[0]` is the finest granularity.
    levels: Vec<Vec<SkipEntry>>,
}

impl SkipIndex {
    /// Build a skip index for `positions`. Caller decides whether the list is
    /// long enough to deserve one.
    pub fn build(positions: &[Position], interval: usize) -> Self {
        debug_assert!(interval >= 2);
        let level0: Vec<SkipEntry> = positions
            .iter()
            .enumerate()
            .step_by(interval)
            .map(|(target, &position)| SkipEntry { position, target })
            .collect();

        let mut index = SkipIndex {
            interval,
            levels: vec![level0],
        };
        index.grow_levels();
        index
    }

    pub fn interval(&self) -> usize {
        self.interval
    }

    pub fn levels(&self) -> &[Vec<SkipEntry>] {
        &self.levels
    }

    /// Account for positions appended at the tail. `old_len` is the list
    /// length before the append.
    pub fn extend(&mut self, positions: &[Position], old_len: usize) {
        let first_new = old_len.div_ceil(self.interval) * self.interval;
        for target in (first_new..positions.len()).step_by(self.interval) {
            self.levels[0].push(SkipEntry {
                position: positions[target],
                target,
            });
            self.propagate_up();
        }
        self.grow_levels();
    }

    /// Narrow the search for `target` to `lo..=hi` in the postings list.
    ///
    /// Positions before `lo` sort below a block start that is `<= target`, and
    /// positions at or after `hi` sort above `target`, so both the lower and
    /// the upper bound of `target` lie in `lo..=hi`.
    pub fn seek(&self, target: Position, postings_len: usize) -> (usize, usize) {
        let mut lo = 0usize;
        let mut hi = self.levels.last().map_or(0, Vec::len);

        for level in (0..self.levels.len()).rev() {
            let entries = &self.levels[level];
            // Last entry in [lo, hi) whose block starts at or before target.
            let window = &entries[lo..hi];
            let found = window.partition_point(|e| e.position <= target);
            if found == 0 {
                // Only possible at the top level: every lower window starts
                // with a copy of its parent entry, which is <= target.
                return (0, 0);
            }
            let j = lo + found - 1;
            let below_len = if level == 0 {
                postings_len
            } else {
                self.levels[level - 1].len()
            };
            lo = entries[j].target;
            hi = entries.get(j + 1).map_or(below_len, |e| e.target);
        }

        (lo, hi)
    }

    fn propagate_up(&mut self) {
        let mut level = 1;
        while level < self.levels.len() {
            let i = self.levels[level - 1].len() - 1;
            if i % self.interval != 0 {
                break;
            }
            let position = self.levels[level - 1][i].position;
            self.levels[level].push(SkipEntry {
                position,
                target: i,
            });
            level += 1;
        }
    }

    fn grow_levels(&mut self) {
        while self.levels.last().is_some_and(|top| top.len() > self.interval) {
            let below = &self.levels[self.levels.len() - 1];
            let next: Vec<SkipEntry> = below
                .iter()
                .enumerate()
                .step_by(self.interval)
                .map(|(target, e)| SkipEntry {
                    position: e.position,
                    target,
                })
                .collect();
            self.levels.push(next);
        }
    }
}
