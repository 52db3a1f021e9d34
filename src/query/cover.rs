// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Minimal covers: the shortest same-document windows holding every term.
//!
//! A cover `[u, v]` contains each distinct query term at least once, and no
//! smaller window inside it does. Finding the next one after a cursor takes
//! two sweeps over the terms:
//!
//! 1. `v` = the largest of `next(t, after)`. No cover after `after` can end
//!    before `v`, because some term does not occur until then.
//! 2. `u` = the smallest of each term's latest occurrence at or before `v`.
//!    That is the tightest start for a cover ending at `v`.
//!
//! If `u` and `v` land in different documents, `v`'s document is missing a
//! term somewhere before `v`. Restarting after `u` pushes `v` strictly
//! forward, so the search always terminates.
//!
//! Iterate by feeding the first returned position back in as `after`.
//!
//! # References
//!
//! - Clarke, Cormack, Tudhope (2000): "Relevance Ranking for One to Three
//!   Term Queries", Information Processing & Management 36(2).

use crate::error::Result;
use crate::index::InvertedIndex;
use crate::query::distinct_terms;
use crate::types::{Cursor, Position};

impl InvertedIndex {
    /// Next minimal cover of `terms` strictly after `after`.
    ///
    /// Repeated terms count once. The result holds one position per distinct
    /// term, sorted; its first and last entries are the window bounds. Empty
    /// when there are no further covers.
    pub fn next_cover<S: AsRef<str>>(
        &self,
        terms: &[S],
        after: impl Into<Cursor>,
    ) -> Result<Vec<Position>> {
        let terms = distinct_terms(terms)?;
        let mut after = after.into();

        loop {
            let Some(v) = self.cover_end(&terms, after) else {
                log::trace!("cover {:?} exhausted after {}", terms, after);
                return Ok(Vec::new());
            };
            let Some(mut window) = self.cover_window(&terms, v) else {
                return Ok(Vec::new());
            };
            // non-empty: one entry per distinct term
            let u = window.iter().copied().min().unwrap_or(v);
            if u.same_doc(v) {
                window.sort_unstable();
                return Ok(window);
            }
            log::trace!("cover {:?}: {}..{} crosses documents, retrying", terms, u, v);
            after = Cursor::At(u);
        }
    }

    /// Every minimal cover, in index order.
    pub fn all_covers<S: AsRef<str>>(&self, terms: &[S]) -> Result<Vec<Vec<Position>>> {
        let mut covers = Vec::new();
        let mut cursor = Cursor::Bof;
        loop {
            let cover = self.next_cover(terms, cursor)?;
            let Some(&start) = cover.first() else {
                break;
            };
            cursor = Cursor::At(start);
            covers.push(cover);
        }
        log::debug!("cover query found {} covers", covers.len());
        Ok(covers)
    }

    /// Sweep 1: the furthest next occurrence. `None` if any term is exhausted.
    fn cover_end(&self, terms: &[&str], after: Cursor) -> Option<Position> {
        let mut v = Cursor::Bof;
        for term in terms {
            let hit = self.next(term, after);
            if hit.is_eof() {
                return None;
            }
            v = v.max(hit);
        }
        v.position()
    }

    /// Sweep 2: each term's latest occurrence at or before `v`.
    fn cover_window(&self, terms: &[&str], v: Position) -> Option<Vec<Position>> {
        let bound = Cursor::At(v).successor();
        terms
            .iter()
            .map(|term| self.previous(term, bound).position())
            .collect()
    }
}
