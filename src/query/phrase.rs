// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Exact phrase search by cursor chaining.
//!
//! Forward pass: jump each term's cursor past the previous term's hit. The
//! last hit `v` is the earliest place the phrase could possibly end. Backward
//! pass: from `v`, step every earlier term back to its latest occurrence
//! before the next word. That gives the tightest start `u` for an occurrence
//! ending at `v`. If `u..=v` spans exactly `n` tokens in one document, that's
//! the phrase; otherwise restart the search after `u`.
//!
//! ```text
//! terms: [your, name]          doc 3: what is your name
//!                                     0    1  2    3
//! forward:  next(your, BOF) = 3:2   next(name, 3:2) = 3:3   → v = 3:3
//! backward: previous(your, 3:3) = 3:2                        → u = 3:2
//! 3 - 2 == 1 == n - 1                                        → match
//! ```
//!
//! Each restart moves `u` strictly forward, so the loop runs at most once per
//! occurrence of the first term.
//!
//! # References
//!
//! - Büttcher, Clarke, Cormack (2010): "Information Retrieval: Implementing
//!   and Evaluating Search Engines", §2.1.1 "Phrase Search".

use crate::error::Result;
use crate::index::InvertedIndex;
use crate::query::query_terms;
use crate::types::{Cursor, Offset, Position};

impl InvertedIndex {
    /// First occurrence of the phrase `terms` strictly after `after`.
    ///
    /// Returns one position per word (consecutive offsets in one document),
    /// or an empty vector once the phrase has no further occurrences.
    ///
    /// # Errors
    ///
    /// [`IndexError::EmptyQuery`](crate::IndexError::EmptyQuery) when `terms`
    /// is empty.
    pub fn next_phrase<S: AsRef<str>>(
        &self,
        terms: &[S],
        after: impl Into<Cursor>,
    ) -> Result<Vec<Position>> {
        let terms = query_terms(terms)?;
        let span = (terms.len() - 1) as u64;
        let mut after = after.into();

        loop {
            let Some(v) = self.chain_forward(&terms, after) else {
                log::trace!("phrase {:?} exhausted after {}", terms, after);
                return Ok(Vec::new());
            };
            let Some(u) = self.chain_backward(&terms, v) else {
                return Ok(Vec::new());
            };

            if u.same_doc(v) && u64::from(v.offset) - u64::from(u.offset) == span {
                return Ok((0..terms.len())
                    .map(|i| Position::new(u.doc_id, u.offset + i as Offset))
                    .collect());
            }
            log::trace!("phrase {:?}: {}..{} is not contiguous, retrying", terms, u, v);
            after = Cursor::At(u);
        }
    }

    /// Every occurrence of the phrase, in index order.
    ///
    /// Overlapping occurrences are all reported ("a a" in "a a a" matches at
    /// offsets 0 and 1).
    pub fn all_phrases<S: AsRef<str>>(&self, terms: &[S]) -> Result<Vec<Vec<Position>>> {
        let mut matches = Vec::new();
        let mut cursor = Cursor::Bof;
        loop {
            let found = self.next_phrase(terms, cursor)?;
            let Some(&start) = found.first() else {
                break;
            };
            cursor = Cursor::At(start);
            matches.push(found);
        }
        log::debug!("phrase query matched {} occurrences", matches.len());
        Ok(matches)
    }

    /// Forward pass: the earliest position the phrase could end at.
    fn chain_forward(&self, terms: &[&str], after: Cursor) -> Option<Position> {
        let mut v = after;
        for term in terms {
            v = self.next(term, v);
            if v.is_eof() {
                return None;
            }
        }
        v.position()
    }

    /// Backward pass: the latest start for an occurrence ending at `v`.
    fn chain_backward(&self, terms: &[&str], v: Position) -> Option<Position> {
        let mut u = Cursor::At(v);
        for term in terms[..terms.len() - 1].iter().rev() {
            u = self.previous(term, u);
        }
        u.position()
    }
}
