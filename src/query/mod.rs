// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Positional queries: where cursors turn into answers.
//!
//! Both query kinds are built purely from `next` and `previous` on the
//! per-term lists. Neither one materializes a postings list or intersects
//! documents up front; they leapfrog between term cursors and let the skip
//! index do the heavy lifting.
//!
//! - [`phrase`]: exact, contiguous, in-order occurrences.
//! - [`cover`]: minimal same-document windows holding every term.

pub mod cover;
pub mod phrase;

use crate::error::{IndexError, Result};

/// Borrow the query terms, rejecting an empty query.
pub(crate) fn query_terms<S: AsRef<str>>(terms: &[S]) -> Result<Vec<&str>> {
    if terms.is_empty() {
        return Err(IndexError::EmptyQuery);
    }
    Ok(terms.iter().map(AsRef::as_ref).collect())
}

/// Like [`query_terms`], with repeated terms removed (first occurrence wins).
pub(crate) fn distinct_terms<S: AsRef<str>>(terms: &[S]) -> Result<Vec<&str>> {
    let mut distinct = query_terms(terms)?;
    let mut seen = std::collections::HashSet::with_capacity(distinct.len());
    distinct.retain(|term| seen.insert(*term));
    Ok(distinct)
}
