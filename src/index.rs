// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The inverted index: term → positional postings list.
//!
//! Locking is per term. The term map has its own lock, but it is only held
//! long enough to look up (or lazily create) a term's entry and clone its
//! `Arc`. Mutating or reading a postings list happens under that list's own
//! `RwLock`, so ingesting "odyssey" never waits on someone ingesting "homer".
//!
//! ```text
//!   terms: RwLock<HashMap<String, Arc<RwLock<PostingsList>>>>
//!            │  held briefly: lookup / insert-if-absent
//!            ▼
//!   "homer" ──▶ RwLock<PostingsList>   ◀── writer for doc 7, readers wait
//!   "odyssey" ─▶ RwLock<PostingsList>  ◀── independent
//! ```
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **NO_EMPTY_TERMS**: an entry is created by the writer that is about to
//!    insert its first positions. A reader can catch it empty for that
//!    instant only; `encode` and `summary` skip empty lists.
//! 2. **MAP_LOCK_NOT_NESTED**: never hold the map lock while taking a term
//!    lock. Clone the `Arc` and drop the map guard first.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::analyzer::{Analyzer, SimpleAnalyzer};
use crate::config::IndexConfig;
use crate::error::{IndexError, Result};
use crate::postings::PostingsList;
use crate::types::{Cursor, DocId, Offset, Position, RESERVED_DOC_ID};

pub type SharedPostings = Arc<RwLock<PostingsList>>;

/// Per-term counts, as reported by `inspect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TermStats {
    pub term: String,
    pub doc_freq: usize,
    pub positions: usize,
}

pub struct InvertedIndex {
    terms: RwLock<HashMap<String, SharedPostings>>,
    analyzer: Arc<dyn Analyzer>,
    config: IndexConfig,
}

impl Default for InvertedIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InvertedIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvertedIndex")
            .field("terms", &self.term_count())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self {
            terms: RwLock::new(HashMap::new()),
            analyzer: Arc::new(SimpleAnalyzer),
            config: IndexConfig::default(),
        }
    }

    pub fn with_config(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// Replace the analyzer used by [`index`](Self::index) and
    /// [`rank_proximity`](Self::rank_proximity).
    pub fn with_analyzer(mut self, analyzer: impl Analyzer + 'static) -> Self {
        self.analyzer = Arc::new(analyzer);
        self
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn analyzer(&self) -> &dyn Analyzer {
        self.analyzer.as_ref()
    }

    // ------------------------------------------------------------------------
    // Ingestion
    // ------------------------------------------------------------------------

    /// Analyze `text` and record every token at its offset in `doc_id`.
    ///
    /// Returns the number of tokens indexed.
    pub fn index(&self, doc_id: DocId, text: &str) -> usize {
        let tokens = self.analyzer.analyze(text);
        self.concurrent_index(doc_id, &tokens)
    }

    /// Record pre-tokenized input. Safe to call from many threads at once for
    /// different documents; out-of-order document ids are inserted in place.
    ///
    /// Re-indexing the same `(doc_id, tokens)` is a no-op.
    ///
    /// [`RESERVED_DOC_ID`] cannot be persisted and is skipped with a warning.
    pub fn concurrent_index<S: AsRef<str>>(&self, doc_id: DocId, tokens: &[S]) -> usize {
        if doc_id == RESERVED_DOC_ID {
            log::warn!("doc id {} is reserved, skipping document", doc_id);
            return 0;
        }

        // One lock acquisition per distinct term, not per token.
        let mut runs: HashMap<&str, Vec<Position>> = HashMap::new();
        for (offset, token) in tokens.iter().enumerate() {
            runs.entry(token.as_ref())
                .or_default()
                .push(Position::new(doc_id, offset as Offset));
        }

        let distinct = runs.len();
        for (term, run) in runs {
            let postings = self.entry(term);
            postings.write().insert_sorted(&run);
        }

        log::trace!(
            "indexed doc {} ({} tokens, {} distinct terms)",
            doc_id,
            tokens.len(),
            distinct
        );
        tokens.len()
    }

    /// Get the postings for `term`, creating an empty list on first use.
    fn entry(&self, term: &str) -> SharedPostings {
        if let Some(postings) = self.terms.read().get(term) {
            return Arc::clone(postings);
        }
        let mut terms = self.terms.write();
        // Another writer may have created it between the two locks.
        let postings = terms
            .entry(term.to_string())
            .or_insert_with(|| Arc::new(RwLock::new(PostingsList::with_config(&self.config))));
        Arc::clone(postings)
    }

    /// Assemble an index from already built lists (decoder path).
    pub(crate) fn from_lists(
        config: IndexConfig,
        lists: impl IntoIterator<Item = (String, PostingsList)>,
    ) -> Self {
        let terms = lists
            .into_iter()
            .map(|(term, list)| (term, Arc::new(RwLock::new(list))))
            .collect();
        Self {
            terms: RwLock::new(terms),
            config,
            ..Self::new()
        }
    }

    // ------------------------------------------------------------------------
    // Cursor primitives by term
    // ------------------------------------------------------------------------

    /// The shared postings for `term`, if it has ever been indexed.
    pub fn postings(&self, term: &str) -> Option<SharedPostings> {
        self.terms.read().get(term).map(Arc::clone)
    }

    /// Exact lookup of `position` in `term`'s postings.
    pub fn find(&self, term: &str, position: Position) -> Result<Position> {
        self.postings(term)
            .and_then(|postings| postings.read().find(position))
            .ok_or_else(|| IndexError::not_found(term, position))
    }

    /// Next occurrence of `term` strictly after `current`. Unknown terms
    /// behave like empty lists.
    pub fn next(&self, term: &str, current: impl Into<Cursor>) -> Cursor {
        let current = current.into();
        match self.postings(term) {
            Some(postings) => postings.read().next(current),
            None => Cursor::Eof,
        }
    }

    /// Previous occurrence of `term` strictly before `current`.
    pub fn previous(&self, term: &str, current: impl Into<Cursor>) -> Cursor {
        let current = current.into();
        match self.postings(term) {
            Some(postings) => postings.read().previous(current),
            None => Cursor::Bof,
        }
    }

    // ------------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------------

    pub fn term_count(&self) -> usize {
        self.terms.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.read().is_empty()
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.terms.read().contains_key(term)
    }

    /// All terms, sorted.
    pub fn terms(&self) -> Vec<String> {
        let mut terms: Vec<String> = self.terms.read().keys().cloned().collect();
        terms.sort_unstable();
        terms
    }

    /// Total stored positions across all terms.
    pub fn total_postings(&self) -> usize {
        self.shared_lists()
            .iter()
            .map(|(_, postings)| postings.read().len())
            .sum()
    }

    /// Number of documents containing `term`.
    pub fn doc_freq(&self, term: &str) -> usize {
        self.postings(term).map_or(0, |p| p.read().doc_freq())
    }

    /// The `n` terms that occur in the most documents, ties by term.
    pub fn top_terms(&self, n: usize) -> Vec<TermStats> {
        let mut stats: Vec<TermStats> = self
            .shared_lists()
            .into_iter()
            .map(|(term, postings)| {
                let postings = postings.read();
                TermStats {
                    term,
                    doc_freq: postings.doc_freq(),
                    positions: postings.len(),
                }
            })
            .collect();
        stats.sort_by(|a, b| b.doc_freq.cmp(&a.doc_freq).then_with(|| a.term.cmp(&b.term)));
        stats.truncate(n);
        stats
    }

    /// Point-in-time copy of every list, keyed and ordered by term.
    ///
    /// Consistent per term, not across terms, if ingestion is still running.
    pub fn snapshot(&self) -> BTreeMap<String, Vec<Position>> {
        self.shared_lists()
            .into_iter()
            .map(|(term, postings)| {
                let positions = postings.read().positions().to_vec();
                (term, positions)
            })
            .collect()
    }

    /// Term/list pairs sorted by term, with the map lock already released.
    pub(crate) fn shared_lists(&self) -> Vec<(String, SharedPostings)> {
        let mut lists: Vec<(String, SharedPostings)> = self
            .terms
            .read()
            .iter()
            .map(|(term, postings)| (term.clone(), Arc::clone(postings)))
            .collect();
        lists.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        lists
    }
}
