// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Proximity ranking: documents where the query terms sit close together win.
//!
//! Every minimal cover contributes `1 / (1 + span)` to its document, where
//! `span` is the offset distance between the cover's first and last term.
//! Adjacent terms score 0.5 for two terms, a cover stretching across a
//! paragraph scores close to nothing, and every additional cover adds on top.
//!
//! # Properties
//!
//! - **Monotone in tightness**: shrinking a cover's span never lowers the
//!   document's score.
//! - **Monotone in count**: an extra cover never lowers the score.
//! - **Deterministic order**: score descending, then document id ascending.
//! - **Conjunctive**: a document missing any query term has no cover and is
//!   never returned.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::error::{IndexError, Result};
use crate::index::InvertedIndex;
use crate::types::{DocId, Position, ScoredDoc};

/// Contribution of one cover. Empty covers contribute nothing.
pub fn cover_score(cover: &[Position]) -> f64 {
    match (cover.first(), cover.last()) {
        (Some(first), Some(last)) => {
            let span = f64::from(last.offset.saturating_sub(first.offset));
            1.0 / (1.0 + span)
        }
        _ => 0.0,
    }
}

/// Aggregate covers per document and order them best first.
pub fn score_covers(covers: &[Vec<Position>]) -> Vec<ScoredDoc> {
    let mut per_doc: BTreeMap<DocId, (f64, usize)> = BTreeMap::new();
    for cover in covers {
        let Some(first) = cover.first() else {
            continue;
        };
        let entry = per_doc.entry(first.doc_id).or_insert((0.0, 0));
        entry.0 += cover_score(cover);
        entry.1 += 1;
    }

    let mut ranked: Vec<ScoredDoc> = per_doc
        .into_iter()
        .map(|(doc_id, (score, covers))| ScoredDoc {
            doc_id,
            score,
            covers,
        })
        .collect();
    ranked.sort_by(compare_ranked);
    ranked
}

/// Score descending, ties by document id ascending.
fn compare_ranked(a: &ScoredDoc, b: &ScoredDoc) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.doc_id.cmp(&b.doc_id))
}

impl InvertedIndex {
    /// Rank documents by term proximity for a free-text `query`.
    ///
    /// Returns at most `limit` document ids, best first.
    ///
    /// # Errors
    ///
    /// [`IndexError::EmptyQuery`] when the analyzer yields no tokens.
    pub fn rank_proximity(&self, query: &str, limit: usize) -> Result<Vec<DocId>> {
        Ok(self
            .rank_proximity_scored(query, limit)?
            .into_iter()
            .map(|scored| scored.doc_id)
            .collect())
    }

    /// Like [`rank_proximity`](Self::rank_proximity), keeping scores and
    /// cover counts.
    pub fn rank_proximity_scored(&self, query: &str, limit: usize) -> Result<Vec<ScoredDoc>> {
        let tokens = self.analyzer().analyze(query);
        if tokens.is_empty() {
            return Err(IndexError::EmptyQuery);
        }

        let covers = self.all_covers(&tokens)?;
        let mut ranked = score_covers(&covers);
        log::debug!(
            "rank {:?}: {} covers across {} documents",
            query,
            covers.len(),
            ranked.len()
        );
        ranked.truncate(limit);
        Ok(ranked)
    }
}
