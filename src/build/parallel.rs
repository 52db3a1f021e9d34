// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel batch ingestion.
//!
//! Documents are independent, and the index already locks per term, so a
//! batch is embarrassingly parallel: rayon hands each worker whole documents
//! and every worker calls `concurrent_index`. Two workers only contend when
//! they hit the same term at the same moment, and then only on that term.
//!
//! Small batches stay on the calling thread. Below `parallel_min_docs` the
//! pool overhead costs more than it saves.

use serde::Serialize;

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::index::InvertedIndex;
use crate::types::DocId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestStats {
    pub documents: usize,
    pub tokens: usize,
}

/// Analyze and index a batch of raw-text documents.
pub fn index_documents_parallel<T>(index: &InvertedIndex, docs: &[(DocId, T)]) -> IngestStats
where
    T: AsRef<str> + Sync,
{
    ingest(index, docs, |(doc_id, text)| index.index(*doc_id, text.as_ref()))
}

/// Index a batch of pre-tokenized documents.
pub fn index_tokens_parallel<S>(index: &InvertedIndex, docs: &[(DocId, Vec<S>)]) -> IngestStats
where
    S: AsRef<str> + Sync,
{
    ingest(index, docs, |(doc_id, tokens)| {
        index.concurrent_index(*doc_id, tokens)
    })
}

/// [`index_documents_parallel`] that ticks `progress` once per document.
#[cfg(feature = "parallel")]
pub fn index_documents_with_progress<T>(
    index: &InvertedIndex,
    docs: &[(DocId, T)],
    progress: &ProgressBar,
) -> IngestStats
where
    T: AsRef<str> + Sync,
{
    ingest(index, docs, |(doc_id, text)| {
        let tokens = index.index(*doc_id, text.as_ref());
        progress.inc(1);
        tokens
    })
}

fn ingest<D, F>(index: &InvertedIndex, docs: &[D], ingest_one: F) -> IngestStats
where
    D: Sync,
    F: Fn(&D) -> usize + Sync + Send,
{
    let parallel = cfg!(feature = "parallel") && docs.len() >= index.config().parallel_min_docs;
    let tokens = if parallel {
        sum_parallel(docs, &ingest_one)
    } else {
        docs.iter().map(&ingest_one).sum()
    };

    let stats = IngestStats {
        documents: docs.len(),
        tokens,
    };
    log::debug!(
        "ingested {} documents ({} tokens, {})",
        stats.documents,
        stats.tokens,
        if parallel { "parallel" } else { "sequential" }
    );
    stats
}

#[cfg(feature = "parallel")]
fn sum_parallel<D, F>(docs: &[D], ingest_one: &F) -> usize
where
    D: Sync,
    F: Fn(&D) -> usize + Sync + Send,
{
    docs.par_iter().map(ingest_one).sum()
}

#[cfg(not(feature = "parallel"))]
fn sum_parallel<D, F>(docs: &[D], ingest_one: &F) -> usize
where
    F: Fn(&D) -> usize,
{
    docs.iter().map(ingest_one).sum()
}
