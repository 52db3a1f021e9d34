// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Directory → encoded index file, the `index` command's pipeline.
//!
//! Load text files (parallel), ingest them (parallel), encode, write. Progress
//! bars show up when the `parallel` feature is on.

pub mod document;
pub mod parallel;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::binary::IndexSummary;
use crate::config::IndexConfig;
use crate::error::{IndexError, Result};
use crate::index::InvertedIndex;
use crate::types::DocId;

pub use document::*;
pub use parallel::*;

/// What `run_build` did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildReport {
    pub ingest: IngestStats,
    pub summary: IndexSummary,
    pub bytes_written: usize,
}

/// Create a progress style for the build progress bars
#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {prefix:<10} [{bar:40.cyan/dim}] {pos}/{len} {msg}")
        .map(|style| style.progress_chars("━━╸"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

/// Index every `*.txt` file in `input_dir` and write the encoded index to
/// `output`.
pub fn run_build(input_dir: &Path, output: &Path, config: IndexConfig) -> Result<BuildReport> {
    let documents = load_text_documents(input_dir)?;
    if documents.is_empty() {
        log::warn!("no .txt documents in {}", input_dir.display());
    }

    let index = InvertedIndex::with_config(config)?;
    let batch: Vec<(DocId, &str)> = documents
        .iter()
        .map(|doc| (doc.id, doc.text.as_str()))
        .collect();

    #[cfg(feature = "parallel")]
    let ingest = {
        let progress = ProgressBar::new(batch.len() as u64);
        progress.set_style(create_progress_style());
        progress.set_prefix("Indexing");
        let stats = index_documents_with_progress(&index, &batch, &progress);
        progress.finish_with_message(format!("{} tokens", stats.tokens));
        stats
    };
    #[cfg(not(feature = "parallel"))]
    let ingest = index_documents_parallel(&index, &batch);

    let file = File::create(output).map_err(IndexError::Io)?;
    let mut writer = BufWriter::new(file);
    let bytes_written = index.encode_to(&mut writer)?;
    writer.flush().map_err(IndexError::Io)?;

    let report = BuildReport {
        ingest,
        summary: index.summary(),
        bytes_written,
    };
    log::info!(
        "wrote {} ({} documents, {} terms, {} bytes)",
        output.display(),
        report.ingest.documents,
        report.summary.term_count,
        report.bytes_written
    );
    Ok(report)
}
