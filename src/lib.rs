// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Positional inverted index with phrase, cover and proximity queries.
//!
//! Every term maps to a sorted list of `(doc_id, offset)` positions. All
//! query logic is written against three cursor primitives on those lists
//! (`find`, `next`, `previous`), so phrase search, minimal covers and
//! proximity ranking never scan a whole list.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ analyzer.rs │────▶│  index.rs    │────▶│ query/       │
//! │ (tokens)    │     │ (term map,   │     │ (next_phrase,│
//! └─────────────┘     │  per-term    │     │  next_cover) │
//!                     │  locks)      │     └──────┬───────┘
//! ┌─────────────┐     └──────┬───────┘            ▼
//! │ postings/   │◀───────────┘            ┌──────────────┐
//! │ (cursors,   │                         │ scoring.rs   │
//! │  skip index)│                         │ (proximity)  │
//! └─────────────┘                         └──────────────┘
//!        ▲
//! ┌──────┴──────┐     ┌──────────────┐
//! │ binary/     │     │ build/       │
//! │ (FSIX codec)│     │ (rayon batch │
//! └─────────────┘     │  ingestion)  │
//!                     └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use fastsearch::{Cursor, InvertedIndex, Position};
//!
//! let index = InvertedIndex::new();
//! index.index(1, "hello, my name is BATMAN!");
//! index.index(3, "What is your name");
//!
//! let phrase = index.next_phrase(&["your", "name"], Cursor::Bof).unwrap();
//! assert_eq!(phrase, vec![Position::new(3, 2), Position::new(3, 3)]);
//!
//! let bytes = index.encode();
//! let restored = InvertedIndex::decode(&bytes).unwrap();
//! assert_eq!(restored.next("name", Cursor::Bof), Cursor::at(1, 2));
//! ```

pub mod analyzer;
pub mod binary;
pub mod build;
pub mod config;
pub mod error;
mod index;
pub mod postings;
pub mod query;
pub mod scoring;
pub mod testing;
mod types;

pub use analyzer::{analyze, normalize, Analyzer, SimpleAnalyzer};
pub use binary::{read_header, IndexHeader, IndexSummary};
pub use build::{
    index_documents_parallel, index_tokens_parallel, load_text_documents, run_build,
    BuildReport, IngestStats, SourceDocument,
};
pub use config::IndexConfig;
pub use error::{IndexError, Result};
pub use index::{InvertedIndex, SharedPostings, TermStats};
pub use postings::PostingsList;
pub use scoring::{cover_score, score_covers};
pub use types::{Cursor, DocId, Offset, Position, ScoredDoc, RESERVED_DOC_ID};
