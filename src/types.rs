// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of the postings engine.
//!
//! A `Position` is one recorded occurrence of a term: which document, and
//! which token offset inside it. A `Cursor` is what query code walks with:
//! either a real position or one of the two sentinels that sit outside every
//! postings list.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Position order**: lexicographic on `(doc_id, offset)`. The derived `Ord`
//!   depends on field declaration order. Do not reorder the fields.
//!
//! - **Cursor order**: `Bof < At(_) < Eof`. The derived `Ord` depends on
//!   variant declaration order. Do not reorder the variants either.
//!
//! - **Sentinels are never stored.** Postings lists only hold `Position`s.
//!   `Bof`/`Eof` exist purely as navigation boundaries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Document identifier as assigned by the caller.
pub type DocId = u32;

/// Token offset within a document (0-based, counts analyzer tokens).
pub type Offset = u32;

/// Stands in for `Eof` on disk. Never a valid document id.
pub const RESERVED_DOC_ID: DocId = DocId::MAX;

/// One occurrence of a term.
///
/// Total order: by document, then by offset within the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub doc_id: DocId,
    pub offset: Offset,
}

impl Position {
    #[inline]
    pub const fn new(doc_id: DocId, offset: Offset) -> Self {
        Self { doc_id, offset }
    }

    /// The smallest position strictly greater than `self`, if it is representable.
    ///
    /// Rolls into the next document when the offset is saturated.
    #[inline]
    pub fn successor(self) -> Option<Self> {
        match self.offset.checked_add(1) {
            Some(offset) => Some(Self::new(self.doc_id, offset)),
            None => self.doc_id.checked_add(1).map(|doc_id| Self::new(doc_id, 0)),
        }
    }

    /// True when `self` and `other` belong to the same document.
    #[inline]
    pub fn same_doc(self, other: Position) -> bool {
        self.doc_id == other.doc_id
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.doc_id, self.offset)
    }
}

impl From<(DocId, Offset)> for Position {
    fn from((doc_id, offset): (DocId, Offset)) -> Self {
        Self::new(doc_id, offset)
    }
}

/// Navigation reference for `next`/`previous` walks.
///
/// `Bof` compares below every real position and `Eof` above every real
/// position. Walking past either end of a postings list is not an error,
/// it simply lands on the corresponding sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Cursor {
    Bof,
    At(Position),
    Eof,
}

impl Cursor {
    #[inline]
    pub const fn at(doc_id: DocId, offset: Offset) -> Self {
        Cursor::At(Position::new(doc_id, offset))
    }

    /// The real position, if this cursor is not a sentinel.
    #[inline]
    pub fn position(self) -> Option<Position> {
        match self {
            Cursor::At(p) => Some(p),
            Cursor::Bof | Cursor::Eof => None,
        }
    }

    #[inline]
    pub fn is_eof(self) -> bool {
        matches!(self, Cursor::Eof)
    }

    /// The smallest cursor strictly greater than `self`.
    ///
    /// `Bof` has no finite successor among cursors, so it stays `Bof`; callers
    /// use this only on real positions to build "at or before" bounds.
    #[inline]
    pub fn successor(self) -> Self {
        match self {
            Cursor::At(p) => p.successor().map_or(Cursor::Eof, Cursor::At),
            other => other,
        }
    }
}

impl From<Position> for Cursor {
    fn from(p: Position) -> Self {
        Cursor::At(p)
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cursor::Bof => f.write_str("BOF"),
            Cursor::At(p) => p.fmt(f),
            Cursor::Eof => f.write_str("EOF"),
        }
    }
}

/// A document and its proximity score, as returned by ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredDoc {
    pub doc_id: DocId,
    pub score: f64,
    /// Number of covers that contributed to `score`.
    pub covers: usize,
}
