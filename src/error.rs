// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error type for index operations.
//!
//! Running off either end of a postings list is not an error; cursors land on
//! `Bof`/`Eof` instead. Everything here is local to one call and recoverable.

use std::io;

use thiserror::Error;

use crate::types::Position;

#[derive(Error, Debug)]
pub enum IndexError {
    /// `find` on a position that is not stored. Expected during search.
    #[error("position {position} not found for term {term:?}")]
    NotFound { term: String, position: Position },

    /// Phrase, cover, or rank query with zero terms.
    #[error("query has no terms")]
    EmptyQuery,

    /// Malformed serialized index. No index is produced.
    #[error("decode error: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[source] io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// Encoded body does not fit the header's `u32` length field.
    #[error("encoded body of {bytes} bytes exceeds the 4 GiB format limit")]
    TooLarge { bytes: usize },
}

pub type Result<T> = std::result::Result<T, IndexError>;

impl IndexError {
    /// True for the expected, non-anomalous outcomes of a search.
    pub fn is_not_found(&self) -> bool {
        matches!(self, IndexError::NotFound { .. })
    }

    pub(crate) fn not_found(term: &str, position: Position) -> Self {
        IndexError::NotFound {
            term: term.to_string(),
            position,
        }
    }
}

/// Low-level codec primitives report `io::Error`; anything that surfaces from
/// a byte slice is a decode failure, real I/O failures stay I/O.
impl From<io::Error> for IndexError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => {
                IndexError::Decode(e.to_string())
            }
            _ => IndexError::Io(e),
        }
    }
}
