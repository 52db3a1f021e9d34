// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Plain-text source documents for the `index` command.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{IndexError, Result};
use crate::types::DocId;

/// Ids handed out by [`load_text_documents`] start here.
pub const FIRST_DOC_ID: DocId = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub id: DocId,
    /// File name, kept for reporting.
    pub name: String,
    pub text: String,
}

/// The `*.txt` files directly under `dir`, sorted by file name.
pub fn list_text_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| with_path(e, dir))?;
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| with_path(e, dir))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Load every `*.txt` under `dir` as one document. Ids follow file-name
/// order starting at [`FIRST_DOC_ID`], so the same directory always gets the
/// same ids.
pub fn load_text_documents(dir: &Path) -> Result<Vec<SourceDocument>> {
    let paths = list_text_files(dir)?;
    let numbered: Vec<(DocId, PathBuf)> = (FIRST_DOC_ID..).zip(paths).collect();

    #[cfg(feature = "parallel")]
    let iter = numbered.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = numbered.iter();

    let docs = iter
        .map(|(id, path)| -> Result<SourceDocument> {
            let text = fs::read_to_string(path).map_err(|e| with_path(e, path))?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(SourceDocument {
                id: *id,
                name,
                text,
            })
        })
        .collect::<Result<Vec<SourceDocument>>>()?;

    log::debug!("loaded {} documents from {}", docs.len(), dir.display());
    Ok(docs)
}

fn with_path(e: io::Error, path: &Path) -> IndexError {
    IndexError::Io(io::Error::new(
        e.kind(),
        format!("{}: {}", path.display(), e),
    ))
}
