// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary format for persisted indexes.
//!
//! One flat body between a fixed header and a checksummed footer. Terms are
//! written in lexicographic order, so encoding the same index twice gives the
//! same bytes. Skip indexes are derived data and are rebuilt on decode, not
//! stored.
//!
//! # Security Considerations
//!
//! This format is designed to be safely parsed from untrusted sources:
//! - Header lengths must match the buffer exactly (no truncation, no trailing bytes)
//! - CRC32 footer detects corruption before the body is parsed
//! - Counts are checked against remaining bytes before allocating
//! - Varint decoder has maximum iteration limits
//! - Every list must be strictly increasing; the reserved doc id is rejected
//!
//! # Format Overview (v1)
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ HEADER (14 bytes)                                          │
//! │   magic: [u8; 4] = "FSIX"                                  │
//! │   version: u8 = 1                                          │
//! │   flags: u8 = 0                                            │
//! │   term_count: u32 LE                                       │
//! │   body_len: u32 LE                                         │
//! ├────────────────────────────────────────────────────────────┤
//! │ BODY (term_count entries, sorted by term)                  │
//! │   term_len: varint, term: utf-8                            │
//! │   position_count: varint                                   │
//! │   positions: (doc_gap varint, offset varint) * count       │
//! ├────────────────────────────────────────────────────────────┤
//! │ FOOTER (8 bytes): crc32 + magic "XISF"                     │
//! └────────────────────────────────────────────────────────────┘
//! ```

mod encoding;
mod header;
mod postings;

pub use encoding::{decode_str, decode_varint, encode_str, encode_varint};
pub use header::{
    FormatFlags, IndexFooter, IndexHeader, FOOTER_MAGIC, MAGIC, MAX_TERM_COUNT, MAX_TERM_LEN,
    MAX_VARINT_BYTES, VERSION,
};
pub use postings::{decode_positions, encode_positions};

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::io::{self, Read, Write};

use serde::Serialize;

use crate::config::IndexConfig;
use crate::error::{IndexError, Result};
use crate::index::InvertedIndex;
use crate::postings::PostingsList;
use crate::types::DocId;

/// Counts describing an index, for `inspect` and logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSummary {
    pub term_count: usize,
    pub total_postings: usize,
    pub doc_count: usize,
    pub max_doc_id: Option<DocId>,
}

impl InvertedIndex {
    /// Serialize the index.
    ///
    /// Assumes ingestion has quiesced. Lists are read one term at a time, so
    /// concurrent writers would make the result a mix of before and after.
    ///
    /// # Size limit
    ///
    /// The header stores the body length as a `u32`, so the encoded body
    /// must stay under 4 GiB. Past that, this logs an error and the output
    /// will not decode. [`try_encode`](Self::try_encode) and
    /// [`encode_to`](Self::encode_to) return [`IndexError::TooLarge`]
    /// instead.
    pub fn encode(&self) -> Vec<u8> {
        let (term_count, body) = self.encode_body();
        let body_len = body_len_u32(body.len()).unwrap_or_else(|e| {
            log::error!("{}; writing an undecodable index", e);
            u32::MAX
        });
        seal(term_count, body_len, &body)
    }

    /// Like [`encode`](Self::encode), failing instead of writing a body the
    /// header cannot describe.
    pub fn try_encode(&self) -> Result<Vec<u8>> {
        let (term_count, body) = self.encode_body();
        let body_len = body_len_u32(body.len())?;
        Ok(seal(term_count, body_len, &body))
    }

    /// Encode into `w`, returning the number of bytes written.
    pub fn encode_to<W: Write>(&self, w: &mut W) -> Result<usize> {
        let bytes = self.try_encode()?;
        w.write_all(&bytes).map_err(IndexError::Io)?;
        Ok(bytes.len())
    }

    /// Sorted term entries, skipping empty lists.
    fn encode_body(&self) -> (u32, Vec<u8>) {
        let mut body = Vec::new();
        let mut term_count = 0u32;
        for (term, postings) in self.shared_lists() {
            let postings = postings.read();
            if postings.is_empty() {
                continue;
            }
            encode_str(&term, &mut body);
            encode_positions(postings.positions(), &mut body);
            term_count += 1;
        }
        (term_count, body)
    }

    /// Rebuild an index from [`encode`](Self::encode) output, with default
    /// configuration.
    ///
    /// # Errors
    ///
    /// [`IndexError::Decode`] on any malformed input; no partial index is
    /// ever returned.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Self::decode_with_config(bytes, IndexConfig::default())
    }

    /// Like [`decode`](Self::decode), building skip indexes per `config`.
    pub fn decode_with_config(bytes: &[u8], config: IndexConfig) -> Result<Self> {
        config.validate()?;
        let lists = decode_lists(bytes, &config).map_err(|e| {
            log::warn!("rejecting encoded index ({} bytes): {}", bytes.len(), e);
            IndexError::Decode(e.to_string())
        })?;
        log::debug!("decoded {} terms from {} bytes", lists.len(), bytes.len());
        Ok(Self::from_lists(config, lists))
    }

    /// Read exactly one encoded index from `r`.
    ///
    /// The header is read first to learn the total size; nothing after the
    /// footer is consumed.
    pub fn decode_from<R: Read>(r: &mut R) -> Result<Self> {
        let mut head = [0u8; IndexHeader::SIZE];
        r.read_exact(&mut head)?;
        let header = IndexHeader::read(&mut &head[..])?;

        let rest = (header.total_size() - IndexHeader::SIZE) as u64;
        let mut bytes = Vec::with_capacity(IndexHeader::SIZE);
        bytes.extend_from_slice(&head);
        let read = r.take(rest).read_to_end(&mut bytes)?;
        if (read as u64) < rest {
            return Err(IndexError::Decode(format!(
                "truncated index: expected {} bytes, got {}",
                header.total_size(),
                bytes.len()
            )));
        }
        Self::decode(&bytes)
    }

    pub fn summary(&self) -> IndexSummary {
        let mut docs = BTreeSet::new();
        let mut term_count = 0;
        let mut total_postings = 0;
        for (_, postings) in self.shared_lists() {
            let postings = postings.read();
            if postings.is_empty() {
                continue;
            }
            term_count += 1;
            total_postings += postings.len();
            docs.extend(postings.iter().map(|p| p.doc_id));
        }
        IndexSummary {
            term_count,
            total_postings,
            doc_count: docs.len(),
            max_doc_id: docs.last().copied(),
        }
    }
}

/// The header's `body_len` field is a `u32`.
fn body_len_u32(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| IndexError::TooLarge { bytes: len })
}

/// Wrap `body` in header and footer.
fn seal(term_count: u32, body_len: u32, body: &[u8]) -> Vec<u8> {
    let header = IndexHeader::new(term_count, body_len);
    let mut out = Vec::with_capacity(IndexHeader::SIZE + body.len() + IndexFooter::SIZE);
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(body);
    let footer = IndexFooter::for_content(&out);
    out.extend_from_slice(&footer.to_bytes());

    log::debug!(
        "encoded {} terms into {} bytes ({} body)",
        term_count,
        out.len(),
        body.len()
    );
    out
}

/// Parse and validate the header of an encoded index without decoding the
/// body.
pub fn read_header(bytes: &[u8]) -> Result<IndexHeader> {
    Ok(IndexHeader::read(&mut &bytes[..])?)
}

fn decode_lists(bytes: &[u8], config: &IndexConfig) -> io::Result<Vec<(String, PostingsList)>> {
    let header = IndexHeader::read(&mut &bytes[..])?;

    let expected = header.total_size();
    match bytes.len().cmp(&expected) {
        Ordering::Less => {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("Truncated: expected {} bytes, got {}", expected, bytes.len()),
            ));
        }
        Ordering::Greater => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{} trailing bytes after footer", bytes.len() - expected),
            ));
        }
        Ordering::Equal => {}
    }

    let content_end = expected - IndexFooter::SIZE;
    IndexFooter::read(bytes)?.verify(&bytes[..content_end])?;

    let body = &bytes[IndexHeader::SIZE..content_end];
    let mut pos = 0;
    // Each term needs at least 4 bytes (len, count, one position).
    let capacity = (header.term_count as usize).min(body.len() / 4);
    let mut lists: Vec<(String, PostingsList)> = Vec::with_capacity(capacity);

    for i in 0..header.term_count {
        let (term, used) = decode_str(&body[pos..])?;
        pos += used;

        if let Some((prev, _)) = lists.last() {
            match term.as_str().cmp(prev.as_str()) {
                Ordering::Greater => {}
                Ordering::Equal => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("Duplicate term {:?} at entry {}", term, i),
                    ));
                }
                Ordering::Less => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("Term {:?} out of order at entry {}", term, i),
                    ));
                }
            }
        }

        let (positions, used) = decode_positions(&body[pos..])?;
        pos += used;
        let list = PostingsList::from_sorted(positions, config)?;
        lists.push((term, list));
    }

    if pos != body.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} trailing bytes in body", body.len() - pos),
        ));
    }
    Ok(lists)
}
