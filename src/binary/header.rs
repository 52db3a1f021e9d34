// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fixed-size header and footer around the encoded term body.
//!
//! The header is 14 bytes and says how many terms follow and exactly how long
//! the body is, so a reader knows the total file size after one small read.
//! The footer is 8 bytes: CRC32 over header + body, then the header magic
//! reversed. A bad footer means truncation or corruption. Don't trust the
//! data.

use std::io::{self, Read, Write};

use crc32fast::Hasher as Crc32Hasher;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "FSIX" in ASCII (header)
pub const MAGIC: [u8; 4] = *b"FSIX";

/// Footer magic: "XISF" (reversed, marks valid file end)
pub const FOOTER_MAGIC: [u8; 4] = *b"XISF";

/// Current format version
pub const VERSION: u8 = 1;

// ============================================================================
// SECURITY LIMITS (bound allocations driven by untrusted lengths)
// ============================================================================

/// Maximum number of terms
pub const MAX_TERM_COUNT: u32 = 50_000_000;

/// Maximum term length in bytes
pub const MAX_TERM_LEN: usize = 64 * 1024;

/// Maximum varint bytes (u64 needs at most 10 bytes)
pub const MAX_VARINT_BYTES: usize = 10;

// ============================================================================
// FLAGS
// ============================================================================

/// Format flags. Version 1 defines none; any set bit is rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatFlags(pub(crate) u8);

impl FormatFlags {
    pub const KNOWN: u8 = 0;

    pub fn new() -> Self {
        Self(0)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn unknown_bits(self) -> u8 {
        self.0 & !Self::KNOWN
    }
}

// ============================================================================
// HEADER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHeader {
    pub version: u8,
    pub flags: FormatFlags,
    pub term_count: u32,
    pub body_len: u32,
}

impl IndexHeader {
    // 4 (magic) + 1 (version) + 1 (flags) + 4 (term_count) + 4 (body_len)
    pub const SIZE: usize = 14;

    pub fn new(term_count: u32, body_len: u32) -> Self {
        Self {
            version: VERSION,
            flags: FormatFlags::new(),
            term_count,
            body_len,
        }
    }

    /// Total encoded size: header, body, footer.
    pub fn total_size(&self) -> usize {
        Self::SIZE + self.body_len as usize + IndexFooter::SIZE
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[..4].copy_from_slice(&MAGIC);
        buf[4] = self.version;
        buf[5] = self.flags.0;
        buf[6..10].copy_from_slice(&self.term_count.to_le_bytes());
        buf[10..14].copy_from_slice(&self.body_len.to_le_bytes());
        buf
    }

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.to_bytes())
    }

    /// Parse and sanity-check a header. Does not look at the body.
    pub fn read<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid magic: expected FSIX, got {:?}", magic),
            ));
        }

        let mut buf = [0u8; 10]; // 14 - 4 (magic)
        r.read_exact(&mut buf)?;

        let header = Self {
            version: buf[0],
            flags: FormatFlags(buf[1]),
            term_count: u32::from_le_bytes([buf[2], buf[3], buf[4], buf[5]]),
            body_len: u32::from_le_bytes([buf[6], buf[7], buf[8], buf[9]]),
        };

        if header.version != VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Unsupported version {} (expected {})",
                    header.version, VERSION
                ),
            ));
        }
        if header.flags.unknown_bits() != 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unknown format flags {:#010b}", header.flags.bits()),
            ));
        }
        if header.term_count > MAX_TERM_COUNT {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Term count {} exceeds maximum {}",
                    header.term_count, MAX_TERM_COUNT
                ),
            ));
        }
        Ok(header)
    }
}

// ============================================================================
// FOOTER (8 bytes)
// ============================================================================

/// CRC32 of everything before the footer, then the closing magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexFooter {
    pub crc32: u32,
}

impl IndexFooter {
    pub const SIZE: usize = 8; // 4 bytes CRC32 + 4 bytes magic

    pub fn for_content(content: &[u8]) -> Self {
        Self {
            crc32: Self::compute_crc32(content),
        }
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[..4].copy_from_slice(&self.crc32.to_le_bytes());
        buf[4..].copy_from_slice(&FOOTER_MAGIC);
        buf
    }

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.to_bytes())
    }

    /// Read the footer from the last 8 bytes of `bytes`.
    pub fn read(bytes: &[u8]) -> io::Result<Self> {
        let footer_start = bytes.len().checked_sub(Self::SIZE).ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "File too short for footer")
        })?;
        let footer = &bytes[footer_start..];

        if footer[4..] != FOOTER_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid footer magic: expected XISF, got {:?}", &footer[4..]),
            ));
        }

        let crc32 = u32::from_le_bytes([footer[0], footer[1], footer[2], footer[3]]);
        Ok(Self { crc32 })
    }

    /// Check the stored checksum against `content` (header + body).
    pub fn verify(&self, content: &[u8]) -> io::Result<()> {
        let actual = Self::compute_crc32(content);
        if actual != self.crc32 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "CRC32 mismatch: footer says {:#010x}, content hashes to {:#010x}",
                    self.crc32, actual
                ),
            ));
        }
        Ok(())
    }

    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}
