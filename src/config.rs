// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index tuning knobs.
//!
//! None of these change query results. They only trade memory for speed in
//! the skip index and decide when batch ingestion bothers with rayon.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IndexError, Result};

/// Default spacing between skip entries (positions per block).
pub const DEFAULT_SKIP_INTERVAL: usize = 64;

/// Lists shorter than this use plain binary search, no skip index.
pub const DEFAULT_SKIP_THRESHOLD: usize = 256;

/// Below this many documents, batch ingestion stays on the calling thread.
pub const DEFAULT_PARALLEL_MIN_DOCS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexConfig {
    /// Positions per skip block (level 0 granularity).
    pub skip_interval: usize,
    /// Minimum list length before a skip index is built.
    pub skip_threshold: usize,
    /// Minimum batch size for parallel ingestion.
    pub parallel_min_docs: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            skip_interval: DEFAULT_SKIP_INTERVAL,
            skip_threshold: DEFAULT_SKIP_THRESHOLD,
            parallel_min_docs: DEFAULT_PARALLEL_MIN_DOCS,
        }
    }
}

impl IndexConfig {
    pub fn validate(&self) -> Result<()> {
        if self.skip_interval < 2 {
            return Err(IndexError::Config(format!(
                "skipInterval must be at least 2, got {}",
                self.skip_interval
            )));
        }
        if self.skip_threshold < self.skip_interval {
            return Err(IndexError::Config(format!(
                "skipThreshold ({}) must not be smaller than skipInterval ({})",
                self.skip_threshold, self.skip_interval
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: IndexConfig = serde_json::from_str(json)
            .map_err(|e| IndexError::Config(format!("invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(IndexError::Io)?;
        Self::from_json_str(&content)
    }
}
