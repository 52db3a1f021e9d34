// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the fastsearch command-line interface.
//!
//! `index` builds an index file from a directory of text files. `phrase`,
//! `cover` and `rank` query one. `inspect` shows what is inside.

pub mod display;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fastsearch",
    about = "Positional inverted index with phrase and proximity search",
    version
)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build an index from every *.txt file in a directory
    ///
    /// Documents get ids 1, 2, 3, ... in file-name order.
    Index {
        /// Directory containing .txt documents
        #[arg(short, long)]
        input: PathBuf,

        /// Output index file
        #[arg(short, long)]
        output: PathBuf,

        /// JSON file with skipInterval / skipThreshold / parallelMinDocs
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print every exact occurrence of a phrase
    Phrase {
        /// Index file
        file: PathBuf,

        /// Phrase text (analyzed like documents)
        query: String,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print every minimal window containing all query terms
    Cover {
        /// Index file
        file: PathBuf,

        /// Query text (analyzed like documents)
        query: String,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Rank documents by term proximity
    Rank {
        /// Index file
        file: PathBuf,

        /// Query text (analyzed like documents)
        query: String,

        /// Maximum number of documents
        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show header fields, counts and the most common terms
    Inspect {
        /// Index file
        file: PathBuf,

        /// Number of top terms to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}
