// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use fastsearch::{read_header, run_build, IndexConfig, InvertedIndex, Position};

mod cli;
use cli::display::{self, format_size, kv, number, pad_left, row, section_bot, section_top};
use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` takes precedence; otherwise `-v` count picks the level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Index {
            input,
            output,
            config,
        } => cmd_index(&input, &output, config.as_deref()),
        Commands::Phrase { file, query, json } => cmd_phrase(&file, &query, json),
        Commands::Cover { file, query, json } => cmd_cover(&file, &query, json),
        Commands::Rank {
            file,
            query,
            limit,
            json,
        } => cmd_rank(&file, &query, limit, json),
        Commands::Inspect { file, top } => cmd_inspect(&file, top),
    }
}

fn load_index(file: &Path) -> Result<InvertedIndex> {
    let bytes = fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    InvertedIndex::decode(&bytes).with_context(|| format!("failed to decode {}", file.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

fn cmd_index(input: &Path, output: &Path, config: Option<&Path>) -> Result<()> {
    let config = match config {
        Some(path) => IndexConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => IndexConfig::default(),
    };
    let report = run_build(input, output, config)
        .with_context(|| format!("failed to index {}", input.display()))?;

    section_top("Built");
    kv("output", &output.display().to_string());
    kv("documents", &number(&report.ingest.documents.to_string()));
    kv("tokens", &number(&report.ingest.tokens.to_string()));
    kv("terms", &number(&report.summary.term_count.to_string()));
    kv("size", &format_size(report.bytes_written));
    section_bot();
    Ok(())
}

/// One match per line: `doc 3  offsets 2..3  [your name]`.
fn print_spans(title: &str, spans: &[Vec<Position>]) {
    section_top(title);
    if spans.is_empty() {
        row(&display::dim("no matches"));
    }
    for span in spans {
        let (Some(first), Some(last)) = (span.first(), span.last()) else {
            continue;
        };
        let offsets: Vec<String> = span.iter().map(|p| p.offset.to_string()).collect();
        row(&format!(
            "doc {}  offsets {}..{}  {}",
            number(&first.doc_id.to_string()),
            first.offset,
            last.offset,
            display::dim(&format!("[{}]", offsets.join(" ")))
        ));
    }
    section_bot();
}

fn cmd_phrase(file: &Path, query: &str, json: bool) -> Result<()> {
    let index = load_index(file)?;
    let terms = index.analyzer().analyze(query);
    let matches = index.all_phrases(&terms).context("phrase query failed")?;
    if json {
        return print_json(&matches);
    }
    print_spans(&format!("Phrase \"{}\"", terms.join(" ")), &matches);
    Ok(())
}

fn cmd_cover(file: &Path, query: &str, json: bool) -> Result<()> {
    let index = load_index(file)?;
    let terms = index.analyzer().analyze(query);
    let covers = index.all_covers(&terms).context("cover query failed")?;
    if json {
        return print_json(&covers);
    }
    print_spans(&format!("Covers {:?}", terms), &covers);
    Ok(())
}

fn cmd_rank(file: &Path, query: &str, limit: usize, json: bool) -> Result<()> {
    let index = load_index(file)?;
    let ranked = index
        .rank_proximity_scored(query, limit)
        .context("rank query failed")?;
    if json {
        return print_json(&ranked);
    }

    section_top(&format!("Rank \"{}\"", query));
    if ranked.is_empty() {
        row(&display::dim("no documents contain every term"));
    }
    for (i, scored) in ranked.iter().enumerate() {
        row(&format!(
            "{}  doc {}  score {}  {}",
            pad_left(&(i + 1).to_string(), 3),
            pad_left(&number(&scored.doc_id.to_string()), 6),
            number(&format!("{:.4}", scored.score)),
            display::dim(&format!("{} covers", scored.covers))
        ));
    }
    section_bot();
    Ok(())
}

fn cmd_inspect(file: &Path, top: usize) -> Result<()> {
    let bytes = fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let header = read_header(&bytes).context("invalid header")?;
    let index =
        InvertedIndex::decode(&bytes).with_context(|| format!("failed to decode {}", file.display()))?;
    let summary = index.summary();

    section_top("Header");
    kv("version", &header.version.to_string());
    kv("flags", &format!("{:#010b}", header.flags.bits()));
    kv("terms", &number(&header.term_count.to_string()));
    kv("body", &format_size(header.body_len as usize));
    kv("file", &format_size(bytes.len()));
    kv("brotli", &display::savings(bytes.len(), brotli_size(&bytes)?));
    section_bot();

    section_top("Contents");
    kv("documents", &number(&summary.doc_count.to_string()));
    kv("postings", &number(&summary.total_postings.to_string()));
    if let Some(max) = summary.max_doc_id {
        kv("max doc id", &max.to_string());
    }
    section_bot();

    section_top("Top terms");
    for stats in index.top_terms(top) {
        row(&format!(
            "{}  {} docs  {} positions",
            display::pad_right(&display::label(&stats.term), 24),
            pad_left(&number(&stats.doc_freq.to_string()), 6),
            number(&stats.positions.to_string())
        ));
    }
    section_bot();
    Ok(())
}

/// Size after brotli at max quality, as a file server would send it.
fn brotli_size(data: &[u8]) -> Result<usize> {
    let mut compressed = Vec::new();
    {
        let mut encoder = brotli::CompressorWriter::new(&mut compressed, 4096, 11, 22);
        encoder.write_all(data).context("brotli compression failed")?;
    }
    Ok(compressed.len())
}
