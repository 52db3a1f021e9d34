// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the fastsearch CLI.
//!
//! Box drawing and a handful of OneDark colors. Colors switch off for
//! pipelines (non-TTY stdout) and when `NO_COLOR` is set.

use std::io::IsTerminal;

// Box drawing width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 72;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

fn paint(color: (u8, u8, u8), bold: bool, text: &str) -> String {
    if !use_colors() {
        return text.to_string();
    }
    let weight = if bold { BOLD } else { "" };
    format!("{}{}{}{}", weight, rgb(color), text, RESET)
}

pub fn label(text: &str) -> String {
    paint(CYAN, true, text)
}

pub fn number(text: &str) -> String {
    paint(YELLOW, false, text)
}

pub fn good(text: &str) -> String {
    paint(GREEN, true, text)
}

pub fn dim(text: &str) -> String {
    paint(GRAY, false, text)
}

/// Visible length, ignoring ANSI escape sequences.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        match c {
            '\x1b' => in_escape = true,
            'm' if in_escape => in_escape = false,
            _ if !in_escape => len += 1,
            _ => {}
        }
    }
    len
}

fn border(s: &str) -> String {
    paint(GRAY, false, s)
}

/// ┌─ LABEL ─────┐
pub fn section_top(title: &str) {
    let head = format!("─ {} ", label(title));
    let fill = BOX_WIDTH.saturating_sub(visible_len(&head));
    println!("{}{}{}", border("┌"), head, border(&format!("{}┐", "─".repeat(fill))));
}

/// │ content     │
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content) + 1);
    println!("{} {}{}{}", border("│"), content, " ".repeat(pad), border("│"));
}

/// │ key         value │
pub fn kv(key: &str, value: &str) {
    row(&format!("{}{}", pad_right(&dim(key), 22), value));
}

/// └─────────────┘
pub fn section_bot() {
    println!("{}", border(&format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

/// Right-pad a styled string to a fixed visible width
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

/// Left-pad a styled string to a fixed visible width
pub fn pad_left(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - visible), s)
    }
}

/// Format bytes as human-readable size
pub fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

/// "1.2 KB → 640 B (-48%)"
pub fn savings(raw: usize, compressed: usize) -> String {
    if raw == 0 {
        return dim("n/a");
    }
    let saved = (1.0 - compressed as f64 / raw as f64) * 100.0;
    format!(
        "{} → {} ({})",
        format_size(raw),
        format_size(compressed),
        good(&format!("-{:.0}%", saved.max(0.0)))
    )
}
