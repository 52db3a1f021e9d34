// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text analysis: raw text in, ordered term tokens out.
//!
//! The index never looks inside a token. Whatever the analyzer emits at
//! position `i` is recorded at offset `i`, so the analyzer must not drop
//! tokens after deciding their offsets. That is also why there is no stop
//! word list here: removing "is" would shift every later offset and break
//! phrase queries that include it.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Turns raw text into an ordered sequence of normalized terms.
///
/// Implementations must be pure: the same text always yields the same tokens.
pub trait Analyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Vec<String>;
}

impl<F> Analyzer for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn analyze(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

/// Lowercase, strip diacritics, split on anything that is not alphanumeric.
///
/// - "hello, my name is BATMAN!" → `["hello", "my", "name", "is", "batman"]`
/// - "Café re-use" → `["cafe", "re", "use"]`
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleAnalyzer;

impl Analyzer for SimpleAnalyzer {
    fn analyze(&self, text: &str) -> Vec<String> {
        tokenize(text)
    }
}

/// Convenience wrapper around [`SimpleAnalyzer`].
pub fn analyze(text: &str) -> Vec<String> {
    SimpleAnalyzer.analyze(text)
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(normalize)
        .filter(|word| !word.is_empty())
        .collect()
}

/// Normalize one word: NFD decompose, drop combining marks, lowercase.
///
/// - "café" → "cafe"
/// - "harīṣh" → "harish"
/// - "BATMAN" → "batman"
#[cfg(feature = "unicode-normalization")]
pub fn normalize(word: &str) -> String {
    word.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Lowercase only. Assumes input is ASCII or already decomposed.
#[cfg(not(feature = "unicode-normalization"))]
pub fn normalize(word: &str) -> String {
    word.to_lowercase()
}

#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}
