//! Text Normalizer
//!
//! Canonicalizes free text so that every comparison made by the scorer is
//! case- and accent-insensitive: "Müller", "MULLER" and " muller " all
//! normalize to "muller".

use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// Combining diacritical mark blocks. Vowel signs, dakuten and other marks
/// that change a letter's identity are outside these ranges and kept.
const DIACRITIC_BLOCKS: [(char, char); 5] = [
    ('\u{0300}', '\u{036F}'),
    ('\u{1AB0}', '\u{1AFF}'),
    ('\u{1DC0}', '\u{1DFF}'),
    ('\u{20D0}', '\u{20FF}'),
    ('\u{FE20}', '\u{FE2F}'),
];

fn is_diacritic(c: char) -> bool {
    DIACRITIC_BLOCKS
        .iter()
        .any(|&(start, end)| (start..=end).contains(&c))
}

/// Normalize text for matching
/// - Unicode lowercase mapping
/// - NFD decomposition with diacritics removed, then NFC
/// - Whitespace runs collapsed to a single space, ends trimmed
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let stripped: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_diacritic(*c))
        .nfc()
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize an optional field; missing text becomes the empty string
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Length of already-normalized text in user-perceived characters
pub fn char_len(normalized: &str) -> usize {
    normalized.graphemes(true).count()
}

/// Whitespace-separated words of already-normalized text
pub fn words(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split_whitespace()
}
