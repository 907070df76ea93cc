//! Lexical canonicalization shared by every matching component.
//!
//! All comparisons in this crate happen on normalized text so that case and
//! accent variation ("Dor no Péito" vs "dor no peito") never affects matching.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical form: lowercase, decomposed, combining marks dropped.
/// Pure and idempotent: `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

// Exam names may carry parentheses and hyphens ("Raio-X (PA)"); everything
// outside the allow-list is stripped before substring matching.
static EXAM_DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s()\-]").expect("exam allow-list regex is valid"));

/// Normalization for exam-name matching: [`normalize`] plus removal of every
/// character outside word chars, whitespace, parentheses and hyphen.
pub fn normalize_for_exam(s: &str) -> String {
    EXAM_DISALLOWED_RE
        .replace_all(&normalize(s), "")
        .into_owned()
}

/// Strip sentence punctuation. Applied to criterion text before keyword
/// extraction; student utterances keep their punctuation.
pub fn strip_punctuation(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '.' | ',' | '!' | '?' | ';' | ':' | '"' | '\''))
        .collect()
}

/// Closed Portuguese stopword set, stored pre-normalized. Articles,
/// prepositions, common interrogatives and auxiliary verbs carry no signal
/// for criterion coverage.
pub const STOPWORDS: &[&str] = &[
    "um", "uma", "uns", "umas", "o", "a", "os", "as", "de", "do", "da", "dos", "das", "em", "no",
    "na", "nos", "nas", "com", "por", "para", "que", "qual", "como", "quando", "onde", "foi",
    "sobre", "esta", "ser", "tem", "seu", "sua",
];

/// Extract keyword tokens from an already-normalized criterion: split on
/// whitespace, drop tokens of length <= 2 and stopwords. Order preserved.
/// May legitimately return an empty set when every token is filtered.
pub fn criterion_keywords(normalized_criterion: &str) -> Vec<String> {
    strip_punctuation(normalized_criterion)
        .split_whitespace()
        .filter(|token| token.chars().count() > 2 && !STOPWORDS.contains(token))
        .map(str::to_string)
        .collect()
}
