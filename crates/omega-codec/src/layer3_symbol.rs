//! Layer 3: Symbol map. Whole-word keywords → two-character sigil tokens.

use regex::Regex;
use std::sync::LazyLock;

/// Lead character of every sigil token.
pub const SIGIL: char = 'Ω';
/// Stands in for a literal sigil so the marker is never ambiguous.
pub const SIGIL_ESCAPE: &str = "Ω_esc_";

/// Keyword → token, in application order.
///
/// No token may be matched as a keyword by a later pair, and no token is a
/// substring of another.
pub const SYMBOL_MAP: &[(&str, &str)] = &[
    ("function", "Ωi"),
    ("async", "Ωj"),
    ("await", "Ωk"),
    ("const", "Ωf"),
    ("let", "Ωg"),
    ("return", "Ω2"),
    ("if", "Ω0"),
    ("else", "Ω1"),
    ("class", "Ωd"),
    ("import", "Ωl"),
    ("console.log", "ΩK"),
    ("getElementById", "ΩD"),
    ("addEventListener", "ΩC"),
];

/// (word-boundary regex, token), same order as [`SYMBOL_MAP`].
static KEYWORD_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    SYMBOL_MAP
        .iter()
        .map(|(keyword, token)| {
            let pattern = format!(r"\b{}\b", regex::escape(keyword));
            (Regex::new(&pattern).unwrap(), *token)
        })
        .collect()
});

pub fn token_for(keyword: &str) -> Option<&'static str> {
    SYMBOL_MAP.iter().find(|(k, _)| *k == keyword).map(|(_, t)| *t)
}

pub fn keyword_for(token: &str) -> Option<&'static str> {
    SYMBOL_MAP.iter().find(|(_, t)| *t == token).map(|(k, _)| *k)
}

/// Replace every literal sigil with [`SIGIL_ESCAPE`].
pub fn escape(text: &str) -> String {
    text.replace(SIGIL, SIGIL_ESCAPE)
}

pub fn unescape(text: &str) -> String {
    text.replace(SIGIL_ESCAPE, &SIGIL.to_string())
}

/// Keyword → token substitution only. Input must already be escaped.
pub fn substitute(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut result = text.to_string();
    for (re, token) in KEYWORD_PATTERNS.iter() {
        result = re.replace_all(&result, *token).into_owned();
    }
    result
}

/// Token → keyword, every literal occurrence.
pub fn restore(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut result = text.to_string();
    for &(keyword, token) in SYMBOL_MAP {
        result = result.replace(token, keyword);
    }
    result
}

/// Escape, then substitute.
pub fn symbolize(text: &str) -> String {
    substitute(&escape(text))
}

/// Inverse of [`symbolize`].
pub fn desymbolize(text: &str) -> String {
    unescape(&restore(text))
}
