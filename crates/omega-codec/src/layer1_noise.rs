//! Layer 1: Noise stripping. Removes comments and blank lines; one-way.

use regex::Regex;
use std::sync::LazyLock;

/// Block comments, or `//` line comments not preceded by `:` (keeps `http://`).
static RE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)/\*[\s\S]*?\*/|([^:]|^)//.*$").unwrap());
static RE_BLANK_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*[\r\n]").unwrap());

/// Remove `/* */` and `//` comments, keeping the character before a line comment.
///
/// Repeats until nothing matches: a block comment directly before `//` consumes
/// the guard character, so `x/* */// y` needs a second pass.
pub fn strip_comments(text: &str) -> String {
    let mut out = RE_COMMENT.replace_all(text, "${1}").into_owned();
    while RE_COMMENT.is_match(&out) {
        out = RE_COMMENT.replace_all(&out, "${1}").into_owned();
    }
    out
}

/// Remove empty and whitespace-only lines.
pub fn strip_blank_lines(text: &str) -> String {
    RE_BLANK_LINE.replace_all(text, "").into_owned()
}

pub fn strip(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    strip_blank_lines(&strip_comments(text))
}

/// Stripping is lossy; the decoder reproduces stripped text, never the raw input.
pub fn is_reversible() -> bool {
    false
}
