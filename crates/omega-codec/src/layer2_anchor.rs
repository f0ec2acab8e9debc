//! Layer 2: Anchor flow. Repeated 3-line windows become named anchors.
//!
//! Windows slide one line at a time, so neighbouring windows share two lines.
//! Rules are applied in allocation order to a single working buffer; an earlier
//! rule can consume text a later rule depends on. Such shortfalls are reported
//! as [`AnchorConflict`]s instead of being dropped silently.

use crate::layer3_symbol::SIGIL_ESCAPE;
use omega_core::{AnchorConflict, AnchorPolicy, DecodeError};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Lines per window.
pub const WINDOW_LINES: usize = 3;
pub const ANCHOR_PREFIX: &str = "Ω_ext_";

static RE_DEFINITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^function\s+(Ω_ext_\d+)\(\)\s*\{$").unwrap());
static RE_INVOCATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Ω_ext_\d+\(\);").unwrap());

/// A promoted window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub name: String,
    pub body: String,
}

impl Anchor {
    pub fn invocation(&self) -> String {
        invocation(&self.name)
    }

    /// `function <name>() {\n<body>\n}\n`
    pub fn definition(&self) -> String {
        format!("function {}() {{\n{}\n}}\n", self.name, self.body)
    }
}

pub fn anchor_name(n: usize) -> String {
    format!("{ANCHOR_PREFIX}{n}")
}

pub fn invocation(name: &str) -> String {
    format!("{name}();")
}

/// Extraction output.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub rewritten: String,
    pub anchors: Vec<Anchor>,
    pub conflicts: Vec<AnchorConflict>,
}

impl Extraction {
    /// All anchor definitions, joined by blank lines.
    pub fn header(&self) -> String {
        self.anchors.iter().map(Anchor::definition).collect::<Vec<_>>().join("\n")
    }
}

/// Trimmed length in chars, counting each escaped sigil as the one char it replaced.
pub fn window_len(block: &str) -> usize {
    let trimmed = block.trim();
    let expansion = SIGIL_ESCAPE.chars().count() - 1;
    trimmed.chars().count().saturating_sub(expansion * trimmed.matches(SIGIL_ESCAPE).count())
}

/// Count every long-enough window, keeping first-seen order.
pub fn candidate_windows(text: &str, min_block_len: usize) -> Vec<(String, usize)> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut table: Vec<(String, usize)> = Vec::new();
    for window in lines.windows(WINDOW_LINES) {
        let block = window.join("\n");
        if window_len(&block) <= min_block_len {
            continue;
        }
        match index.get(&block) {
            Some(&slot) => table[slot].1 += 1,
            None => {
                index.insert(block.clone(), table.len());
                table.push((block, 1));
            }
        }
    }
    table
}

/// Promote repeated windows to anchors and rewrite their occurrences.
pub fn extract(text: &str, policy: &AnchorPolicy) -> Extraction {
    let candidates = candidate_windows(text, policy.min_block_len);
    let mut anchors = Vec::new();
    let mut conflicts = Vec::new();
    let mut working = text.to_string();

    let promoted = candidates.into_iter().filter(|(_, count)| *count > policy.dup_threshold);
    for (n, (block, count)) in promoted.enumerate() {
        let anchor = Anchor { name: anchor_name(n), body: block };
        let replaced = working.matches(anchor.body.as_str()).count();
        if replaced < count {
            tracing::warn!(anchor = %anchor.name, expected = count, replaced, "overlapping window, replacements lost");
            conflicts.push(AnchorConflict { anchor: anchor.name.clone(), expected: count, replaced });
        }
        if replaced > 0 {
            working = working.replace(anchor.body.as_str(), &anchor.invocation());
        }
        anchors.push(anchor);
    }

    tracing::debug!(anchors = anchors.len(), conflicts = conflicts.len(), "anchor flow");
    Extraction { rewritten: working, anchors, conflicts }
}

/// Parse anchor definitions from a header section.
///
/// Each definition is an opening line, exactly [`WINDOW_LINES`] body lines and a
/// closing `}`. Blank lines between definitions are skipped. `first_line` is the
/// 1-based line number of `header` within the whole document, used in errors.
pub fn parse_definitions(header: &str, first_line: usize) -> Result<Vec<Anchor>, DecodeError> {
    let lines: Vec<&str> = header.split('\n').collect();
    let mut anchors = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if line.trim().is_empty() {
            i += 1;
            continue;
        }
        let Some(caps) = RE_DEFINITION.captures(line) else {
            return Err(DecodeError::MalformedAnchor {
                line: first_line + i,
                reason: format!("expected anchor definition, found {line:?}"),
            });
        };
        let body_end = i + 1 + WINDOW_LINES;
        if body_end >= lines.len() {
            return Err(DecodeError::MalformedAnchor {
                line: first_line + i,
                reason: "truncated anchor body".into(),
            });
        }
        if lines[body_end] != "}" {
            return Err(DecodeError::MalformedAnchor {
                line: first_line + body_end,
                reason: format!("expected closing brace, found {:?}", lines[body_end]),
            });
        }
        anchors.push(Anchor { name: caps[1].to_string(), body: lines[i + 1..body_end].join("\n") });
        i = body_end + 1;
    }
    Ok(anchors)
}

/// Replace every invocation with its anchor body.
pub fn inline(body: &str, anchors: &[Anchor]) -> Result<String, DecodeError> {
    let mut result = body.to_string();
    for anchor in anchors {
        result = result.replace(&anchor.invocation(), &anchor.body);
    }
    if let Some(m) = RE_INVOCATION.find(&result) {
        let name = m.as_str().trim_end_matches("();").to_string();
        return Err(DecodeError::UndefinedAnchor { name });
    }
    Ok(result)
}
