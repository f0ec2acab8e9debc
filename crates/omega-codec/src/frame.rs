//! Wire layout of an encoded text.
//!
//! ```text
//! // Ω_bp: <blueprint>            (optional)
//! // === ANCHOR LOGIC ===
//! <anchor definitions>
//! // === COMPRESSED BODY ===
//! <body>
//! ```

use omega_core::DecodeError;

pub const ANCHOR_MARKER: &str = "// === ANCHOR LOGIC ===";
pub const BODY_MARKER: &str = "// === COMPRESSED BODY ===";
pub const BLUEPRINT_PREFIX: &str = "// Ω_bp: ";
/// Blueprint placeholder when the caller supplies none.
pub const AUTO_BLUEPRINT: &str = "Ω_auto_map";

/// Borrowed sections of an encoded text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    pub blueprint: Option<&'a str>,
    pub header: &'a str,
    /// 1-based line number where `header` starts.
    pub header_line: usize,
    pub body: &'a str,
}

pub fn render(blueprint: Option<&str>, header: &str, body: &str) -> String {
    let mut out = String::with_capacity(header.len() + body.len() + 96);
    if let Some(bp) = blueprint {
        out.push_str(BLUEPRINT_PREFIX);
        out.push_str(bp);
        out.push('\n');
    }
    out.push_str(ANCHOR_MARKER);
    out.push('\n');
    out.push_str(header);
    out.push('\n');
    out.push_str(BODY_MARKER);
    out.push('\n');
    out.push_str(body);
    out
}

/// Split an encoded text into its sections.
///
/// Text without the anchor marker is treated as a bare body.
pub fn split(text: &str) -> Result<Frame<'_>, DecodeError> {
    let mut rest = text;
    let mut line = 1;
    let mut blueprint = None;

    if let Some(after) = rest.strip_prefix(BLUEPRINT_PREFIX) {
        match after.find('\n') {
            Some(nl) => {
                blueprint = Some(&after[..nl]);
                rest = &after[nl + 1..];
            }
            None => {
                blueprint = Some(after);
                rest = "";
            }
        }
        line += 1;
    }

    let Some(after) = rest.strip_prefix(ANCHOR_MARKER) else {
        return Ok(Frame { blueprint, header: "", header_line: line, body: rest });
    };

    let needle = format!("\n{BODY_MARKER}");
    let idx = after.find(&needle).ok_or(DecodeError::MissingBodyMarker)?;
    let header = after[..idx].strip_prefix('\n').unwrap_or(&after[..idx]);
    let tail = &after[idx + needle.len()..];
    let body = tail.strip_prefix('\n').unwrap_or(tail);

    Ok(Frame { blueprint, header, header_line: line + 1, body })
}
