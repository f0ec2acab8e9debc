use crate::types::AnchorConflict;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OmegaError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
    #[error("Fidelity warning: {0}")]
    Fidelity(#[from] FidelityWarning),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Structural failures while unpacking an encoded text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Malformed anchor definition at line {line}: {reason}")]
    MalformedAnchor { line: usize, reason: String },
    #[error("Anchor logic section has no compressed body marker")]
    MissingBodyMarker,
    #[error("Invocation of undefined anchor: {name}")]
    UndefinedAnchor { name: String },
}

/// Decode succeeded structurally but did not reproduce the expected text.
///
/// Raised when overlapping windows swallowed some anchor replacements, or
/// when the input already carried anchor-shaped text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "restored text diverges from expected at byte {first_divergence} \
     (expected {expected_len} bytes, restored {restored_len}, {} anchor conflicts)",
    .conflicts.len()
)]
pub struct FidelityWarning {
    pub expected_len: usize,
    pub restored_len: usize,
    pub first_divergence: usize,
    pub conflicts: Vec<AnchorConflict>,
}

impl FidelityWarning {
    /// Compare `expected` with `restored`; `None` when they are identical.
    pub fn compare(expected: &str, restored: &str, conflicts: &[AnchorConflict]) -> Option<Self> {
        if expected == restored {
            return None;
        }
        let first_divergence = expected
            .bytes()
            .zip(restored.bytes())
            .position(|(a, b)| a != b)
            .unwrap_or_else(|| expected.len().min(restored.len()));
        Some(Self {
            expected_len: expected.len(),
            restored_len: restored.len(),
            first_divergence,
            conflicts: conflicts.to_vec(),
        })
    }
}

pub type Result<T> = std::result::Result<T, OmegaError>;
