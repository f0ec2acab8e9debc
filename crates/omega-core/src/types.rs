use serde::{Deserialize, Serialize};

/// Coarse size classification derived from the input line count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleTier {
    #[serde(rename = "Small (Baseline)")]
    Small,
    #[serde(rename = "Medium (Optimized)")]
    Medium,
    #[serde(rename = "Large (High Yield)")]
    Large,
    #[serde(rename = "Enterprise (Maximum Gain)")]
    Enterprise,
}

impl ScaleTier {
    pub fn from_line_count(lines: usize) -> Self {
        if lines > 3000 {
            Self::Enterprise
        } else if lines > 1000 {
            Self::Large
        } else if lines > 500 {
            Self::Medium
        } else {
            Self::Small
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Small => "Small (Baseline)",
            Self::Medium => "Medium (Optimized)",
            Self::Large => "Large (High Yield)",
            Self::Enterprise => "Enterprise (Maximum Gain)",
        }
    }
}

/// An anchor rule whose window could not be replaced at every occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorConflict {
    pub anchor: String,
    pub expected: usize,
    pub replaced: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompressStatus {
    Success,
    /// The round-trip check found the decoded text differs from the stripped input.
    Degraded,
}

/// Result of the `compress` operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressReport {
    pub status: CompressStatus,
    pub scale: ScaleTier,
    pub original_line_count: usize,
    pub original_bytes: usize,
    pub compressed_bytes: usize,
    pub efficiency_gain: f64,
    pub anchors: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicts: Vec<AnchorConflict>,
    pub machine_code: String,
}

/// Result of the `decompress` operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecompressReport {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blueprint: Option<String>,
}

/// Number of `\n`-separated lines; empty input counts as one line.
pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

/// `(1 - compressed / original) * 100`, rounded to one decimal.
pub fn efficiency_gain(original_bytes: usize, compressed_bytes: usize) -> f64 {
    if original_bytes == 0 {
        return 0.0;
    }
    let gain = (1.0 - compressed_bytes as f64 / original_bytes as f64) * 100.0;
    (gain * 10.0).round() / 10.0
}
