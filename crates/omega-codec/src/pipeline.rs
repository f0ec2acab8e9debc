//! Codec pipeline: orchestrates the three layers in both directions.

use crate::layer2_anchor::{self, Anchor};
use crate::{frame, layer1_noise, layer3_symbol};
use omega_core::types::{efficiency_gain, line_count};
use omega_core::{
    AnchorConflict, AnchorPolicy, CodecConfig, CompressReport, CompressStatus, DecodeError,
    DecompressReport, FidelityWarning, OmegaError, Result, ScaleTier,
};
use std::time::Instant;

/// Encoder output with the intermediate state needed for verification.
#[derive(Debug, Clone)]
pub struct Encoded {
    pub text: String,
    /// Noise-stripped input; what a decode must reproduce.
    pub stripped: String,
    pub original_len: usize,
    pub anchors: Vec<Anchor>,
    pub conflicts: Vec<AnchorConflict>,
}

impl Encoded {
    pub fn ratio(&self) -> f64 {
        if self.original_len == 0 { return 1.0; }
        self.text.len() as f64 / self.original_len as f64
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    pub blueprint: Option<String>,
    pub anchors: usize,
}

/// The Ω codec. Stateless across calls; share freely between threads.
#[derive(Debug, Clone, Default)]
pub struct OmegaCodec {
    pub config: CodecConfig,
}

impl OmegaCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn with_policy(policy: AnchorPolicy) -> Self {
        Self::new(CodecConfig { policy, ..CodecConfig::default() })
    }

    pub fn service() -> Self { Self::with_policy(AnchorPolicy::service()) }
    pub fn bulk() -> Self { Self::with_policy(AnchorPolicy::bulk()) }
    pub fn real_world() -> Self { Self::with_policy(AnchorPolicy::real_world()) }

    pub fn policy(&self) -> &AnchorPolicy {
        &self.config.policy
    }

    /// Strip, extract anchors, symbolize. No blueprint line.
    pub fn encode(&self, text: &str) -> Encoded {
        self.encode_framed(text, None)
    }

    /// Like [`encode`](Self::encode) with a leading blueprint line; `None`
    /// writes the auto-map placeholder.
    pub fn encode_with_blueprint(&self, text: &str, blueprint: Option<&str>) -> Encoded {
        let line = match blueprint {
            Some(bp) => layer3_symbol::symbolize(&bp.replace(['\r', '\n'], " ")),
            None => frame::AUTO_BLUEPRINT.to_string(),
        };
        self.encode_framed(text, Some(line))
    }

    fn encode_framed(&self, text: &str, blueprint: Option<String>) -> Encoded {
        let start = Instant::now();
        let stripped = layer1_noise::strip(text);
        // Escape before extraction so anchor names keep their bare sigil.
        let escaped = layer3_symbol::escape(&stripped);
        let extraction = layer2_anchor::extract(&escaped, &self.config.policy);
        let header = layer3_symbol::substitute(&extraction.header());
        let body = layer3_symbol::substitute(&extraction.rewritten);
        let output = frame::render(blueprint.as_deref(), &header, &body);

        tracing::debug!(
            original = text.len(),
            stripped = stripped.len(),
            encoded = output.len(),
            anchors = extraction.anchors.len(),
            elapsed = ?start.elapsed(),
            "encoded"
        );

        Encoded {
            text: output,
            stripped,
            original_len: text.len(),
            anchors: extraction.anchors,
            conflicts: extraction.conflicts,
        }
    }

    /// Restore symbols, inline anchors, drop the header, unescape.
    pub fn decode(&self, text: &str) -> std::result::Result<Decoded, DecodeError> {
        let restored = layer3_symbol::restore(text);
        let sections = frame::split(&restored)?;
        let anchors = layer2_anchor::parse_definitions(sections.header, sections.header_line)?;
        let body = layer2_anchor::inline(sections.body, &anchors)?;
        let blueprint = sections
            .blueprint
            .filter(|bp| *bp != frame::AUTO_BLUEPRINT)
            .map(layer3_symbol::unescape);

        Ok(Decoded { text: layer3_symbol::unescape(&body), blueprint, anchors: anchors.len() })
    }

    /// Decode `encoded` and require it to equal the stripped input.
    pub fn verify(&self, encoded: &Encoded) -> Result<()> {
        let decoded = self.decode(&encoded.text)?;
        match FidelityWarning::compare(&encoded.stripped, &decoded.text, &encoded.conflicts) {
            Some(warning) => Err(OmegaError::Fidelity(warning)),
            None => Ok(()),
        }
    }

    /// The `compress` operation: encode with a blueprint line and report stats.
    pub fn compress(&self, code: &str, blueprint: Option<&str>) -> CompressReport {
        let encoded = self.encode_with_blueprint(code, blueprint);

        let mut status = CompressStatus::Success;
        if self.config.verify_round_trip {
            if let Err(err) = self.verify(&encoded) {
                tracing::warn!(error = %err, "round trip check failed");
                status = CompressStatus::Degraded;
            }
        }

        let original_line_count = line_count(code);
        CompressReport {
            status,
            scale: ScaleTier::from_line_count(original_line_count),
            original_line_count,
            original_bytes: code.len(),
            compressed_bytes: encoded.text.len(),
            efficiency_gain: efficiency_gain(code.len(), encoded.text.len()),
            anchors: encoded.anchors.len(),
            conflicts: encoded.conflicts,
            machine_code: encoded.text,
        }
    }

    /// The `decompress` operation.
    pub fn decompress(&self, omega_code: &str) -> std::result::Result<DecompressReport, DecodeError> {
        let decoded = self.decode(omega_code)?;
        Ok(DecompressReport { text: decoded.text, blueprint: decoded.blueprint })
    }
}
