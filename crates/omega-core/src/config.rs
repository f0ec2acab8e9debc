use crate::error::{OmegaError, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Duplicate-detection policy for the anchor layer.
///
/// A 3-line window becomes a candidate when its trimmed length exceeds
/// `min_block_len`, and an anchor when it occurs more than `dup_threshold` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorPolicy {
    pub min_block_len: usize,
    pub dup_threshold: usize,
}

impl AnchorPolicy {
    pub const fn new(min_block_len: usize, dup_threshold: usize) -> Self {
        Self { min_block_len, dup_threshold }
    }

    /// Request/response service mode.
    pub const fn service() -> Self { Self::new(30, 1) }
    /// Synthetic bulk input; only extract windows repeated more than twice.
    pub const fn bulk() -> Self { Self::new(30, 2) }
    /// Hand-written sources; longer windows only.
    pub const fn real_world() -> Self { Self::new(50, 1) }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "service" => Some(Self::service()),
            "bulk" => Some(Self::bulk()),
            "real_world" | "real-world" => Some(Self::real_world()),
            _ => None,
        }
    }
}

impl Default for AnchorPolicy {
    fn default() -> Self {
        Self::service()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub policy: AnchorPolicy,
    /// Decode every encoded result and compare it with the stripped input.
    pub verify_round_trip: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self { policy: AnchorPolicy::default(), verify_round_trip: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".into(), port: 8080 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OmegaConfig {
    #[serde(default)]
    pub codec: CodecConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl OmegaConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Defaults overridden by `OMEGA_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from any key lookup (environment, test maps).
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("OMEGA_POLICY") {
            self.codec.policy = AnchorPolicy::from_name(&name)
                .ok_or_else(|| OmegaError::Config(format!("unknown policy: {name}")))?;
        }
        if let Some(v) = lookup("OMEGA_MIN_BLOCK_LEN") {
            self.codec.policy.min_block_len = parse_var("OMEGA_MIN_BLOCK_LEN", &v)?;
        }
        if let Some(v) = lookup("OMEGA_DUP_THRESHOLD") {
            self.codec.policy.dup_threshold = parse_var("OMEGA_DUP_THRESHOLD", &v)?;
        }
        if let Some(v) = lookup("OMEGA_VERIFY") {
            self.codec.verify_round_trip = parse_var("OMEGA_VERIFY", &v)?;
        }
        if let Some(host) = lookup("OMEGA_HOST") {
            self.server.host = host;
        }
        if let Some(v) = lookup("OMEGA_PORT") {
            self.server.port = parse_var("OMEGA_PORT", &v)?;
        }
        tracing::debug!(policy = ?self.codec.policy, addr = %self.bind_addr(), "configuration resolved");
        Ok(self)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| OmegaError::Config(format!("invalid value for {key}: {raw:?}")))
}
