pub mod config;
pub mod error;
pub mod types;

pub use config::{AnchorPolicy, CodecConfig, OmegaConfig, ServerConfig};
pub use error::{DecodeError, FidelityWarning, OmegaError, Result};
pub use types::{AnchorConflict, CompressReport, CompressStatus, DecompressReport, ScaleTier};
