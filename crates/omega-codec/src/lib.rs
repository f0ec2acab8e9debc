//! Ω codec: reversible rewriting for source-like text.
//!
//! Layers:
//! 1. Noise stripping (comments, blank lines; one-way)
//! 2. Anchor flow: repeated 3-line windows extracted into named anchors
//! 3. Symbol map: keywords replaced by two-character sigil tokens
//!
//! Decoding undoes layers 3 and 2 and reproduces the stripped text.

pub mod frame;
pub mod layer1_noise;
pub mod layer2_anchor;
pub mod layer3_symbol;
pub mod pipeline;

pub use layer2_anchor::{Anchor, Extraction};
pub use pipeline::{Decoded, Encoded, OmegaCodec};
