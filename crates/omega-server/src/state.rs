//! Application state shared across all handlers.

use chrono::{DateTime, Utc};
use omega_codec::OmegaCodec;
use omega_core::CodecConfig;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Request counters. Codec calls are independent; only these are shared.
#[derive(Debug, Default)]
pub struct CodecStats {
    compress_requests: AtomicU64,
    decompress_requests: AtomicU64,
    degraded: AtomicU64,
    decode_failures: AtomicU64,
    bytes_in: AtomicU64,
    bytes_out: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub compress_requests: u64,
    pub decompress_requests: u64,
    pub degraded: u64,
    pub decode_failures: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
}

impl CodecStats {
    pub fn record_compress(&self, bytes_in: usize, bytes_out: usize, degraded: bool) {
        self.compress_requests.fetch_add(1, Ordering::Relaxed);
        self.bytes_in.fetch_add(bytes_in as u64, Ordering::Relaxed);
        self.bytes_out.fetch_add(bytes_out as u64, Ordering::Relaxed);
        if degraded {
            self.degraded.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_decompress(&self, ok: bool) {
        self.decompress_requests.fetch_add(1, Ordering::Relaxed);
        if !ok {
            self.decode_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            compress_requests: self.compress_requests.load(Ordering::Relaxed),
            decompress_requests: self.decompress_requests.load(Ordering::Relaxed),
            degraded: self.degraded.load(Ordering::Relaxed),
            decode_failures: self.decode_failures.load(Ordering::Relaxed),
            bytes_in: self.bytes_in.load(Ordering::Relaxed),
            bytes_out: self.bytes_out.load(Ordering::Relaxed),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub codec: Arc<OmegaCodec>,
    pub stats: Arc<CodecStats>,
    pub start_time: std::time::Instant,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: CodecConfig) -> Self {
        Self {
            codec: Arc::new(OmegaCodec::new(config)),
            stats: Arc::new(CodecStats::default()),
            start_time: std::time::Instant::now(),
            started_at: Utc::now(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}
