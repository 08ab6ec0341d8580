// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Watermark embedding and extraction.
//!
//! Two embedding policies operate on a band of transform coefficients:
//!
//! - **Spread spectrum** (`Policy::SpreadSpectrum`): each bit adds a keyed
//!   pseudorandom carrier chip scaled by `alpha` and the coefficient's own
//!   magnitude. Detection correlates with the same carrier, so the seed is
//!   required to read the mark back.
//!
//! - **Sign force** (`Policy::SignForce`): each bit fixes a coefficient's
//!   sign with a minimum magnitude. Keyless and idempotent.
//!
//! Longer media are handled segment by segment in [`temporal`], with a
//! majority vote over the extracted strings.

pub mod error;
pub mod payload;
pub mod carrier;
pub mod band;
pub mod spread;
pub mod sign;
mod pipeline;
pub mod config;
pub mod temporal;
pub mod batch;
pub mod library;
pub mod progress;

pub use band::{BandSpec, Overflow};
pub use config::WatermarkConfig;
pub use error::WatermarkError;
pub use payload::DecodedText;
pub use pipeline::{wavelet_watermarker, Embedded, Policy, Watermarker};
pub use progress::Progress;
pub use temporal::{ExtractionSample, Sampling, SegmentSource, VoteResult};

use crate::signal::SampleBuffer;

/// Embed `text` into `buffer` using `config`.
///
/// # Errors
/// - [`WatermarkError::UnsupportedConfiguration`] for an invalid config.
/// - [`WatermarkError::SignalTooShort`] or [`WatermarkError::CapacityExceeded`].
pub fn embed_watermark(buffer: &SampleBuffer, text: &str, config: &WatermarkConfig) -> Result<Embedded, WatermarkError> {
    Watermarker::from_config(config)?.embed(buffer, text)
}

/// Extract a `byte_len`-byte watermark from `buffer` using `config`.
pub fn extract_watermark(
    buffer: &SampleBuffer,
    byte_len: usize,
    config: &WatermarkConfig,
) -> Result<DecodedText, WatermarkError> {
    Watermarker::from_config(config)?.extract(buffer, byte_len)
}

/// Embed `text` into every `frame_interval`-th segment.
///
/// Returns the number of segments watermarked.
pub fn embed_segments(
    segments: &mut [SampleBuffer],
    text: &str,
    config: &WatermarkConfig,
    progress: &Progress,
) -> Result<usize, WatermarkError> {
    let watermarker = Watermarker::from_config(config)?;
    temporal::embed_segments(&watermarker, segments, text, &config.sampling()?, progress)
}

/// Sample `source` per `config` and fuse the per-segment results by vote.
///
/// # Errors
/// [`WatermarkError::NoWatermarkDetected`] if no sampled segment yields text.
pub fn extract_aggregated<S: SegmentSource + ?Sized>(
    source: &S,
    byte_len: usize,
    config: &WatermarkConfig,
    progress: &Progress,
) -> Result<VoteResult, WatermarkError> {
    let watermarker = Watermarker::from_config(config)?;
    temporal::aggregate_extract(&watermarker, source, byte_len, &config.sampling()?, progress)
}

/// Payload bytes a buffer of `sample_len` samples can carry under `config`.
pub fn capacity(sample_len: usize, config: &WatermarkConfig) -> Result<usize, WatermarkError> {
    Ok(Watermarker::from_config(config)?.capacity_bytes(sample_len))
}
