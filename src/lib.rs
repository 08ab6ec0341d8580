// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! # mediaseal-core
//!
//! Transform-domain text watermarking for audio samples and image channels.
//! A short UTF-8 string is hidden in a mid-frequency band of the cosine or
//! wavelet coefficients of a sample buffer, either by keyed spread-spectrum
//! modulation or by sign forcing. Extraction needs only the configuration
//! and the payload length.
//!
//! The crate works on decoded samples only (`signal` module); file and
//! container I/O belong to the caller. The `transform` module holds the
//! orthonormal DCT (via `rustdct`) and a multi-level Haar wavelet. The
//! `mark` module holds the codec, temporal majority voting over segments,
//! batch processing and the seam to an external image-watermark library.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use mediaseal_core::{embed_watermark, extract_watermark, SampleBuffer, WatermarkConfig};
//!
//! let config = WatermarkConfig::default();
//! let audio = SampleBuffer::new(samples, 22050, 1);
//! let marked = embed_watermark(&audio, "Hi", &config).unwrap();
//! let text = extract_watermark(&marked.buffer, 2, &config).unwrap();
//! assert_eq!(text.text(), "Hi");
//! ```

pub mod mark;
pub mod signal;
pub mod transform;

pub use mark::{embed_segments, embed_watermark, extract_aggregated, extract_watermark, capacity};
pub use mark::{DecodedText, Embedded, Overflow, Policy, Watermarker, WatermarkConfig, WatermarkError};
pub use mark::{ExtractionSample, Sampling, SegmentSource, VoteResult};
pub use mark::{progress, Progress};
pub use mark::library::{ImageWatermarkService, LibraryMethod};
pub use signal::SampleBuffer;
pub use transform::{Transform, TransformError};
