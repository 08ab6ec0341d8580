// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Frequency transforms used to carry watermark bits.
//!
//! Two interchangeable variants behind one contract:
//!
//! - **Cosine**: orthonormal DCT over the full buffer. The coefficient
//!   vector is as long as the buffer.
//! - **Wavelet**: multi-level Haar decomposition. The coarsest approximation
//!   band is the coefficient vector; detail bands ride along in the
//!   [`Decomposition`] and are passed through unchanged on inverse.
//!
//! Embedders only ever see `Decomposition::coeffs`, so they are
//! transform-agnostic.

pub mod cosine;
pub mod error;
pub mod wavelet;

pub use error::TransformError;

/// Transform selection, resolved once per call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Transform {
    #[default]
    Cosine,
    Wavelet { levels: usize },
}

#[derive(Debug, Clone)]
enum SideChannel {
    None,
    Wavelet(wavelet::Details),
}

/// Coefficients produced by [`Transform::forward`] plus whatever the inverse
/// needs to rebuild a buffer of the original length.
#[derive(Debug, Clone)]
pub struct Decomposition {
    /// Coefficients eligible for embedding.
    pub coeffs: Vec<f64>,
    side: SideChannel,
    original_len: usize,
}

impl Decomposition {
    /// Length of the buffer this decomposition came from.
    pub fn original_len(&self) -> usize {
        self.original_len
    }
}

impl Transform {
    /// Haar wavelet with the default depth.
    pub fn wavelet() -> Self {
        Transform::Wavelet { levels: wavelet::DEFAULT_LEVELS }
    }

    /// # Errors
    /// [`TransformError::UnsupportedDepth`] for a wavelet depth outside
    /// `1..=MAX_LEVELS`.
    pub fn validate(&self) -> error::Result<()> {
        match *self {
            Transform::Wavelet { levels } if !wavelet::depth_in_range(levels) => {
                Err(TransformError::UnsupportedDepth { levels, max: wavelet::MAX_LEVELS })
            }
            _ => Ok(()),
        }
    }

    /// Smallest buffer the transform accepts.
    pub fn min_len(&self) -> usize {
        match *self {
            Transform::Cosine => cosine::MIN_LEN,
            Transform::Wavelet { levels } => wavelet::min_len(levels),
        }
    }

    /// Length of the coefficient vector produced from `n` samples.
    ///
    /// Returns 0 when `n` is below [`min_len`](Self::min_len) or the
    /// transform is invalid.
    pub fn coefficient_len(&self, n: usize) -> usize {
        if self.validate().is_err() || n < self.min_len() {
            return 0;
        }
        match *self {
            Transform::Cosine => n,
            Transform::Wavelet { levels } => wavelet::approx_len(n, levels),
        }
    }

    /// Forward transform.
    ///
    /// # Errors
    /// - [`TransformError::UnsupportedDepth`] for an invalid wavelet depth.
    /// - [`TransformError::SignalTooShort`] if `samples` is shorter than
    ///   [`min_len`](Self::min_len).
    pub fn forward(&self, samples: &[f64]) -> error::Result<Decomposition> {
        self.validate()?;
        let required = self.min_len();
        if samples.len() < required {
            return Err(TransformError::SignalTooShort { len: samples.len(), required });
        }
        let decomposition = match *self {
            Transform::Cosine => Decomposition {
                coeffs: cosine::forward(samples),
                side: SideChannel::None,
                original_len: samples.len(),
            },
            Transform::Wavelet { levels } => {
                let (approx, details) = wavelet::decompose(samples, levels);
                Decomposition {
                    coeffs: approx,
                    side: SideChannel::Wavelet(details),
                    original_len: samples.len(),
                }
            }
        };
        Ok(decomposition)
    }

    /// Inverse transform. The result always has the original buffer length.
    pub fn inverse(&self, decomposition: Decomposition) -> Vec<f64> {
        let Decomposition { coeffs, side, original_len } = decomposition;
        let mut samples = match side {
            SideChannel::Wavelet(details) => wavelet::reconstruct(&coeffs, &details, original_len),
            SideChannel::None => cosine::inverse(&coeffs),
        };
        samples.resize(original_len, 0.0);
        samples
    }
}
