// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Embed/extract pipeline for a single sample buffer.
//!
//! Embedding:
//! 1. Forward transform (cosine or wavelet)
//! 2. Band selection from the coefficient count and payload size
//! 3. Spread-spectrum or sign-force modulation of the band
//! 4. Inverse transform back to a buffer of the original length
//!
//! Extraction repeats steps 1-2, detects the bits and decodes them as UTF-8.
//! Nothing is stored alongside the signal; the extractor only needs the
//! configuration and the expected payload length.

use super::band::{self, BandSpec, Overflow};
use super::carrier;
use super::config::WatermarkConfig;
use super::error::WatermarkError;
use super::payload::{self, DecodedText};
use super::{sign, spread};
use crate::signal::SampleBuffer;
use crate::transform::{wavelet, Transform};

/// Embedding policy, resolved once per call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Policy {
    /// Additive carrier modulation keyed by `seed`.
    SpreadSpectrum { alpha: f64, seed: u64 },
    /// Direct sign forcing with a minimum magnitude.
    SignForce { strength: f64 },
}

impl Policy {
    /// Spread-spectrum policy.
    ///
    /// # Errors
    /// [`WatermarkError::UnsupportedConfiguration`] if `alpha` is outside
    /// `[0.01, 1.0]`.
    pub fn spread_spectrum(alpha: f64, seed: u64) -> Result<Self, WatermarkError> {
        if !spread::alpha_in_range(alpha) {
            return Err(WatermarkError::UnsupportedConfiguration(format!(
                "alpha {alpha} outside [{}, {}]",
                spread::MIN_ALPHA,
                spread::MAX_ALPHA
            )));
        }
        Ok(Policy::SpreadSpectrum { alpha, seed })
    }

    /// Sign-force policy.
    ///
    /// # Errors
    /// [`WatermarkError::UnsupportedConfiguration`] unless `strength` is a
    /// positive finite number.
    pub fn sign_force(strength: f64) -> Result<Self, WatermarkError> {
        if !(strength.is_finite() && strength > 0.0) {
            return Err(WatermarkError::UnsupportedConfiguration(format!(
                "modification strength {strength} must be positive"
            )));
        }
        Ok(Policy::SignForce { strength })
    }

    /// Re-check a policy that may have been built from its variant fields.
    ///
    /// # Errors
    /// Same as [`spread_spectrum`](Self::spread_spectrum) and
    /// [`sign_force`](Self::sign_force).
    pub fn validate(&self) -> Result<(), WatermarkError> {
        match *self {
            Policy::SpreadSpectrum { alpha, seed } => Policy::spread_spectrum(alpha, seed).map(|_| ()),
            Policy::SignForce { strength } => Policy::sign_force(strength).map(|_| ()),
        }
    }
}

/// A watermarked buffer and how much of the payload went in.
#[derive(Debug, Clone)]
pub struct Embedded {
    pub buffer: SampleBuffer,
    pub bits_requested: usize,
    pub bits_embedded: usize,
}

impl Embedded {
    pub fn is_truncated(&self) -> bool {
        self.bits_embedded < self.bits_requested
    }
}

/// Transform-domain watermark codec for one configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Watermarker {
    transform: Transform,
    policy: Policy,
    overflow: Overflow,
}

impl Watermarker {
    pub fn new(transform: Transform, policy: Policy) -> Self {
        Self { transform, policy, overflow: Overflow::Reject }
    }

    /// Resolve a [`WatermarkConfig`] into a codec.
    ///
    /// # Errors
    /// [`WatermarkError::UnsupportedConfiguration`] for unknown names or
    /// out-of-range parameters.
    pub fn from_config(config: &WatermarkConfig) -> Result<Self, WatermarkError> {
        config.sampling()?;
        Ok(Self::new(config.transform()?, config.policy()?).with_overflow(config.overflow()?))
    }

    pub fn with_overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn overflow(&self) -> Overflow {
        self.overflow
    }

    /// # Errors
    /// [`WatermarkError::UnsupportedConfiguration`] for an out-of-range
    /// wavelet depth or policy parameter.
    pub fn validate(&self) -> Result<(), WatermarkError> {
        self.transform.validate()?;
        self.policy.validate()
    }

    /// Payload bits a buffer of `sample_len` samples can carry.
    ///
    /// Zero for an invalid transform.
    pub fn capacity_bits(&self, sample_len: usize) -> usize {
        band::capacity(self.transform.coefficient_len(sample_len))
    }

    /// Whole payload bytes a buffer of `sample_len` samples can carry.
    pub fn capacity_bytes(&self, sample_len: usize) -> usize {
        self.capacity_bits(sample_len) / 8
    }

    /// Check that `bits` payload bits fit a buffer of `sample_len` samples
    /// under the configured overflow policy, without touching any samples.
    ///
    /// # Errors
    /// [`WatermarkError::SignalTooShort`] or
    /// [`WatermarkError::CapacityExceeded`].
    pub fn check_fit(&self, sample_len: usize, bits: usize) -> Result<(), WatermarkError> {
        self.validate()?;
        let required = self.transform.min_len();
        if sample_len < required {
            return Err(WatermarkError::SignalTooShort { len: sample_len, required });
        }
        band::select(self.transform.coefficient_len(sample_len), bits, self.overflow).map(|_| ())
    }

    /// Embed `text` into `buffer`, returning a new buffer of the same length.
    ///
    /// # Errors
    /// - [`WatermarkError::SignalTooShort`] if the buffer is shorter than one
    ///   transform unit.
    /// - [`WatermarkError::CapacityExceeded`] if the payload does not fit and
    ///   the overflow policy is [`Overflow::Reject`].
    pub fn embed(&self, buffer: &SampleBuffer, text: &str) -> Result<Embedded, WatermarkError> {
        let bits = payload::encode(text);
        let (samples, bits_embedded) = self.embed_bits(buffer.samples(), &bits)?;
        Ok(Embedded {
            buffer: buffer.with_samples(samples),
            bits_requested: bits.len(),
            bits_embedded,
        })
    }

    /// Embed raw bits. Returns the new samples and the number of bits placed.
    pub fn embed_bits(&self, samples: &[f64], bits: &[u8]) -> Result<(Vec<f64>, usize), WatermarkError> {
        self.validate()?;
        let mut decomposition = self.transform.forward(samples)?;
        let band = band::select(decomposition.coeffs.len(), bits.len(), self.overflow)?;
        self.modulate(&mut decomposition.coeffs, &band, &bits[..band.bits]);
        Ok((self.transform.inverse(decomposition), band.bits))
    }

    fn modulate(&self, coeffs: &mut [f64], band: &BandSpec, bits: &[u8]) {
        match self.policy {
            Policy::SpreadSpectrum { alpha, seed } => {
                let chips = carrier::generate(band.bits, seed);
                spread::embed(coeffs, band, bits, alpha, &chips);
            }
            Policy::SignForce { strength } => sign::embed(coeffs, band, bits, strength),
        }
    }

    /// Detect `bit_count` raw bits (fewer if truncation applies).
    pub fn detect_bits(&self, samples: &[f64], bit_count: usize) -> Result<Vec<u8>, WatermarkError> {
        self.validate()?;
        let decomposition = self.transform.forward(samples)?;
        let band = band::select(decomposition.coeffs.len(), bit_count, self.overflow)?;
        let bits = match self.policy {
            Policy::SpreadSpectrum { seed, .. } => {
                let chips = carrier::generate(band.bits, seed);
                spread::detect(&decomposition.coeffs, &band, &chips)
            }
            Policy::SignForce { .. } => sign::detect(&decomposition.coeffs, &band),
        };
        Ok(bits)
    }

    /// Extract a payload of `byte_len` bytes from `buffer`.
    ///
    /// # Errors
    /// Same as [`embed`](Self::embed); an invalid UTF-8 result is returned as
    /// [`DecodedText::Raw`], not as an error.
    pub fn extract(&self, buffer: &SampleBuffer, byte_len: usize) -> Result<DecodedText, WatermarkError> {
        let bits = self.detect_bits(buffer.samples(), byte_len.saturating_mul(8))?;
        Ok(payload::decode(&bits))
    }
}

impl Default for Watermarker {
    fn default() -> Self {
        Self::new(Transform::Cosine, Policy::SpreadSpectrum { alpha: 0.1, seed: 42 })
    }
}

/// Wavelet codec with the default depth, for callers that only pick a policy.
pub fn wavelet_watermarker(policy: Policy) -> Watermarker {
    Watermarker::new(Transform::Wavelet { levels: wavelet::DEFAULT_LEVELS }, policy)
}
