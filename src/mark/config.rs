// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Option set consumed by the codec.
//!
//! [`WatermarkConfig`] mirrors what a front end collects (names as strings,
//! numbers unchecked) and is (de)serializable with serde. The accessors
//! resolve it into the closed types the pipeline works with; every name and
//! range problem surfaces there as
//! [`WatermarkError::UnsupportedConfiguration`].

use serde::{Deserialize, Serialize};

use super::band::Overflow;
use super::error::WatermarkError;
use super::pipeline::Policy;
use super::sign::DEFAULT_STRENGTH;
use super::temporal::Sampling;
use crate::transform::{wavelet, Transform};

/// Front-end option set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatermarkConfig {
    /// `cosine` (alias `dct`) or `wavelet` (alias `dwt`).
    pub transform: String,
    /// `spread_spectrum` or `sign_force`.
    pub embed_policy: String,
    /// Spread-spectrum strength.
    pub alpha: f64,
    /// Spread-spectrum carrier seed.
    pub password: u64,
    /// Sign-force minimum magnitude.
    pub modification_strength: f64,
    /// Wavelet decomposition depth.
    pub wavelet_levels: usize,
    /// Temporal stride between sampled segments.
    pub frame_interval: usize,
    /// Number of segments sampled for extraction.
    pub sample_frames: usize,
    /// `reject` or `truncate`.
    pub overflow: String,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            transform: "cosine".into(),
            embed_policy: "spread_spectrum".into(),
            alpha: 0.1,
            password: 42,
            modification_strength: DEFAULT_STRENGTH,
            wavelet_levels: wavelet::DEFAULT_LEVELS,
            frame_interval: 1,
            sample_frames: 10,
            overflow: "reject".into(),
        }
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace('-', "_")
}

impl WatermarkConfig {
    /// Parse a JSON document; missing fields take their defaults.
    ///
    /// # Errors
    /// [`WatermarkError::UnsupportedConfiguration`] on malformed JSON.
    pub fn from_json(json: &str) -> Result<Self, WatermarkError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, WatermarkError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn transform(&self) -> Result<Transform, WatermarkError> {
        match normalize(&self.transform).as_str() {
            "cosine" | "dct" => Ok(Transform::Cosine),
            "wavelet" | "dwt" => {
                let transform = Transform::Wavelet { levels: self.wavelet_levels };
                transform.validate()?;
                Ok(transform)
            }
            _ => Err(WatermarkError::UnsupportedConfiguration(format!(
                "unknown transform '{}'",
                self.transform
            ))),
        }
    }

    pub fn policy(&self) -> Result<Policy, WatermarkError> {
        match normalize(&self.embed_policy).as_str() {
            "spread_spectrum" => Policy::spread_spectrum(self.alpha, self.password),
            "sign_force" => Policy::sign_force(self.modification_strength),
            _ => Err(WatermarkError::UnsupportedConfiguration(format!(
                "unknown embed policy '{}'",
                self.embed_policy
            ))),
        }
    }

    pub fn overflow(&self) -> Result<Overflow, WatermarkError> {
        match normalize(&self.overflow).as_str() {
            "reject" => Ok(Overflow::Reject),
            "truncate" => Ok(Overflow::Truncate),
            _ => Err(WatermarkError::UnsupportedConfiguration(format!(
                "unknown overflow policy '{}'",
                self.overflow
            ))),
        }
    }

    pub fn sampling(&self) -> Result<Sampling, WatermarkError> {
        Sampling::new(self.frame_interval, self.sample_frames)
    }
}
