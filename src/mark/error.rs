// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for the watermark codec.
//!
//! [`WatermarkError`] covers configuration, capacity, detection and
//! collaborator failures. A degraded UTF-8 decode is not an error; see
//! [`DecodedText`](super::payload::DecodedText).

use core::fmt;

use crate::transform::TransformError;

/// Errors that can occur while embedding or extracting a watermark.
#[derive(Debug, Clone, PartialEq)]
pub enum WatermarkError {
    /// The payload needs more bits than the coefficient band holds.
    CapacityExceeded { required: usize, available: usize },
    /// Extracted bytes are not valid UTF-8 (strict decode only).
    InvalidEncoding,
    /// Temporal aggregation found no usable extraction.
    NoWatermarkDetected,
    /// Unknown transform/policy name or an out-of-range parameter.
    UnsupportedConfiguration(String),
    /// The buffer is shorter than one transform unit.
    SignalTooShort { len: usize, required: usize },
    /// The operation was cancelled before all units were launched.
    Cancelled,
    /// The external image-watermark service reported a failure.
    Service(String),
}

impl fmt::Display for WatermarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded { required, available } => {
                write!(f, "payload needs {required} bits but only {available} are available")
            }
            Self::InvalidEncoding => write!(f, "extracted payload is not valid UTF-8"),
            Self::NoWatermarkDetected => write!(f, "no watermark detected in any sampled segment"),
            Self::UnsupportedConfiguration(what) => write!(f, "unsupported configuration: {what}"),
            Self::SignalTooShort { len, required } => {
                write!(f, "signal too short: {len} samples, need at least {required}")
            }
            Self::Cancelled => write!(f, "operation cancelled"),
            Self::Service(msg) => write!(f, "image watermark service failed: {msg}"),
        }
    }
}

impl std::error::Error for WatermarkError {}

impl From<TransformError> for WatermarkError {
    fn from(e: TransformError) -> Self {
        match e {
            TransformError::SignalTooShort { len, required } => Self::SignalTooShort { len, required },
            TransformError::UnsupportedDepth { .. } => Self::UnsupportedConfiguration(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for WatermarkError {
    fn from(e: serde_json::Error) -> Self {
        Self::UnsupportedConfiguration(e.to_string())
    }
}
