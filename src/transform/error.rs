// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for the frequency transforms.

use std::fmt;

/// Errors that can occur during a forward transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// The buffer holds fewer samples than one transform unit needs.
    SignalTooShort { len: usize, required: usize },
    /// Wavelet depth outside `1..=max`.
    UnsupportedDepth { levels: usize, max: usize },
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SignalTooShort { len, required } => {
                write!(f, "signal too short: {len} samples, need at least {required}")
            }
            Self::UnsupportedDepth { levels, max } => {
                write!(f, "wavelet depth {levels} outside 1..={max}")
            }
        }
    }
}

impl std::error::Error for TransformError {}

pub type Result<T> = std::result::Result<T, TransformError>;
