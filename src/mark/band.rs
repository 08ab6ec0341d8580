// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Coefficient band selection.
//!
//! The lowest and highest quarter of a coefficient vector are excluded (DC and
//! energy-heavy low frequencies at one end, fragile high frequencies at the
//! other). Bits go into the middle half `[L/4, 3L/4)`, lowest index first.
//!
//! Selection is a pure function of `(L, K)` so the extractor rebuilds the same
//! band from the signal length and the expected payload size alone.

use std::ops::Range;

use super::error::WatermarkError;

/// What to do when a payload does not fit the band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overflow {
    /// Fail with [`WatermarkError::CapacityExceeded`].
    #[default]
    Reject,
    /// Shrink the payload to the band size and log the truncation.
    Truncate,
}

/// Band of coefficients carrying a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandSpec {
    /// First eligible index.
    pub start: usize,
    /// One past the last eligible index.
    pub end: usize,
    /// Number of bits placed at `start..start + bits`.
    pub bits: usize,
}

impl BandSpec {
    /// Number of eligible coefficients.
    pub fn capacity(&self) -> usize {
        self.end - self.start
    }

    /// Coefficient indices that carry bits, in bit order.
    pub fn indices(&self) -> Range<usize> {
        self.start..self.start + self.bits
    }
}

/// Eligible index range `[L/4, 3L/4)` for a vector of length `len`.
pub fn eligible_range(len: usize) -> Range<usize> {
    // 3 * len / 4 without overflowing for huge len
    let end = len / 4 * 3 + (len % 4) * 3 / 4;
    len / 4..end
}

/// Number of bits a vector of length `len` can carry.
pub fn capacity(len: usize) -> usize {
    eligible_range(len).len()
}

/// Band for `bits` payload bits in a vector of length `len`.
///
/// # Errors
/// [`WatermarkError::CapacityExceeded`] when `bits` exceeds [`capacity`].
pub fn select_band(len: usize, bits: usize) -> Result<BandSpec, WatermarkError> {
    let range = eligible_range(len);
    if bits > range.len() {
        return Err(WatermarkError::CapacityExceeded { required: bits, available: range.len() });
    }
    Ok(BandSpec { start: range.start, end: range.end, bits })
}

/// Band for up to `bits` payload bits, shrunk to fit.
pub fn select_band_truncating(len: usize, bits: usize) -> BandSpec {
    let range = eligible_range(len);
    let available = range.len();
    if bits > available {
        log::warn!("payload of {bits} bits truncated to {available} available coefficients");
    }
    BandSpec { start: range.start, end: range.end, bits: bits.min(available) }
}

/// Band selection under an [`Overflow`] policy.
pub fn select(len: usize, bits: usize, overflow: Overflow) -> Result<BandSpec, WatermarkError> {
    match overflow {
        Overflow::Reject => select_band(len, bits),
        Overflow::Truncate => Ok(select_band_truncating(len, bits)),
    }
}
