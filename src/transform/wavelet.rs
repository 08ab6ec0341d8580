// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Multi-level orthonormal Haar wavelet transform over a 1-D buffer.
//!
//! Each level splits its input into an approximation half and a detail half:
//!
//! ```text
//! a[k] = (x[2k] + x[2k+1]) / sqrt(2)
//! d[k] = (x[2k] - x[2k+1]) / sqrt(2)
//! ```
//!
//! The next level decomposes `a` again. Odd-length level inputs are extended
//! by repeating their last sample, so the last detail coefficient of such a
//! level is zero and the extension is exactly recovered on synthesis.
//! Every level's input length is recorded in [`Details`] and reconstruction
//! truncates to it, which keeps the output length equal to the input length
//! for any `n`.

use std::f64::consts::FRAC_1_SQRT_2;

/// Default decomposition depth.
pub const DEFAULT_LEVELS: usize = 2;

/// Maximum supported decomposition depth.
pub const MAX_LEVELS: usize = 8;

/// Detail bands and per-level input lengths, finest level first.
///
/// Passed through [`reconstruct`] unchanged; only the approximation band is
/// ever modified by an embedder.
#[derive(Debug, Clone, PartialEq)]
pub struct Details {
    bands: Vec<Vec<f64>>,
    input_lens: Vec<usize>,
}

impl Details {
    /// Number of decomposition levels.
    pub fn levels(&self) -> usize {
        self.bands.len()
    }

    /// Detail band produced at `level` (0 = finest).
    pub fn band(&self, level: usize) -> &[f64] {
        &self.bands[level]
    }
}

/// Whether `levels` is a supported decomposition depth.
pub fn depth_in_range(levels: usize) -> bool {
    (1..=MAX_LEVELS).contains(&levels)
}

/// Minimum number of samples for a `levels`-deep decomposition.
///
/// Saturates at `usize::MAX` for depths whose minimum does not fit.
pub fn min_len(levels: usize) -> usize {
    u32::try_from(levels)
        .ok()
        .and_then(|shift| 1usize.checked_shl(shift))
        .unwrap_or(usize::MAX)
}

/// Approximation band length produced from `n` samples.
pub fn approx_len(n: usize, levels: usize) -> usize {
    let mut len = n;
    for _ in 0..levels {
        len = (len + 1) / 2;
    }
    len
}

fn analyze(x: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let half = (x.len() + 1) / 2;
    let mut approx = Vec::with_capacity(half);
    let mut detail = Vec::with_capacity(half);
    for k in 0..half {
        let a = x[2 * k];
        let b = if 2 * k + 1 < x.len() { x[2 * k + 1] } else { a };
        approx.push((a + b) * FRAC_1_SQRT_2);
        detail.push((a - b) * FRAC_1_SQRT_2);
    }
    (approx, detail)
}

fn synthesize(approx: &[f64], detail: &[f64], out_len: usize) -> Vec<f64> {
    debug_assert_eq!(approx.len(), detail.len());
    let mut out = Vec::with_capacity(approx.len() * 2);
    for (&a, &d) in approx.iter().zip(detail.iter()) {
        out.push((a + d) * FRAC_1_SQRT_2);
        out.push((a - d) * FRAC_1_SQRT_2);
    }
    out.truncate(out_len);
    out
}

/// Decompose `samples` into the coarsest approximation band plus details.
///
/// The caller guarantees `samples.len() >= min_len(levels)`.
pub fn decompose(samples: &[f64], levels: usize) -> (Vec<f64>, Details) {
    let mut approx = samples.to_vec();
    let mut bands = Vec::with_capacity(levels);
    let mut input_lens = Vec::with_capacity(levels);
    for _ in 0..levels {
        input_lens.push(approx.len());
        let (a, d) = analyze(&approx);
        bands.push(d);
        approx = a;
    }
    (approx, Details { bands, input_lens })
}

/// Rebuild a buffer of exactly `original_len` samples.
///
/// Shortfalls (a mismatched side channel) are zero-padded, excess is
/// truncated.
pub fn reconstruct(approx: &[f64], details: &Details, original_len: usize) -> Vec<f64> {
    let mut signal = approx.to_vec();
    for level in (0..details.levels()).rev() {
        let detail = &details.bands[level];
        // A caller may hand back a resized approximation band.
        signal.resize(detail.len(), 0.0);
        signal = synthesize(&signal, detail, details.input_lens[level]);
    }
    signal.resize(original_len, 0.0);
    signal
}
