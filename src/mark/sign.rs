// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Sign-force embedding and sign detection.
//!
//! Bit 1 forces `c <- +max(|c|, strength)`, bit 0 forces
//! `c <- -max(|c|, strength)`. Detection reads the sign; zero reads as 0.
//! No key is involved, so capacity is one bit per coefficient at the cost of
//! a predictable statistical signature.

use super::band::BandSpec;

/// Default minimum magnitude of a carrying coefficient.
pub const DEFAULT_STRENGTH: f64 = 0.01;

/// Force the signs of the band coefficients to encode `bits`.
pub fn embed(coeffs: &mut [f64], band: &BandSpec, bits: &[u8], strength: f64) {
    debug_assert!(strength > 0.0, "sign-force strength must be positive");
    for (j, &bit) in band.indices().zip(bits) {
        let magnitude = coeffs[j].abs().max(strength);
        coeffs[j] = if bit == 1 { magnitude } else { -magnitude };
    }
}

/// Read `band.bits` bits from coefficient signs.
pub fn detect(coeffs: &[f64], band: &BandSpec) -> Vec<u8> {
    band.indices().map(|j| if coeffs[j] > 0.0 { 1 } else { 0 }).collect()
}
