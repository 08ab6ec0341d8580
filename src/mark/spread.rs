// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Spread-spectrum embedding and correlation-sign detection.
//!
//! Each bit `b` at coefficient `c` with carrier chip `p` is modulated
//! additively:
//!
//! ```text
//! c' = c + s(b) * alpha * |c| * p        s(1) = +1, s(0) = -1
//! ```
//!
//! and detected as `1` iff `c' * p > 0`. When the host coefficient dominates
//! the additive term (the usual case for `alpha * |p| < 1`) the modulated
//! value may still correlate the wrong way; it is then set to the sign the
//! detector needs, keeping its magnitude (never below [`MIN_MAGNITUDE`]).
//! Without the password the chip signs are unknown, so the coefficient signs
//! carry no readable payload.

use super::band::BandSpec;

/// Lower bound of the recommended modulation strength.
pub const MIN_ALPHA: f64 = 0.01;

/// Upper bound of the recommended modulation strength.
pub const MAX_ALPHA: f64 = 1.0;

/// Smallest magnitude a carrying coefficient is left with.
pub const MIN_MAGNITUDE: f64 = 1e-3;

/// Whether `alpha` is inside the supported range.
pub fn alpha_in_range(alpha: f64) -> bool {
    (MIN_ALPHA..=MAX_ALPHA).contains(&alpha)
}

fn modulate(c: f64, bit: u8, alpha: f64, chip: f64) -> f64 {
    let direction = if bit == 1 { 1.0 } else { -1.0 };
    let marked = c + direction * alpha * c.abs() * chip;

    // Sign the detector must see for this bit.
    let wanted = direction * chip.signum();
    if marked.signum() == wanted && marked.abs() >= MIN_MAGNITUDE {
        marked
    } else {
        wanted * marked.abs().max(MIN_MAGNITUDE)
    }
}

/// Embed `bits` into `coeffs` over `band`, one chip per bit.
///
/// `bits` and `chips` must both hold at least `band.bits` entries.
pub fn embed(coeffs: &mut [f64], band: &BandSpec, bits: &[u8], alpha: f64, chips: &[f64]) {
    debug_assert!(alpha_in_range(alpha), "alpha {alpha} outside [{MIN_ALPHA}, {MAX_ALPHA}]");
    debug_assert!(bits.len() >= band.bits && chips.len() >= band.bits);
    for ((j, &bit), &chip) in band.indices().zip(bits).zip(chips) {
        coeffs[j] = modulate(coeffs[j], bit, alpha, chip);
    }
}

/// Detect `band.bits` bits by correlating each coefficient with its chip.
pub fn detect(coeffs: &[f64], band: &BandSpec, chips: &[f64]) -> Vec<u8> {
    band.indices()
        .zip(chips)
        .map(|(j, &chip)| if coeffs[j] * chip > 0.0 { 1 } else { 0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mark::carrier;

    fn band(bits: usize) -> BandSpec {
        BandSpec { start: 4, end: 4 + bits, bits }
    }

    #[test]
    fn embed_then_detect() {
        let bits = vec![1, 0, 0, 1, 1, 1, 0, 1];
        let chips = carrier::generate(bits.len(), 9);
        let mut coeffs: Vec<f64> = (0..16).map(|i| (i as f64 - 7.5) * 0.3).collect();
        let b = band(bits.len());
        embed(&mut coeffs, &b, &bits, 0.1, &chips);
        assert_eq!(detect(&coeffs, &b, &chips), bits);
    }

    #[test]
    fn untouched_outside_band() {
        let chips = carrier::generate(4, 1);
        let orig: Vec<f64> = (0..12).map(|i| i as f64 + 0.5).collect();
        let mut coeffs = orig.clone();
        embed(&mut coeffs, &band(4), &[1, 0, 1, 0], 0.5, &chips);
        assert_eq!(&coeffs[..4], &orig[..4]);
        assert_eq!(&coeffs[8..], &orig[8..]);
    }

    #[test]
    fn zero_coefficients_still_carry_bits() {
        let bits = vec![1, 0, 1, 1];
        let chips = carrier::generate(4, 5);
        let mut coeffs = vec![0.0; 8];
        embed(&mut coeffs, &band(4), &bits, 0.1, &chips);
        assert_eq!(detect(&coeffs, &band(4), &chips), bits);
        for c in &coeffs[4..8] {
            assert!(c.abs() >= MIN_MAGNITUDE);
        }
    }

    #[test]
    fn helping_host_keeps_additive_value() {
        // chip > 0, bit 1, positive host: plain additive modulation applies
        let out = modulate(2.0, 1, 0.1, 0.5);
        assert!((out - 2.1).abs() < 1e-12);
    }

    #[test]
    fn survives_amplitude_scaling() {
        let bits = vec![0, 1, 1, 0, 1, 0];
        let chips = carrier::generate(bits.len(), 77);
        let mut coeffs: Vec<f64> = (0..16).map(|i| ((i * 7) % 5) as f64 - 2.0).collect();
        embed(&mut coeffs, &band(bits.len()), &bits, 0.2, &chips);
        let scaled: Vec<f64> = coeffs.iter().map(|c| c * 0.6).collect();
        assert_eq!(detect(&scaled, &band(bits.len()), &chips), bits);
    }

    #[test]
    fn alpha_range() {
        assert!(alpha_in_range(0.01));
        assert!(alpha_in_range(1.0));
        assert!(!alpha_in_range(0.0));
        assert!(!alpha_in_range(1.5));
        assert!(!alpha_in_range(f64::NAN));
    }
}
