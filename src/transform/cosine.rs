// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Orthonormal DCT-II / DCT-III over a whole sample buffer.
//!
//! `rustdct` computes the unnormalized transforms:
//!
//! ```text
//! DCT-II:  X[k] = sum_n x[n] cos(pi/N (n + 1/2) k)
//! DCT-III: x[n] = X[0]/2 + sum_{k>=1} X[k] cos(pi/N (n + 1/2) k)
//! ```
//!
//! so `DCT-III(DCT-II(x)) = N/2 * x`. The orthonormal scaling applied here is
//! `sqrt(1/N)` for the DC term and `sqrt(2/N)` for every other term, which
//! makes the transform energy-preserving and its own exact inverse pair.

use rustdct::{Dct2, Dct3, DctPlanner};

/// Minimum number of samples accepted by the cosine transform.
pub const MIN_LEN: usize = 2;

fn scales(n: usize) -> (f64, f64) {
    let n = n as f64;
    ((1.0 / n).sqrt(), (2.0 / n).sqrt())
}

/// Forward orthonormal DCT-II. Output length equals input length.
pub fn forward(samples: &[f64]) -> Vec<f64> {
    let n = samples.len();
    let mut buffer = samples.to_vec();
    if n == 0 {
        return buffer;
    }

    let mut planner = DctPlanner::new();
    let dct = planner.plan_dct2(n);
    dct.process_dct2(&mut buffer);

    let (dc, ac) = scales(n);
    buffer[0] *= dc;
    for c in buffer[1..].iter_mut() {
        *c *= ac;
    }
    buffer
}

/// Inverse of [`forward`] (orthonormal DCT-III).
pub fn inverse(coeffs: &[f64]) -> Vec<f64> {
    let n = coeffs.len();
    let mut buffer = coeffs.to_vec();
    if n == 0 {
        return buffer;
    }

    // Undo the orthonormal scaling, then the N/2 gain of DCT-III.
    let (dc, ac) = scales(n);
    buffer[0] /= dc;
    for c in buffer[1..].iter_mut() {
        *c /= ac;
    }

    let mut planner = DctPlanner::new();
    let dct = planner.plan_dct3(n);
    dct.process_dct3(&mut buffer);

    let gain = 2.0 / n as f64;
    for x in buffer.iter_mut() {
        *x *= gain;
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| ((i * 37) % 11) as f64 / 10.0 - 0.5).collect()
    }

    #[test]
    fn roundtrip_identity() {
        for n in [2usize, 3, 8, 17, 64, 441, 1000] {
            let x = ramp(n);
            let y = inverse(&forward(&x));
            assert_eq!(y.len(), n);
            for (a, b) in x.iter().zip(y.iter()) {
                assert!((a - b).abs() < 1e-9, "n={n}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn energy_preserved() {
        let x = ramp(500);
        let c = forward(&x);
        let ex: f64 = x.iter().map(|v| v * v).sum();
        let ec: f64 = c.iter().map(|v| v * v).sum();
        assert!((ex - ec).abs() < 1e-9 * ex.max(1.0), "{ex} vs {ec}");
    }

    #[test]
    fn constant_signal_is_pure_dc() {
        let x = vec![0.25; 64];
        let c = forward(&x);
        // Orthonormal DC of a constant a over N samples is a * sqrt(N).
        assert!((c[0] - 0.25 * 8.0).abs() < 1e-12);
        for (k, v) in c.iter().enumerate().skip(1) {
            assert!(v.abs() < 1e-12, "coefficient {k} = {v}");
        }
    }

    #[test]
    fn empty_input() {
        assert!(forward(&[]).is_empty());
        assert!(inverse(&[]).is_empty());
    }
}
