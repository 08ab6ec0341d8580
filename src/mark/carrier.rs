// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Pseudorandom carrier sequences for spread-spectrum embedding.
//!
//! A [`Carrier`] owns its own ChaCha20 generator, seeded from the caller's
//! integer password; there is no process-wide generator state. Each chip is
//! the Irwin-Hall sum of 12 uniforms minus 6, which has mean 0 and variance 1
//! and is built from additions only, so the sequence is bit-identical on every
//! platform. Exact zeros are redrawn so every chip has a sign.
//!
//! Because chips are drawn sequentially, `generate(n, seed)` is a prefix of
//! `generate(m, seed)` for `n <= m`. Extraction of a truncated payload relies
//! on this.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

const UNIFORMS_PER_CHIP: usize = 12;

/// Deterministic chip generator.
pub struct Carrier {
    rng: ChaCha20Rng,
}

impl Carrier {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha20Rng::seed_from_u64(seed) }
    }

    /// Draw the next non-zero chip.
    pub fn next_chip(&mut self) -> f64 {
        loop {
            let mut sum = 0.0f64;
            for _ in 0..UNIFORMS_PER_CHIP {
                sum += self.rng.gen::<f64>();
            }
            let chip = sum - 6.0;
            if chip != 0.0 {
                return chip;
            }
        }
    }

    /// Draw `length` chips.
    pub fn take(&mut self, length: usize) -> Vec<f64> {
        (0..length).map(|_| self.next_chip()).collect()
    }
}

/// Carrier sequence of `length` chips for `seed`.
pub fn generate(length: usize, seed: u64) -> Vec<f64> {
    Carrier::new(seed).take(length)
}
