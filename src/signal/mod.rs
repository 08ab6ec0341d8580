// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Sample buffers handed to the watermark codec.
//!
//! Media I/O lives outside this crate: callers decode audio, frames or image
//! channels into a [`SampleBuffer`] and encode the returned buffer back. The
//! codec never changes a buffer's length or metadata.

pub mod pixels;

/// An ordered run of real-valued samples plus the layout it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<f64>,
    /// Native sample rate in Hz (0 when not meaningful, e.g. pixel data).
    sample_rate: u32,
    /// Channel count of the source the samples were taken from.
    channels: u16,
}

impl SampleBuffer {
    pub fn new(samples: Vec<f64>, sample_rate: u32, channels: u16) -> Self {
        Self { samples, sample_rate, channels }
    }

    /// Single-channel buffer without a sample rate.
    pub fn from_samples(samples: Vec<f64>) -> Self {
        Self::new(samples, 0, 1)
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// A buffer with the same layout but new sample values.
    pub fn with_samples(&self, samples: Vec<f64>) -> Self {
        Self::new(samples, self.sample_rate, self.channels)
    }

    /// Clamp every sample into `[lo, hi]`, e.g. `[-1, 1]` before writing PCM.
    pub fn clip(&mut self, lo: f64, hi: f64) {
        for s in self.samples.iter_mut() {
            *s = s.clamp(lo, hi);
        }
    }
}
