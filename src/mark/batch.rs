// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Embed or extract over many independent buffers.
//!
//! Each buffer is its own unit of work with its own result; one failure does
//! not stop the others. Results come back in input order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::error::WatermarkError;
use super::payload::DecodedText;
use super::pipeline::{Embedded, Watermarker};
use super::progress::Progress;
use crate::signal::SampleBuffer;

fn run_all<T, F>(buffers: &[SampleBuffer], progress: &Progress, unit: F) -> Vec<Result<T, WatermarkError>>
where
    T: Send,
    F: Fn(&SampleBuffer) -> Result<T, WatermarkError> + Sync,
{
    progress.init(u32::try_from(buffers.len()).unwrap_or(u32::MAX));

    let run = |buffer: &SampleBuffer| -> Result<T, WatermarkError> {
        progress.check_cancelled()?;
        let result = unit(buffer);
        progress.advance();
        result
    };

    #[cfg(feature = "parallel")]
    let results: Vec<Result<T, WatermarkError>> = buffers.par_iter().map(run).collect();
    #[cfg(not(feature = "parallel"))]
    let results: Vec<Result<T, WatermarkError>> = buffers.iter().map(run).collect();

    if !progress.is_cancelled() {
        progress.finish();
    }
    results
}

/// Embed `text` into every buffer.
pub fn embed_batch(
    watermarker: &Watermarker,
    buffers: &[SampleBuffer],
    text: &str,
    progress: &Progress,
) -> Vec<Result<Embedded, WatermarkError>> {
    run_all(buffers, progress, |b| watermarker.embed(b, text))
}

/// Extract a `byte_len`-byte payload from every buffer.
pub fn extract_batch(
    watermarker: &Watermarker,
    buffers: &[SampleBuffer],
    byte_len: usize,
    progress: &Progress,
) -> Vec<Result<DecodedText, WatermarkError>> {
    run_all(buffers, progress, |b| watermarker.extract(b, byte_len))
}

/// Number of successful units.
pub fn success_count<T, E>(results: &[Result<T, E>]) -> usize {
    results.iter().filter(|r| r.is_ok()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    fn noise(len: usize, seed: u64) -> SampleBuffer {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        SampleBuffer::new((0..len).map(|_| rng.gen_range(-0.5..0.5)).collect(), 8000, 1)
    }

    #[test]
    fn batch_roundtrip_in_order() {
        let wm = Watermarker::default();
        let buffers: Vec<SampleBuffer> = (0..4).map(|i| noise(2048, i)).collect();
        let progress = Progress::new();

        let embedded = embed_batch(&wm, &buffers, "ok", &progress);
        assert_eq!(success_count(&embedded), 4);
        assert_eq!(progress.get(), (4, 4));

        let marked: Vec<SampleBuffer> = embedded.into_iter().map(|r| r.unwrap().buffer).collect();
        let extracted = extract_batch(&wm, &marked, 2, &progress);
        for r in &extracted {
            assert_eq!(r.as_ref().unwrap().text(), "ok");
        }
    }

    #[test]
    fn one_failure_does_not_stop_others() {
        let wm = Watermarker::default();
        let buffers = vec![noise(2048, 1), SampleBuffer::from_samples(vec![0.1]), noise(2048, 2)];
        let results = embed_batch(&wm, &buffers, "ok", &Progress::new());
        assert_eq!(success_count(&results), 2);
        assert!(matches!(results[1], Err(WatermarkError::SignalTooShort { .. })));
    }

    #[test]
    fn cancelled_batch_runs_nothing() {
        let wm = Watermarker::default();
        let buffers: Vec<SampleBuffer> = (0..3).map(|i| noise(512, i)).collect();
        let progress = Progress::new();
        progress.cancel();
        let results = extract_batch(&wm, &buffers, 1, &progress);
        assert!(results.iter().all(|r| matches!(r, Err(WatermarkError::Cancelled))));
    }
}
