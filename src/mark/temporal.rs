// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Temporal redundancy: repeated extraction over segments and majority vote.
//!
//! A longer medium (video frames, audio windows) is exposed as an indexed
//! [`SegmentSource`]. Extraction samples segments `0, s, 2s, ...` (stride
//! `s = frame_interval`, at most `sample_frames` of them), decodes each one
//! independently and fuses the non-empty results by exact-string majority
//! vote. Confidence is the winner's share of the non-empty results. Ties go
//! to the string seen first.
//!
//! Fetching segments is I/O and happens serially in [`collect_segments`];
//! the per-segment decode in [`extract_samples`] is pure and runs on rayon
//! when the `parallel` feature is enabled. Results keep segment order either
//! way, so the vote is deterministic.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::error::WatermarkError;
use super::payload;
use super::pipeline::Watermarker;
use super::progress::Progress;
use crate::signal::SampleBuffer;

/// Producer of independently watermarked segments.
pub trait SegmentSource {
    /// Number of segments available.
    fn segment_count(&self) -> usize;

    /// Segment `index`, or `None` if it cannot be read.
    fn segment(&self, index: usize) -> Option<SampleBuffer>;
}

impl SegmentSource for [SampleBuffer] {
    fn segment_count(&self) -> usize {
        self.len()
    }

    fn segment(&self, index: usize) -> Option<SampleBuffer> {
        self.get(index).cloned()
    }
}

impl SegmentSource for Vec<SampleBuffer> {
    fn segment_count(&self) -> usize {
        self.len()
    }

    fn segment(&self, index: usize) -> Option<SampleBuffer> {
        self.get(index).cloned()
    }
}

/// Which segments to sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampling {
    frame_interval: usize,
    sample_frames: usize,
}

impl Sampling {
    /// # Errors
    /// [`WatermarkError::UnsupportedConfiguration`] if either value is zero.
    pub fn new(frame_interval: usize, sample_frames: usize) -> Result<Self, WatermarkError> {
        if frame_interval == 0 || sample_frames == 0 {
            return Err(WatermarkError::UnsupportedConfiguration(format!(
                "frame_interval ({frame_interval}) and sample_frames ({sample_frames}) must be positive"
            )));
        }
        Ok(Self { frame_interval, sample_frames })
    }

    pub fn frame_interval(&self) -> usize {
        self.frame_interval
    }

    pub fn sample_frames(&self) -> usize {
        self.sample_frames
    }

    /// Sampled indices out of `total` segments.
    pub fn indices(&self, total: usize) -> Vec<usize> {
        let limit = total.min(self.sample_frames.saturating_mul(self.frame_interval));
        (0..limit).step_by(self.frame_interval).collect()
    }

    /// Whether segment `index` receives the watermark when embedding.
    pub fn is_marked(&self, index: usize) -> bool {
        index % self.frame_interval == 0
    }
}

/// One segment's extraction outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionSample {
    pub segment: usize,
    pub text: Option<String>,
}

/// Fused result of a majority vote.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteResult {
    pub text: String,
    /// `agreeing / considered`, in `[0, 1]`.
    pub confidence: f64,
    /// Samples that decoded to the winning text.
    pub agreeing: usize,
    /// Non-empty samples that took part in the vote.
    pub considered: usize,
}

/// Majority vote over the non-empty samples.
///
/// # Errors
/// [`WatermarkError::NoWatermarkDetected`] if no sample carries text.
pub fn majority_vote(samples: &[ExtractionSample]) -> Result<VoteResult, WatermarkError> {
    // Tally in first-seen order so ties resolve to the earliest string.
    let mut tally: Vec<(&str, usize)> = Vec::new();
    let mut considered = 0usize;
    for text in samples.iter().filter_map(|s| s.text.as_deref()) {
        if text.is_empty() {
            continue;
        }
        considered += 1;
        match tally.iter_mut().find(|(t, _)| *t == text) {
            Some((_, count)) => *count += 1,
            None => tally.push((text, 1)),
        }
    }

    let mut winner: Option<(&str, usize)> = None;
    for &(text, count) in &tally {
        if winner.map_or(true, |(_, best)| count > best) {
            winner = Some((text, count));
        }
    }

    let (text, agreeing) = winner.ok_or(WatermarkError::NoWatermarkDetected)?;
    let confidence = agreeing as f64 / considered as f64;
    log::info!("watermark '{text}' agreed by {agreeing}/{considered} segments (confidence {confidence:.2})");
    Ok(VoteResult { text: text.to_string(), confidence, agreeing, considered })
}

/// Fetch the sampled segments. Unreadable segments are skipped.
pub fn collect_segments<S: SegmentSource + ?Sized>(source: &S, sampling: &Sampling) -> Vec<(usize, SampleBuffer)> {
    sampling
        .indices(source.segment_count())
        .into_iter()
        .filter_map(|i| match source.segment(i) {
            Some(buffer) => Some((i, buffer)),
            None => {
                log::debug!("segment {i} could not be read");
                None
            }
        })
        .collect()
}

fn extract_one(watermarker: &Watermarker, index: usize, buffer: &SampleBuffer, byte_len: usize) -> ExtractionSample {
    let text = match watermarker.extract(buffer, byte_len) {
        Ok(decoded) if !decoded.text().is_empty() => Some(decoded.into_text()),
        Ok(_) => None,
        Err(e) => {
            log::debug!("segment {index}: {e}");
            None
        }
    };
    ExtractionSample { segment: index, text }
}

/// Decode every collected segment independently.
///
/// # Errors
/// [`WatermarkError::Cancelled`] if `progress` was cancelled; segments not
/// yet started are skipped.
pub fn extract_samples(
    watermarker: &Watermarker,
    segments: &[(usize, SampleBuffer)],
    byte_len: usize,
    progress: &Progress,
) -> Result<Vec<ExtractionSample>, WatermarkError> {
    progress.init(u32::try_from(segments.len()).unwrap_or(u32::MAX));

    let run = |(index, buffer): &(usize, SampleBuffer)| {
        if progress.is_cancelled() {
            return None;
        }
        let sample = extract_one(watermarker, *index, buffer, byte_len);
        progress.advance();
        Some(sample)
    };

    #[cfg(feature = "parallel")]
    let results: Vec<Option<ExtractionSample>> = segments.par_iter().map(run).collect();
    #[cfg(not(feature = "parallel"))]
    let results: Vec<Option<ExtractionSample>> = segments.iter().map(run).collect();

    progress.check_cancelled()?;
    progress.finish();
    Ok(results.into_iter().flatten().collect())
}

/// Sample `source`, decode each segment and fuse the results.
///
/// # Errors
/// - [`WatermarkError::NoWatermarkDetected`] if no segment yields text.
/// - [`WatermarkError::Cancelled`] if `progress` was cancelled.
pub fn aggregate_extract<S: SegmentSource + ?Sized>(
    watermarker: &Watermarker,
    source: &S,
    byte_len: usize,
    sampling: &Sampling,
    progress: &Progress,
) -> Result<VoteResult, WatermarkError> {
    let segments = collect_segments(source, sampling);
    let samples = extract_samples(watermarker, &segments, byte_len, progress)?;
    majority_vote(&samples)
}

/// Embed `text` into every segment selected by `sampling.is_marked`.
///
/// All targeted segments are checked for capacity before any is modified.
/// Returns the number of watermarked segments.
///
/// # Errors
/// - [`WatermarkError::SignalTooShort`] / [`WatermarkError::CapacityExceeded`]
///   from the pre-flight check, with no segment modified.
/// - [`WatermarkError::Cancelled`] if `progress` was cancelled; segments
///   already processed keep their watermark.
pub fn embed_segments(
    watermarker: &Watermarker,
    segments: &mut [SampleBuffer],
    text: &str,
    sampling: &Sampling,
    progress: &Progress,
) -> Result<usize, WatermarkError> {
    let bits = payload::encode(text);
    for (i, segment) in segments.iter().enumerate() {
        if sampling.is_marked(i) {
            watermarker.check_fit(segment.len(), bits.len())?;
        }
    }

    let targets = segments.iter().enumerate().filter(|(i, _)| sampling.is_marked(*i)).count();
    progress.init(u32::try_from(targets).unwrap_or(u32::MAX));

    let run = |(i, segment): (usize, &mut SampleBuffer)| -> Result<bool, WatermarkError> {
        if !sampling.is_marked(i) {
            return Ok(false);
        }
        progress.check_cancelled()?;
        let (samples, _) = watermarker.embed_bits(segment.samples(), &bits)?;
        *segment = segment.with_samples(samples);
        progress.advance();
        Ok(true)
    };

    #[cfg(feature = "parallel")]
    let results: Vec<Result<bool, WatermarkError>> = segments.par_iter_mut().enumerate().map(run).collect();
    #[cfg(not(feature = "parallel"))]
    let results: Vec<Result<bool, WatermarkError>> = segments.iter_mut().enumerate().map(run).collect();

    let mut marked = 0usize;
    for r in results {
        if r? {
            marked += 1;
        }
    }
    progress.finish();
    Ok(marked)
}
