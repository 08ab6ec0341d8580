// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Reinterpreting one channel of interleaved 8-bit pixel data as samples.
//!
//! The codec watermarks a single channel (e.g. blue, or luminance after the
//! caller's color conversion). Pixels are read in raster order; writing back
//! rounds to the nearest integer and clamps to `0..=255`.

use super::SampleBuffer;
use crate::mark::error::WatermarkError;

/// Pixel count and channel count of a valid interleaved layout.
fn check_layout(pixels: &[u8], channels: usize, channel: usize) -> Result<(usize, u16), WatermarkError> {
    if channels == 0 || channel >= channels {
        return Err(WatermarkError::UnsupportedConfiguration(format!(
            "channel {channel} out of range for {channels}-channel pixels"
        )));
    }
    let channel_count = u16::try_from(channels).map_err(|_| {
        WatermarkError::UnsupportedConfiguration(format!("{channels} channels exceeds {}", u16::MAX))
    })?;
    if pixels.len() % channels != 0 {
        return Err(WatermarkError::UnsupportedConfiguration(format!(
            "{} bytes is not a whole number of {channels}-channel pixels",
            pixels.len()
        )));
    }
    Ok((pixels.len() / channels, channel_count))
}

/// Extract channel `channel` of interleaved `pixels` as a sample buffer.
///
/// # Errors
/// [`WatermarkError::UnsupportedConfiguration`] if the layout is inconsistent.
pub fn channel_samples(pixels: &[u8], channels: usize, channel: usize) -> Result<SampleBuffer, WatermarkError> {
    let (_, channel_count) = check_layout(pixels, channels, channel)?;
    let samples = pixels
        .chunks_exact(channels)
        .map(|px| px[channel] as f64)
        .collect();
    Ok(SampleBuffer::new(samples, 0, channel_count))
}

/// Write `buffer` back into channel `channel` of interleaved `pixels`.
///
/// # Errors
/// [`WatermarkError::UnsupportedConfiguration`] if the layout is inconsistent
/// or the buffer length differs from the pixel count.
pub fn write_channel(
    buffer: &SampleBuffer,
    pixels: &mut [u8],
    channels: usize,
    channel: usize,
) -> Result<(), WatermarkError> {
    let (count, _) = check_layout(pixels, channels, channel)?;
    if buffer.len() != count {
        return Err(WatermarkError::UnsupportedConfiguration(format!(
            "buffer has {} samples but image has {count} pixels",
            buffer.len()
        )));
    }
    for (px, &s) in pixels.chunks_exact_mut(channels).zip(buffer.samples()) {
        px[channel] = s.round().clamp(0.0, 255.0) as u8;
    }
    Ok(())
}
