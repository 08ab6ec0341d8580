// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Seam to an external perceptual image-watermark library.
//!
//! The library is a black box: pixels and payload bytes in, pixels out.
//! This module only names its methods, enforces their payload limits and
//! applies the crate's text decoding policy to what comes back.

use core::fmt;
use core::str::FromStr;

use super::error::WatermarkError;
use super::payload::{self, DecodedText};

/// Methods offered by the external library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LibraryMethod {
    DwtDct,
    DwtDctSvd,
    RivaGan,
    Blind,
}

impl LibraryMethod {
    pub const ALL: [LibraryMethod; 4] =
        [LibraryMethod::DwtDct, LibraryMethod::DwtDctSvd, LibraryMethod::RivaGan, LibraryMethod::Blind];

    /// Name as the library spells it.
    pub fn name(self) -> &'static str {
        match self {
            LibraryMethod::DwtDct => "dwtDct",
            LibraryMethod::DwtDctSvd => "dwtDctSvd",
            LibraryMethod::RivaGan => "rivaGan",
            LibraryMethod::Blind => "blind",
        }
    }

    /// Maximum payload in bytes, if the method has a fixed one.
    pub fn payload_limit(self) -> Option<usize> {
        match self {
            LibraryMethod::RivaGan => Some(4),
            _ => None,
        }
    }
}

impl fmt::Display for LibraryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LibraryMethod {
    type Err = WatermarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LibraryMethod::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| WatermarkError::UnsupportedConfiguration(format!("unknown image watermark method '{s}'")))
    }
}

/// External image-watermark library.
///
/// Implementations report their own failures as [`WatermarkError::Service`].
pub trait ImageWatermarkService {
    fn embed(&self, pixels: &[u8], payload: &[u8], method: LibraryMethod) -> Result<Vec<u8>, WatermarkError>;

    fn extract(&self, pixels: &[u8], byte_length: usize, method: LibraryMethod) -> Result<Vec<u8>, WatermarkError>;
}

/// Embed `text` through `service`.
///
/// # Errors
/// [`WatermarkError::CapacityExceeded`] if the encoded text exceeds the
/// method's payload limit; the service is not called in that case.
pub fn embed_text<S: ImageWatermarkService + ?Sized>(
    service: &S,
    pixels: &[u8],
    text: &str,
    method: LibraryMethod,
) -> Result<Vec<u8>, WatermarkError> {
    let payload = text.as_bytes();
    if let Some(limit) = method.payload_limit() {
        if payload.len() > limit {
            return Err(WatermarkError::CapacityExceeded { required: payload.len() * 8, available: limit * 8 });
        }
    }
    let marked = service.embed(pixels, payload, method)?;
    if marked.len() != pixels.len() {
        return Err(WatermarkError::Service(format!(
            "{method} returned {} bytes for a {}-byte image",
            marked.len(),
            pixels.len()
        )));
    }
    Ok(marked)
}

/// Extract a `byte_length`-byte text through `service`.
pub fn extract_text<S: ImageWatermarkService + ?Sized>(
    service: &S,
    pixels: &[u8],
    byte_length: usize,
    method: LibraryMethod,
) -> Result<DecodedText, WatermarkError> {
    let bytes = service.extract(pixels, byte_length, method)?;
    Ok(payload::decode_bytes(bytes))
}
