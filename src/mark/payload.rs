// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Payload text to bit sequence conversion.
//!
//! Bit layout: bit `i` is bit `7 - (i % 8)` of UTF-8 byte `i / 8`, i.e. each
//! byte is emitted most-significant bit first. A string of `N` bytes always
//! encodes to exactly `8N` bits.
//!
//! Decoding drops a trailing group of fewer than 8 bits. Bytes that are not
//! valid UTF-8 are not an error: the result is [`DecodedText::Raw`] holding
//! the `'0'`/`'1'` rendering of the bytes, so callers can still compare or
//! vote on it while knowing the decode was not clean.

use super::error::WatermarkError;

/// Outcome of decoding an extracted bit sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedText {
    /// The bytes were valid UTF-8.
    Clean(String),
    /// Fallback rendering of the raw bits (one char per bit).
    Raw(String),
}

impl DecodedText {
    pub fn text(&self) -> &str {
        match self {
            Self::Clean(s) | Self::Raw(s) => s,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Clean(s) | Self::Raw(s) => s,
        }
    }

    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Clean(_))
    }
}

/// Expand bytes into MSB-first bits (each `0` or `1`).
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &b in bytes {
        for shift in (0..8).rev() {
            bits.push((b >> shift) & 1);
        }
    }
    bits
}

/// Pack MSB-first bits into bytes, dropping an incomplete trailing group.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit & 1)))
        .collect()
}

/// Encode `text` as `8 * text.len()` bits.
pub fn encode(text: &str) -> Vec<u8> {
    bytes_to_bits(text.as_bytes())
}

/// Decode bytes with the raw-bits fallback for invalid UTF-8.
pub fn decode_bytes(bytes: Vec<u8>) -> DecodedText {
    match String::from_utf8(bytes) {
        Ok(text) => DecodedText::Clean(text),
        Err(e) => {
            let bytes = e.into_bytes();
            log::warn!("extracted {} bytes are not valid UTF-8, returning raw bits", bytes.len());
            DecodedText::Raw(render_bits(&bytes))
        }
    }
}

/// Decode bits with the raw-bits fallback for invalid UTF-8.
pub fn decode(bits: &[u8]) -> DecodedText {
    decode_bytes(bits_to_bytes(bits))
}

/// Decode bits, failing on invalid UTF-8.
///
/// # Errors
/// [`WatermarkError::InvalidEncoding`] if the bytes are not valid UTF-8.
pub fn decode_strict(bits: &[u8]) -> Result<String, WatermarkError> {
    String::from_utf8(bits_to_bytes(bits)).map_err(|_| WatermarkError::InvalidEncoding)
}

fn render_bits(bytes: &[u8]) -> String {
    bytes_to_bits(bytes)
        .into_iter()
        .map(|b| if b == 1 { '1' } else { '0' })
        .collect()
}
