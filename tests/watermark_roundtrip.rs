// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Round-trip integration tests for single-buffer embed/extract.

use mediaseal_core::mark::{payload, wavelet_watermarker};
use mediaseal_core::{
    capacity, embed_watermark, extract_watermark, DecodedText, Overflow, Policy, SampleBuffer, Transform,
    WatermarkConfig, WatermarkError, Watermarker,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn audio(len: usize, seed: u64) -> SampleBuffer {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    SampleBuffer::new((0..len).map(|_| rng.gen_range(-0.8..0.8)).collect(), 22050, 1)
}

fn tone(len: usize) -> SampleBuffer {
    let samples = (0..len)
        .map(|i| 0.5 * (i as f64 * 440.0 * std::f64::consts::TAU / 22050.0).sin())
        .collect();
    SampleBuffer::new(samples, 22050, 1)
}

fn all_codecs() -> Vec<Watermarker> {
    let ss = Policy::spread_spectrum(0.1, 42).unwrap();
    let sf = Policy::sign_force(0.01).unwrap();
    vec![
        Watermarker::new(Transform::Cosine, ss),
        Watermarker::new(Transform::Cosine, sf),
        wavelet_watermarker(ss),
        wavelet_watermarker(sf),
    ]
}

#[test]
fn roundtrip_every_codec() {
    init_logger();
    let input = audio(22050, 7);
    for wm in all_codecs() {
        let marked = wm.embed(&input, "Hi").unwrap();
        assert_eq!(marked.buffer.len(), input.len(), "{wm:?}");
        assert_eq!(marked.buffer.sample_rate(), 22050);
        assert_eq!(wm.extract(&marked.buffer, 2).unwrap(), DecodedText::Clean("Hi".into()), "{wm:?}");
    }
}

#[test]
fn roundtrip_on_pure_tone() {
    init_logger();
    let input = tone(4096);
    for wm in all_codecs() {
        let marked = wm.embed(&input, "tone").unwrap();
        assert_eq!(wm.extract(&marked.buffer, 4).unwrap().text(), "tone", "{wm:?}");
    }
}

#[test]
fn roundtrip_unicode() {
    init_logger();
    let input = audio(8192, 3);
    let message = "Grüße 🌍";
    for wm in all_codecs() {
        let marked = wm.embed(&input, message).unwrap();
        let decoded = wm.extract(&marked.buffer, message.len()).unwrap();
        assert_eq!(decoded.text(), message, "{wm:?}");
    }
}

#[test]
fn odd_lengths_are_preserved() {
    init_logger();
    for len in [1001, 1023, 2047, 4099] {
        let input = audio(len, len as u64);
        for wm in all_codecs() {
            let marked = wm.embed(&input, "ok").unwrap();
            assert_eq!(marked.buffer.len(), len);
            assert_eq!(wm.extract(&marked.buffer, 2).unwrap().text(), "ok", "len {len}, {wm:?}");
        }
    }
}

#[test]
fn spread_spectrum_is_imperceptible() {
    let input = audio(22050, 11);
    let wm = Watermarker::default();
    let marked = wm.embed(&input, "quiet").unwrap();
    let rms = |v: &[f64]| (v.iter().map(|x| x * x).sum::<f64>() / v.len() as f64).sqrt();
    let delta: Vec<f64> = input.samples().iter().zip(marked.buffer.samples()).map(|(a, b)| a - b).collect();
    let (noise, signal) = (rms(&delta), rms(input.samples()));
    assert!(noise < 0.1 * signal, "watermark rms {noise} vs signal rms {signal}");
}

#[test]
fn wrong_seed_does_not_recover_text() {
    init_logger();
    let input = audio(22050, 5);
    let message = "watermark";
    let embedder = Watermarker::new(Transform::Cosine, Policy::spread_spectrum(0.1, 42).unwrap());
    let marked = embedder.embed(&input, message).unwrap();

    let other = Watermarker::new(Transform::Cosine, Policy::spread_spectrum(0.1, 43).unwrap());
    let decoded = other.extract(&marked.buffer, message.len()).unwrap();
    assert_ne!(decoded.text(), message);
}

#[test]
fn sign_force_is_idempotent() {
    let wm = Watermarker::new(Transform::Cosine, Policy::sign_force(0.01).unwrap());
    let input = audio(4096, 9);
    let once = wm.embed(&input, "same").unwrap().buffer;
    let twice = wm.embed(&once, "same").unwrap().buffer;
    for (a, b) in once.samples().iter().zip(twice.samples()) {
        assert!((a - b).abs() < 1e-9);
    }
}

#[test]
fn capacity_boundary_reject() {
    let input = audio(256, 1);
    for wm in all_codecs() {
        let bits = wm.capacity_bits(256);
        let bytes = wm.capacity_bytes(256);
        assert!(bytes > 0, "{wm:?}");

        let fits = "a".repeat(bytes);
        let marked = wm.embed(&input, &fits).unwrap();
        assert_eq!(wm.extract(&marked.buffer, bytes).unwrap().text(), fits, "{wm:?}");

        let err = wm.embed(&input, &"a".repeat(bytes + 1)).unwrap_err();
        assert_eq!(err, WatermarkError::CapacityExceeded { required: (bytes + 1) * 8, available: bits }, "{wm:?}");
    }
}

#[test]
fn capacity_boundary_truncate() {
    init_logger();
    let input = audio(256, 1);
    for wm in all_codecs() {
        let wm = wm.with_overflow(Overflow::Truncate);
        let bits = wm.capacity_bits(256);
        let bytes = wm.capacity_bytes(256);

        let marked = wm.embed(&input, &"b".repeat(bytes + 1)).unwrap();
        assert!(marked.is_truncated(), "{wm:?}");
        assert_eq!((marked.bits_requested, marked.bits_embedded), ((bytes + 1) * 8, bits), "{wm:?}");
        assert_eq!(wm.extract(&marked.buffer, bytes + 1).unwrap().text(), "b".repeat(bytes), "{wm:?}");
    }
}

#[test]
fn short_signals_rejected() {
    let cosine = Watermarker::default();
    assert_eq!(
        cosine.embed(&SampleBuffer::from_samples(vec![0.3]), "").unwrap_err(),
        WatermarkError::SignalTooShort { len: 1, required: 2 }
    );
    let wavelet = wavelet_watermarker(Policy::sign_force(0.01).unwrap());
    assert!(matches!(
        wavelet.extract(&SampleBuffer::from_samples(vec![0.1; 3]), 1),
        Err(WatermarkError::SignalTooShort { len: 3, required: 4 })
    ));
}

#[test]
fn empty_payload_leaves_signal_intact() {
    let wm = Watermarker::default();
    let input = audio(512, 2);
    let marked = wm.embed(&input, "").unwrap();
    assert_eq!(marked.bits_embedded, 0);
    for (a, b) in input.samples().iter().zip(marked.buffer.samples()) {
        assert!((a - b).abs() < 1e-9);
    }
    assert_eq!(wm.extract(&marked.buffer, 0).unwrap(), DecodedText::Clean(String::new()));
}

#[test]
fn strict_decode_rejects_invalid_utf8() {
    let wm = Watermarker::new(Transform::Cosine, Policy::sign_force(0.01).unwrap());
    let input = audio(1024, 4);
    let marked = wm.embed_bits(input.samples(), &payload::bytes_to_bits(&[0xC3, 0x28])).unwrap().0;
    let bits = wm.detect_bits(&marked, 16).unwrap();
    assert_eq!(payload::decode_strict(&bits), Err(WatermarkError::InvalidEncoding));
    assert_eq!(payload::decode(&bits), DecodedText::Raw("1100001100101000".into()));
}

#[test]
fn config_driven_roundtrip() {
    init_logger();
    let config = WatermarkConfig::from_json(
        r#"{ "transform": "wavelet", "embed_policy": "sign_force", "wavelet_levels": 3 }"#,
    )
    .unwrap();
    let input = audio(8000, 12);
    let marked = embed_watermark(&input, "cfg", &config).unwrap();
    assert_eq!(extract_watermark(&marked.buffer, 3, &config).unwrap().text(), "cfg");
    assert_eq!(capacity(8000, &config).unwrap(), 62);
}

#[test]
fn bad_config_rejected() {
    let config = WatermarkConfig { transform: "fourier".into(), ..WatermarkConfig::default() };
    assert!(matches!(
        embed_watermark(&audio(64, 0), "x", &config),
        Err(WatermarkError::UnsupportedConfiguration(_))
    ));
    let config = WatermarkConfig { alpha: 2.0, ..WatermarkConfig::default() };
    assert!(matches!(
        extract_watermark(&audio(64, 0), 1, &config),
        Err(WatermarkError::UnsupportedConfiguration(_))
    ));
}
