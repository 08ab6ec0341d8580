// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Watermarking one channel of interleaved 8-bit pixel data.

use mediaseal_core::signal::pixels;
use mediaseal_core::{Policy, Transform, Watermarker};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn rgb_image(width: usize, height: usize, seed: u64) -> Vec<u8> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    (0..width * height * 3).map(|_| rng.gen_range(64..192)).collect()
}

#[test]
fn blue_channel_survives_quantization() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut image = rgb_image(32, 32, 1);
    let original = image.clone();

    // Large enough to survive rounding back to 8 bits.
    let wm = Watermarker::new(Transform::Cosine, Policy::sign_force(20.0).unwrap());
    let blue = pixels::channel_samples(&image, 3, 2).unwrap();
    assert_eq!(blue.len(), 1024);

    let marked = wm.embed(&blue, "px").unwrap();
    pixels::write_channel(&marked.buffer, &mut image, 3, 2).unwrap();

    for (a, b) in original.chunks_exact(3).zip(image.chunks_exact(3)) {
        assert_eq!(a[..2], b[..2], "red and green must not change");
    }

    let reread = pixels::channel_samples(&image, 3, 2).unwrap();
    assert_eq!(wm.extract(&reread, 2).unwrap().text(), "px");
}

#[test]
fn mismatched_layout_rejected() {
    let image = rgb_image(4, 4, 3);
    assert!(pixels::channel_samples(&image, 3, 3).is_err());
    assert!(pixels::channel_samples(&image[..47], 3, 0).is_err());

    let mut target = image.clone();
    let short = pixels::channel_samples(&image[..24], 3, 0).unwrap();
    assert!(pixels::write_channel(&short, &mut target, 3, 0).is_err());
    assert_eq!(target, image);
}
