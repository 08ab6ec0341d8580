// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Progress counting and cooperative cancellation for multi-unit work.
//!
//! A unit is one segment or one buffer; a single transform is never
//! interrupted. Uses atomics so one handle can be shared by rayon workers and
//! polled from another thread.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use super::error::WatermarkError;

/// Shared progress/cancellation handle.
#[derive(Debug, Default)]
pub struct Progress {
    step: AtomicU32,
    total: AtomicU32,
    cancelled: AtomicBool,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the step counter and set the total unit count.
    ///
    /// Does not clear a pending cancellation: a run cancelled before it
    /// started must not silently proceed.
    pub fn init(&self, total: u32) {
        self.step.store(0, Ordering::Relaxed);
        self.total.store(total, Ordering::Relaxed);
    }

    /// Mark one unit finished. Capped at total.
    pub fn advance(&self) {
        let total = self.total.load(Ordering::Relaxed);
        let _ = self.step.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |s| {
            if total == 0 || s < total { Some(s + 1) } else { None }
        });
    }

    /// Current (step, total).
    pub fn get(&self) -> (u32, u32) {
        (self.step.load(Ordering::Relaxed), self.total.load(Ordering::Relaxed))
    }

    /// Mark the run complete (step = total).
    pub fn finish(&self) {
        let t = self.total.load(Ordering::Relaxed);
        self.step.store(t, Ordering::Relaxed);
    }

    /// Stop launching new units. Units already running complete normally.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Clear the cancellation flag so the handle can be reused.
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::Relaxed);
        self.init(0);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// `Err(Cancelled)` once [`cancel`](Self::cancel) was called.
    pub fn check_cancelled(&self) -> Result<(), WatermarkError> {
        if self.is_cancelled() {
            Err(WatermarkError::Cancelled)
        } else {
            Ok(())
        }
    }
}
