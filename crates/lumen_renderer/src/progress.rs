//! Shared pixel cursor and completion counter for a render.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Hands out pixel indices to workers and tracks how many are finished.
///
/// Indices run row-major over `width * height`. The manager is shared by
/// reference between workers; both counters are lock-free.
#[derive(Debug)]
pub struct PixelManager {
    width: u32,
    total: usize,
    next: AtomicUsize,
    done: AtomicUsize,
    /// Progress step in percent, 0 disables reporting
    print_interval: f64,
}

impl PixelManager {
    pub fn new(width: u32, height: u32, print_interval: f64) -> Self {
        Self {
            width,
            total: width as usize * height as usize,
            next: AtomicUsize::new(0),
            done: AtomicUsize::new(0),
            print_interval,
        }
    }

    /// Claim the next unprocessed pixel index, `None` once all are taken.
    pub fn next_index(&self) -> Option<usize> {
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        (index < self.total).then_some(index)
    }

    /// Column and row of a pixel index.
    #[inline]
    pub fn position(&self, index: usize) -> (u32, u32) {
        let width = self.width as usize;
        ((index % width) as u32, (index / width) as u32)
    }

    /// Record a finished pixel, logging progress when a step is crossed.
    pub fn pixel_done(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        if self.print_interval <= 0.0 {
            return;
        }

        let step = |count: usize| {
            (count as f64 * 100.0 / self.total as f64 / self.print_interval).floor() as u64
        };
        if step(done) > step(done - 1) {
            log::info!(
                "Rendered {:.1}% ({}/{} pixels)",
                done as f64 * 100.0 / self.total as f64,
                done,
                self.total
            );
        }
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of pixels finished so far.
    pub fn done(&self) -> usize {
        self.done.load(Ordering::Relaxed)
    }
}
