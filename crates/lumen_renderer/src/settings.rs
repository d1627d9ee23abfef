//! Sampling and scheduling options for a render.

use serde::{Deserialize, Serialize};

/// Cores left free when the thread count is picked automatically.
const SPARE_THREADS: usize = 2;

/// How pixels are distributed over threads.
///
/// Every strategy produces the same image; only throughput differs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parallelism {
    /// Row-major loop on the calling thread
    #[default]
    Sequential,
    /// rayon parallel iterator over pixel indices
    DataParallel,
    /// Fixed pool of worker threads pulling pixels from a shared cursor
    Threads(usize),
    /// Worker pool sized to the available cores minus a spare pair
    Auto,
}

/// Worker count picked for [`Parallelism::Auto`] on this machine.
pub(crate) fn auto_threads() -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    auto_thread_count(cores)
}

fn auto_thread_count(cores: usize) -> usize {
    let usable = cores.saturating_sub(SPARE_THREADS);
    if usable <= 2 {
        1
    } else {
        usable
    }
}

/// Per-render sampling and scheduling configuration.
///
/// Sampling modes are exclusive: `adaptive_depth > 0` wins over
/// `anti_aliasing`, which wins over a single centered ray.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Average a regular sub-pixel grid of `samples_per_pixel` rays
    pub anti_aliasing: bool,

    /// Grid sample count, must be a perfect square
    pub samples_per_pixel: u32,

    /// Adaptive supersampling recursion depth (0 disables)
    pub adaptive_depth: u32,

    /// Scheduling strategy
    pub parallelism: Parallelism,

    /// Log progress every time this many percent complete (0 disables)
    pub print_interval: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            anti_aliasing: false,
            samples_per_pixel: 81,
            adaptive_depth: 0,
            parallelism: Parallelism::Sequential,
            print_interval: 0.0,
        }
    }
}
