//! Engine-agnostic metrics collection for shell statistics.
//!
//! Feature-gated and runtime-toggled to ensure zero overhead when disabled.
//!
//! # Usage
//!
//! ```ignore
//! use voxel_shatter::metrics::{self, ShellMetrics};
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! metrics::set_enabled(false);
//!
//! // Read what a shell recorded:
//! let avg = shell.metrics().avg_build_timing_us();
//! ```

use std::collections::VecDeque;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;
use std::sync::atomic::AtomicBool;

use crate::mutation::ImpactOutcome;

/// Runtime toggle for metrics collection.
/// Set to false to disable metrics gathering at runtime.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
    #[cfg(feature = "metrics")]
    {
        COLLECT_METRICS.load(Ordering::Relaxed)
    }
    #[cfg(not(feature = "metrics"))]
    {
        false
    }
}

/// Flip the runtime toggle. Has no effect without the `metrics` feature.
pub fn set_enabled(enabled: bool) {
    #[cfg(feature = "metrics")]
    COLLECT_METRICS.store(enabled, Ordering::Relaxed);
    #[cfg(not(feature = "metrics"))]
    let _ = enabled;
}

/// Rolling window for storing recent values (e.g., timing history).
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    buffer: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingWindow<T> {
    /// Create a new rolling window with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new value, evicting the oldest if at capacity.
    pub fn push(&mut self, value: T) {
        if self.buffer.len() >= self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(value);
    }

    /// Get the number of values in the window.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the window is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Clear all values.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Iterate over values (oldest to newest).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buffer.iter()
    }

    /// Get the most recent value.
    pub fn last(&self) -> Option<&T> {
        self.buffer.back()
    }
}

impl<T: Copy + Default + std::ops::Add<Output = T>> RollingWindow<T> {
    /// Compute the sum of all values.
    pub fn sum(&self) -> T {
        self.buffer.iter().copied().fold(T::default(), |acc, x| acc + x)
    }
}

impl RollingWindow<u64> {
    /// Compute the average of all values.
    pub fn average(&self) -> f64 {
        if self.buffer.is_empty() {
            0.0
        } else {
            self.sum() as f64 / self.buffer.len() as f64
        }
    }

    /// Get min and max values.
    pub fn min_max(&self) -> Option<(u64, u64)> {
        let min = *self.buffer.iter().min()?;
        let max = *self.buffer.iter().max()?;
        Some((min, max))
    }
}

impl Default for RollingWindow<u64> {
    fn default() -> Self {
        Self::new(128)
    }
}

/// Per-shell statistics, updated on every rebuild and impact.
#[derive(Debug, Clone)]
pub struct ShellMetrics {
    // Timing
    /// Rolling window of mesh rebuild times in microseconds.
    pub build_timings: RollingWindow<u64>,
    /// Last rebuild time in microseconds.
    pub last_build_us: u64,
    /// Rebuilds since the shell was created.
    pub total_builds: u64,

    // Impacts
    pub removed: u64,
    pub added: u64,
    pub displaced: u64,
    /// Impacts that found no node to act on.
    pub missed: u64,

    // Mesh snapshot
    pub vertex_count: u32,
    pub triangle_count: u32,
}

impl Default for ShellMetrics {
    fn default() -> Self {
        Self {
            build_timings: RollingWindow::new(128),
            last_build_us: 0,
            total_builds: 0,
            removed: 0,
            added: 0,
            displaced: 0,
            missed: 0,
            vertex_count: 0,
            triangle_count: 0,
        }
    }
}

impl ShellMetrics {
    /// Create new metrics with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all metrics to zero.
    pub fn reset(&mut self) {
        self.build_timings.clear();
        self.last_build_us = 0;
        self.removed = 0;
        self.added = 0;
        self.displaced = 0;
        self.missed = 0;
        self.vertex_count = 0;
        self.triangle_count = 0;
        // Don't reset total_builds - it's cumulative
    }

    /// Record a mesh rebuild and the size of its result.
    pub fn record_build(&mut self, timing_us: u64, vertex_count: usize, triangle_count: usize) {
        if !is_enabled() {
            return;
        }

        self.build_timings.push(timing_us);
        self.last_build_us = timing_us;
        self.total_builds += 1;
        self.vertex_count = vertex_count as u32;
        self.triangle_count = triangle_count as u32;
    }

    /// Count an impact by what it did.
    pub fn record_impact(&mut self, outcome: &ImpactOutcome) {
        if !is_enabled() {
            return;
        }

        match outcome {
            ImpactOutcome::Removed { .. } => self.removed += 1,
            ImpactOutcome::Added { .. } => self.added += 1,
            ImpactOutcome::Displaced { .. } => self.displaced += 1,
            ImpactOutcome::NoCandidate => self.missed += 1,
        }
    }

    /// Total impacts recorded, misses included.
    pub fn total_impacts(&self) -> u64 {
        self.removed + self.added + self.displaced + self.missed
    }

    /// Get average rebuild timing in microseconds.
    pub fn avg_build_timing_us(&self) -> f64 {
        self.build_timings.average()
    }

    /// Approximate mesh memory: 24 bytes per vertex, 12 bytes per triangle.
    pub fn mesh_memory_bytes(&self) -> u64 {
        self.vertex_count as u64 * 24 + self.triangle_count as u64 * 12
    }
}
