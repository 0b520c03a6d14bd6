//! Frame timing and interpolation helpers

use std::time::Duration;

/// Fallback frame interval when no frame rate is configured (~60fps)
const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Normalized progress after `elapsed_ticks` of a `duration`-tick animation
///
/// Clamped to [0.0, 1.0]. A zero duration is already complete.
#[inline]
pub fn tick_progress(elapsed_ticks: u32, duration: u32) -> f64 {
    if duration == 0 {
        return 1.0;
    }
    (elapsed_ticks as f64 / duration as f64).clamp(0.0, 1.0)
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Wall-clock length of one frame at `fps`
#[inline]
pub fn frame_interval(fps: u32) -> Duration {
    if fps == 0 {
        DEFAULT_FRAME_INTERVAL
    } else {
        Duration::from_micros(1_000_000 / fps as u64)
    }
}
