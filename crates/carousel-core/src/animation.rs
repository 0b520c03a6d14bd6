//! Slide transition runner
//!
//! A `Transition` eases the track offset from its current value toward a
//! target track position, one fixed tick at a time. It knows nothing about
//! timers; whoever owns it calls `tick()` at the frame rate.

use crate::easing::EasingType;
use crate::slides::{offset_for, wrap_index};
use crate::timing::{lerp, tick_progress};

/// Result of advancing a transition by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Still moving; offset after this tick
    Running { offset: f64 },
    /// Finished this tick; final (post-snap) offset
    Completed { offset: f64 },
}

impl TickOutcome {
    #[inline]
    pub fn offset(&self) -> f64 {
        match *self {
            TickOutcome::Running { offset } | TickOutcome::Completed { offset } => offset,
        }
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        matches!(self, TickOutcome::Completed { .. })
    }
}

/// An in-flight eased move along the extended track
#[derive(Debug, Clone)]
pub struct Transition {
    from: f64,
    to: f64,
    /// Raw track position being approached (`-1..=len`)
    target: i64,
    len: usize,
    duration: u32,
    elapsed_ticks: u32,
    easing: EasingType,
    offset: f64,
}

impl Transition {
    /// Start a move from `from` toward track position `target`
    ///
    /// `target` may be `-1` or `len`, the duplicate panels at either end.
    pub fn new(from: f64, target: i64, len: usize, duration: u32, easing: EasingType) -> Self {
        Self {
            from,
            to: offset_for(target),
            target,
            len,
            duration,
            elapsed_ticks: 0,
            easing,
            offset: from,
        }
    }

    #[inline]
    pub fn from(&self) -> f64 {
        self.from
    }

    #[inline]
    pub fn to(&self) -> f64 {
        self.to
    }

    /// Raw track position, possibly a duplicate panel
    #[inline]
    pub fn target(&self) -> i64 {
        self.target
    }

    /// Logical slide the transition settles on
    #[inline]
    pub fn target_index(&self) -> usize {
        wrap_index(self.target, self.len)
    }

    #[inline]
    pub fn elapsed_ticks(&self) -> u32 {
        self.elapsed_ticks
    }

    #[inline]
    pub fn duration(&self) -> u32 {
        self.duration
    }

    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Whether the transition ends on a duplicate panel and needs a snap
    #[inline]
    pub fn crosses_boundary(&self) -> bool {
        self.target < 0 || self.target >= self.len as i64
    }

    /// Offset the track rests at once the transition completes
    pub fn settle_offset(&self) -> f64 {
        if self.crosses_boundary() {
            offset_for(self.target_index() as i64)
        } else {
            self.to
        }
    }

    /// Advance by one tick
    pub fn tick(&mut self) -> TickOutcome {
        self.elapsed_ticks = self.elapsed_ticks.saturating_add(1);

        if self.elapsed_ticks >= self.duration {
            self.offset = self.settle_offset();
            return TickOutcome::Completed { offset: self.offset };
        }

        let u = tick_progress(self.elapsed_ticks, self.duration);
        self.offset = lerp(self.from, self.to, self.easing.apply(u));
        TickOutcome::Running { offset: self.offset }
    }
}
