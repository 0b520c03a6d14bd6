//! Auto-advance timer
//!
//! A recurring deadline rather than a background task: the owner polls it
//! with the current time and it reports whether it fired. At most one handle
//! is ever live; `start` always drops the previous one.

use std::time::{Duration, Instant};

use tracing::trace;

/// Identity and deadline of the live timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    id: u64,
    deadline: Instant,
}

impl TimerHandle {
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

#[derive(Debug, Clone)]
pub struct AutoAdvance {
    interval: Duration,
    handle: Option<TimerHandle>,
    next_id: u64,
}

impl AutoAdvance {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            handle: None,
            next_id: 1,
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[inline]
    pub fn handle(&self) -> Option<TimerHandle> {
        self.handle
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.handle.is_some()
    }

    /// Next firing time, if a timer is live
    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.handle.map(|h| h.deadline)
    }

    /// Start a fresh interval from `now`, replacing any live timer
    pub fn start(&mut self, now: Instant) -> TimerHandle {
        self.stop();
        let handle = TimerHandle {
            id: self.next_id,
            deadline: now + self.interval,
        };
        self.next_id += 1;
        self.handle = Some(handle);
        trace!("Auto-advance timer {} started", handle.id);
        handle
    }

    /// Dispose of the live timer; a no-op when none is live
    pub fn stop(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                trace!("Auto-advance timer {} stopped", handle.id);
                true
            }
            None => false,
        }
    }

    /// Fire if the deadline has passed
    ///
    /// A missed deadline fires once and re-arms a full interval from `now`,
    /// so a stalled host never sees a burst of queued advances.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.handle.as_mut() {
            Some(handle) if now >= handle.deadline => {
                handle.deadline = now + self.interval;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_interval() {
        let mut timer = AutoAdvance::new(Duration::from_secs(5));
        let start = Instant::now();
        timer.start(start);

        assert!(!timer.poll(start + Duration::from_millis(4999)));
        assert!(timer.poll(start + Duration::from_secs(5)));
        assert_eq!(timer.deadline(), Some(start + Duration::from_secs(10)));
    }

    #[test]
    fn test_missed_deadlines_fire_once() {
        let mut timer = AutoAdvance::new(Duration::from_secs(1));
        let start = Instant::now();
        timer.start(start);

        let late = start + Duration::from_secs(10);
        assert!(timer.poll(late));
        assert!(!timer.poll(late));
        assert_eq!(timer.deadline(), Some(late + Duration::from_secs(1)));
    }

    #[test]
    fn test_start_replaces_previous_handle() {
        let mut timer = AutoAdvance::new(Duration::from_secs(1));
        let start = Instant::now();
        let first = timer.start(start);
        let second = timer.start(start + Duration::from_millis(300));

        assert_ne!(first.id(), second.id());
        assert_eq!(timer.handle(), Some(second));
        assert_eq!(timer.deadline(), Some(start + Duration::from_millis(1300)));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut timer = AutoAdvance::new(Duration::from_secs(1));
        assert!(!timer.stop());
        timer.start(Instant::now());
        assert!(timer.stop());
        assert!(!timer.stop());
        assert!(!timer.is_live());
        assert!(!timer.poll(Instant::now() + Duration::from_secs(60)));
    }
}
