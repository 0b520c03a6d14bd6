//! Navigation state machine
//!
//! `Carousel` owns everything that changes while the widget runs: the logical
//! index, the track offset, the in-flight transition and the auto-advance
//! timer. Every mutation goes through the intent methods, `tick()`,
//! `poll_autoplay()` or `set_visibility()`; each runs to completion and
//! never blocks.
//!
//! The logical index is committed to its wrapped value as soon as a
//! transition is accepted, while the offset is still easing toward the
//! duplicate panel. Readers during a wrap-around therefore already see the
//! destination slide.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::animation::{TickOutcome, Transition};
use crate::autoplay::{AutoAdvance, TimerHandle};
use crate::clock::{Clock, SystemClock};
use crate::config::{CarouselConfig, EasingType};
use crate::slides::{offset_for, SlideSet};
use crate::visibility::VisibilityState;
use crate::Result;

/// Navigation request from the host or the auto-advance timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Next,
    Previous,
    GoTo(usize),
}

/// What happened to an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// A transition toward this raw track position started
    Started { target: i64 },
    /// Dropped because a transition is in flight
    Busy,
    /// Dropped because it names the current slide
    Unchanged,
    /// Dropped because the slide does not exist
    OutOfRange,
}

impl NavOutcome {
    #[inline]
    pub fn is_started(&self) -> bool {
        matches!(self, NavOutcome::Started { .. })
    }
}

/// Everything a host needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselView {
    /// Track offset in slide widths
    pub offset: f64,
    /// Logical slide index
    pub index: usize,
    pub len: usize,
    pub animating: bool,
    pub autoplay_live: bool,
    pub visibility: VisibilityState,
    pub hide_arrows: bool,
    pub hide_dots: bool,
}

#[derive(Debug)]
pub struct Carousel<C: Clock = SystemClock> {
    slides: SlideSet,
    index: usize,
    offset: f64,
    transition: Option<Transition>,
    autoplay: AutoAdvance,
    autoplay_enabled: bool,
    visibility: VisibilityState,
    duration: u32,
    easing: EasingType,
    hide_arrows: bool,
    hide_dots: bool,
    clock: C,
}

impl Carousel<SystemClock> {
    /// Create a carousel driven by the system clock
    pub fn new(config: &CarouselConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Carousel<C> {
    /// Create a carousel resting on slide 0 with the timer running
    pub fn with_clock(config: &CarouselConfig, clock: C) -> Result<Self> {
        config.validate()?;
        let slides = SlideSet::new(config.images.iter().cloned())?;

        let mut carousel = Self {
            slides,
            index: 0,
            offset: offset_for(0),
            transition: None,
            autoplay: AutoAdvance::new(config.interval()),
            autoplay_enabled: config.autoplay,
            visibility: VisibilityState::Visible,
            duration: config.duration,
            easing: config.easing,
            hide_arrows: config.hide_arrows,
            hide_dots: config.hide_dots,
            clock,
        };
        carousel.resume_autoplay();

        debug!(
            "Carousel created: {} slides, interval={:?}, duration={} frames",
            carousel.slides.len(),
            carousel.autoplay.interval(),
            carousel.duration
        );
        Ok(carousel)
    }

    #[inline]
    pub fn slides(&self) -> &SlideSet {
        &self.slides
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether the carousel has no slides
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Logical slide index, already updated while a transition runs
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Track offset in slide widths
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    #[inline]
    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    #[inline]
    pub fn autoplay_handle(&self) -> Option<TimerHandle> {
        self.autoplay.handle()
    }

    /// When the auto-advance timer fires next, if it is live
    #[inline]
    pub fn autoplay_deadline(&self) -> Option<Instant> {
        self.autoplay.deadline()
    }

    #[inline]
    pub fn visibility(&self) -> VisibilityState {
        self.visibility
    }

    pub fn view(&self) -> CarouselView {
        CarouselView {
            offset: self.offset,
            index: self.index,
            len: self.slides.len(),
            animating: self.is_animating(),
            autoplay_live: self.autoplay.is_live(),
            visibility: self.visibility,
            hide_arrows: self.hide_arrows,
            hide_dots: self.hide_dots,
        }
    }

    pub fn apply(&mut self, intent: Intent) -> NavOutcome {
        match intent {
            Intent::Next => self.next(),
            Intent::Previous => self.previous(),
            Intent::GoTo(n) => self.go_to(n),
        }
    }

    /// Move one slide forward, through the appended copy of slide 0 at the end
    pub fn next(&mut self) -> NavOutcome {
        if self.is_animating() {
            debug!("Dropping next: transition in flight");
            return NavOutcome::Busy;
        }
        self.begin(self.index as i64 + 1)
    }

    /// Move one slide back, through the prepended copy of the last slide at the start
    pub fn previous(&mut self) -> NavOutcome {
        if self.is_animating() {
            debug!("Dropping previous: transition in flight");
            return NavOutcome::Busy;
        }
        self.begin(self.index as i64 - 1)
    }

    /// Jump straight to slide `n`
    pub fn go_to(&mut self, n: usize) -> NavOutcome {
        if self.is_animating() {
            debug!("Dropping go_to({}): transition in flight", n);
            return NavOutcome::Busy;
        }
        if !self.slides.contains(n) {
            warn!("Ignoring go_to({}): only {} slides", n, self.slides.len());
            return NavOutcome::OutOfRange;
        }
        if n == self.index {
            return NavOutcome::Unchanged;
        }
        self.begin(n as i64)
    }

    /// Accept a transition toward raw track position `target` (`-1..=len`)
    fn begin(&mut self, target: i64) -> NavOutcome {
        self.autoplay.stop();

        let transition = Transition::new(
            self.offset,
            target,
            self.slides.len(),
            self.duration,
            self.easing,
        );
        self.index = transition.target_index();

        debug!(
            "Transition started: target={} index={} offset {} -> {}",
            target,
            self.index,
            transition.from(),
            transition.to()
        );
        self.transition = Some(transition);

        NavOutcome::Started { target }
    }

    /// Advance the running transition by one frame
    ///
    /// Returns `None` when idle. On completion the transition is cleared and
    /// the timer resumes.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        let transition = self.transition.as_mut()?;
        let outcome = transition.tick();
        self.offset = outcome.offset();

        if outcome.is_completed() {
            let snapped = transition.crosses_boundary();
            self.transition = None;
            debug!(
                "Transition settled on slide {} (offset {}{})",
                self.index,
                self.offset,
                if snapped { ", snapped" } else { "" }
            );
            self.resume_autoplay();
        }

        Some(outcome)
    }

    /// Fire `next()` if the auto-advance deadline has passed
    pub fn poll_autoplay(&mut self) -> Option<NavOutcome> {
        let now = self.clock.now();
        if !self.autoplay.poll(now) {
            return None;
        }
        debug!("Auto-advance fired on slide {}", self.index);
        Some(self.next())
    }

    /// React to the host moving to the foreground or background
    pub fn set_visibility(&mut self, state: VisibilityState) {
        if state != self.visibility {
            info!("Carousel became {}", state);
        }
        self.visibility = state;
        self.autoplay.stop();

        if state.is_visible() && !self.is_animating() {
            self.resume_autoplay();
        }
    }

    /// Start a fresh timer if visible, idle and enabled
    fn resume_autoplay(&mut self) {
        if self.autoplay_enabled && self.visibility.is_visible() && !self.is_animating() {
            let now = self.clock.now();
            self.autoplay.start(now);
        }
    }
}
