//! Host foreground/background signal
//!
//! Hosts name this differently (terminal focus, window minimize, browser
//! page visibility with or without vendor prefixes). Each host implements
//! `VisibilityAdapter` once and the carousel only ever sees `VisibilityState`.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityState {
    #[default]
    Visible,
    Hidden,
}

impl VisibilityState {
    #[inline]
    pub fn from_visible(visible: bool) -> Self {
        if visible {
            VisibilityState::Visible
        } else {
            VisibilityState::Hidden
        }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        matches!(self, VisibilityState::Visible)
    }
}

impl fmt::Display for VisibilityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisibilityState::Visible => write!(f, "visible"),
            VisibilityState::Hidden => write!(f, "hidden"),
        }
    }
}

/// Normalizes a host-specific notification into a visibility state
pub trait VisibilityAdapter {
    type Signal;

    /// `Some(true)` for foreground, `Some(false)` for background, `None` if
    /// the signal says nothing about visibility
    fn is_visible(&self, signal: &Self::Signal) -> Option<bool>;

    fn state(&self, signal: &Self::Signal) -> Option<VisibilityState> {
        self.is_visible(signal).map(VisibilityState::from_visible)
    }
}
