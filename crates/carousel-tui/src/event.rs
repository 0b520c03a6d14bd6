use std::time::Duration;

use anyhow::Result;
use carousel_core::VisibilityAdapter;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    animation_tick: Duration,
}

impl EventHandler {
    /// Poll faster while a transition is on screen
    pub fn with_animation_fps(tick_rate_ms: u64, fps: u32) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            animation_tick: carousel_core::timing::frame_interval(fps),
        }
    }

    /// Poll for the next event
    pub fn next(&self, animating: bool) -> Result<Option<AppEvent>> {
        let timeout = if animating {
            self.animation_tick
        } else {
            self.tick_rate
        };

        if event::poll(timeout)? {
            let event = event::read()?;
            if let Some(visible) = TerminalFocus.is_visible(&event) {
                return Ok(Some(AppEvent::Focus(visible)));
            }
            match event {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Mouse(mouse) => Ok(Some(AppEvent::Mouse(mouse))),
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Terminal focus stands in for page visibility
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalFocus;

impl VisibilityAdapter for TerminalFocus {
    type Signal = Event;

    fn is_visible(&self, signal: &Event) -> Option<bool> {
        match signal {
            Event::FocusGained => Some(true),
            Event::FocusLost => Some(false),
            _ => None,
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Mouse click or scroll
    Mouse(MouseEvent),
    /// Terminal gained (true) or lost (false) focus
    Focus(bool),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}

#[cfg(test)]
mod tests {
    use super::*;
    use carousel_core::VisibilityState;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_focus_maps_to_visibility() {
        let adapter = TerminalFocus;
        assert_eq!(adapter.state(&Event::FocusLost), Some(VisibilityState::Hidden));
        assert_eq!(adapter.state(&Event::FocusGained), Some(VisibilityState::Visible));
        let key = Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert_eq!(adapter.state(&key), None);
    }
}
