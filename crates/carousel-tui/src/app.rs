use anyhow::Result;
use carousel_core::{CarouselEvent, CarouselHandle, CarouselView, Intent, SlideSet, VisibilityState};
use ratatui::layout::{Position, Rect};

use crate::input::Action;
use crate::theme::Theme;

/// Clickable areas recorded by the last render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitRegions {
    pub previous: Option<Rect>,
    pub next: Option<Rect>,
    pub dots: Vec<Rect>,
}

impl HitRegions {
    /// Intent for a click at (`column`, `row`), if it lands on a control
    pub fn intent_at(&self, column: u16, row: u16) -> Option<Intent> {
        let pos = Position::new(column, row);
        if self.previous.is_some_and(|r| r.contains(pos)) {
            return Some(Intent::Previous);
        }
        if self.next.is_some_and(|r| r.contains(pos)) {
            return Some(Intent::Next);
        }
        self.dots
            .iter()
            .position(|r| r.contains(pos))
            .map(Intent::GoTo)
    }
}

/// Terminal host state: the latest carousel frame plus host-only flags
pub struct App {
    pub slides: SlideSet,
    pub view: CarouselView,
    pub theme: Theme,
    pub hit_regions: HitRegions,
    pub should_quit: bool,
    /// Paused by the user with `p`
    pub paused: bool,
    /// Terminal has focus
    pub focused: bool,
    pub status_message: Option<String>,
    handle: CarouselHandle,
}

impl App {
    pub fn new(slides: SlideSet, view: CarouselView, handle: CarouselHandle, theme: Theme) -> Self {
        Self {
            slides,
            view,
            theme,
            hit_regions: HitRegions::default(),
            should_quit: false,
            paused: false,
            focused: true,
            status_message: None,
            handle,
        }
    }

    /// Image reference of the current logical slide
    pub fn current_slide(&self) -> Option<&str> {
        self.slides.get(self.view.index)
    }

    /// Visibility reported to the carousel: hidden if unfocused or paused
    pub fn visibility(&self) -> VisibilityState {
        VisibilityState::from_visible(self.focused && !self.paused)
    }

    pub fn apply_event(&mut self, event: CarouselEvent) {
        match event {
            CarouselEvent::Frame(view) => self.view = view,
            CarouselEvent::Settled { index } => {
                tracing::trace!("Settled on slide {}", index);
            }
        }
    }

    pub fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Next => self.handle.next()?,
            Action::Previous => self.handle.previous()?,
            Action::GoTo(n) => {
                if self.slides.contains(n) {
                    self.handle.go_to(n)?;
                } else {
                    self.status_message = Some(format!(" No slide {}", n + 1));
                }
            }
            Action::TogglePause => {
                self.paused = !self.paused;
                self.status_message = None;
                self.handle.set_visibility(self.visibility())?;
            }
            Action::Click(column, row) => {
                if let Some(intent) = self.hit_regions.intent_at(column, row) {
                    self.handle.send(intent)?;
                }
            }
            Action::None => {}
        }
        Ok(())
    }

    pub fn set_focus(&mut self, focused: bool) -> Result<()> {
        self.focused = focused;
        self.handle.set_visibility(self.visibility())?;
        Ok(())
    }

    pub fn shutdown(&self) {
        self.handle.shutdown();
    }
}

#[cfg(test)]
pub(crate) fn test_app(slides: &[&str]) -> App {
    let config = carousel_core::CarouselConfig {
        images: slides.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    };
    let (service, handle, _events) =
        carousel_core::CarouselService::new(&config).expect("valid test config");
    let slides = service.slides().clone();
    drop(service);

    let view = CarouselView {
        offset: -1.0,
        index: 0,
        len: slides.len(),
        animating: false,
        autoplay_live: true,
        visibility: VisibilityState::Visible,
        hide_arrows: false,
        hide_dots: false,
    };
    App::new(slides, view, handle, Theme::default())
}
