use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use carousel_core::SlideSet;

use crate::app::{App, HitRegions};
use crate::theme::Theme;

const ARROW_WIDTH: u16 = 3;
const ARROW_HEIGHT: u16 = 3;

/// A panel of the extended track and where its left edge lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSpan<'a> {
    /// Track position, `-1` and `len` being the duplicates
    pub position: i64,
    /// Image reference shown by the panel
    pub image: &'a str,
    /// Left edge in columns relative to the viewport (may be negative)
    pub left: i32,
}

/// Panels of the extended track that overlap a `width`-column viewport
pub fn visible_panels(offset: f64, slides: &SlideSet, width: u16) -> Vec<PanelSpan<'_>> {
    let width_f = width as f64;
    slides
        .positions()
        .filter_map(|position| {
            // Position p starts at column (p + 1 + offset) * width
            let left = ((position as f64 + 1.0 + offset) * width_f).round() as i32;
            let right = left + width as i32;
            if right <= 0 || left >= width as i32 {
                return None;
            }
            Some(PanelSpan {
                position,
                image: slides.at_position(position),
                left,
            })
        })
        .collect()
}

pub struct CarouselWidget;

impl CarouselWidget {
    /// Draw the track, arrows and dots; returns the clickable regions
    pub fn render(frame: &mut Frame, area: Rect, app: &App) -> HitRegions {
        Self::render_to_buffer(frame.buffer_mut(), area, app)
    }

    pub fn render_to_buffer(buf: &mut Buffer, area: Rect, app: &App) -> HitRegions {
        let theme = &app.theme;
        let view = &app.view;
        let mut regions = HitRegions::default();

        if area.width == 0 || area.height == 0 {
            return regions;
        }

        for span in visible_panels(view.offset, &app.slides, area.width) {
            Self::render_panel(buf, area, span, app);
        }

        if !view.hide_arrows && area.width >= ARROW_WIDTH * 2 && area.height >= ARROW_HEIGHT {
            let y = area.y + (area.height - ARROW_HEIGHT) / 2;
            let previous = Rect::new(area.x, y, ARROW_WIDTH, ARROW_HEIGHT);
            let next = Rect::new(area.right() - ARROW_WIDTH, y, ARROW_WIDTH, ARROW_HEIGHT);
            Self::render_arrow(buf, previous, '‹', theme);
            Self::render_arrow(buf, next, '›', theme);
            regions.previous = Some(previous);
            regions.next = Some(next);
        }

        if !view.hide_dots && area.height >= 2 {
            regions.dots = Self::render_dots(buf, area, view.index, app.slides.len(), theme);
        }

        regions
    }

    fn render_panel(buf: &mut Buffer, area: Rect, span: PanelSpan, app: &App) {
        let theme = &app.theme;
        let slide = app.slides.wrap(span.position);
        let bg = theme.slide_color(slide);
        let left = area.x as i32 + span.left;
        let start = left.max(area.x as i32) as u16;
        let end = (left + area.width as i32).min(area.right() as i32) as u16;

        let fill = Style::default().bg(bg);
        for y in area.top()..area.bottom() {
            for x in start..end {
                buf[(x, y)].set_symbol(" ").set_style(fill);
            }
        }

        let number = format!("{} / {}", slide + 1, app.slides.len());
        let middle = area.y + area.height / 2;

        let name_style = Style::default()
            .fg(theme.fg0)
            .bg(bg)
            .add_modifier(Modifier::BOLD);
        let number_style = Style::default().fg(theme.grey2).bg(bg);

        Self::put_centered(buf, area, left, middle.saturating_sub(1), span.image, name_style);
        if area.height > 2 {
            Self::put_centered(buf, area, left, middle + 1, &number, number_style);
        }
    }

    /// Write `text` centered within a panel starting at column `left`,
    /// dropping cells outside `area`
    fn put_centered(buf: &mut Buffer, area: Rect, left: i32, y: u16, text: &str, style: Style) {
        if y < area.top() || y >= area.bottom() {
            return;
        }
        let text_width: usize = text.chars().filter_map(|c| c.width()).sum();
        let mut x = left + (area.width as i32 - text_width as i32) / 2;

        for c in text.chars() {
            let w = c.width().unwrap_or(0) as i32;
            if w == 0 {
                continue;
            }
            if x >= area.x as i32 && x + w <= area.right() as i32 {
                buf[(x as u16, y)].set_char(c).set_style(style);
            }
            x += w;
        }
    }

    fn render_arrow(buf: &mut Buffer, rect: Rect, symbol: char, theme: &Theme) {
        let style = Style::default().fg(theme.fg0).bg(theme.bg0);
        for y in rect.top()..rect.bottom() {
            for x in rect.left()..rect.right() {
                buf[(x, y)].set_symbol(" ").set_style(style);
            }
        }
        buf[(rect.x + rect.width / 2, rect.y + rect.height / 2)].set_char(symbol);
    }

    fn render_dots(buf: &mut Buffer, area: Rect, active: usize, len: usize, theme: &Theme) -> Vec<Rect> {
        // One cell per dot plus one cell gap
        let total = (len * 2).saturating_sub(1);
        if total > area.width as usize {
            return Vec::new();
        }
        let y = area.bottom() - 2;
        let start = area.x + (area.width - total as u16) / 2;

        (0..len as u16)
            .map(|i| {
                let rect = Rect::new(start + i * 2, y, 1, 1);
                let (symbol, color) = if i as usize == active {
                    ('●', theme.fg0)
                } else {
                    ('○', theme.grey1)
                };
                buf[(rect.x, rect.y)].set_char(symbol).set_fg(color);
                rect
            })
            .collect()
    }
}
