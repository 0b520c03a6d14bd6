use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    /// Short label for the playback state
    pub fn state_label(app: &App) -> &'static str {
        if app.paused {
            "PAUSED"
        } else if !app.focused {
            "HIDDEN"
        } else if app.view.animating {
            "MOVING"
        } else if app.view.autoplay_live {
            "PLAYING"
        } else {
            "STOPPED"
        }
    }

    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let status_text = if let Some(msg) = &app.status_message {
            msg.clone()
        } else {
            format!(
                " {} | Slide {}/{} | {}",
                Self::state_label(app),
                app.view.index + 1,
                app.view.len,
                app.current_slide().unwrap_or("")
            )
        };

        let help_hint = " q:quit h/l:prev/next 1-9:jump p/space:pause ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let state_color = if app.paused || !app.focused {
            theme.warning
        } else if app.view.autoplay_live {
            theme.accent
        } else {
            theme.fg0
        };

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(state_color).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
