use std::io;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::mpsc;

use carousel_core::{AppConfig, CarouselConfig, CarouselEvent, CarouselService};
use carousel_tui::{
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event},
    widgets::{CarouselWidget, StatusBarWidget},
    App, Theme,
};

use crate::RunArgs;

/// Merge command-line overrides into the configured carousel
fn carousel_config(config: &AppConfig, args: RunArgs) -> CarouselConfig {
    let mut carousel = config.carousel.clone();
    if !args.images.is_empty() {
        carousel.images = args.images;
    }
    if let Some(interval_ms) = args.interval_ms {
        carousel.interval_ms = interval_ms;
    }
    if let Some(duration) = args.duration {
        carousel.duration = duration;
    }
    carousel.hide_arrows |= args.hide_arrows;
    carousel.hide_dots |= args.hide_dots;
    if args.no_autoplay {
        carousel.autoplay = false;
    }
    carousel
}

pub async fn run(config: AppConfig, args: RunArgs) -> Result<()> {
    let carousel = carousel_config(&config, args);
    carousel
        .validate()
        .context("no usable carousel configuration (pass image references or set [carousel] images)")?;

    let (service, handle, mut events) = CarouselService::new(&carousel)?;
    let slides = service.slides().clone();

    let service_task = tokio::spawn(service.run());

    let initial = match events.recv().await {
        Some(CarouselEvent::Frame(view)) => view,
        _ => anyhow::bail!("carousel service stopped before its first frame"),
    };
    let mut app = App::new(slides, initial, handle, Theme::default());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        SetTitle("Carousel")
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler = EventHandler::with_animation_fps(config.ui.tick_rate_ms, carousel.animation_fps);

    let result = main_loop(&mut terminal, &mut app, &mut events, &event_handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    app.shutdown();
    service_task.await?;

    result
}

fn main_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &mut mpsc::UnboundedReceiver<CarouselEvent>,
    event_handler: &EventHandler,
) -> Result<()> {
    loop {
        // Take every frame the service produced since the last draw
        while let Ok(event) = events.try_recv() {
            app.apply_event(event);
        }

        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(frame.area());

            let regions = CarouselWidget::render(frame, layout[0], app);
            app.hit_regions = regions;
            StatusBarWidget::render(frame, layout[1], app);
        })?;

        match event_handler.next(app.view.animating)? {
            Some(AppEvent::Key(key)) => {
                let action = handle_key_event(key, app);
                app.status_message = None;
                app.handle_action(action)?;
            }
            Some(AppEvent::Mouse(mouse)) => {
                let action = handle_mouse_event(mouse);
                app.handle_action(action)?;
            }
            Some(AppEvent::Focus(focused)) => {
                tracing::info!("Terminal focus {}", if focused { "gained" } else { "lost" });
                app.set_focus(focused)?;
            }
            Some(AppEvent::Resize(_, _)) | Some(AppEvent::Tick) | None => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let mut config = AppConfig::default();
        config.carousel.images = vec!["from-file.png".to_string()];
        config.carousel.interval_ms = 3000;

        let args = RunArgs {
            images: vec!["a.png".to_string(), "b.png".to_string()],
            duration: Some(30),
            hide_dots: true,
            no_autoplay: true,
            ..Default::default()
        };
        let merged = carousel_config(&config, args);

        assert_eq!(merged.images, vec!["a.png", "b.png"]);
        assert_eq!(merged.interval_ms, 3000);
        assert_eq!(merged.duration, 30);
        assert!(merged.hide_dots);
        assert!(!merged.hide_arrows);
        assert!(!merged.autoplay);
    }

    #[test]
    fn test_file_images_used_without_arguments() {
        let mut config = AppConfig::default();
        config.carousel.images = vec!["from-file.png".to_string()];
        let merged = carousel_config(&config, RunArgs::default());
        assert_eq!(merged.images, vec!["from-file.png"]);
        assert!(merged.autoplay);
    }
}
