use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{interval_at, sleep_until, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::carousel::{Carousel, CarouselView, Intent, NavOutcome};
use crate::clock::{Clock, TokioClock};
use crate::config::CarouselConfig;
use crate::slides::SlideSet;
use crate::visibility::VisibilityState;
use crate::{Error, Result};

/// Events emitted by the service so the host can redraw
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselEvent {
    /// Offset, index or timer state changed
    Frame(CarouselView),
    /// A transition finished on this slide
    Settled { index: usize },
}

/// Host-side handle: send intents and visibility changes, request shutdown
#[derive(Debug, Clone)]
pub struct CarouselHandle {
    intents: mpsc::UnboundedSender<Intent>,
    visibility: watch::Sender<VisibilityState>,
    shutdown: watch::Sender<bool>,
}

impl CarouselHandle {
    pub fn send(&self, intent: Intent) -> Result<()> {
        self.intents
            .send(intent)
            .map_err(|e| Error::ChannelClosed(format!("intent {:?} not delivered", e.0)))
    }

    pub fn next(&self) -> Result<()> {
        self.send(Intent::Next)
    }

    pub fn previous(&self) -> Result<()> {
        self.send(Intent::Previous)
    }

    pub fn go_to(&self, n: usize) -> Result<()> {
        self.send(Intent::GoTo(n))
    }

    /// Report the host's foreground state; every report restarts the timer
    pub fn set_visibility(&self, state: VisibilityState) -> Result<()> {
        self.visibility
            .send(state)
            .map_err(|_| Error::ChannelClosed("visibility".to_string()))
    }

    pub fn shutdown(&self) {
        // The service may already be gone; nothing to do then
        let _ = self.shutdown.send(true);
    }
}

/// What woke the service loop
enum Wake {
    Shutdown,
    Intent(Intent),
    Visibility(VisibilityState),
    Frame,
    Autoplay,
}

/// Async driver that owns a `Carousel` and schedules its frames and timer
///
/// Runs as a single task: every wake-up is handled to completion before the
/// next one, so the carousel is never touched concurrently.
pub struct CarouselService<C: Clock = TokioClock> {
    carousel: Carousel<C>,
    frame_interval: Duration,
    intents: mpsc::UnboundedReceiver<Intent>,
    visibility: watch::Receiver<VisibilityState>,
    shutdown: watch::Receiver<bool>,
    events: mpsc::UnboundedSender<CarouselEvent>,
}

impl CarouselService<TokioClock> {
    /// Build a service, its handle and the event stream for the host
    pub fn new(
        config: &CarouselConfig,
    ) -> Result<(Self, CarouselHandle, mpsc::UnboundedReceiver<CarouselEvent>)> {
        let carousel = Carousel::with_clock(config, TokioClock)?;
        Ok(Self::with_carousel(carousel, config.frame_interval()))
    }
}

impl<C: Clock> CarouselService<C> {
    pub fn with_carousel(
        carousel: Carousel<C>,
        frame_interval: Duration,
    ) -> (Self, CarouselHandle, mpsc::UnboundedReceiver<CarouselEvent>) {
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let (visibility_tx, visibility_rx) = watch::channel(carousel.visibility());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let service = Self {
            carousel,
            frame_interval,
            intents: intent_rx,
            visibility: visibility_rx,
            shutdown: shutdown_rx,
            events: event_tx,
        };
        let handle = CarouselHandle {
            intents: intent_tx,
            visibility: visibility_tx,
            shutdown: shutdown_tx,
        };
        (service, handle, event_rx)
    }

    /// Slides the carousel cycles through
    pub fn slides(&self) -> &SlideSet {
        self.carousel.slides()
    }

    /// Run until shutdown is requested or every handle is dropped
    pub async fn run(self) {
        let Self {
            mut carousel,
            frame_interval,
            mut intents,
            mut visibility,
            mut shutdown,
            events,
        } = self;

        info!(
            "Carousel service started: {} slides, frame={:?}",
            carousel.len(),
            frame_interval
        );
        publish(&events, CarouselEvent::Frame(carousel.view()));

        let mut frames: Option<Interval> = None;

        loop {
            if carousel.is_animating() {
                if frames.is_none() {
                    let mut ticker = interval_at(Instant::now() + frame_interval, frame_interval);
                    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                    frames = Some(ticker);
                }
            } else {
                frames = None;
            }
            let animating = frames.is_some();
            let deadline = carousel.autoplay_deadline().map(Instant::from_std);

            let wake = tokio::select! {
                result = shutdown.changed() => match result {
                    Ok(()) if !*shutdown.borrow() => continue,
                    _ => Wake::Shutdown,
                },
                intent = intents.recv() => match intent {
                    Some(intent) => Wake::Intent(intent),
                    None => Wake::Shutdown,
                },
                result = visibility.changed() => match result {
                    Ok(()) => Wake::Visibility(*visibility.borrow_and_update()),
                    Err(_) => Wake::Shutdown,
                },
                _ = next_frame(&mut frames), if animating => Wake::Frame,
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    Wake::Autoplay
                }
            };

            match wake {
                Wake::Shutdown => {
                    info!("Carousel service received shutdown signal");
                    break;
                }
                Wake::Intent(intent) => {
                    let outcome = carousel.apply(intent);
                    debug!("Intent {:?}: {:?}", intent, outcome);
                    if outcome.is_started() {
                        publish(&events, CarouselEvent::Frame(carousel.view()));
                    }
                }
                Wake::Visibility(state) => {
                    carousel.set_visibility(state);
                    publish(&events, CarouselEvent::Frame(carousel.view()));
                }
                Wake::Frame => {
                    if let Some(outcome) = carousel.tick() {
                        publish(&events, CarouselEvent::Frame(carousel.view()));
                        if outcome.is_completed() {
                            publish(&events, CarouselEvent::Settled { index: carousel.index() });
                        }
                    }
                }
                Wake::Autoplay => {
                    if let Some(NavOutcome::Started { .. }) = carousel.poll_autoplay() {
                        publish(&events, CarouselEvent::Frame(carousel.view()));
                    }
                }
            }
        }

        info!("Carousel service stopped");
    }
}

async fn next_frame(frames: &mut Option<Interval>) {
    match frames.as_mut() {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}

fn publish(events: &mpsc::UnboundedSender<CarouselEvent>, event: CarouselEvent) {
    if events.send(event).is_err() {
        warn!("Failed to send carousel event: receiver dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    fn config() -> CarouselConfig {
        CarouselConfig {
            images: vec!["a.jpeg".into(), "b.jpeg".into(), "c.jpeg".into(), "d.jpeg".into()],
            interval_ms: 5000,
            duration: 18,
            animation_fps: 60,
            ..Default::default()
        }
    }

    async fn next_view(events: &mut mpsc::UnboundedReceiver<CarouselEvent>) -> CarouselView {
        loop {
            match events.recv().await.expect("service stopped") {
                CarouselEvent::Frame(view) => return view,
                CarouselEvent::Settled { .. } => continue,
            }
        }
    }

    async fn wait_settled(events: &mut mpsc::UnboundedReceiver<CarouselEvent>) -> usize {
        loop {
            if let CarouselEvent::Settled { index } = events.recv().await.expect("service stopped") {
                return index;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_next_animates_and_settles() {
        let (service, handle, mut events) = CarouselService::new(&config()).unwrap();
        let task = tokio::spawn(service.run());

        let initial = next_view(&mut events).await;
        assert_eq!(initial.index, 0);
        assert!(initial.autoplay_live);

        let start = Instant::now();
        handle.next().unwrap();
        let started = next_view(&mut events).await;
        assert!(started.animating);
        assert_eq!(started.index, 1);
        assert!(!started.autoplay_live);

        assert_eq!(wait_settled(&mut events).await, 1);
        let elapsed = Instant::now() - start;
        assert!(elapsed >= config().frame_interval() * 18, "settled after {:?}", elapsed);
        assert!(elapsed < Duration::from_secs(1));

        handle.shutdown();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_intents_dropped_while_animating() {
        let (service, handle, mut events) = CarouselService::new(&config()).unwrap();
        let task = tokio::spawn(service.run());
        next_view(&mut events).await;

        handle.next().unwrap();
        handle.next().unwrap();
        handle.go_to(3).unwrap();

        assert_eq!(wait_settled(&mut events).await, 1);

        handle.shutdown();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_autoplay_advances_after_interval() {
        let (service, handle, mut events) = CarouselService::new(&config()).unwrap();
        let start = Instant::now();
        let task = tokio::spawn(service.run());
        next_view(&mut events).await;

        let view = next_view(&mut events).await;
        assert_eq!(view.index, 1);
        assert!(Instant::now() - start >= Duration::from_millis(5000));

        assert_eq!(wait_settled(&mut events).await, 1);
        let view = next_view(&mut events).await;
        assert_eq!(view.index, 2);

        handle.shutdown();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_hidden_pauses_autoplay() {
        let (service, handle, mut events) = CarouselService::new(&config()).unwrap();
        let task = tokio::spawn(service.run());
        next_view(&mut events).await;

        handle.set_visibility(VisibilityState::Hidden).unwrap();
        let hidden = next_view(&mut events).await;
        assert!(!hidden.autoplay_live);
        assert_eq!(hidden.visibility, VisibilityState::Hidden);

        let quiet = timeout(Duration::from_secs(60), events.recv()).await;
        assert!(quiet.is_err(), "no events expected while hidden");

        handle.set_visibility(VisibilityState::Visible).unwrap();
        let shown = next_view(&mut events).await;
        assert!(shown.autoplay_live);
        assert_eq!(shown.index, 0);

        handle.shutdown();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_dropping_handle_stops_service() {
        let (service, handle, _events) = CarouselService::new(&config()).unwrap();
        let task = tokio::spawn(service.run());
        drop(handle);

        let result = timeout(Duration::from_secs(1), task).await;
        assert!(result.is_ok());
    }
}
