pub mod animation;
pub mod autoplay;
pub mod carousel;
pub mod clock;
pub mod config;
pub mod easing;
pub mod error;
pub mod service;
pub mod slides;
pub mod timing;
pub mod visibility;

pub use carousel::{Carousel, CarouselView, Intent, NavOutcome};
pub use config::{AppConfig, CarouselConfig, EasingType};
pub use error::{Error, Result};
pub use service::{CarouselEvent, CarouselHandle, CarouselService};
pub use slides::SlideSet;
pub use visibility::{VisibilityAdapter, VisibilityState};
