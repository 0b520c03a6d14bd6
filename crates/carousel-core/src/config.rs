use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Write logs to this file instead of stderr
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

/// Easing curve applied to slide transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingType {
    /// Constant velocity
    Linear,
    /// Cubic ease-out: 1 - (1-t)³
    Cubic,
    /// Quintic ease-out: 1 - (1-t)⁵
    Quintic,
    /// Exponential ease-out: 1 - 2^(-10t)
    Exponential,
    /// cubic-bezier(0.25, 0.46, 0.45, 0.94)
    #[default]
    EaseOutQuad,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Ordered image references shown by the carousel
    #[serde(default)]
    pub images: Vec<String>,
    /// Milliseconds between automatic advances
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Length of one transition, in animation frames
    #[serde(default = "default_duration")]
    pub duration: u32,
    /// Animation frames per second
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Easing curve for transitions
    #[serde(default)]
    pub easing: EasingType,
    /// Advance automatically every `interval_ms`
    #[serde(default = "default_true")]
    pub autoplay: bool,
    /// Hide the previous/next arrows
    #[serde(default)]
    pub hide_arrows: bool,
    /// Hide the position indicator dots
    #[serde(default)]
    pub hide_dots: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            interval_ms: default_interval_ms(),
            duration: default_duration(),
            animation_fps: default_animation_fps(),
            easing: EasingType::default(),
            autoplay: default_true(),
            hide_arrows: false,
            hide_dots: false,
        }
    }
}

impl CarouselConfig {
    /// Interval between automatic advances
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Wall-clock length of one animation frame
    pub fn frame_interval(&self) -> Duration {
        crate::timing::frame_interval(self.animation_fps)
    }

    /// Reject configurations that cannot drive a carousel
    pub fn validate(&self) -> crate::Result<()> {
        if self.images.is_empty() {
            return Err(crate::Error::EmptySlideSet);
        }
        if self.interval_ms == 0 {
            return Err(crate::Error::Config(
                "interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.duration == 0 {
            return Err(crate::Error::Config(
                "duration must be at least one frame".to_string(),
            ));
        }
        if self.animation_fps == 0 {
            return Err(crate::Error::Config(
                "animation_fps must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Input poll rate in milliseconds while nothing is animating
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

fn default_interval_ms() -> u64 {
    5000
}

fn default_duration() -> u32 {
    18 // ~300ms at 60fps
}

fn default_animation_fps() -> u32 {
    60
}

fn default_tick_rate() -> u64 {
    100
}

impl AppConfig {
    /// Load configuration from a specific file, falling back to defaults if it is missing
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/carousel/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("carousel")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CarouselConfig::default();
        assert_eq!(config.interval_ms, 5000);
        assert_eq!(config.duration, 18);
        assert_eq!(config.animation_fps, 60);
        assert_eq!(config.easing, EasingType::EaseOutQuad);
        assert!(config.autoplay);
        assert!(!config.hide_arrows);
        assert!(!config.hide_dots);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [carousel]
            images = ["a.jpeg", "b.jpeg"]
            duration = 30
            easing = "cubic"
            hide_dots = true
            "#,
        )
        .unwrap();

        assert_eq!(config.carousel.images, vec!["a.jpeg", "b.jpeg"]);
        assert_eq!(config.carousel.duration, 30);
        assert_eq!(config.carousel.easing, EasingType::Cubic);
        assert!(config.carousel.hide_dots);
        assert_eq!(config.carousel.interval_ms, 5000);
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.ui.tick_rate_ms, 100);
    }

    #[test]
    fn test_validate_rejects_empty_images() {
        let config = CarouselConfig::default();
        assert!(matches!(config.validate(), Err(crate::Error::EmptySlideSet)));
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let base = CarouselConfig {
            images: vec!["a.jpeg".to_string()],
            ..Default::default()
        };
        assert!(base.validate().is_ok());

        for config in [
            CarouselConfig { interval_ms: 0, ..base.clone() },
            CarouselConfig { duration: 0, ..base.clone() },
            CarouselConfig { animation_fps: 0, ..base.clone() },
        ] {
            assert!(matches!(config.validate(), Err(crate::Error::Config(_))));
        }
    }

    #[test]
    fn test_save_and_load_roundtrip_file() {
        let dir = std::env::temp_dir().join(format!("carousel-config-{}", std::process::id()));
        let path = dir.join("config.toml");

        let mut config = AppConfig::default();
        config.carousel.images = vec!["one.png".to_string()];
        config.carousel.interval_ms = 1200;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.carousel.images, vec!["one.png"]);
        assert_eq!(loaded.carousel.interval_ms, 1200);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("carousel-does-not-exist/config.toml");
        let config = AppConfig::load_from(&path).unwrap();
        assert!(config.carousel.images.is_empty());
    }
}
