#![forbid(unsafe_code)]

//! Mount-time configuration.
//!
//! [`MountConfig`] carries the asset references and style class the host
//! renders, the navigation content, every choreography timing, and the
//! compact-layout breakpoint. All fields have defaults; assets and content
//! pass through unvalidated.

use std::fmt;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::content::NavContent;

/// Errors raised while building or loading a [`MountConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// Props were not valid JSON for a mount configuration.
    #[cfg(feature = "serde")]
    Json(serde_json::Error),
    /// A timing value cannot be used.
    InvalidTiming {
        /// Field name.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// The label would flip after the transition already settled.
    LabelFlipTooLate {
        /// Label flip offset from transition start.
        flip: Duration,
        /// Earliest terminal event of either transition.
        terminal: Duration,
    },
    /// A breakpoint of zero makes every viewport non-compact.
    ZeroBreakpoint,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "serde")]
            Self::Json(err) => write!(f, "invalid mount config: {err}"),
            Self::InvalidTiming { field, reason } => write!(f, "timing `{field}` {reason}"),
            Self::LabelFlipTooLate { flip, terminal } => write!(
                f,
                "label flip at {flip:?} does not precede transition end at {terminal:?}"
            ),
            Self::ZeroBreakpoint => write!(f, "breakpoint must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "serde")]
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Viewport width at or below which the compact layout applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Breakpoint(pub u32);

impl Breakpoint {
    /// The default tablet breakpoint.
    pub const DEFAULT: Self = Self(768);

    /// Whether a viewport of `width` uses the compact layout.
    #[must_use]
    pub fn is_compact(self, width: f32) -> bool {
        width <= self.0 as f32
    }
}

impl Default for Breakpoint {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Durations, delays and staggers of the open/close choreography and the
/// pointer-follow smoothing. Serialized as fractional seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct MenuTimings {
    /// Overlay reveal/collapse, hero, content block and layer motion.
    #[cfg_attr(feature = "serde", serde(with = "secs"))]
    pub reveal: Duration,
    /// Wait before the label timer starts.
    #[cfg_attr(feature = "serde", serde(with = "secs"))]
    pub label_delay: Duration,
    /// Length of the label timer; the label flips when it ends.
    #[cfg_attr(feature = "serde", serde(with = "secs"))]
    pub label_duration: Duration,
    /// Logo entrance delay.
    #[cfg_attr(feature = "serde", serde(with = "secs"))]
    pub logo_delay: Duration,
    /// Logo entrance length.
    #[cfg_attr(feature = "serde", serde(with = "secs"))]
    pub logo_duration: Duration,
    /// Primary links entrance delay.
    #[cfg_attr(feature = "serde", serde(with = "secs"))]
    pub links_delay: Duration,
    /// Primary links entrance length.
    #[cfg_attr(feature = "serde", serde(with = "secs"))]
    pub links_duration: Duration,
    /// Delay between successive links.
    #[cfg_attr(feature = "serde", serde(with = "secs"))]
    pub links_stagger: Duration,
    /// Footer items entrance delay.
    #[cfg_attr(feature = "serde", serde(with = "secs"))]
    pub sub_items_delay: Duration,
    /// Footer items entrance length.
    #[cfg_attr(feature = "serde", serde(with = "secs"))]
    pub sub_items_duration: Duration,
    /// Delay between successive footer items.
    #[cfg_attr(feature = "serde", serde(with = "secs"))]
    pub sub_items_stagger: Duration,
    /// Layer entrance delay.
    #[cfg_attr(feature = "serde", serde(with = "secs"))]
    pub layers_delay: Duration,
    /// Delay between successive layers.
    #[cfg_attr(feature = "serde", serde(with = "secs"))]
    pub layers_stagger: Duration,
    /// Tilt and parallax smoothing length.
    #[cfg_attr(feature = "serde", serde(with = "secs"))]
    pub pointer_follow: Duration,
}

impl Default for MenuTimings {
    fn default() -> Self {
        Self {
            reveal: Duration::from_millis(1250),
            label_delay: Duration::from_millis(300),
            label_duration: Duration::from_millis(500),
            logo_delay: Duration::from_millis(750),
            logo_duration: Duration::from_secs(1),
            links_delay: Duration::from_secs(1),
            links_duration: Duration::from_secs(1),
            links_stagger: Duration::from_millis(75),
            sub_items_delay: Duration::from_secs(1),
            sub_items_duration: Duration::from_millis(750),
            sub_items_stagger: Duration::from_millis(50),
            layers_delay: Duration::from_millis(250),
            layers_stagger: Duration::from_millis(100),
            pointer_follow: Duration::from_secs(2),
        }
    }
}

impl MenuTimings {
    /// Offset from transition start at which the button label flips.
    #[must_use]
    pub fn label_flip_offset(&self) -> Duration {
        self.label_delay.saturating_add(self.label_duration)
    }

    /// Offset at which the open transition settles (last layer arrives).
    #[must_use]
    pub fn open_settle_offset(&self, moving_layers: usize) -> Duration {
        let last = self
            .layers_stagger
            .saturating_mul(moving_layers.saturating_sub(1) as u32);
        self.layers_delay.saturating_add(last).saturating_add(self.reveal)
    }

    /// Offset at which the close transition settles (hero returns).
    #[must_use]
    pub fn close_settle_offset(&self) -> Duration {
        self.reveal
    }

    /// Check the timings describe a usable choreography.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reveal.is_zero() {
            return Err(ConfigError::InvalidTiming {
                field: "reveal",
                reason: "must be positive",
            });
        }
        if self.pointer_follow.is_zero() {
            return Err(ConfigError::InvalidTiming {
                field: "pointer_follow",
                reason: "must be positive",
            });
        }
        let terminal = self
            .open_settle_offset(crate::layers::MOVING_LAYERS)
            .min(self.close_settle_offset());
        let flip = self.label_flip_offset();
        if flip >= terminal {
            return Err(ConfigError::LabelFlipTooLate { flip, terminal });
        }
        Ok(())
    }
}

/// Everything supplied when the menu mounts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct MountConfig {
    /// Image shown in every layer.
    pub hero_image: String,
    /// Logo shown in the header and overlay.
    pub logo_image: String,
    /// Extra class on the root element.
    pub style_class: String,
    /// Links and footer text.
    pub content: NavContent,
    /// Choreography timings.
    pub timings: MenuTimings,
    /// Compact-layout breakpoint.
    pub breakpoint: Breakpoint,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            hero_image: "/assets/hero.jpg".into(),
            logo_image: "/assets/bytes-logo.png".into(),
            style_class: String::new(),
            content: NavContent::default(),
            timings: MenuTimings::default(),
            breakpoint: Breakpoint::DEFAULT,
        }
    }
}

impl MountConfig {
    /// Set the layer image.
    #[must_use]
    pub fn with_hero_image(mut self, hero_image: impl Into<String>) -> Self {
        self.hero_image = hero_image.into();
        self
    }

    /// Set the logo image.
    #[must_use]
    pub fn with_logo_image(mut self, logo_image: impl Into<String>) -> Self {
        self.logo_image = logo_image.into();
        self
    }

    /// Set the root style class.
    #[must_use]
    pub fn with_style_class(mut self, style_class: impl Into<String>) -> Self {
        self.style_class = style_class.into();
        self
    }

    /// Replace the navigation content.
    #[must_use]
    pub fn with_content(mut self, content: NavContent) -> Self {
        self.content = content;
        self
    }

    /// Replace the timings.
    #[must_use]
    pub fn with_timings(mut self, timings: MenuTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Set the compact-layout breakpoint.
    #[must_use]
    pub fn with_breakpoint(mut self, breakpoint: Breakpoint) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    /// Check timings and breakpoint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.breakpoint.0 == 0 {
            return Err(ConfigError::ZeroBreakpoint);
        }
        self.timings.validate()
    }

    /// Parse and validate JSON props. Missing fields take defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(feature = "serde")]
mod secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs)
            .map_err(|_| de::Error::custom(format!("expected non-negative finite seconds, got {secs}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_choreography() {
        let t = MenuTimings::default();
        assert_eq!(t.label_flip_offset(), Duration::from_millis(800));
        assert_eq!(t.open_settle_offset(3), Duration::from_millis(1700));
        assert_eq!(t.close_settle_offset(), Duration::from_millis(1250));
        assert!(t.validate().is_ok());
    }

    #[test]
    fn breakpoint_is_inclusive() {
        assert!(Breakpoint::DEFAULT.is_compact(768.0));
        assert!(!Breakpoint::DEFAULT.is_compact(768.5));
        assert!(Breakpoint::DEFAULT.is_compact(320.0));
    }

    #[test]
    fn late_label_flip_rejected() {
        let timings = MenuTimings {
            label_duration: Duration::from_secs(2),
            ..MenuTimings::default()
        };
        assert!(matches!(
            timings.validate(),
            Err(ConfigError::LabelFlipTooLate { .. })
        ));
    }

    #[test]
    fn zero_reveal_rejected() {
        let config = MountConfig::default().with_timings(MenuTimings {
            reveal: Duration::ZERO,
            ..MenuTimings::default()
        });
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "timing `reveal` must be positive");
    }

    #[test]
    fn zero_breakpoint_rejected() {
        let config = MountConfig::default().with_breakpoint(Breakpoint(0));
        assert!(matches!(config.validate(), Err(ConfigError::ZeroBreakpoint)));
    }

    #[test]
    fn builder_sets_assets() {
        let config = MountConfig::default()
            .with_hero_image("/a.jpg")
            .with_logo_image("/b.png")
            .with_style_class("my-custom-menu");
        assert_eq!(config.hero_image, "/a.jpg");
        assert_eq!(config.logo_image, "/b.png");
        assert_eq!(config.style_class, "my-custom-menu");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_props_fill_defaults() {
        let config = MountConfig::from_json(
            r#"{"style_class":"my-custom-menu","timings":{"reveal":1.0},"breakpoint":1024}"#,
        )
        .unwrap();
        assert_eq!(config.style_class, "my-custom-menu");
        assert_eq!(config.timings.reveal, Duration::from_secs(1));
        assert_eq!(config.timings.label_delay, Duration::from_millis(300));
        assert_eq!(config.breakpoint, Breakpoint(1024));
        assert_eq!(config.hero_image, "/assets/hero.jpg");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_negative_seconds_rejected() {
        let err = MountConfig::from_json(r#"{"timings":{"reveal":-1.0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
