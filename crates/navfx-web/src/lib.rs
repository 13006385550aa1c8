#![forbid(unsafe_code)]

//! `navfx-web` embeds the navigation menu in a browser host.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (JS) pushes pointer and
//!   resize events and reads back style patches.
//! - **Deterministic time**: the host advances a monotonic clock explicitly.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! The crate does not bind to `wasm-bindgen`; a thin JS glue layer wraps
//! [`step_program::MenuStepProgram`].

pub mod step_program;

use core::time::Duration;
use std::collections::VecDeque;

use navfx_core::event::HostEvent;
use navfx_core::geometry::Viewport;
use navfx_core::scene::{ElementId, Scene};
use navfx_core::style::Property;
use navfx_menu::ConfigError;

/// Errors surfaced to the host.
#[derive(Debug)]
pub enum WebHostError {
    /// The operation needs a mounted menu.
    NotMounted,
    /// `mount` was called twice.
    AlreadyMounted,
    /// Props were rejected.
    Config(ConfigError),
}

impl core::fmt::Display for WebHostError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotMounted => write!(f, "menu is not mounted"),
            Self::AlreadyMounted => write!(f, "menu is already mounted"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for WebHostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for WebHostError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time. Earlier values are ignored.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Current monotonic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }
}

/// Host-driven event queue.
#[derive(Debug, Clone)]
pub struct WebEventSource {
    viewport: Viewport,
    queue: VecDeque<HostEvent>,
}

impl WebEventSource {
    /// Create a queue for an initial viewport.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            queue: VecDeque::new(),
        }
    }

    /// Last viewport seen (initial or from a queued resize).
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Queue an event.
    pub fn push_event(&mut self, event: HostEvent) {
        if let HostEvent::Resize(viewport) = event {
            self.viewport = viewport;
        }
        self.queue.push_back(event);
    }

    /// Number of queued events.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Drain all pending events in arrival order.
    pub fn drain_events(&mut self) -> impl Iterator<Item = HostEvent> + '_ {
        self.queue.drain(..)
    }
}

/// One style write for the host to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylePatch {
    /// Scene element index.
    pub element: u32,
    /// First selector tag of the element.
    pub selector: String,
    /// CSS property name.
    pub property: &'static str,
    /// CSS value text.
    pub css: String,
}

/// Everything the host needs to render since the last `take_outputs`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebOutputs {
    /// Style writes, grouped per step, in element then property order.
    pub patches: Vec<StylePatch>,
    /// Header button text.
    pub button_label: &'static str,
    /// Overlay close button text.
    pub overlay_label: &'static str,
}

/// Drain the scene's changed values into CSS patches.
pub(crate) fn collect_patches(scene: &mut Scene, out: &mut Vec<StylePatch>) {
    for (id, property) in scene.take_dirty() {
        if let Some(patch) = patch_for(scene, id, property) {
            out.push(patch);
        }
    }
}

fn patch_for(scene: &Scene, id: ElementId, property: Property) -> Option<StylePatch> {
    let value = scene.computed(id, property)?;
    let selector = scene
        .tags(id)
        .and_then(|tags| tags.first())
        .map(|tag| tag.to_string())
        .unwrap_or_default();
    Some(StylePatch {
        element: id.index(),
        selector,
        property: property.css_name(),
        css: property.css_value(&value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use navfx_core::geometry::Point;
    use navfx_core::style::Value;
    use pretty_assertions::assert_eq;

    #[test]
    fn clock_is_monotonic() {
        let mut clock = DeterministicClock::new();
        clock.advance(Duration::from_millis(16));
        clock.set(Duration::from_millis(5));
        assert_eq!(clock.now(), Duration::from_millis(16));
        clock.set(Duration::from_millis(40));
        assert_eq!(clock.now(), Duration::from_millis(40));
    }

    #[test]
    fn event_source_tracks_viewport() {
        let mut events = WebEventSource::new(Viewport::new(1280.0, 800.0));
        events.push_event(HostEvent::PointerMove(Point::new(1.0, 2.0)));
        events.push_event(HostEvent::Resize(Viewport::new(600.0, 800.0)));
        assert_eq!(events.viewport(), Viewport::new(600.0, 800.0));
        assert_eq!(events.pending(), 2);
        assert_eq!(events.drain_events().count(), 2);
        assert_eq!(events.pending(), 0);
    }

    #[test]
    fn patches_render_css() {
        let mut scene = Scene::new();
        let logo = scene.insert([".menu-logo img"]);
        scene.write(logo, Property::TranslateY, Value::Number(50.0));
        let mut out = Vec::new();
        collect_patches(&mut scene, &mut out);
        assert_eq!(
            out,
            vec![StylePatch {
                element: logo.index(),
                selector: ".menu-logo img".into(),
                property: "translate",
                css: "0 50px".into(),
            }]
        );
        out.clear();
        collect_patches(&mut scene, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn config_error_is_source() {
        let err = WebHostError::from(ConfigError::ZeroBreakpoint);
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "breakpoint must be positive");
    }
}
