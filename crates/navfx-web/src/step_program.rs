#![forbid(unsafe_code)]

//! Step-based runner for the menu.
//!
//! [`MenuStepProgram`] drives a [`MenuController`] over its own scene
//! without threads or blocking. The host controls the loop:
//!
//! 1. Push pointer/resize events via [`MenuStepProgram::push_event`].
//! 2. Forward clicks via [`MenuStepProgram::toggle`] (header button) or
//!    [`MenuStepProgram::request_close`] (overlay button).
//! 3. Advance time via [`MenuStepProgram::advance_time`].
//! 4. Call [`MenuStepProgram::step`] once per animation frame.
//! 5. Apply [`MenuStepProgram::take_outputs`] to the document.
//!
//! # Example
//!
//! ```
//! use core::time::Duration;
//! use navfx_web::step_program::MenuStepProgram;
//!
//! let mut prog = MenuStepProgram::from_json(r#"{"style_class":"site-menu"}"#, 1280.0, 800.0).unwrap();
//! prog.mount().unwrap();
//! prog.toggle().unwrap();
//! prog.advance_time(Duration::from_millis(16));
//! let result = prog.step();
//! assert!(result.mounted);
//! let outputs = prog.take_outputs();
//! assert!(!outputs.patches.is_empty());
//! ```

use core::time::Duration;

use navfx_core::event::{HostEvent, ListenerRegistry};
use navfx_core::geometry::Viewport;
use navfx_core::tweener::Tweener;
use navfx_menu::{ButtonLabel, MenuController, MenuState, MountConfig};

use crate::{DeterministicClock, WebEventSource, WebHostError, WebOutputs, collect_patches};

/// Result of a single [`MenuStepProgram::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether listeners are held.
    pub mounted: bool,
    /// Events delivered to the menu during this step.
    pub events_processed: u32,
    /// Events dropped because nothing listened for them.
    pub events_dropped: u32,
    /// Provider completions routed during this step.
    pub completions: u32,
    /// Current frame index (monotonically increasing).
    pub frame_idx: u64,
    /// Menu state after the step.
    pub state: MenuState,
}

/// Host-driven, non-blocking menu runner.
#[derive(Debug)]
pub struct MenuStepProgram {
    menu: MenuController<Tweener>,
    registry: ListenerRegistry,
    clock: DeterministicClock,
    events: WebEventSource,
    last_step: Duration,
    frame_idx: u64,
    outputs: WebOutputs,
}

impl MenuStepProgram {
    /// Create an unmounted program for a viewport of the given size.
    pub fn new(config: MountConfig, width: f32, height: f32) -> Result<Self, WebHostError> {
        config
            .validate()
            .inspect_err(|err| {
                navfx_core::warn!(%err, "mount config rejected");
            })?;
        let viewport = Viewport::new(width, height);
        Ok(Self {
            menu: MenuController::with_scene(config, viewport),
            registry: ListenerRegistry::new(),
            clock: DeterministicClock::new(),
            events: WebEventSource::new(viewport),
            last_step: Duration::ZERO,
            frame_idx: 0,
            outputs: WebOutputs::default(),
        })
    }

    /// Create from JSON props. Missing fields take defaults.
    pub fn from_json(props: &str, width: f32, height: f32) -> Result<Self, WebHostError> {
        Self::new(MountConfig::from_json(props)?, width, height)
    }

    /// Apply the resting state and start listening.
    pub fn mount(&mut self) -> Result<(), WebHostError> {
        if !self.menu.mount(&self.registry) {
            return Err(WebHostError::AlreadyMounted);
        }
        self.flush();
        Ok(())
    }

    /// Release listeners. Events pushed afterwards are dropped.
    pub fn unmount(&mut self) -> Result<(), WebHostError> {
        if !self.menu.is_mounted() {
            return Err(WebHostError::NotMounted);
        }
        self.menu.unmount();
        Ok(())
    }

    /// Queue a host event for the next step.
    pub fn push_event(&mut self, event: HostEvent) {
        self.events.push_event(event);
    }

    /// Advance the host clock.
    pub fn advance_time(&mut self, dt: Duration) {
        self.clock.advance(dt);
    }

    /// Set the host clock (e.g. from `requestAnimationFrame`'s timestamp).
    pub fn set_time(&mut self, now: Duration) {
        self.clock.set(now);
    }

    /// Header button click.
    pub fn toggle(&mut self) -> Result<bool, WebHostError> {
        self.ensure_mounted()?;
        Ok(self.menu.toggle())
    }

    /// Open request.
    pub fn request_open(&mut self) -> Result<bool, WebHostError> {
        self.ensure_mounted()?;
        Ok(self.menu.request_open())
    }

    /// Overlay close button click.
    pub fn request_close(&mut self) -> Result<bool, WebHostError> {
        self.ensure_mounted()?;
        Ok(self.menu.request_close())
    }

    /// Deliver queued events, advance animations to the clock, and collect
    /// style patches.
    pub fn step(&mut self) -> StepResult {
        let span = navfx_core::debug_span!("menu_step", frame = self.frame_idx + 1);
        let _guard = span.enter();
        let mut events_processed: u32 = 0;
        let mut events_dropped: u32 = 0;
        let queued: Vec<HostEvent> = self.events.drain_events().collect();
        for event in queued {
            if self.registry.is_listening(event.kind()) && self.menu.handle_event(event) {
                events_processed += 1;
            } else {
                events_dropped += 1;
            }
        }

        let now = self.clock.now();
        let dt = now.saturating_sub(self.last_step);
        self.last_step = now;
        let completions = self.menu.advance(dt) as u32;

        self.flush();
        self.frame_idx += 1;
        if events_dropped > 0 {
            navfx_core::trace!(events_dropped, frame = self.frame_idx, "events dropped");
        }

        StepResult {
            mounted: self.menu.is_mounted(),
            events_processed,
            events_dropped,
            completions,
            frame_idx: self.frame_idx,
            state: self.menu.state(),
        }
    }

    /// Take the patches and labels accumulated since the last call.
    pub fn take_outputs(&mut self) -> WebOutputs {
        let mut outputs = std::mem::take(&mut self.outputs);
        outputs.button_label = self.menu.button_label().as_str();
        outputs.overlay_label = self.menu.overlay_label().as_str();
        outputs
    }

    /// Current menu state.
    #[must_use]
    pub fn state(&self) -> MenuState {
        self.menu.state()
    }

    /// Current header button label.
    #[must_use]
    pub fn button_label(&self) -> ButtonLabel {
        self.menu.button_label()
    }

    /// Live listener count on the host registry.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.active_count()
    }

    /// The driven controller.
    #[must_use]
    pub fn menu(&self) -> &MenuController<Tweener> {
        &self.menu
    }

    fn flush(&mut self) {
        collect_patches(
            self.menu.provider_mut().scene_mut(),
            &mut self.outputs.patches,
        );
    }

    fn ensure_mounted(&self) -> Result<(), WebHostError> {
        if self.menu.is_mounted() {
            Ok(())
        } else {
            Err(WebHostError::NotMounted)
        }
    }
}
