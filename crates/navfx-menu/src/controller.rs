#![forbid(unsafe_code)]

//! Composition root.
//!
//! [`MenuController`] owns the state machine, the transform engine, the
//! layout policy and the host listeners, and drives a single
//! [`AnimationProvider`]. Everything reaches it through four doors:
//! host events, UI requests, provider completions, and mount/unmount.
//!
//! # Resize policy
//!
//! A resize always updates the pointer reference origin and the compact
//! flag. The resting placement is applied at once only while Closed; in
//! any other state it waits for the close reset, which reads the flag as
//! it is then.

use std::time::Duration;

use smallvec::SmallVec;

use navfx_core::event::{HostEvent, HostEventKind, Listener, ListenerRegistry};
use navfx_core::geometry::Viewport;
use navfx_core::provider::{AnimationProvider, CompletionTag};
use navfx_core::scene::Scene;
use navfx_core::tweener::Tweener;

use crate::config::MountConfig;
use crate::dom::MenuDom;
use crate::layers::LayerRefs;
use crate::layout::LayoutPolicy;
use crate::machine::{Action, ButtonLabel, CueOutcome, MenuMachine, MenuState};
use crate::timeline::{self, Cue, Direction};
use crate::transform::TransformEngine;

/// The menu component.
#[derive(Debug)]
pub struct MenuController<P> {
    config: MountConfig,
    provider: P,
    machine: MenuMachine,
    engine: TransformEngine,
    policy: LayoutPolicy,
    viewport: Viewport,
    compact: bool,
    listeners: SmallVec<[Listener; 2]>,
    dom: Option<MenuDom>,
}

impl<P: AnimationProvider> MenuController<P> {
    /// Create an unmounted controller for a viewport of the given size.
    pub fn new(config: MountConfig, provider: P, viewport: Viewport) -> Self {
        let policy = LayoutPolicy::new(config.breakpoint);
        let compact = policy.is_compact(viewport.width);
        let engine = TransformEngine::new(viewport, LayerRefs::default(), config.timings.pointer_follow);
        Self {
            config,
            provider,
            machine: MenuMachine::new(),
            engine,
            policy,
            viewport,
            compact,
            listeners: SmallVec::new(),
            dom: None,
        }
    }

    /// Use these element references for tilt and parallax (builder).
    #[must_use]
    pub fn with_layers(mut self, refs: LayerRefs) -> Self {
        self.engine.attach(refs);
        self
    }

    /// Start listening for pointer and resize events. Returns `false` if
    /// already mounted.
    ///
    /// The closed resting state is applied only while Closed. A remount in
    /// any other state leaves the scene and the in-flight timeline alone.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "menu::mount", skip_all))]
    pub fn mount(&mut self, registry: &ListenerRegistry) -> bool {
        if self.is_mounted() {
            navfx_core::debug!("already mounted");
            return false;
        }
        if self.machine.state() == MenuState::Closed {
            timeline::initial_state(&self.policy, self.compact).apply(&mut self.provider);
            self.engine.apply_baseline(&mut self.provider);
        } else {
            navfx_core::debug!(state = ?self.machine.state(), "remount keeps current scene");
        }
        self.listeners.push(registry.listen(HostEventKind::PointerMove));
        self.listeners.push(registry.listen(HostEventKind::Resize));
        navfx_core::info!(compact = self.compact, "menu mounted");
        true
    }

    /// Release every listener. In-flight tweens are left to the provider.
    pub fn unmount(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        self.listeners.clear();
        navfx_core::info!("menu unmounted");
    }

    /// Whether listeners are held.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Route a host event. Returns `false` if nothing is listening for it.
    pub fn handle_event(&mut self, event: HostEvent) -> bool {
        let kind = event.kind();
        if !self.listeners.iter().any(|l| l.kind() == kind) {
            navfx_core::trace!(?kind, "event without listener");
            return false;
        }
        match event {
            HostEvent::PointerMove(position) => {
                self.engine.on_pointer_sample(&mut self.provider, position);
            }
            HostEvent::Resize(viewport) => self.on_resize(viewport),
        }
        true
    }

    fn on_resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.engine.on_resize(viewport);
        self.compact = self.policy.is_compact(viewport.width);
        if self.machine.state() == MenuState::Closed {
            navfx_core::debug!(compact = self.compact, "resize: applying resting position");
            timeline::resting_layers(&self.policy, self.compact).apply(&mut self.provider);
        } else {
            navfx_core::debug!(
                compact = self.compact,
                state = ?self.machine.state(),
                "resize: resting position deferred"
            );
        }
    }

    /// Start opening. No-op unless Closed and mounted.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "menu::request_open", skip_all))]
    pub fn request_open(&mut self) -> bool {
        self.request(Direction::Open)
    }

    /// Start closing. No-op unless Open and mounted.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "menu::request_close", skip_all))]
    pub fn request_close(&mut self) -> bool {
        self.request(Direction::Close)
    }

    /// The header button: close when Open, otherwise try to open.
    pub fn toggle(&mut self) -> bool {
        if self.machine.state() == MenuState::Open {
            self.request_close()
        } else {
            self.request_open()
        }
    }

    fn request(&mut self, direction: Direction) -> bool {
        if !self.is_mounted() {
            navfx_core::debug!(?direction, "request while unmounted");
            return false;
        }
        let Some(action) = self.machine.request(direction) else {
            return false;
        };
        self.perform(action);
        true
    }

    /// Route a provider completion. Tags that are not menu cues, or that
    /// belong to an earlier transition, are ignored.
    pub fn on_completion(&mut self, tag: CompletionTag) -> CueOutcome {
        let Some((generation, cue)) = Cue::from_tag(tag) else {
            navfx_core::trace!(tag = tag.0, "foreign completion");
            return CueOutcome::Ignored;
        };
        let outcome = self.machine.on_cue(generation, cue);
        if let CueOutcome::Settled(action) = outcome {
            self.perform(action);
        }
        outcome
    }

    fn perform(&mut self, action: Action) {
        let generation = self.machine.generation();
        let timings = &self.config.timings;
        match action {
            Action::IssueOpen => {
                timeline::open_timeline(timings, generation).issue(&mut self.provider);
            }
            Action::IssueClose => {
                timeline::close_timeline(timings, generation).issue(&mut self.provider);
            }
            Action::SettleOpen => timeline::open_settle().apply(&mut self.provider),
            Action::ResetClosed => {
                timeline::close_reset(&self.policy, self.compact).apply(&mut self.provider);
            }
        }
    }

    /// Forget a layer's element; tilt and parallax skip it from now on.
    pub fn detach_layer(&mut self, index: usize) {
        if self.engine.detach_layer(index).is_some() {
            navfx_core::debug!(layer = index, "layer detached");
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> MenuState {
        self.machine.state()
    }

    /// Current header button label.
    #[must_use]
    pub fn button_label(&self) -> ButtonLabel {
        self.machine.label()
    }

    /// Label of the overlay's own close button.
    #[must_use]
    pub fn overlay_label(&self) -> ButtonLabel {
        ButtonLabel::OVERLAY_TRIGGER
    }

    /// Whether the compact layout applies to the current viewport.
    #[must_use]
    pub fn is_compact(&self) -> bool {
        self.compact
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Mount configuration.
    #[must_use]
    pub fn config(&self) -> &MountConfig {
        &self.config
    }

    /// The transform engine.
    #[must_use]
    pub fn engine(&self) -> &TransformEngine {
        &self.engine
    }

    /// The driven provider.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable access to the provider.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Element ids, when the controller built its own scene.
    #[must_use]
    pub fn dom(&self) -> Option<&MenuDom> {
        self.dom.as_ref()
    }
}

impl MenuController<Tweener> {
    /// A controller driving its own [`Tweener`] over a freshly built scene.
    pub fn with_scene(config: MountConfig, viewport: Viewport) -> Self {
        let mut scene = Scene::new();
        let dom = MenuDom::build(&mut scene, &config.content, &config.style_class);
        let refs = dom.layer_refs();
        let mut controller = Self::new(config, Tweener::new(scene), viewport).with_layers(refs);
        controller.dom = Some(dom);
        controller
    }

    /// Advance the tweener by `dt` and route its completions in the order
    /// they happened. Returns how many completions were routed.
    pub fn advance(&mut self, dt: Duration) -> usize {
        let tags = self.provider.tick(dt);
        let count = tags.len();
        for tag in tags {
            self.on_completion(tag);
        }
        count
    }
}
