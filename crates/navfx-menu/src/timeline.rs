#![forbid(unsafe_code)]

//! Open and close choreography.
//!
//! A [`Timeline`] is every step of one transition, all timed from the same
//! origin instant. Steps never wait for each other; only the steps carrying
//! a [`Cue`] feed back into the state machine. Instantaneous batches
//! ([`SetBatch`]) cover the mount-time setup and the resets applied at the
//! two terminal events.

use navfx_core::animation::stagger::Stagger;
use navfx_core::animation::{POWER3_OUT, POWER4_IN_OUT};
use navfx_core::provider::{AnimationProvider, AnimationStep, CompletionTag, Target};
use navfx_core::style::{Length, PointerEvents, Polygon, Property, PropertyMap, Value};

use crate::config::MenuTimings;
use crate::layout::LayoutPolicy;

/// Selector tags the choreography addresses.
pub mod selectors {
    /// Root container.
    pub const ROOT: &str = ".bytes-menu-container";
    /// Header button that toggles the menu.
    pub const NAV_TOGGLE: &str = ".bytes-nav .menu-toggle";
    /// The full-screen overlay.
    pub const OVERLAY: &str = ".menu";
    /// Close button inside the overlay.
    pub const OVERLAY_TOGGLE: &str = ".menu-nav .menu-toggle";
    /// Hero section.
    pub const HERO: &str = ".hero";
    /// Layer container (tilts).
    pub const LAYER_CONTAINER: &str = ".menu-img";
    /// Per-layer ids, back to front.
    pub const LAYERS: [&str; 4] = ["#img-1", "#img-2", "#img-3", "#img-4"];
    /// Layers that enter and leave with the menu.
    pub const MOVING_LAYERS: &str = "#img-2, #img-3, #img-4";
    /// Links and footer block.
    pub const CONTENT: &str = ".menu-items";
    /// Overlay logo.
    pub const LOGO: &str = ".menu-logo img";
    /// Primary link text.
    pub const LINKS: &str = ".menu-link p";
    /// Footer line text.
    pub const SUB_ITEMS: &str = ".menu-sub-item p";
}

/// Pre-open vertical offset of the logo, px.
pub const LOGO_OFFSET: f32 = 50.0;
/// Pre-open vertical offset of each link, px.
pub const LINK_OFFSET: f32 = 40.0;
/// Pre-open vertical offset of each footer line, px.
pub const SUB_ITEM_OFFSET: f32 = 12.0;

/// Overlay collapsed to its bottom edge (resting shape).
pub const CLIP_COLLAPSED_BOTTOM: Polygon =
    Polygon([(0.0, 100.0), (100.0, 100.0), (100.0, 100.0), (0.0, 100.0)]);
/// Overlay covering the viewport.
pub const CLIP_FULL: Polygon = Polygon([(0.0, 100.0), (100.0, 100.0), (100.0, 0.0), (0.0, 0.0)]);
/// Overlay collapsed to its top edge (end of close).
pub const CLIP_COLLAPSED_TOP: Polygon = Polygon([(0.0, 0.0), (100.0, 0.0), (100.0, 0.0), (0.0, 0.0)]);

/// Which way a transition runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Closed → Open.
    Open,
    /// Open → Closed.
    Close,
}

/// A completion that matters to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// The label timer of a transition ended.
    LabelFlip(Direction),
    /// The terminal step of a transition ended.
    Settled(Direction),
}

impl Cue {
    const fn code(self) -> u64 {
        match self {
            Self::LabelFlip(Direction::Open) => 1,
            Self::LabelFlip(Direction::Close) => 2,
            Self::Settled(Direction::Open) => 3,
            Self::Settled(Direction::Close) => 4,
        }
    }

    /// Encode with the transition generation it belongs to.
    #[must_use]
    pub const fn tag(self, generation: u64) -> CompletionTag {
        CompletionTag((generation << 8) | self.code())
    }

    /// Decode a tag into its generation and cue.
    #[must_use]
    pub const fn from_tag(tag: CompletionTag) -> Option<(u64, Self)> {
        let cue = match tag.0 & 0xff {
            1 => Self::LabelFlip(Direction::Open),
            2 => Self::LabelFlip(Direction::Close),
            3 => Self::Settled(Direction::Open),
            4 => Self::Settled(Direction::Close),
            _ => return None,
        };
        Some((tag.0 >> 8, cue))
    }
}

/// Instantaneous property writes applied together, in order.
#[derive(Debug, Clone, Default)]
pub struct SetBatch {
    entries: Vec<(Target, PropertyMap)>,
}

impl SetBatch {
    /// An empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry (builder).
    #[must_use]
    pub fn with(mut self, target: Target, properties: PropertyMap) -> Self {
        self.entries.push((target, properties));
        self
    }

    /// Append all entries of `other`.
    #[must_use]
    pub fn chain(mut self, other: SetBatch) -> Self {
        self.entries.extend(other.entries);
        self
    }

    /// Entries in application order.
    #[must_use]
    pub fn entries(&self) -> &[(Target, PropertyMap)] {
        &self.entries
    }

    /// Apply every entry immediately.
    pub fn apply<P: AnimationProvider + ?Sized>(&self, provider: &mut P) {
        for (target, properties) in &self.entries {
            provider.set(target, properties);
        }
    }
}

/// The ordered steps of one transition.
#[derive(Debug, Clone)]
pub struct Timeline {
    direction: Direction,
    steps: Vec<AnimationStep>,
}

impl Timeline {
    /// Transition direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Steps in issue order.
    #[must_use]
    pub fn steps(&self) -> &[AnimationStep] {
        &self.steps
    }

    /// Hand every step to the provider. Returns how many were accepted.
    pub fn issue<P: AnimationProvider + ?Sized>(self, provider: &mut P) -> usize {
        let total = self.steps.len();
        let accepted = self
            .steps
            .into_iter()
            .filter_map(|step| provider.animate(step))
            .count();
        navfx_core::debug!(
            direction = ?self.direction,
            total,
            accepted,
            "timeline issued"
        );
        accepted
    }
}

fn y(px: f32) -> Value {
    Value::Number(px)
}

fn pct(percent: f32) -> Value {
    Value::Length(Length::percent(percent))
}

fn props<const N: usize>(entries: [(Property, Value); N]) -> PropertyMap {
    entries.into_iter().collect()
}

/// Open choreography for transition `generation`.
#[must_use]
pub fn open_timeline(timings: &MenuTimings, generation: u64) -> Timeline {
    let steps = vec![
        AnimationStep::to(
            Target::selector(selectors::OVERLAY),
            props([
                (Property::ClipPath, Value::Clip(CLIP_FULL)),
                (Property::PointerEvents, Value::Pointer(PointerEvents::All)),
            ]),
        )
        .duration(timings.reveal)
        .easing(POWER4_IN_OUT),
        AnimationStep::to(
            Target::selector(selectors::HERO),
            props([(Property::Top, pct(-50.0)), (Property::Opacity, Value::Number(0.0))]),
        )
        .duration(timings.reveal)
        .easing(POWER4_IN_OUT),
        label_timer(timings, Direction::Open, generation),
        AnimationStep::to(
            Target::selector(selectors::LOGO),
            props([(Property::TranslateY, y(0.0))]),
        )
        .duration(timings.logo_duration)
        .delay(timings.logo_delay)
        .easing(POWER3_OUT),
        AnimationStep::to(
            Target::selector(selectors::LINKS),
            props([(Property::TranslateY, y(0.0))]),
        )
        .duration(timings.links_duration)
        .delay(timings.links_delay)
        .stagger(Stagger::linear(timings.links_stagger))
        .easing(POWER3_OUT),
        AnimationStep::to(
            Target::selector(selectors::SUB_ITEMS),
            props([(Property::TranslateY, y(0.0))]),
        )
        .duration(timings.sub_items_duration)
        .delay(timings.sub_items_delay)
        .stagger(Stagger::linear(timings.sub_items_stagger))
        .easing(POWER3_OUT),
        AnimationStep::to(
            Target::selector(selectors::MOVING_LAYERS),
            props([(Property::Top, pct(50.0))]),
        )
        .duration(timings.reveal)
        .delay(timings.layers_delay)
        .stagger(Stagger::linear(timings.layers_stagger))
        .easing(POWER4_IN_OUT)
        .on_complete(Cue::Settled(Direction::Open).tag(generation)),
    ];
    Timeline {
        direction: Direction::Open,
        steps,
    }
}

/// Close choreography for transition `generation`.
#[must_use]
pub fn close_timeline(timings: &MenuTimings, generation: u64) -> Timeline {
    let steps = vec![
        AnimationStep::to(
            Target::selector(selectors::OVERLAY),
            props([
                (Property::ClipPath, Value::Clip(CLIP_COLLAPSED_TOP)),
                (Property::PointerEvents, Value::Pointer(PointerEvents::None)),
            ]),
        )
        .duration(timings.reveal)
        .easing(POWER4_IN_OUT),
        AnimationStep::to(
            Target::selector(selectors::CONTENT),
            props([
                (Property::Top, Value::Length(Length::px(-300.0))),
                (Property::Opacity, Value::Number(0.0)),
            ]),
        )
        .duration(timings.reveal)
        .easing(POWER4_IN_OUT),
        label_timer(timings, Direction::Close, generation),
        AnimationStep::to(
            Target::selector(selectors::HERO),
            props([(Property::Top, pct(0.0)), (Property::Opacity, Value::Number(1.0))]),
        )
        .duration(timings.reveal)
        .easing(POWER4_IN_OUT)
        .on_complete(Cue::Settled(Direction::Close).tag(generation)),
    ];
    Timeline {
        direction: Direction::Close,
        steps,
    }
}

fn label_timer(timings: &MenuTimings, direction: Direction, generation: u64) -> AnimationStep {
    AnimationStep::timer(timings.label_duration)
        .delay(timings.label_delay)
        .on_complete(Cue::LabelFlip(direction).tag(generation))
}

/// Pre-open offsets of logo, links and footer lines.
#[must_use]
pub fn entrance_offsets() -> SetBatch {
    SetBatch::new()
        .with(
            Target::selector(selectors::LOGO),
            props([(Property::TranslateY, y(LOGO_OFFSET))]),
        )
        .with(
            Target::selector(selectors::LINKS),
            props([(Property::TranslateY, y(LINK_OFFSET))]),
        )
        .with(
            Target::selector(selectors::SUB_ITEMS),
            props([(Property::TranslateY, y(SUB_ITEM_OFFSET))]),
        )
}

/// Resting placement of the moving layers.
#[must_use]
pub fn resting_layers(policy: &LayoutPolicy, compact: bool) -> SetBatch {
    SetBatch::new().with(
        Target::selector(selectors::MOVING_LAYERS),
        policy.resting_position(compact).to_properties(),
    )
}

fn closed_surfaces() -> SetBatch {
    SetBatch::new()
        .with(
            Target::selector(selectors::OVERLAY),
            props([(Property::ClipPath, Value::Clip(CLIP_COLLAPSED_BOTTOM))]),
        )
        .chain(entrance_offsets())
        .with(
            Target::selector(selectors::CONTENT),
            props([
                (Property::Opacity, Value::Number(1.0)),
                (Property::Top, Value::Length(Length::px(0.0))),
            ]),
        )
}

/// Everything applied at mount: the closed resting state.
#[must_use]
pub fn initial_state(policy: &LayoutPolicy, compact: bool) -> SetBatch {
    SetBatch::new()
        .with(
            Target::selector(selectors::HERO),
            props([(Property::Top, pct(0.0)), (Property::Opacity, Value::Number(1.0))]),
        )
        .with(
            Target::selector(selectors::OVERLAY),
            props([(Property::PointerEvents, Value::Pointer(PointerEvents::None))]),
        )
        .chain(closed_surfaces())
        .chain(resting_layers(policy, compact))
}

/// Applied when the open transition settles.
#[must_use]
pub fn open_settle() -> SetBatch {
    SetBatch::new().with(
        Target::selector(selectors::HERO),
        props([(Property::Top, pct(50.0))]),
    )
}

/// Applied when the close transition settles.
#[must_use]
pub fn close_reset(policy: &LayoutPolicy, compact: bool) -> SetBatch {
    closed_surfaces().chain(resting_layers(policy, compact))
}

#[cfg(test)]
mod tests {
    use super::*;
    use navfx_core::provider::RecordingProvider;
    use std::time::Duration;

    #[test]
    fn cue_tags_round_trip() {
        for cue in [
            Cue::LabelFlip(Direction::Open),
            Cue::LabelFlip(Direction::Close),
            Cue::Settled(Direction::Open),
            Cue::Settled(Direction::Close),
        ] {
            assert_eq!(Cue::from_tag(cue.tag(42)), Some((42, cue)));
        }
        assert_eq!(Cue::from_tag(CompletionTag(0x100)), None);
    }

    #[test]
    fn open_timeline_shape() {
        let t = MenuTimings::default();
        let timeline = open_timeline(&t, 1);
        let steps = timeline.steps();
        assert_eq!(steps.len(), 7);
        assert_eq!(steps[2].target, Target::Timer);
        assert_eq!(steps[2].delay + steps[2].duration, Duration::from_millis(800));
        let terminal = &steps[6];
        assert_eq!(terminal.on_complete, Some(Cue::Settled(Direction::Open).tag(1)));
        assert_eq!(terminal.span(3), Duration::from_millis(1700));
        assert_eq!(
            steps[4].stagger.map(|s| s.each),
            Some(Duration::from_millis(75))
        );
    }

    #[test]
    fn close_timeline_terminates_on_hero() {
        let timeline = close_timeline(&MenuTimings::default(), 2);
        let tagged: Vec<_> = timeline
            .steps()
            .iter()
            .filter_map(|s| s.on_complete.map(|tag| (s.target.clone(), tag)))
            .collect();
        assert_eq!(
            tagged,
            vec![
                (Target::Timer, Cue::LabelFlip(Direction::Close).tag(2)),
                (
                    Target::selector(selectors::HERO),
                    Cue::Settled(Direction::Close).tag(2)
                ),
            ]
        );
    }

    #[test]
    fn issue_reports_accepted_steps() {
        let mut rec = RecordingProvider::new();
        let accepted = close_timeline(&MenuTimings::default(), 1).issue(&mut rec);
        assert_eq!(accepted, 4);
        assert_eq!(rec.animations().count(), 4);
    }

    #[test]
    fn clip_shapes_render() {
        assert_eq!(
            CLIP_FULL.to_string(),
            "polygon(0% 100%, 100% 100%, 100% 0%, 0% 0%)"
        );
        assert_eq!(
            CLIP_COLLAPSED_BOTTOM.to_string(),
            "polygon(0% 100%, 100% 100%, 100% 100%, 0% 100%)"
        );
    }

    #[test]
    fn reset_restores_mount_layers() {
        let policy = LayoutPolicy::default();
        let mount = initial_state(&policy, false);
        let reset = close_reset(&policy, false);
        let layers = Target::selector(selectors::MOVING_LAYERS);
        let find = |batch: &SetBatch| {
            batch
                .entries()
                .iter()
                .find(|(t, _)| *t == layers)
                .map(|(_, p)| p.clone())
        };
        assert_eq!(find(&mount), find(&reset));
    }
}
