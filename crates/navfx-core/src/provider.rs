#![forbid(unsafe_code)]

//! The animation provider contract.
//!
//! Anything that can apply an instantaneous property set or run a timed,
//! eased tween against a [`Target`] implements [`AnimationProvider`].
//! Completion is reported as a [`CompletionTag`] chosen by the caller
//! rather than a closure; the provider hands tags back when tweens finish
//! and the owner routes them.
//!
//! # Contract
//!
//! 1. A target that resolves to zero elements is a silent no-op:
//!    `animate` returns `None` and no completion is ever reported.
//!    [`Target::Timer`] is the exception and always runs.
//! 2. With a [`Stagger`], element `i` starts `delay + offset[i]` after issue,
//!    and the completion tag is reported once, after the last element.
//! 3. Issuing a tween for an (element, property) pair that already has a
//!    running tween supersedes the running one (retargeting). The new tween
//!    starts from whatever value is current when it begins.
//! 4. `set` applies immediately and also supersedes running tweens on the
//!    same (element, property).

use std::borrow::Cow;
use std::time::Duration;

use crate::animation::stagger::Stagger;
use crate::animation::{EasingFn, ease_out};
use crate::scene::ElementId;
use crate::style::PropertyMap;

/// What a step applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Every element carrying this selector tag.
    Selector(Cow<'static, str>),
    /// A single element reference.
    Element(ElementId),
    /// An explicit element list, in order.
    Elements(Vec<ElementId>),
    /// No element: a pure timed callback.
    Timer,
}

impl Target {
    /// Target every element tagged `selector`.
    #[must_use]
    pub fn selector(selector: impl Into<Cow<'static, str>>) -> Self {
        Self::Selector(selector.into())
    }
}

/// Caller-chosen token reported when a tween finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompletionTag(pub u64);

/// Handle to an issued tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenHandle(pub u64);

/// One timed animation directive. Immutable once issued.
#[derive(Debug, Clone)]
pub struct AnimationStep {
    /// Elements the step applies to.
    pub target: Target,
    /// Property → end value.
    pub properties: PropertyMap,
    /// Tween length per element.
    pub duration: Duration,
    /// Wait before the first element starts.
    pub delay: Duration,
    /// Per-element start increment for multi-element targets.
    pub stagger: Option<Stagger>,
    /// Easing curve.
    pub easing: EasingFn,
    /// Reported once when the whole step finishes.
    pub on_complete: Option<CompletionTag>,
}

impl AnimationStep {
    /// Default tween length when none is given.
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(500);

    /// Tween `target` toward `properties`.
    #[must_use]
    pub fn to(target: Target, properties: PropertyMap) -> Self {
        Self {
            target,
            properties,
            duration: Self::DEFAULT_DURATION,
            delay: Duration::ZERO,
            stagger: None,
            easing: ease_out,
            on_complete: None,
        }
    }

    /// A property-less step whose only effect is its completion.
    #[must_use]
    pub fn timer(duration: Duration) -> Self {
        Self {
            duration,
            ..Self::to(Target::Timer, PropertyMap::new())
        }
    }

    /// Set the duration (builder).
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the start delay (builder).
    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the stagger (builder).
    #[must_use]
    pub fn stagger(mut self, stagger: Stagger) -> Self {
        self.stagger = Some(stagger);
        self
    }

    /// Set the easing curve (builder).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Report `tag` on completion (builder).
    #[must_use]
    pub fn on_complete(mut self, tag: CompletionTag) -> Self {
        self.on_complete = Some(tag);
        self
    }

    /// Time from issue until the last of `count` elements finishes.
    #[must_use]
    pub fn span(&self, count: usize) -> Duration {
        let last_offset = self
            .stagger
            .and_then(|s| s.offsets(count).last().copied())
            .unwrap_or(Duration::ZERO);
        self.delay
            .saturating_add(last_offset)
            .saturating_add(self.duration)
    }
}

/// Applies property sets and timed tweens to targets.
pub trait AnimationProvider {
    /// Apply `properties` to every element of `target` immediately.
    fn set(&mut self, target: &Target, properties: &PropertyMap);

    /// Issue a timed tween. Returns `None` if the target resolved to nothing.
    fn animate(&mut self, step: AnimationStep) -> Option<TweenHandle>;
}

#[cfg(any(test, feature = "test-helpers"))]
pub use recording::{ProviderCall, RecordingProvider};

#[cfg(any(test, feature = "test-helpers"))]
mod recording {
    use super::*;

    /// One recorded provider call.
    #[derive(Debug, Clone)]
    pub enum ProviderCall {
        /// A `set` call.
        Set {
            /// Target passed in.
            target: Target,
            /// Properties passed in.
            properties: PropertyMap,
        },
        /// An `animate` call.
        Animate(AnimationStep),
    }

    /// Provider that only records what it is asked to do.
    ///
    /// Every `animate` succeeds; tests decide when completions happen.
    #[derive(Debug, Default)]
    pub struct RecordingProvider {
        calls: Vec<ProviderCall>,
        next_handle: u64,
    }

    impl RecordingProvider {
        /// Create an empty recorder.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// All calls so far, in order.
        #[must_use]
        pub fn calls(&self) -> &[ProviderCall] {
            &self.calls
        }

        /// Drain recorded calls.
        pub fn take_calls(&mut self) -> Vec<ProviderCall> {
            std::mem::take(&mut self.calls)
        }

        /// Recorded `animate` steps, in order.
        pub fn animations(&self) -> impl Iterator<Item = &AnimationStep> {
            self.calls.iter().filter_map(|c| match c {
                ProviderCall::Animate(step) => Some(step),
                ProviderCall::Set { .. } => None,
            })
        }

        /// Completion tags carried by recorded steps, in issue order.
        #[must_use]
        pub fn completion_tags(&self) -> Vec<CompletionTag> {
            self.animations().filter_map(|s| s.on_complete).collect()
        }
    }

    impl AnimationProvider for RecordingProvider {
        fn set(&mut self, target: &Target, properties: &PropertyMap) {
            self.calls.push(ProviderCall::Set {
                target: target.clone(),
                properties: properties.clone(),
            });
        }

        fn animate(&mut self, step: AnimationStep) -> Option<TweenHandle> {
            self.next_handle += 1;
            self.calls.push(ProviderCall::Animate(step));
            Some(TweenHandle(self.next_handle))
        }
    }
}
