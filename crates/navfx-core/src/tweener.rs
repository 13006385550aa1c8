#![forbid(unsafe_code)]

//! Reference [`AnimationProvider`]: a ticking tween engine over a [`Scene`].
//!
//! Every (element, property) pair has at most one live track. A track is a
//! [`Delayed`] [`Fade`] plus the end value; its start value is captured from
//! the scene when the delay elapses, so staggered elements and retargeted
//! tweens always continue from what is on screen.
//!
//! # Invariants
//!
//! 1. At most one track per (element, property); a newer tween or `set`
//!    supersedes the older track.
//! 2. A tween reports its completion tag exactly once, when its last live
//!    track finishes. A tween whose tracks were all superseded is dropped
//!    without reporting.
//! 3. Completions within one `tick` are reported in the order they happened
//!    on the timeline, even when `dt` spans several of them.
//!
//! # Failure Modes
//!
//! - Target resolves to nothing: `animate` returns `None`, nothing is queued.
//! - Element removed mid-tween: its tracks end quietly on the first tick
//!   after their delay.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::animation::{Animation, Delayed, Fade, delay};
use crate::provider::{AnimationProvider, AnimationStep, CompletionTag, Target, TweenHandle};
use crate::scene::{ElementId, Scene};
use crate::style::{Property, PropertyMap, Value};

type TrackKey = (ElementId, Property);

#[derive(Debug, Clone)]
struct Track {
    tween: u64,
    clock: Delayed<Fade>,
    from: Option<Value>,
    to: Value,
}

#[derive(Debug, Clone)]
struct TweenState {
    live_tracks: usize,
    /// Clock for tweens without property tracks.
    timer: Option<Delayed<Fade>>,
    on_complete: Option<CompletionTag>,
}

/// Tween engine implementing [`AnimationProvider`] against an owned [`Scene`].
#[derive(Debug, Default)]
pub struct Tweener {
    scene: Scene,
    tracks: BTreeMap<TrackKey, Track>,
    tweens: BTreeMap<u64, TweenState>,
    next_handle: u64,
    superseded: u64,
}

impl Tweener {
    /// Create a tweener driving `scene`.
    #[must_use]
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            ..Self::default()
        }
    }

    /// The driven scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable access to the driven scene.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Whether a track is live for this element and property.
    #[must_use]
    pub fn is_animating(&self, id: ElementId, property: Property) -> bool {
        self.tracks.contains_key(&(id, property))
    }

    /// Number of live property tracks.
    #[must_use]
    pub fn active_tracks(&self) -> usize {
        self.tracks.len()
    }

    /// Number of tweens that have not yet completed.
    #[must_use]
    pub fn pending_tweens(&self) -> usize {
        self.tweens.len()
    }

    /// Number of tracks superseded by retargeting since creation.
    #[must_use]
    pub fn superseded_count(&self) -> u64 {
        self.superseded
    }

    /// Advance every track by `dt`, write values into the scene, and return
    /// the completion tags of tweens that finished during this tick.
    pub fn tick(&mut self, dt: Duration) -> Vec<CompletionTag> {
        // handle -> smallest overshoot among its tracks ending this tick.
        let mut finishing: BTreeMap<u64, Duration> = BTreeMap::new();
        let mut ended: Vec<TrackKey> = Vec::new();

        for (&(id, property), track) in &mut self.tracks {
            track.clock.tick(dt);
            if !track.clock.has_started() {
                continue;
            }
            let Some(current) = self.scene.computed(id, property) else {
                crate::trace!(element = id.index(), "tween target vanished");
                ended.push((id, property));
                finishing.insert(track.tween, Duration::ZERO);
                continue;
            };
            let from = *track.from.get_or_insert(current);
            let value = from.interpolate(&track.to, track.clock.value());
            self.scene.write(id, property, value);
            if track.clock.is_complete() {
                ended.push((id, property));
                let os = track.clock.overshoot();
                finishing
                    .entry(track.tween)
                    .and_modify(|o| *o = (*o).min(os))
                    .or_insert(os);
            }
        }

        let mut done: Vec<(Duration, u64)> = Vec::new();
        for key in ended {
            let Some(track) = self.tracks.remove(&key) else {
                continue;
            };
            let Some(state) = self.tweens.get_mut(&track.tween) else {
                continue;
            };
            state.live_tracks = state.live_tracks.saturating_sub(1);
            if state.live_tracks == 0 && state.timer.is_none() {
                let os = finishing.get(&track.tween).copied().unwrap_or_default();
                done.push((os, track.tween));
            }
        }

        for (&handle, state) in &mut self.tweens {
            if let Some(timer) = state.timer.as_mut() {
                timer.tick(dt);
                if timer.is_complete() {
                    done.push((timer.overshoot(), handle));
                }
            }
        }

        // Largest overshoot finished earliest.
        done.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        done.into_iter()
            .filter_map(|(_, handle)| self.tweens.remove(&handle)?.on_complete)
            .collect()
    }

    fn supersede(&mut self, key: TrackKey) {
        let Some(old) = self.tracks.remove(&key) else {
            return;
        };
        self.superseded += 1;
        if let Some(state) = self.tweens.get_mut(&old.tween) {
            state.live_tracks = state.live_tracks.saturating_sub(1);
            if state.live_tracks == 0 && state.timer.is_none() {
                crate::trace!(tween = old.tween, "tween fully superseded");
                self.tweens.remove(&old.tween);
            }
        }
    }

    fn alloc_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl AnimationProvider for Tweener {
    fn set(&mut self, target: &Target, properties: &PropertyMap) {
        let ids = self.scene.resolve(target);
        if ids.is_empty() {
            crate::trace!(tween_target = ?target, "set on empty target");
            return;
        }
        for id in ids {
            for (property, value) in properties.iter() {
                self.supersede((id, property));
                self.scene.write(id, property, value);
            }
        }
    }

    fn animate(&mut self, step: AnimationStep) -> Option<TweenHandle> {
        let fade = Fade::new(step.duration).easing(step.easing);

        if step.target == Target::Timer {
            let handle = self.alloc_handle();
            self.tweens.insert(
                handle,
                TweenState {
                    live_tracks: 0,
                    timer: Some(delay(step.delay, fade)),
                    on_complete: step.on_complete,
                },
            );
            return Some(TweenHandle(handle));
        }

        let ids = self.scene.resolve(&step.target);
        if ids.is_empty() {
            crate::trace!(tween_target = ?step.target, "animate on empty target");
            return None;
        }

        let offsets = match step.stagger {
            Some(stagger) => stagger.offsets(ids.len()),
            None => vec![Duration::ZERO; ids.len()],
        };
        let handle = self.alloc_handle();

        let mut live_tracks = 0;
        for (&id, offset) in ids.iter().zip(offsets) {
            for (property, to) in step.properties.iter() {
                self.supersede((id, property));
                self.tracks.insert(
                    (id, property),
                    Track {
                        tween: handle,
                        clock: delay(step.delay.saturating_add(offset), fade),
                        from: None,
                        to,
                    },
                );
                live_tracks += 1;
            }
        }

        // Property-less tweens still run for their full span.
        let timer = (live_tracks == 0).then(|| {
            let span = step.span(ids.len()).saturating_sub(step.duration);
            delay(span, fade)
        });

        self.tweens.insert(
            handle,
            TweenState {
                live_tracks,
                timer,
                on_complete: step.on_complete,
            },
        );
        Some(TweenHandle(handle))
    }
}
