#![forbid(unsafe_code)]

//! Pointer-driven tilt and parallax.
//!
//! Every pointer sample produces one fresh tween for the layer container
//! (a 3D tilt) and one per mounted layer (a parallax shift combined with
//! the layer's scale). The engine never cancels anything itself: issuing a
//! new tween for the same element and property retargets the running one.
//!
//! # Invariants
//!
//! 1. Offsets are always taken from the latest viewport center.
//! 2. Parallax magnitude is non-decreasing with layer index.
//! 3. A zero center component yields zero tilt on that axis.
//! 4. Unmounted layers (empty slots) are skipped for that sample.

use std::time::Duration;

use navfx_core::animation::POWER3_OUT;
use navfx_core::geometry::{Point, Viewport};
use navfx_core::provider::{AnimationProvider, AnimationStep, Target};
use navfx_core::scene::ElementId;
use navfx_core::style::{Length, Property, PropertyMap, Transform, Value};

use crate::layers::{Layer, LayerRefs, LayerSet};
use crate::pointer::PointerSampler;

/// Degrees of axis tilt at the viewport edge.
pub const TILT_GAIN: f32 = 20.0;

/// Fixed rotation angle around the tilt axis, in degrees.
pub const TILT_ANGLE_DEG: f32 = 15.0;

/// Axis components for the container rotation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tilt {
    /// Rotation axis x component (from vertical offset).
    pub x: f32,
    /// Rotation axis y component (from horizontal offset).
    pub y: f32,
}

impl Tilt {
    /// Tilt for pointer offset `delta` around `center`.
    #[must_use]
    pub fn from_offset(delta: Point, center: Point) -> Self {
        Self {
            x: ratio(delta.y, center.y) * TILT_GAIN,
            y: ratio(delta.x, center.x) * TILT_GAIN,
        }
    }

    /// The container transform for this tilt.
    #[must_use]
    pub fn transform(self) -> Transform {
        Transform::rotate3d(self.x, self.y, 0.0, TILT_ANGLE_DEG)
    }
}

fn ratio(offset: f32, half: f32) -> f32 {
    if half == 0.0 || !half.is_finite() {
        return 0.0;
    }
    offset / half
}

/// Centered transform of `layer` shifted by `shift` px.
#[must_use]
pub fn layer_transform(layer: &Layer, shift: Point) -> Transform {
    Transform::translate_scale(
        Length::calc(-50.0, shift.x),
        Length::calc(-50.0, shift.y),
        layer.scale,
    )
}

/// Computes and issues tilt and parallax tweens from pointer samples.
#[derive(Debug, Clone)]
pub struct TransformEngine {
    sampler: PointerSampler,
    layers: LayerSet,
    refs: LayerRefs,
    follow: Duration,
}

impl TransformEngine {
    /// Engine for `viewport`, animating over `follow`.
    #[must_use]
    pub fn new(viewport: Viewport, refs: LayerRefs, follow: Duration) -> Self {
        Self {
            sampler: PointerSampler::new(viewport),
            layers: LayerSet::standard(),
            refs,
            follow,
        }
    }

    /// The pointer sampler.
    #[must_use]
    pub fn sampler(&self) -> &PointerSampler {
        &self.sampler
    }

    /// The layer stack.
    #[must_use]
    pub fn layers(&self) -> &LayerSet {
        &self.layers
    }

    /// Current element references.
    #[must_use]
    pub fn refs(&self) -> &LayerRefs {
        &self.refs
    }

    /// Replace the element references.
    pub fn attach(&mut self, refs: LayerRefs) {
        self.refs = refs;
    }

    /// Forget a layer's element; later samples skip it.
    pub fn detach_layer(&mut self, index: usize) -> Option<ElementId> {
        self.refs.detach(index)
    }

    /// Recompute the center after a resize.
    pub fn on_resize(&mut self, viewport: Viewport) {
        self.sampler.on_resize(viewport);
    }

    /// Tilt for the current sample.
    #[must_use]
    pub fn tilt(&self) -> Tilt {
        Tilt::from_offset(self.sampler.offset(), self.sampler.center())
    }

    /// Per-layer transforms for the current sample, back to front.
    pub fn layer_transforms(&self) -> impl Iterator<Item = Transform> + '_ {
        let delta = self.sampler.offset();
        self.layers
            .iter()
            .map(move |layer| layer_transform(layer, layer.parallax(delta)))
    }

    /// Resting per-layer transforms (no parallax shift).
    pub fn baseline(&self) -> impl Iterator<Item = (usize, Transform)> + '_ {
        self.layers
            .iter()
            .map(|layer| (layer.index, layer_transform(layer, Point::default())))
    }

    /// Apply the resting transforms immediately.
    pub fn apply_baseline<P: AnimationProvider + ?Sized>(&self, provider: &mut P) {
        for (index, transform) in self.baseline() {
            let Some(id) = self.refs.layers[index] else {
                continue;
            };
            provider.set(&Target::Element(id), &transform_props(transform));
        }
    }

    /// Record a pointer sample and issue fresh tweens for the container and
    /// every mounted layer. Returns how many tweens the provider accepted.
    pub fn on_pointer_sample<P: AnimationProvider + ?Sized>(
        &mut self,
        provider: &mut P,
        position: Point,
    ) -> usize {
        self.sampler.on_pointer_move(position);
        let mut issued = 0;

        match self.refs.container {
            Some(id) => {
                let step = self.follow_step(Target::Element(id), self.tilt().transform());
                issued += usize::from(provider.animate(step).is_some());
            }
            None => {
                navfx_core::trace!("no layer container mounted");
            }
        }

        let transforms: Vec<Transform> = self.layer_transforms().collect();
        for (index, transform) in transforms.into_iter().enumerate() {
            let Some(id) = self.refs.layers[index] else {
                navfx_core::trace!(layer = index, "skipping unmounted layer");
                continue;
            };
            let step = self.follow_step(Target::Element(id), transform);
            if provider.animate(step).is_some() {
                issued += 1;
            } else {
                navfx_core::trace!(layer = index, "layer element is stale");
            }
        }
        issued
    }

    fn follow_step(&self, target: Target, transform: Transform) -> AnimationStep {
        AnimationStep::to(target, transform_props(transform))
            .duration(self.follow)
            .easing(POWER3_OUT)
    }
}

fn transform_props(transform: Transform) -> PropertyMap {
    PropertyMap::new().with(Property::Transform, Value::Transform(transform))
}
