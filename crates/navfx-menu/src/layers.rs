#![forbid(unsafe_code)]

//! The fixed stack of image layers.
//!
//! Four layers, ordered back to front. Each has a fixed scale and a
//! parallax weight of `index + 1`, so the front layer always shifts the
//! most. Layer 0 never moves with the open/close choreography; layers 1–3
//! slide in and out and are positioned by the layout policy.

use navfx_core::geometry::Point;
use navfx_core::scene::ElementId;

/// Number of layers in the stack.
pub const LAYER_COUNT: usize = 4;

/// Layers 1–3, the ones that enter and leave with the menu.
pub const MOVING_LAYERS: usize = LAYER_COUNT - 1;

/// Per-layer scale, back to front.
pub const LAYER_SCALES: [f32; LAYER_COUNT] = [0.81, 0.84, 0.87, 0.9];

/// Divisor applied to the weighted pointer offset.
const PARALLAX_DIVISOR: f32 = 100.0;

/// One image layer's fixed parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    /// Position in the stack.
    pub index: usize,
    /// Scale applied with every transform.
    pub scale: f32,
}

impl Layer {
    /// Parallax multiplier, `index + 1`.
    #[must_use]
    pub fn weight(&self) -> f32 {
        (self.index + 1) as f32
    }

    /// Shift for a pointer offset `delta` from the viewport center.
    ///
    /// Opposes the pointer, scaled by weight.
    #[must_use]
    pub fn parallax(&self, delta: Point) -> Point {
        let w = self.weight();
        Point::new(-(delta.x * w) / PARALLAX_DIVISOR, -(delta.y * w) / PARALLAX_DIVISOR)
    }
}

/// The ordered, fixed-length layer stack.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSet {
    layers: [Layer; LAYER_COUNT],
}

impl LayerSet {
    /// The standard stack with [`LAYER_SCALES`].
    #[must_use]
    pub fn standard() -> Self {
        Self {
            layers: std::array::from_fn(|index| Layer {
                index,
                scale: LAYER_SCALES[index],
            }),
        }
    }

    /// Layers back to front.
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    /// Layer at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Always [`LAYER_COUNT`].
    #[must_use]
    pub const fn len(&self) -> usize {
        LAYER_COUNT
    }

    /// Never true.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl Default for LayerSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Element references for the layer container and each layer.
///
/// A `None` slot is a layer that is not (or no longer) mounted; transform
/// updates skip it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerRefs {
    /// The element that tilts as a whole.
    pub container: Option<ElementId>,
    /// One slot per layer, back to front.
    pub layers: [Option<ElementId>; LAYER_COUNT],
}

impl LayerRefs {
    /// Clear a layer slot, e.g. after its element unmounts.
    pub fn detach(&mut self, index: usize) -> Option<ElementId> {
        self.layers.get_mut(index).and_then(Option::take)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_stack() {
        let set = LayerSet::standard();
        assert_eq!(set.len(), 4);
        let scales: Vec<f32> = set.iter().map(|l| l.scale).collect();
        assert_eq!(scales, LAYER_SCALES.to_vec());
        let weights: Vec<f32> = set.iter().map(Layer::weight).collect();
        assert_eq!(weights, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn parallax_opposes_pointer() {
        let layer = LayerSet::standard().get(3).copied().unwrap();
        let p = layer.parallax(Point::new(100.0, -50.0));
        assert_eq!(p, Point::new(-4.0, 2.0));
    }

    #[test]
    fn detach_clears_slot_once() {
        let mut refs = LayerRefs::default();
        assert_eq!(refs.detach(2), None);
        assert_eq!(refs.detach(9), None);
    }
}
