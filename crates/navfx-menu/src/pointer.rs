#![forbid(unsafe_code)]

//! Latest pointer position and viewport center.
//!
//! Both values are overwritten on every sample; no history is kept.

use navfx_core::geometry::{Point, Viewport};

/// Latest raw pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    /// Latest position.
    pub position: Point,
}

/// Tilt/parallax reference origin: half the viewport size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportCenter {
    /// Center point.
    pub center: Point,
}

impl ViewportCenter {
    /// Center of `viewport`.
    #[must_use]
    pub fn of(viewport: Viewport) -> Self {
        Self {
            center: viewport.center(),
        }
    }
}

/// Tracks the pointer and the viewport center.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSampler {
    pointer: PointerState,
    center: ViewportCenter,
}

impl PointerSampler {
    /// Sampler for `viewport`, pointer at the origin.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            pointer: PointerState::default(),
            center: ViewportCenter::of(viewport),
        }
    }

    /// Record a pointer move.
    pub fn on_pointer_move(&mut self, position: Point) {
        self.pointer.position = position;
    }

    /// Recompute the center after a resize.
    pub fn on_resize(&mut self, viewport: Viewport) {
        self.center = ViewportCenter::of(viewport);
    }

    /// Latest pointer state.
    #[must_use]
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Current viewport center.
    #[must_use]
    pub fn center(&self) -> Point {
        self.center.center
    }

    /// Pointer offset from the center.
    #[must_use]
    pub fn offset(&self) -> Point {
        self.pointer.position.offset_from(self.center.center)
    }
}
