#![forbid(unsafe_code)]

//! Geometric primitives in CSS pixel space (origin at top-left).

/// A point in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Componentwise difference `self - origin`.
    #[inline]
    pub fn offset_from(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

/// Size of the host viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: f32,
    /// Height in CSS pixels.
    pub height: f32,
}

impl Viewport {
    /// Create a viewport of the given size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Half width and half height.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether either dimension is zero (or not a positive number).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_half_size() {
        assert_eq!(Viewport::new(1280.0, 720.0).center(), Point::new(640.0, 360.0));
    }

    #[test]
    fn offset_from_origin() {
        let p = Point::new(700.0, 300.0).offset_from(Point::new(640.0, 360.0));
        assert_eq!(p, Point::new(60.0, -60.0));
    }

    #[test]
    fn degenerate_viewports() {
        assert!(Viewport::new(0.0, 720.0).is_degenerate());
        assert!(Viewport::new(f32::NAN, 720.0).is_degenerate());
        assert!(!Viewport::new(1.0, 1.0).is_degenerate());
    }
}
