#![forbid(unsafe_code)]

//! Resting placement of the moving layers.
//!
//! While the menu is closed, layers 1–3 wait off-screen. Where they wait
//! depends on the layout: beside the viewport's right edge in the compact
//! layout, below the bottom edge otherwise. Layer 0 is never repositioned
//! here.

use navfx_core::style::{Length, Property, PropertyMap, Value};

use crate::config::Breakpoint;

/// Where the moving layers rest while the menu is closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementSpec {
    /// `top` value.
    pub top: Value,
    /// `right` value.
    pub right: Value,
}

impl PlacementSpec {
    /// The placement as a property set.
    #[must_use]
    pub fn to_properties(&self) -> PropertyMap {
        PropertyMap::new()
            .with(Property::Top, self.top)
            .with(Property::Right, self.right)
    }
}

/// Maps the compact-layout flag to a resting placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutPolicy {
    breakpoint: Breakpoint,
}

impl LayoutPolicy {
    /// Policy using `breakpoint` to decide compactness.
    #[must_use]
    pub const fn new(breakpoint: Breakpoint) -> Self {
        Self { breakpoint }
    }

    /// Whether a viewport of `width` is compact.
    #[must_use]
    pub fn is_compact(&self, width: f32) -> bool {
        self.breakpoint.is_compact(width)
    }

    /// Resting placement for layers 1–3.
    ///
    /// The open timeline animates only `top` in both layouts, so a compact
    /// layer keeps `right: -50%` while open. Both layouts open the same way.
    #[must_use]
    pub fn resting_position(&self, compact: bool) -> PlacementSpec {
        if compact {
            // Anchored off the right edge, vertically centered.
            PlacementSpec {
                top: Value::Length(Length::percent(50.0)),
                right: Value::Length(Length::percent(-50.0)),
            }
        } else {
            // Below the viewport.
            PlacementSpec {
                top: Value::Length(Length::percent(150.0)),
                right: Value::Auto,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policies_are_distinct() {
        let policy = LayoutPolicy::default();
        assert_ne!(policy.resting_position(true), policy.resting_position(false));
    }

    #[test]
    fn non_compact_rests_below() {
        let spec = LayoutPolicy::default().resting_position(false);
        assert_eq!(spec.top, Value::Length(Length::percent(150.0)));
        assert_eq!(spec.right, Value::Auto);
    }

    #[test]
    fn compact_rests_right() {
        let props = LayoutPolicy::default().resting_position(true).to_properties();
        assert_eq!(
            props.get(Property::Right),
            Some(&Value::Length(Length::percent(-50.0)))
        );
        assert_eq!(
            props.get(Property::Top),
            Some(&Value::Length(Length::percent(50.0)))
        );
    }

    #[test]
    fn compactness_follows_breakpoint() {
        let policy = LayoutPolicy::new(Breakpoint(1024));
        assert!(policy.is_compact(1000.0));
        assert!(!policy.is_compact(1280.0));
    }
}
