#![forbid(unsafe_code)]

//! Animatable style properties and their values.
//!
//! A [`Value`] is either continuous (numbers, lengths, clip polygons,
//! transforms) and interpolated componentwise, or discrete (`auto`,
//! pointer-events) and snapped to the target when a tween starts.
//! Every value renders to the CSS text a browser host would apply.

use std::fmt;

use smallvec::SmallVec;

/// A style property the menu animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    /// `clip-path`.
    ClipPath,
    /// `top`.
    Top,
    /// `right`.
    Right,
    /// `opacity`.
    Opacity,
    /// Vertical translate offset in px (`y`).
    TranslateY,
    /// `pointer-events`.
    PointerEvents,
    /// `transform`.
    Transform,
}

impl Property {
    /// CSS property name.
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::ClipPath => "clip-path",
            Self::Top => "top",
            Self::Right => "right",
            Self::Opacity => "opacity",
            Self::TranslateY => "translate",
            Self::PointerEvents => "pointer-events",
            Self::Transform => "transform",
        }
    }

    /// CSS text for `value` when applied to this property.
    #[must_use]
    pub fn css_value(self, value: &Value) -> String {
        match (self, value) {
            (Self::TranslateY, Value::Number(y)) => format!("0 {y}px"),
            _ => value.to_string(),
        }
    }
}

/// A CSS length expressed as `calc(percent% + px)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Length {
    /// Percentage component.
    pub percent: f32,
    /// Pixel component.
    pub px: f32,
}

impl Length {
    /// A pure percentage.
    #[must_use]
    pub const fn percent(percent: f32) -> Self {
        Self { percent, px: 0.0 }
    }

    /// A pure pixel length.
    #[must_use]
    pub const fn px(px: f32) -> Self {
        Self { percent: 0.0, px }
    }

    /// A mixed `calc()` length.
    #[must_use]
    pub const fn calc(percent: f32, px: f32) -> Self {
        Self { percent, px }
    }

    fn lerp(self, to: Self, t: f32) -> Self {
        Self {
            percent: lerp(self.percent, to.percent, t),
            px: lerp(self.px, to.px, t),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (pct, px) = (self.percent, self.px);
        if pct == 0.0 && px == 0.0 {
            write!(f, "0")
        } else if px == 0.0 {
            write!(f, "{pct}%")
        } else if pct == 0.0 {
            write!(f, "{px}px")
        } else if px < 0.0 {
            write!(f, "calc({pct}% - {}px)", -px)
        } else {
            write!(f, "calc({pct}% + {px}px)")
        }
    }
}

/// A four-vertex clip polygon in percent coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polygon(pub [(f32, f32); 4]);

impl Polygon {
    fn lerp(self, to: Self, t: f32) -> Self {
        let mut out = self.0;
        for (p, q) in out.iter_mut().zip(to.0) {
            p.0 = lerp(p.0, q.0, t);
            p.1 = lerp(p.1, q.1, t);
        }
        Self(out)
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "polygon(")?;
        for (i, (x, y)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}% {y}%")?;
        }
        write!(f, ")")
    }
}

/// Axis-angle rotation, `rotate3d(x, y, z, angle)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotate3d {
    /// Axis x component.
    pub x: f32,
    /// Axis y component.
    pub y: f32,
    /// Axis z component.
    pub z: f32,
    /// Rotation angle in degrees.
    pub angle_deg: f32,
}

/// A 2D translate + scale, optionally combined with a 3D rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Horizontal translate.
    pub translate_x: Length,
    /// Vertical translate.
    pub translate_y: Length,
    /// Uniform scale.
    pub scale: f32,
    /// Rotation applied after translate/scale.
    pub rotate: Rotate3d,
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        translate_x: Length::px(0.0),
        translate_y: Length::px(0.0),
        scale: 1.0,
        rotate: Rotate3d {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            angle_deg: 0.0,
        },
    };

    /// A pure 3D rotation.
    #[must_use]
    pub const fn rotate3d(x: f32, y: f32, z: f32, angle_deg: f32) -> Self {
        Self {
            rotate: Rotate3d { x, y, z, angle_deg },
            ..Self::IDENTITY
        }
    }

    /// A translate followed by a uniform scale.
    #[must_use]
    pub const fn translate_scale(translate_x: Length, translate_y: Length, scale: f32) -> Self {
        Self {
            translate_x,
            translate_y,
            scale,
            ..Self::IDENTITY
        }
    }

    fn lerp(self, to: Self, t: f32) -> Self {
        Self {
            translate_x: self.translate_x.lerp(to.translate_x, t),
            translate_y: self.translate_y.lerp(to.translate_y, t),
            scale: lerp(self.scale, to.scale, t),
            rotate: Rotate3d {
                x: lerp(self.rotate.x, to.rotate.x, t),
                y: lerp(self.rotate.y, to.rotate.y, t),
                z: lerp(self.rotate.z, to.rotate.z, t),
                angle_deg: lerp(self.rotate.angle_deg, to.rotate.angle_deg, t),
            },
        }
    }

    fn has_translate(&self) -> bool {
        self.translate_x != Length::default() || self.translate_y != Length::default()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: SmallVec<[String; 3]> = SmallVec::new();
        if self.has_translate() {
            parts.push(format!(
                "translate({}, {})",
                self.translate_x, self.translate_y
            ));
        }
        if self.scale != 1.0 {
            parts.push(format!("scale({})", self.scale));
        }
        let r = self.rotate;
        if r.angle_deg != 0.0 {
            parts.push(format!(
                "rotate3d({}, {}, {}, {}deg)",
                r.x, r.y, r.z, r.angle_deg
            ));
        }
        if parts.is_empty() {
            return write!(f, "none");
        }
        write!(f, "{}", parts.join(" "))
    }
}

/// `pointer-events` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvents {
    /// Element does not receive pointer input.
    None,
    /// Element receives all pointer input.
    All,
}

/// A property value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Unitless number (opacity, px offsets).
    Number(f32),
    /// Length with percent and px parts.
    Length(Length),
    /// The `auto` keyword.
    Auto,
    /// Clip polygon.
    Clip(Polygon),
    /// Transform list.
    Transform(Transform),
    /// Pointer-events keyword.
    Pointer(PointerEvents),
}

impl Value {
    /// Interpolate from `self` toward `to` at eased progress `t`.
    ///
    /// Discrete pairs snap to `to` for any `t`. At `t >= 1` the result is
    /// exactly `to`.
    #[must_use]
    pub fn interpolate(&self, to: &Self, t: f32) -> Self {
        if t >= 1.0 {
            return *to;
        }
        match (*self, *to) {
            (Self::Number(a), Self::Number(b)) => Self::Number(lerp(a, b, t)),
            (Self::Length(a), Self::Length(b)) => Self::Length(a.lerp(b, t)),
            (Self::Clip(a), Self::Clip(b)) => Self::Clip(a.lerp(b, t)),
            (Self::Transform(a), Self::Transform(b)) => Self::Transform(a.lerp(b, t)),
            _ => *to,
        }
    }

    /// The value a property has before anything sets it.
    #[must_use]
    pub fn initial(property: Property) -> Self {
        match property {
            Property::ClipPath => Self::Clip(Polygon([
                (0.0, 0.0),
                (100.0, 0.0),
                (100.0, 100.0),
                (0.0, 100.0),
            ])),
            Property::Top | Property::Right => Self::Auto,
            Property::Opacity => Self::Number(1.0),
            Property::TranslateY => Self::Number(0.0),
            Property::PointerEvents => Self::Pointer(PointerEvents::All),
            Property::Transform => Self::Transform(Transform::IDENTITY),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Length(l) => write!(f, "{l}"),
            Self::Auto => write!(f, "auto"),
            Self::Clip(p) => write!(f, "{p}"),
            Self::Transform(t) => write!(f, "{t}"),
            Self::Pointer(PointerEvents::None) => write!(f, "none"),
            Self::Pointer(PointerEvents::All) => write!(f, "all"),
        }
    }
}

/// An ordered property → value map. Later inserts overwrite earlier ones.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyMap {
    entries: SmallVec<[(Property, Value); 4]>,
}

impl PropertyMap {
    /// Empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, property: Property, value: Value) -> Self {
        self.insert(property, value);
        self
    }

    /// Insert or overwrite a property.
    pub fn insert(&mut self, property: Property, value: Value) {
        if let Some(slot) = self.entries.iter_mut().find(|(p, _)| *p == property) {
            slot.1 = value;
        } else {
            self.entries.push((property, value));
        }
    }

    /// Look up a property.
    #[must_use]
    pub fn get(&self, property: Property) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v)
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Property, Value)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Property, Value)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (Property, Value)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (p, v) in iter {
            map.insert(p, v);
        }
        map
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_renders_css() {
        let p = Polygon([(0.0, 100.0), (100.0, 100.0), (100.0, 0.0), (0.0, 0.0)]);
        assert_eq!(
            p.to_string(),
            "polygon(0% 100%, 100% 100%, 100% 0%, 0% 0%)"
        );
    }

    #[test]
    fn layer_transform_renders_calc() {
        let t = Transform::translate_scale(
            Length::calc(-50.0, 3.0),
            Length::calc(-50.0, -2.5),
            0.81,
        );
        assert_eq!(
            t.to_string(),
            "translate(calc(-50% + 3px), calc(-50% - 2.5px)) scale(0.81)"
        );
    }

    #[test]
    fn rotate_renders_rotate3d() {
        let t = Transform::rotate3d(4.0, -2.0, 0.0, 15.0);
        assert_eq!(t.to_string(), "rotate3d(4, -2, 0, 15deg)");
        assert_eq!(Transform::IDENTITY.to_string(), "none");
    }

    #[test]
    fn lengths_render() {
        assert_eq!(Value::Length(Length::percent(150.0)).to_string(), "150%");
        assert_eq!(Value::Length(Length::px(-300.0)).to_string(), "-300px");
        assert_eq!(Value::Length(Length::percent(0.0)).to_string(), "0");
    }

    #[test]
    fn translate_y_renders_as_translate_pair() {
        assert_eq!(Property::TranslateY.css_value(&Value::Number(40.0)), "0 40px");
        assert_eq!(Property::Opacity.css_value(&Value::Number(0.5)), "0.5");
    }

    #[test]
    fn numbers_interpolate() {
        let v = Value::Number(50.0).interpolate(&Value::Number(0.0), 0.5);
        assert_eq!(v, Value::Number(25.0));
    }

    #[test]
    fn polygon_interpolates_per_vertex() {
        let a = Value::Clip(Polygon([(0.0, 100.0); 4]));
        let b = Value::Clip(Polygon([(0.0, 0.0); 4]));
        match a.interpolate(&b, 0.25) {
            Value::Clip(p) => assert!(p.0.iter().all(|&(_, y)| (y - 75.0).abs() < 1e-4)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn discrete_values_snap() {
        let v = Value::Auto.interpolate(&Value::Length(Length::percent(50.0)), 0.0);
        assert_eq!(v, Value::Length(Length::percent(50.0)));
        let p = Value::Pointer(PointerEvents::None)
            .interpolate(&Value::Pointer(PointerEvents::All), 0.1);
        assert_eq!(p, Value::Pointer(PointerEvents::All));
        let auto = Value::Auto.interpolate(&Value::Number(1.0), 0.5);
        assert_eq!(auto, Value::Number(1.0));
    }

    #[test]
    fn property_map_overwrites() {
        let map = PropertyMap::new()
            .with(Property::Opacity, Value::Number(0.0))
            .with(Property::Opacity, Value::Number(1.0));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(Property::Opacity), Some(&Value::Number(1.0)));
    }
}
