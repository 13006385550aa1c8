#![forbid(unsafe_code)]

//! Element registry with computed styles.
//!
//! The [`Scene`] stands in for the document: elements carry selector tags
//! and a computed style map. A [`Target`] resolves to element ids in
//! insertion (document) order. Removed elements never resolve again, which
//! is how stale references become no-ops.
//!
//! Writes are recorded in a dirty set so a host can ship only the values
//! that changed since it last looked.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use smallvec::SmallVec;

use crate::provider::Target;
use crate::style::{Property, Value};

/// Stable identifier of an element in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl ElementId {
    /// Raw index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Element {
    tags: SmallVec<[Cow<'static, str>; 2]>,
    style: BTreeMap<Property, Value>,
}

/// A set of styled, selector-addressable elements.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    slots: Vec<Option<Element>>,
    dirty: BTreeSet<(ElementId, Property)>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element carrying the given selector tags.
    pub fn insert<I, S>(&mut self, tags: I) -> ElementId
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        let id = ElementId(self.slots.len() as u32);
        self.slots.push(Some(Element {
            tags: tags.into_iter().map(Into::into).collect(),
            style: BTreeMap::new(),
        }));
        id
    }

    /// Remove an element. Returns `false` if it was already gone.
    pub fn remove(&mut self, id: ElementId) -> bool {
        let removed = self
            .slots
            .get_mut(id.0 as usize)
            .and_then(Option::take)
            .is_some();
        if removed {
            self.dirty.retain(|(e, _)| *e != id);
        }
        removed
    }

    /// Whether `id` refers to a live element.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.element(id).is_some()
    }

    /// Number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Whether the scene has no live elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve a target to live element ids in document order.
    ///
    /// [`Target::Timer`] resolves to nothing.
    #[must_use]
    pub fn resolve(&self, target: &Target) -> SmallVec<[ElementId; 8]> {
        match target {
            Target::Timer => SmallVec::new(),
            Target::Element(id) => self.contains(*id).then_some(*id).into_iter().collect(),
            Target::Elements(ids) => ids.iter().copied().filter(|id| self.contains(*id)).collect(),
            Target::Selector(selector) => self
                .slots
                .iter()
                .enumerate()
                .filter_map(|(i, slot)| {
                    let el = slot.as_ref()?;
                    el.tags
                        .iter()
                        .any(|t| t == selector)
                        .then_some(ElementId(i as u32))
                })
                .collect(),
        }
    }

    /// Current computed value of `property` on `id`.
    ///
    /// Unset properties report [`Value::initial`]; missing elements report `None`.
    #[must_use]
    pub fn computed(&self, id: ElementId, property: Property) -> Option<Value> {
        let el = self.element(id)?;
        Some(
            el.style
                .get(&property)
                .copied()
                .unwrap_or_else(|| Value::initial(property)),
        )
    }

    /// Write a value. Missing elements are ignored.
    pub fn write(&mut self, id: ElementId, property: Property, value: Value) {
        let Some(el) = self.slots.get_mut(id.0 as usize).and_then(Option::as_mut) else {
            return;
        };
        if el.style.insert(property, value) != Some(value) {
            self.dirty.insert((id, property));
        }
    }

    /// Tags of a live element.
    #[must_use]
    pub fn tags(&self, id: ElementId) -> Option<&[Cow<'static, str>]> {
        self.element(id).map(|el| el.tags.as_slice())
    }

    /// Drain the set of (element, property) pairs written since the last call.
    pub fn take_dirty(&mut self) -> Vec<(ElementId, Property)> {
        std::mem::take(&mut self.dirty).into_iter().collect()
    }

    fn element(&self, id: ElementId) -> Option<&Element> {
        self.slots.get(id.0 as usize).and_then(Option::as_ref)
    }
}
