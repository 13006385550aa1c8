#![forbid(unsafe_code)]

//! Host events and listener lifecycles.
//!
//! The embedding environment pushes [`HostEvent`]s. Components subscribe by
//! acquiring a [`Listener`] guard from the host's [`ListenerRegistry`];
//! dropping the guard deregisters it, so a component that owns its guards
//! cannot leak a listener past its own lifetime.
//!
//! The registry is single-threaded (`Rc`/`RefCell`), matching the host
//! event loop it models.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use bitflags::bitflags;

use crate::geometry::{Point, Viewport};

/// Raw input from the host environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// The pointer moved to this viewport position.
    PointerMove(Point),
    /// The viewport changed size.
    Resize(Viewport),
}

impl HostEvent {
    /// Which listener kind receives this event.
    #[must_use]
    pub const fn kind(&self) -> HostEventKind {
        match self {
            Self::PointerMove(_) => HostEventKind::PointerMove,
            Self::Resize(_) => HostEventKind::Resize,
        }
    }
}

/// A listenable event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEventKind {
    /// `mousemove` on the document body.
    PointerMove,
    /// `resize` on the window.
    Resize,
}

impl HostEventKind {
    const fn mask(self) -> EventMask {
        match self {
            Self::PointerMove => EventMask::POINTER_MOVE,
            Self::Resize => EventMask::RESIZE,
        }
    }
}

bitflags! {
    /// Set of event kinds that currently have at least one listener.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EventMask: u8 {
        /// Pointer movement.
        const POINTER_MOVE = 1 << 0;
        /// Viewport resize.
        const RESIZE       = 1 << 1;
    }
}

#[derive(Debug, Default)]
struct RegistryInner {
    next_id: u64,
    live: Vec<(u64, HostEventKind)>,
}

/// Host-side table of live listeners.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for `kind`. It stays live until the guard drops.
    #[must_use = "dropping the guard immediately deregisters the listener"]
    pub fn listen(&self, kind: HostEventKind) -> Listener {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.live.push((id, kind));
        crate::trace!(id, ?kind, "listener registered");
        Listener {
            id,
            kind,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Number of live listeners across all kinds.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.inner.borrow().live.len()
    }

    /// Kinds with at least one live listener.
    #[must_use]
    pub fn active_kinds(&self) -> EventMask {
        self.inner
            .borrow()
            .live
            .iter()
            .fold(EventMask::empty(), |mask, (_, kind)| mask | kind.mask())
    }

    /// Whether an event of this kind would reach anyone.
    #[must_use]
    pub fn is_listening(&self, kind: HostEventKind) -> bool {
        self.active_kinds().contains(kind.mask())
    }
}

/// Guard for one registered listener. Deregisters on drop.
#[derive(Debug)]
pub struct Listener {
    id: u64,
    kind: HostEventKind,
    registry: Weak<RefCell<RegistryInner>>,
}

impl Listener {
    /// The event kind this listener receives.
    #[must_use]
    pub const fn kind(&self) -> HostEventKind {
        self.kind
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Some(inner) = self.registry.upgrade() {
            inner.borrow_mut().live.retain(|(id, _)| *id != self.id);
            crate::trace!(id = self.id, "listener released");
        }
    }
}
