#![forbid(unsafe_code)]

//! Animated full-screen navigation menu.
//!
//! A header collapses into a full-viewport overlay through a choreographed
//! open timeline and back through a close timeline, while a stack of image
//! layers tilts and parallax-shifts with the pointer.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use navfx_core::event::ListenerRegistry;
//! use navfx_core::geometry::Viewport;
//! use navfx_menu::{MenuController, MenuState, MountConfig};
//!
//! let registry = ListenerRegistry::new();
//! let mut menu = MenuController::with_scene(MountConfig::default(), Viewport::new(1280.0, 800.0));
//! menu.mount(&registry);
//! menu.request_open();
//! while menu.state() != MenuState::Open {
//!     menu.advance(Duration::from_millis(16));
//! }
//! assert_eq!(menu.button_label().as_str(), "Close");
//! ```

pub mod config;
pub mod content;
pub mod controller;
pub mod dom;
pub mod layers;
pub mod layout;
pub mod machine;
pub mod pointer;
pub mod timeline;
pub mod transform;

pub use config::{Breakpoint, ConfigError, MenuTimings, MountConfig};
pub use content::{FooterItem, FooterSection, NavContent, NavLink};
pub use controller::MenuController;
pub use machine::{ButtonLabel, MenuState};
