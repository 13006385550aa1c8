#![forbid(unsafe_code)]

//! Core: animation primitives, style values, the animation provider
//! contract, and host event plumbing.

pub mod animation;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod provider;
pub mod scene;
pub mod style;
pub mod tweener;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, trace, warn};
