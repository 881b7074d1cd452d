#![allow(dead_code)]

//! Page effects — cosmetic behaviours expressed as small state machines and
//! geometry functions, independent of application data.
//!
//! Each behaviour stands alone; a host (browser binding, test, or renderer)
//! feeds it scroll/pointer/visibility observations and applies the styles it
//! returns. None of them has error states: missing elements are no-ops.

pub mod counter;
pub mod geometry;
pub mod motion;
pub mod navigation;
pub mod reveal;
pub mod ripple;
pub mod shortcut;
