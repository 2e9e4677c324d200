//! Platform abstraction layer
//!
//! Handles the pieces that sit between the deterministic session and a host:
//! - Fixed-step clock driving `tick` from wall-clock frames
//! - Browser bindings (wasm32 only)

pub mod clock;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use clock::SessionClock;
