//! Platform abstraction layer
//!
//! The browser binding exposes the frame driver contract to JavaScript:
//! `update(dt)` then `frame_json()` every animation frame, and
//! `handle_input(key, pressed)` on every key transition.

#[cfg(target_arch = "wasm32")]
pub mod web;
