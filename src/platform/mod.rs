//! Platform bindings
//!
//! The simulation is platform-free; this layer adapts it to a host:
//! - `web` (wasm32): JavaScript-facing game handle, LocalStorage best score,
//!   lifecycle events forwarded to a JS callback

#[cfg(target_arch = "wasm32")]
pub mod web;
