//! Girru engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the viewer
//! binary: window/event loop, GPU context, static geometry, shader
//! pipelines, and the per-frame render contract.

pub mod device;
pub mod window;
pub mod core;

pub mod error;
pub mod logging;
pub mod mesh;
pub mod render;
pub mod shader;
pub mod time;
