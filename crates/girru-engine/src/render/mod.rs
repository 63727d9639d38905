//! GPU rendering subsystem.
//!
//! Draw code receives a [`RenderCtx`] (device/queue/format/viewport) and a
//! `wgpu::RenderPass`; binding state lives in the pass object passed
//! explicitly to bind/draw operations, never in ambient globals.

mod ctx;

pub use ctx::{RenderCtx, Viewport};
