//! Core engine-facing contracts.
//!
//! This module defines the stable interface between the runtime (platform
//! loop) and the application: the `App` trait and the per-frame context
//! it is handed.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
