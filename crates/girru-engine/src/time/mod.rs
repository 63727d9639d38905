//! Time subsystem.
//!
//! Frame bookkeeping for diagnostics only: the render loop is paced by
//! presentation, never by anything in this module.

mod frame_stats;

pub use frame_stats::FrameStats;
