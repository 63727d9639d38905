//! Shader pipelines.
//!
//! A [`ShaderPipeline`] starts unlinked, and [`ShaderPipeline::load`]
//! takes it to the linked state: both WGSL stage sources are compiled
//! independently through the naga front end, then linked by resolving one
//! vertex and one fragment entry point. The wgpu pipeline object itself
//! is realized lazily against the surface format on first use.

mod compile;
mod pipeline;
mod stage;

pub use pipeline::ShaderPipeline;
pub use stage::ShaderStage;
