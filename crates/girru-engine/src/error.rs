//! Engine error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::shader::ShaderStage;

/// Errors raised while setting up GPU resources or the render loop.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Window or GPU context creation failed.
    #[error("graphics context initialization failed: {0}")]
    ContextInit(String),

    /// A GPU resource could not be created, or its input data was rejected.
    #[error("resource creation failed: {0}")]
    ResourceCreation(String),

    /// A shader stage or pipeline failed to build.
    #[error(transparent)]
    Shader(#[from] ShaderError),
}

/// Errors raised while loading, compiling, or using a shader pipeline.
#[derive(Debug, Error)]
pub enum ShaderError {
    /// A stage source file could not be read.
    #[error("failed to read {stage} shader source {path}: {source}")]
    Io {
        stage: ShaderStage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One stage failed to parse or validate. `message` carries the
    /// compiler diagnostic verbatim.
    #[error("{stage} shader failed to compile:\n{message}")]
    Compile { stage: ShaderStage, message: String },

    /// Both stages compiled but could not be combined into a program.
    #[error("shader program failed to link: {message}")]
    Link { message: String },

    /// The pipeline was used for drawing before a successful `load`.
    #[error("shader pipeline is not linked")]
    NotLinked,
}
