//! Error type for the renderer's fallible edges.
//!
//! Intersection, scattering and integration are infallible; only camera
//! configuration, scene assembly and image output can fail.

use thiserror::Error;

/// Errors that can occur while configuring or running a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid camera configuration: {0}")]
    InvalidConfig(String),

    #[error("Primitive references unknown material #{0}")]
    UnknownMaterial(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
