//! Engine error taxonomy.
//!
//! Exceptional failures only: a refused focus change is a `false` return,
//! not an error, while a refused shape creation is. Group-membership
//! policies (minimum size, no nesting) belong to the hosting editor and
//! never surface here.

use thiserror::Error;

use crate::event::PreventReason;

#[derive(Error, Debug)]
pub enum CoreError {
    /// The before-append hook prevented the shape creation.
    #[error("creating shape was prevented: {reason}")]
    ShapeCreationPrevented { reason: PreventReason },

    /// A shape kind name that the engine does not know.
    #[error("unknown shape kind: {0}")]
    UnknownShapeKind(String),

    /// Texture installation failed outside of I/O or decoding.
    #[error("texture failed: {message}")]
    TextureFailed { message: String },

    /// I/O error probing a texture source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image metadata probe error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl CoreError {
    pub fn prevented(reason: PreventReason) -> Self {
        CoreError::ShapeCreationPrevented { reason }
    }

    pub fn unknown_shape_kind(kind: impl Into<String>) -> Self {
        CoreError::UnknownShapeKind(kind.into())
    }

    pub fn texture_failed(message: impl Into<String>) -> Self {
        CoreError::TextureFailed {
            message: message.into(),
        }
    }
}
