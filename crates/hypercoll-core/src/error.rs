//! Error types for drawing surface operations.

use std::io;

use thiserror::Error;

/// Errors raised by a [`TextEngine`](crate::draw::TextEngine).
#[derive(Debug, Error)]
pub enum TextError {
    /// The engine produced no glyphs for non-empty text, so no metrics exist.
    #[error("unable to measure `{text}` with font family `{family}`")]
    Unmeasurable { text: String, family: String },
}

/// Errors raised by a [`Surface`](crate::draw::Surface).
#[derive(Debug, Error)]
pub enum DrawError {
    #[error("Text error: {0}")]
    Text(#[from] TextError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("surface has already been finished")]
    AlreadyFinished,
}
