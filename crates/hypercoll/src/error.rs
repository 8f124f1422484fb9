//! Error types for HyperColl operations.
//!
//! This module provides the main error type [`HyperCollError`]. Configuration
//! and reference errors abort the current call before anything is drawn;
//! surface failures are wrapped in [`HyperCollError::Draw`].

use thiserror::Error;

use hypercoll_core::DrawError;

/// The main error type for HyperColl operations.
#[derive(Debug, Error)]
pub enum HyperCollError {
    #[error("label set is empty")]
    EmptyLabelSet,

    #[error("label `{0}` appears more than once in the label set")]
    DuplicateLabel(String),

    #[error("unknown label `{0}`")]
    UnknownLabel(String),

    #[error("label `{0}` appears more than once in one collection")]
    DuplicateMember(String),

    #[error("collection {0} has no members")]
    EmptyCollection(usize),

    #[error("label `{0}` has no sector property")]
    MissingProperty(String),

    #[error("no style defined for property `{0}`")]
    MissingStyle(String),

    #[error("edge order refers to collection {index}, but only {count} collections exist")]
    InvalidEdgeOrder { index: usize, count: usize },

    #[error("color palette is empty")]
    EmptyPalette,

    #[error("Draw error: {0}")]
    Draw(#[from] DrawError),
}
