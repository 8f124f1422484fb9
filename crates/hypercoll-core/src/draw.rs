//! Drawing primitives: the [`Surface`] capability, the recording [`Canvas`]
//! and text measurement.
//!
//! # Overview
//!
//! - [`Surface`] - Immediate-mode path, transform and paint operations
//! - [`TransformGuard`] - Scoped save/restore of surface state
//! - [`Canvas`] - A [`Surface`] that records [`DrawOp`]s and exports SVG
//! - [`TextEngine`] - Text metrics and glyph outlines, with a font-backed
//!   [`CosmicTextEngine`] and a deterministic [`HeuristicTextEngine`]

mod canvas;
mod export;
mod surface;
mod text;

pub use canvas::{Canvas, DrawOp};
pub use surface::{Surface, TransformGuard};
pub use text::{
    CosmicTextEngine, FontSlant, FontSpec, FontWeight, HeuristicTextEngine, TextEngine,
    TextExtents,
};
