//! HyperColl Core Types and Definitions
//!
//! This crate provides the foundational pieces the HyperColl renderer is built
//! on. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Polar helpers and the Bézier bulge primitives ([`geometry`] module)
//! - **Draw**: The drawing surface capability, the recording [`draw::Canvas`]
//!   and its SVG export, and text measurement ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;

mod error;

pub use error::{DrawError, TextError};
