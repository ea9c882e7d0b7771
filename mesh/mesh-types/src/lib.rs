//! Core mesh types for CortenForge.
//!
//! This crate provides the foundational types for triangle soup processing:
//!
//! - [`TriangleSoup`] - An unindexed triangle list with optional per-corner
//!   normals and colors
//! - [`Triangle`] - A concrete triangle with vertex positions
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Other game engines
//!
//! # Units
//!
//! This library is **unit-agnostic**. Positions and normals are `f64`,
//! colors are `f32` in `[0, 1]`.
//!
//! # Winding
//!
//! Face winding is **counter-clockwise (CCW) when viewed from outside**.
//! Normals point outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use mesh_types::TriangleSoup;
//!
//! let soup = TriangleSoup::from_positions(vec![
//!     0.0, 0.0, 0.0, //
//!     1.0, 0.0, 0.0, //
//!     0.0, 1.0, 0.0,
//! ]);
//!
//! assert_eq!(soup.face_count(), 1);
//! assert!(!soup.is_indexed());
//! ```

#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod soup;
mod triangle;

pub use soup::{TriangleSoup, unit_cube};
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
