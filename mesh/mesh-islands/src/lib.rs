//! Topology reconstruction for unindexed triangle soups.
//!
//! A triangle soup stores every face as three free-standing corners, with no
//! shared vertices and no adjacency. This crate recovers:
//!
//! - **Islands**: maximal sets of faces connected through shared edges of
//!   opposite winding ([`find_islands`], [`isolated_geometries`])
//! - **Surfaces**: maximal contiguous patches of faces with equal normals
//!   ([`surfaces`], [`surfaces_sorted_by_area`])
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with zero Bevy dependencies.
//!
//! # Example
//!
//! ```
//! use mesh_types::{TriangleSoup, unit_cube};
//! use mesh_islands::{isolated_geometries, surfaces_sorted_by_area, TopologyParams};
//!
//! let params = TopologyParams::default();
//!
//! // A closed cube is a single island
//! let cube = unit_cube();
//! let islands = isolated_geometries(&cube, &params).unwrap();
//! assert_eq!(islands.len(), 1);
//!
//! // with six flat sides
//! let sides = surfaces_sorted_by_area(&cube, &params).unwrap();
//! assert_eq!(sides.len(), 6);
//! ```
//!
//! # Algorithm
//!
//! 1. Corners are grouped into vertex identity classes ([`VertexIndex`])
//! 2. Every half-edge collects the half-edges running the opposite way
//!    between the same two vertices on other faces
//! 3. Half-edges with a single candidate are paired; when only ambiguous
//!    half-edges remain, the candidate pair folding farthest from flat is
//!    dropped and pairing resumes
//! 4. Every pairing merges the two faces' islands in a union-find
//!
//! Faces whose corners collapse onto fewer than three vertices take no part
//! and belong to no island.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod candidates;
mod error;
mod flood;
mod half_edge;
mod islands;
mod params;
mod resolve;
mod result;
mod surfaces;
mod tracker;
mod vertex_index;

pub use error::{IslandError, IslandResult};
pub use flood::FaceGraph;
pub use half_edge::HalfEdge;
pub use islands::{find_islands, isolated_geometries};
pub use params::{TopologyParams, VertexIdentity};
pub use result::{IslandPartition, ResolveStats};
pub use surfaces::{Surface, surfaces, surfaces_sorted_by_area};
pub use vertex_index::VertexIndex;
