//! Coplanar surface grouping.
//!
//! Two faces belong to the same surface when they share a vertex and carry
//! the same normal at `precision` decimal digits. Surfaces are the connected
//! components of that relation.

use mesh_types::{Triangle, TriangleSoup};
use nalgebra::Vector3;
use tracing::info;

use crate::error::{IslandError, IslandResult, check_soup};
use crate::flood::FaceGraph;
use crate::params::TopologyParams;
use crate::vertex_index::VertexIndex;

/// A maximal patch of contiguous faces sharing one normal.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    /// Faces of the surface in discovery order.
    pub face_indices: Vec<usize>,

    /// Normal of the first face.
    pub normal: Vector3<f64>,

    /// Sum of the cross-product magnitudes of the faces (twice the area).
    ///
    /// Only set by [`surfaces_sorted_by_area`].
    pub area: Option<f64>,
}

impl Surface {
    /// Number of faces in the surface.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.face_indices.len()
    }
}

/// Group the faces of a triangle soup into coplanar surfaces.
///
/// Every face, degenerate ones included, ends up in exactly one surface.
/// Face normals are read from the first corner of each face.
///
/// # Errors
///
/// Returns [`IslandError::IndexedInput`] for indexed meshes,
/// [`IslandError::MissingNormals`] if the soup has no normals, and a length
/// error if the attribute buffers are malformed.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_islands::{surfaces, TopologyParams};
///
/// let found = surfaces(&unit_cube(), &TopologyParams::default()).unwrap();
/// assert_eq!(found.len(), 6);
/// assert!(found.iter().all(|s| s.face_count() == 2));
/// ```
pub fn surfaces(mesh: &TriangleSoup, params: &TopologyParams) -> IslandResult<Vec<Surface>> {
    if mesh.is_indexed() {
        return Err(IslandError::IndexedInput);
    }
    let Some(normals) = mesh.normals.as_deref() else {
        return Err(IslandError::MissingNormals);
    };
    check_soup(mesh)?;

    let face_count = mesh.face_count();
    info!(faces = face_count, "Grouping coplanar surfaces");

    let index = VertexIndex::build(&mesh.positions, params);
    let graph = coplanar_graph(&index, normals, face_count, params.scale());

    let surfaces: Vec<Surface> = graph
        .components()
        .into_iter()
        .map(|face_indices| {
            let first = face_indices[0] * 9;
            Surface {
                normal: Vector3::new(normals[first], normals[first + 1], normals[first + 2]),
                face_indices,
                area: None,
            }
        })
        .collect();

    info!(surfaces = surfaces.len(), "Surface grouping complete");

    Ok(surfaces)
}

/// Group faces into coplanar surfaces, largest first.
///
/// Each surface carries its `area`; surfaces of equal area keep their
/// discovery order.
///
/// # Errors
///
/// Same as [`surfaces`].
pub fn surfaces_sorted_by_area(
    mesh: &TriangleSoup,
    params: &TopologyParams,
) -> IslandResult<Vec<Surface>> {
    let mut found = surfaces(mesh, params)?;

    for surface in &mut found {
        let area = surface
            .face_indices
            .iter()
            .filter_map(|&face| Triangle::from_face_slice(&mesh.positions[face * 9..face * 9 + 9]))
            .map(|tri| tri.normal_unnormalized().norm())
            .sum();
        surface.area = Some(area);
    }

    let area_of = |s: &Surface| s.area.unwrap_or(0.0);
    found.sort_by(|a, b| area_of(b).total_cmp(&area_of(a)));

    Ok(found)
}

/// Link faces sharing a vertex whose normals agree at `scale`.
fn coplanar_graph(index: &VertexIndex, normals: &[f64], face_count: usize, scale: f64) -> FaceGraph {
    let mut graph = FaceGraph::new(face_count);
    let mut faces: Vec<usize> = Vec::new();

    for class in 0..index.class_count() {
        // Corners are in buffer order, so repeats of a face are adjacent
        faces.clear();
        faces.extend(index.corners(class).iter().map(|&corner| corner / 3));
        faces.dedup();

        for (i, &a) in faces.iter().enumerate() {
            for &b in &faces[i + 1..] {
                if normals_match(face_normal(normals, a), face_normal(normals, b), scale) {
                    graph.connect(a, b);
                }
            }
        }
    }

    graph
}

fn face_normal(normals: &[f64], face: usize) -> &[f64] {
    &normals[face * 9..face * 9 + 3]
}

/// Whether two normals agree once their componentwise difference is
/// rounded at `scale`.
fn normals_match(a: &[f64], b: &[f64], scale: f64) -> bool {
    let distance: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| ((x - y).abs() * scale).round())
        .sum();
    distance < 1.0
}
