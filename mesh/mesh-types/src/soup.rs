//! Unindexed triangle soup.

use crate::Triangle;
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of floats a single face occupies in an unindexed attribute buffer.
pub(crate) const FLOATS_PER_FACE: usize = 9;

/// A triangle mesh stored as a flat list of corners.
///
/// This is the input and output type of the topology reconstruction in
/// `mesh-islands`. Faces carry no adjacency: face `f` is made of the three
/// consecutive corners `3f`, `3f + 1` and `3f + 2`, each of which owns its
/// own copy of the position and of every optional attribute.
///
/// # Memory Layout
///
/// - `positions`: `[x0, y0, z0, x1, y1, z1, ...]`, 9 floats per face
/// - `normals`: same layout as `positions`, optional
/// - `colors`: `[r0, g0, b0, ...]`, same layout as `positions`, optional
/// - `indices`: optional index buffer; when present the attribute buffers
///   hold one entry per shared vertex instead of one per corner
///
/// # Example
///
/// ```
/// use mesh_types::TriangleSoup;
///
/// let soup = TriangleSoup::from_positions(vec![
///     0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, // face 0
///     1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, // face 1
/// ]);
///
/// assert_eq!(soup.face_count(), 2);
/// assert_eq!(soup.corner_count(), 6);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriangleSoup {
    /// Corner positions, 9 floats per face.
    pub positions: Vec<f64>,

    /// Per-corner normals, parallel to `positions`.
    pub normals: Option<Vec<f64>>,

    /// Per-corner RGB colors, parallel to `positions`.
    pub colors: Option<Vec<f32>>,

    /// Shared-vertex index buffer. `None` for a true triangle soup.
    pub indices: Option<Vec<u32>>,
}

impl TriangleSoup {
    /// Create a new empty soup.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: None,
            colors: None,
            indices: None,
        }
    }

    /// Create an unindexed soup from a flat position buffer.
    #[inline]
    #[must_use]
    pub const fn from_positions(positions: Vec<f64>) -> Self {
        Self {
            positions,
            normals: None,
            colors: None,
            indices: None,
        }
    }

    /// Create an indexed mesh from shared vertex positions and face indices.
    ///
    /// Indexed meshes are not accepted by the topology reconstruction; call
    /// [`TriangleSoup::to_unindexed`] first.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::TriangleSoup;
    ///
    /// let positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0];
    /// let mesh = TriangleSoup::from_indexed(positions, vec![0, 1, 2, 1, 3, 2]);
    ///
    /// assert!(mesh.is_indexed());
    /// assert_eq!(mesh.face_count(), 2);
    /// ```
    #[inline]
    #[must_use]
    pub const fn from_indexed(positions: Vec<f64>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            normals: None,
            colors: None,
            indices: Some(indices),
        }
    }

    /// Attach a normal buffer.
    #[inline]
    #[must_use]
    pub fn with_normals(mut self, normals: Vec<f64>) -> Self {
        self.normals = Some(normals);
        self
    }

    /// Attach a color buffer.
    #[inline]
    #[must_use]
    pub fn with_colors(mut self, colors: Vec<f32>) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Whether the mesh carries an index buffer.
    #[inline]
    #[must_use]
    pub const fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    /// Number of triangles.
    ///
    /// Trailing floats that do not make up a whole face are ignored.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.positions.len() / FLOATS_PER_FACE,
        }
    }

    /// Number of face corners (three per face).
    #[inline]
    #[must_use]
    pub fn corner_count(&self) -> usize {
        self.face_count() * 3
    }

    /// Check if the soup has no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.face_count() == 0
    }

    /// Position of a face corner.
    ///
    /// Returns `None` if the corner is out of bounds or refers to a missing
    /// vertex.
    #[must_use]
    pub fn corner_position(&self, corner: usize) -> Option<Point3<f64>> {
        let vertex = self.vertex_of_corner(corner)?;
        let p = self.positions.get(vertex * 3..vertex * 3 + 3)?;
        Some(Point3::new(p[0], p[1], p[2]))
    }

    /// Get a triangle by face index with resolved positions.
    ///
    /// Returns `None` if the face index is out of bounds.
    #[must_use]
    pub fn triangle(&self, face: usize) -> Option<Triangle> {
        if face >= self.face_count() {
            return None;
        }
        Some(Triangle::new(
            self.corner_position(face * 3)?,
            self.corner_position(face * 3 + 1)?,
            self.corner_position(face * 3 + 2)?,
        ))
    }

    /// Iterate over all triangles with resolved positions.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.face_count()).filter_map(|face| self.triangle(face))
    }

    /// The normal attribute stored on the first corner of a face.
    ///
    /// Returns `None` if the soup has no normals or the face is out of bounds.
    #[must_use]
    pub fn face_normal_attribute(&self, face: usize) -> Option<Vector3<f64>> {
        let normals = self.normals.as_ref()?;
        let vertex = self.vertex_of_corner(face * 3)?;
        let n = normals.get(vertex * 3..vertex * 3 + 3)?;
        Some(Vector3::new(n[0], n[1], n[2]))
    }

    /// Compute the total surface area.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.triangles().map(|tri| tri.area()).sum()
    }

    /// Expand an indexed mesh into a flat soup.
    ///
    /// Every face gets its own copy of its three corners' positions and of
    /// the normals and colors, if present. Faces referencing a missing vertex
    /// are skipped. An attribute buffer that is too short for any referenced
    /// vertex is dropped from the result. Unindexed input is returned as a
    /// plain copy.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::TriangleSoup;
    ///
    /// let positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0];
    /// let mesh = TriangleSoup::from_indexed(positions, vec![0, 1, 2, 1, 3, 2]);
    ///
    /// let soup = mesh.to_unindexed();
    /// assert!(!soup.is_indexed());
    /// assert_eq!(soup.positions.len(), 18);
    /// ```
    #[must_use]
    pub fn to_unindexed(&self) -> Self {
        let Some(indices) = &self.indices else {
            return self.clone();
        };

        let face_count = indices.len() / 3;
        let mut positions = Vec::with_capacity(face_count * FLOATS_PER_FACE);
        let mut normals = self
            .normals
            .as_ref()
            .map(|_| Vec::with_capacity(face_count * FLOATS_PER_FACE));
        let mut colors = self
            .colors
            .as_ref()
            .map(|_| Vec::with_capacity(face_count * FLOATS_PER_FACE));

        for face in indices.chunks_exact(3) {
            let in_range = face
                .iter()
                .all(|&v| (v as usize) * 3 + 3 <= self.positions.len());
            if !in_range {
                continue;
            }

            for &v in face {
                let range = (v as usize) * 3..(v as usize) * 3 + 3;
                positions.extend_from_slice(&self.positions[range.clone()]);

                normals = match (normals, self.normals.as_ref()) {
                    (Some(mut out), Some(src)) => src.get(range.clone()).map(|n| {
                        out.extend_from_slice(n);
                        out
                    }),
                    _ => None,
                };
                colors = match (colors, self.colors.as_ref()) {
                    (Some(mut out), Some(src)) => src.get(range).map(|c| {
                        out.extend_from_slice(c);
                        out
                    }),
                    _ => None,
                };
            }
        }

        Self {
            positions,
            normals,
            colors,
            indices: None,
        }
    }

    fn vertex_of_corner(&self, corner: usize) -> Option<usize> {
        match &self.indices {
            Some(indices) => indices.get(corner).map(|&v| v as usize),
            None => (corner < self.corner_count()).then_some(corner),
        }
    }
}

/// Helper function to create a unit cube soup.
///
/// Creates a cube from (0,0,0) to (1,1,1) as 12 unindexed triangles with
/// outward-facing per-corner normals.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
///
/// let cube = unit_cube();
/// assert_eq!(cube.face_count(), 12);
/// assert!(cube.normals.is_some());
/// ```
#[must_use]
pub fn unit_cube() -> TriangleSoup {
    const CORNERS: [[f64; 3]; 8] = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
    ];

    // Two triangles per side, CCW winding when viewed from outside
    let sides: [([[usize; 3]; 2], [f64; 3]); 6] = [
        ([[0, 2, 1], [0, 3, 2]], [0.0, 0.0, -1.0]),
        ([[4, 5, 6], [4, 6, 7]], [0.0, 0.0, 1.0]),
        ([[0, 1, 5], [0, 5, 4]], [0.0, -1.0, 0.0]),
        ([[3, 7, 6], [3, 6, 2]], [0.0, 1.0, 0.0]),
        ([[0, 4, 7], [0, 7, 3]], [-1.0, 0.0, 0.0]),
        ([[1, 2, 6], [1, 6, 5]], [1.0, 0.0, 0.0]),
    ];

    let mut positions = Vec::with_capacity(12 * FLOATS_PER_FACE);
    let mut normals = Vec::with_capacity(12 * FLOATS_PER_FACE);

    for (faces, normal) in &sides {
        for face in faces {
            for &v in face {
                positions.extend_from_slice(&CORNERS[v]);
                normals.extend_from_slice(normal);
            }
        }
    }

    TriangleSoup::from_positions(positions).with_normals(normals)
}
