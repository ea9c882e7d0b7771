//! Vertex identity index.
//!
//! Groups the corners of a triangle soup into identity classes: corners whose
//! positions are considered the same point share a class id.

use hashbrown::HashMap;

use crate::params::{TopologyParams, VertexIdentity};

/// Hash key of a corner position under a [`VertexIdentity`] policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct VertexKey([u64; 3]);

impl VertexKey {
    fn new(p: &[f64], identity: VertexIdentity, scale: f64) -> Self {
        let component = |v: f64| match identity {
            VertexIdentity::Exact => fold_zero(v).to_bits(),
            VertexIdentity::Rounded => fold_zero((v * scale).round()).to_bits(),
        };
        Self([component(p[0]), component(p[1]), component(p[2])])
    }
}

/// Map `-0.0` onto `0.0` so both produce the same bits.
#[inline]
fn fold_zero(v: f64) -> f64 {
    v + 0.0
}

/// Corner identity classes of a triangle soup.
///
/// Class ids are assigned in order of first appearance in the position
/// buffer, and the corners of each class are listed in buffer order, so the
/// index is fully deterministic.
///
/// # Example
///
/// ```
/// use mesh_islands::{TopologyParams, VertexIndex};
///
/// let positions = [
///     0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, //
///     1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0,
/// ];
/// let index = VertexIndex::build(&positions, &TopologyParams::default());
///
/// assert_eq!(index.class_count(), 4);
/// assert!(index.same_vertex(1, 3));
/// assert_eq!(index.corners(index.class_of(2)), &[2, 5]);
/// ```
#[derive(Debug, Clone)]
pub struct VertexIndex {
    class_of: Vec<usize>,
    classes: Vec<Vec<usize>>,
}

impl VertexIndex {
    /// Build the index over a flat position buffer.
    ///
    /// Trailing floats that do not make up a whole corner are ignored.
    #[must_use]
    pub fn build(positions: &[f64], params: &TopologyParams) -> Self {
        let scale = params.scale();
        let corner_count = positions.len() / 3;

        let mut lookup: HashMap<VertexKey, usize> = HashMap::with_capacity(corner_count);
        let mut class_of = Vec::with_capacity(corner_count);
        let mut classes: Vec<Vec<usize>> = Vec::new();

        for (corner, p) in positions.chunks_exact(3).enumerate() {
            let key = VertexKey::new(p, params.vertex_identity, scale);
            let class = *lookup.entry(key).or_insert_with(|| {
                classes.push(Vec::new());
                classes.len() - 1
            });
            classes[class].push(corner);
            class_of.push(class);
        }

        Self { class_of, classes }
    }

    /// Identity class of a corner.
    ///
    /// # Panics
    ///
    /// Panics if `corner` is out of bounds.
    #[inline]
    #[must_use]
    pub fn class_of(&self, corner: usize) -> usize {
        self.class_of[corner]
    }

    /// Corners belonging to an identity class, in buffer order.
    ///
    /// Returns an empty slice for an unknown class.
    #[inline]
    #[must_use]
    pub fn corners(&self, class: usize) -> &[usize] {
        self.classes.get(class).map_or(&[], Vec::as_slice)
    }

    /// Whether two corners are the same vertex.
    #[inline]
    #[must_use]
    pub fn same_vertex(&self, a: usize, b: usize) -> bool {
        self.class_of[a] == self.class_of[b]
    }

    /// Number of distinct vertices.
    #[inline]
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Number of indexed corners.
    #[inline]
    #[must_use]
    pub fn corner_count(&self) -> usize {
        self.class_of.len()
    }

    /// Whether the three corners of `face` collapse to fewer than three
    /// distinct vertices.
    #[must_use]
    pub fn is_degenerate(&self, face: usize) -> bool {
        let a = self.class_of[face * 3];
        let b = self.class_of[face * 3 + 1];
        let c = self.class_of[face * 3 + 2];
        a == b || b == c || a == c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer() {
        let index = VertexIndex::build(&[], &TopologyParams::default());
        assert_eq!(index.class_count(), 0);
        assert_eq!(index.corner_count(), 0);
        assert!(index.corners(0).is_empty());
    }

    #[test]
    fn negative_zero_matches_zero() {
        let positions = [0.0, 0.0, 0.0, -0.0, 0.0, -0.0];
        let index = VertexIndex::build(&positions, &TopologyParams::default());
        assert!(index.same_vertex(0, 1));
    }

    #[test]
    fn exact_identity_ignores_precision() {
        let positions = [1.0, 2.0, 3.0, 1.000_000_1, 2.0, 3.0];
        let params = TopologyParams::default().with_precision(2);
        let index = VertexIndex::build(&positions, &params);
        assert!(!index.same_vertex(0, 1));
    }

    #[test]
    fn rounded_identity_merges_drift() {
        let positions = [1.0, 2.0, 3.0, 1.000_01, 2.0, 3.0, 1.01, 2.0, 3.0];
        let params = TopologyParams::default()
            .with_precision(4)
            .with_vertex_identity(VertexIdentity::Rounded);
        let index = VertexIndex::build(&positions, &params);
        assert!(index.same_vertex(0, 1));
        assert!(!index.same_vertex(0, 2));
        assert_eq!(index.class_count(), 2);
    }

    #[test]
    fn classes_in_first_appearance_order() {
        let positions = [5.0, 5.0, 5.0, 1.0, 1.0, 1.0, 5.0, 5.0, 5.0];
        let index = VertexIndex::build(&positions, &TopologyParams::default());
        assert_eq!(index.class_of(0), 0);
        assert_eq!(index.class_of(1), 1);
        assert_eq!(index.corners(0), &[0, 2]);
    }

    #[test]
    fn degenerate_face() {
        let positions = [
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, // repeated corner
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0,
        ];
        let index = VertexIndex::build(&positions, &TopologyParams::default());
        assert!(index.is_degenerate(0));
        assert!(!index.is_degenerate(1));
    }
}
