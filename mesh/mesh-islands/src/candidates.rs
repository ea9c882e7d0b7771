//! Candidate adjacency between half-edges.
//!
//! Two half-edges are candidates for each other when they run between the
//! same pair of vertices in opposite directions on different, non-degenerate
//! faces. The table is symmetric at all times: every removal drops both
//! directions of a pair.

use crate::half_edge::HalfEdge;
use crate::vertex_index::VertexIndex;

/// One possible partner of a half-edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Candidate {
    /// The opposite half-edge.
    pub edge: HalfEdge,
    /// Dihedral angle across the shared edge, once computed.
    pub angle: Option<f64>,
}

/// Per-half-edge candidate lists.
#[derive(Debug, Clone)]
pub(crate) struct CandidateTable {
    lists: Vec<Vec<Candidate>>,
    degenerate: Vec<bool>,
}

impl CandidateTable {
    /// Collect all candidate pairs of a soup with `face_count` faces.
    ///
    /// Candidates of each half-edge are listed in corner-buffer order.
    pub fn build(index: &VertexIndex, face_count: usize) -> Self {
        let degenerate: Vec<bool> = (0..face_count).map(|f| index.is_degenerate(f)).collect();
        let mut lists = vec![Vec::new(); face_count * 3];

        for face in (0..face_count).filter(|&f| !degenerate[f]) {
            for local in 0..3 {
                let edge = HalfEdge::new(face, local);
                let start = index.class_of(edge.start_corner());
                let end = index.class_of(edge.end_corner());

                // Opposite half-edges start where this one ends
                let list = &mut lists[edge.index()];
                for &corner in index.corners(end) {
                    let other = HalfEdge::from_index(corner);
                    if other.face() == face || degenerate[other.face()] {
                        continue;
                    }
                    if index.class_of(other.end_corner()) == start {
                        list.push(Candidate { edge: other, angle: None });
                    }
                }
            }
        }

        Self { lists, degenerate }
    }

    /// Candidates still open for `edge`.
    #[inline]
    pub fn candidates(&self, edge: HalfEdge) -> &[Candidate] {
        &self.lists[edge.index()]
    }

    /// Number of candidates still open for `edge`.
    #[inline]
    pub fn count(&self, edge: HalfEdge) -> usize {
        self.lists[edge.index()].len()
    }

    /// Whether `face` was excluded as degenerate.
    #[inline]
    pub fn is_degenerate(&self, face: usize) -> bool {
        self.degenerate[face]
    }

    /// Number of faces covered by the table.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.degenerate.len()
    }

    /// Total number of candidate entries (each pair counts twice).
    pub fn entry_count(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    /// Drop the pair `a`–`b` from both lists.
    pub fn unlink(&mut self, a: HalfEdge, b: HalfEdge) {
        self.lists[a.index()].retain(|c| c.edge != b);
        self.lists[b.index()].retain(|c| c.edge != a);
    }

    /// Withdraw `edge` from the table: it leaves every other list and its
    /// own list is emptied.
    pub fn withdraw(&mut self, edge: HalfEdge) {
        let list = std::mem::take(&mut self.lists[edge.index()]);
        for candidate in list {
            self.lists[candidate.edge.index()].retain(|c| c.edge != edge);
        }
    }

    /// Store a computed angle on both entries of the pair `a`–`b`.
    pub fn cache_angle(&mut self, a: HalfEdge, b: HalfEdge, angle: f64) {
        for (from, to) in [(a, b), (b, a)] {
            if let Some(c) = self.lists[from.index()].iter_mut().find(|c| c.edge == to) {
                c.angle = Some(angle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::TopologyParams;

    fn table(positions: &[f64]) -> CandidateTable {
        let index = VertexIndex::build(positions, &TopologyParams::default());
        CandidateTable::build(&index, positions.len() / 9)
    }

    fn edges(table: &CandidateTable, edge: HalfEdge) -> Vec<HalfEdge> {
        table.candidates(edge).iter().map(|c| c.edge).collect()
    }

    #[rustfmt::skip]
    const TWO_FACES: [f64; 18] = [
        0.0, 0.0, 0.0,  1.0, 0.0, 0.0,  0.0, 1.0, 0.0,
        1.0, 0.0, 0.0,  1.0, 1.0, 0.0,  0.0, 1.0, 0.0,
    ];

    #[test]
    fn shared_edge_pairs_opposite_winding() {
        let t = table(&TWO_FACES);
        assert_eq!(edges(&t, HalfEdge::new(0, 1)), vec![HalfEdge::new(1, 2)]);
        assert_eq!(edges(&t, HalfEdge::new(1, 2)), vec![HalfEdge::new(0, 1)]);
        assert_eq!(t.entry_count(), 2);
    }

    #[test]
    fn same_winding_is_not_a_candidate() {
        #[rustfmt::skip]
        let positions = [
            0.0, 0.0, 0.0,  1.0, 0.0, 0.0,  0.0, 1.0, 0.0,
            0.0, 0.0, 0.0,  1.0, 0.0, 0.0,  0.0, -1.0, 0.0,
        ];
        let t = table(&positions);
        assert_eq!(t.entry_count(), 0);
    }

    #[test]
    fn degenerate_faces_are_excluded() {
        #[rustfmt::skip]
        let positions = [
            0.0, 0.0, 0.0,  1.0, 0.0, 0.0,  0.0, 1.0, 0.0,
            0.0, 1.0, 0.0,  1.0, 0.0, 0.0,  0.0, 1.0, 0.0,
        ];
        let t = table(&positions);
        assert!(t.is_degenerate(1));
        assert_eq!(t.entry_count(), 0);
    }

    #[test]
    fn withdraw_is_symmetric() {
        let mut t = table(&TWO_FACES);
        t.withdraw(HalfEdge::new(0, 1));
        assert_eq!(t.entry_count(), 0);
    }

    #[test]
    fn angle_cached_on_both_sides() {
        let mut t = table(&TWO_FACES);
        let (a, b) = (HalfEdge::new(0, 1), HalfEdge::new(1, 2));
        t.cache_angle(a, b, 1.5);
        assert_eq!(t.candidates(a)[0].angle, Some(1.5));
        assert_eq!(t.candidates(b)[0].angle, Some(1.5));

        t.unlink(a, b);
        assert_eq!(t.count(a), 0);
        assert_eq!(t.count(b), 0);
    }
}
