//! Result types for island extraction.

use crate::half_edge::HalfEdge;

/// Statistics of one adjacency resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Number of half-edge pairs resolved.
    pub forced_matches: usize,

    /// Number of ambiguous candidate pairs dropped by dihedral angle.
    pub conflicts_broken: usize,

    /// Number of dihedral angles computed.
    pub angle_evaluations: usize,

    /// Half-edges that had candidates but ended without a partner.
    pub dangling_edges: usize,

    /// Faces excluded because their corners collapse.
    pub degenerate_faces: usize,
}

impl std::fmt::Display for ResolveStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} matches, {} conflicts broken, {} dangling edges, {} degenerate faces",
            self.forced_matches, self.conflicts_broken, self.dangling_edges, self.degenerate_faces
        )
    }
}

/// Partition of a triangle soup into connected islands.
///
/// Every non-degenerate face belongs to exactly one island. Islands are
/// ordered by their lowest face index and list their faces in ascending
/// order.
#[derive(Debug, Clone)]
pub struct IslandPartition {
    pub(crate) islands: Vec<Vec<usize>>,
    pub(crate) island_of: Vec<Option<usize>>,
    pub(crate) degenerate_faces: Vec<usize>,
    pub(crate) neighbors: Vec<Option<HalfEdge>>,
    pub(crate) stats: ResolveStats,
}

impl IslandPartition {
    pub(crate) fn new(
        islands: Vec<Vec<usize>>,
        degenerate_faces: Vec<usize>,
        neighbors: Vec<Option<HalfEdge>>,
        stats: ResolveStats,
    ) -> Self {
        let mut island_of = vec![None; neighbors.len() / 3];
        for (slot, faces) in islands.iter().enumerate() {
            for &face in faces {
                island_of[face] = Some(slot);
            }
        }

        Self {
            islands,
            island_of,
            degenerate_faces,
            neighbors,
            stats,
        }
    }

    /// Face lists of all islands.
    #[must_use]
    pub fn islands(&self) -> &[Vec<usize>] {
        &self.islands
    }

    /// Number of islands.
    #[must_use]
    pub fn island_count(&self) -> usize {
        self.islands.len()
    }

    /// Faces of one island.
    #[must_use]
    pub fn island(&self, island: usize) -> Option<&[usize]> {
        self.islands.get(island).map(Vec::as_slice)
    }

    /// Island containing `face`, or `None` for degenerate or unknown faces.
    #[must_use]
    pub fn island_of(&self, face: usize) -> Option<usize> {
        self.island_of.get(face).copied().flatten()
    }

    /// Faces excluded as degenerate, ascending.
    #[must_use]
    pub fn degenerate_faces(&self) -> &[usize] {
        &self.degenerate_faces
    }

    /// Resolved partner of a half-edge. `None` on boundaries.
    #[must_use]
    pub fn neighbor(&self, edge: HalfEdge) -> Option<HalfEdge> {
        self.neighbors.get(edge.index()).copied().flatten()
    }

    /// Number of faces the partition was computed over.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.island_of.len()
    }

    /// Resolution statistics.
    #[must_use]
    pub const fn stats(&self) -> &ResolveStats {
        &self.stats
    }
}
