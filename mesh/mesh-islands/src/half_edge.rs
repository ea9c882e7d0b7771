//! Directed half-edges of an unindexed triangle soup.
//!
//! Half-edge `k` of face `f` runs from corner `3f + k` to corner
//! `3f + (k + 1) % 3`, so a half-edge id doubles as the id of its start
//! corner.

use std::fmt;

/// A directed edge of one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HalfEdge(usize);

impl HalfEdge {
    /// Half-edge `local` (0..3) of `face`.
    #[inline]
    #[must_use]
    pub const fn new(face: usize, local: usize) -> Self {
        Self(face * 3 + local % 3)
    }

    /// Half-edge from its flat id.
    #[inline]
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Flat id, `3 * face + local`.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    /// Face owning this half-edge.
    #[inline]
    #[must_use]
    pub const fn face(self) -> usize {
        self.0 / 3
    }

    /// Position of this half-edge within its face (0..3).
    #[inline]
    #[must_use]
    pub const fn local(self) -> usize {
        self.0 % 3
    }

    /// Corner the half-edge starts at.
    #[inline]
    #[must_use]
    pub const fn start_corner(self) -> usize {
        self.0
    }

    /// Corner the half-edge ends at.
    #[inline]
    #[must_use]
    pub const fn end_corner(self) -> usize {
        self.face() * 3 + (self.local() + 1) % 3
    }
}

impl fmt::Display for HalfEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}e{}", self.face(), self.local())
    }
}
