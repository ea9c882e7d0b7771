//! Adjacency resolution.
//!
//! Reduces the candidate table to at most one partner per half-edge:
//!
//! 1. Any half-edge with exactly one candidate left is paired with it. Both
//!    half-edges then leave every other candidate list, which can force
//!    further matches. Scans repeat until a full pass pairs nothing.
//! 2. If unpaired half-edges with candidates remain, all of them have two or
//!    more. The single pair whose dihedral angle deviates most from a flat
//!    join is dropped, without pairing either side, and step 1 runs again.
//!
//! Each step removes at least two candidate entries, so resolution always
//! terminates. Half-edges left without candidates are boundaries.

use std::f64::consts::PI;

use mesh_types::Triangle;
use nalgebra::Vector3;
use tracing::{debug, warn};

use crate::candidates::CandidateTable;
use crate::error::{IslandError, IslandResult};
use crate::half_edge::HalfEdge;
use crate::tracker::IslandTracker;

/// Counters collected while resolving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ResolveCounters {
    pub forced_matches: usize,
    pub conflicts_broken: usize,
    pub angle_evaluations: usize,
}

/// Outcome of adjacency resolution.
#[derive(Debug)]
pub(crate) struct Resolution {
    pub neighbors: Vec<Option<HalfEdge>>,
    pub tracker: IslandTracker,
    pub counters: ResolveCounters,
}

/// Resolves candidate pairs of one triangle soup.
pub(crate) struct Resolver<'a> {
    positions: &'a [f64],
    table: CandidateTable,
    tracker: IslandTracker,
    neighbors: Vec<Option<HalfEdge>>,
    unresolved: Vec<HalfEdge>,
    counters: ResolveCounters,
}

impl<'a> Resolver<'a> {
    pub fn new(positions: &'a [f64], table: CandidateTable) -> Self {
        let edge_count = table.face_count() * 3;
        let unresolved = (0..edge_count)
            .map(HalfEdge::from_index)
            .filter(|&edge| table.count(edge) > 0)
            .collect();
        let tracker = IslandTracker::new(&table);

        Self {
            positions,
            table,
            tracker,
            neighbors: vec![None; edge_count],
            unresolved,
            counters: ResolveCounters::default(),
        }
    }

    /// Run resolution to completion.
    pub fn run(mut self) -> IslandResult<Resolution> {
        debug!(
            candidate_edges = self.unresolved.len(),
            candidate_entries = self.table.entry_count(),
            "Resolving half-edge adjacency"
        );

        loop {
            while self.forced_pass() {}

            let neighbors = &self.neighbors;
            let table = &self.table;
            self.unresolved
                .retain(|&edge| neighbors[edge.index()].is_none() && table.count(edge) > 0);
            if self.unresolved.is_empty() {
                break;
            }

            let Some((a, b, deviation)) = self.worst_pair() else {
                warn!(
                    remaining = self.unresolved.len(),
                    "No candidate pair left to break"
                );
                return Err(IslandError::ResolverStalled {
                    remaining: self.unresolved.len(),
                });
            };

            debug!(%a, %b, deviation, "Dropping ambiguous candidate pair");
            self.table.unlink(a, b);
            self.counters.conflicts_broken += 1;
        }

        Ok(Resolution {
            neighbors: self.neighbors,
            tracker: self.tracker,
            counters: self.counters,
        })
    }

    /// One scan over unresolved half-edges. Returns whether anything was paired.
    fn forced_pass(&mut self) -> bool {
        let mut progress = false;

        for i in 0..self.unresolved.len() {
            let edge = self.unresolved[i];
            if self.neighbors[edge.index()].is_some() {
                continue;
            }
            if let [only] = self.table.candidates(edge) {
                let partner = only.edge;
                self.pair(edge, partner);
                progress = true;
            }
        }

        progress
    }

    fn pair(&mut self, a: HalfEdge, b: HalfEdge) {
        self.table.withdraw(a);
        self.table.withdraw(b);
        self.neighbors[a.index()] = Some(b);
        self.neighbors[b.index()] = Some(a);
        self.tracker.join(a, b);
        self.counters.forced_matches += 1;
    }

    /// The candidate pair whose dihedral angle is farthest from `PI`.
    ///
    /// Ties keep the first pair met in half-edge order.
    fn worst_pair(&mut self) -> Option<(HalfEdge, HalfEdge, f64)> {
        let mut worst: Option<(HalfEdge, HalfEdge, f64)> = None;

        for i in 0..self.unresolved.len() {
            let edge = self.unresolved[i];
            for j in 0..self.table.count(edge) {
                let candidate = self.table.candidates(edge)[j];
                let angle = match candidate.angle {
                    Some(angle) => angle,
                    None => {
                        let angle = dihedral_angle(self.positions, edge, candidate.edge);
                        self.table.cache_angle(edge, candidate.edge, angle);
                        self.counters.angle_evaluations += 1;
                        angle
                    }
                };

                let deviation = (angle - PI).abs();
                if worst.is_none_or(|(_, _, w)| deviation > w) {
                    worst = Some((edge, candidate.edge, deviation));
                }
            }
        }

        worst
    }
}

/// Dihedral angle between the faces of `edge` and `opposite` across their
/// shared edge.
///
/// A flat join measures `PI`, a convex fold less than `PI` and a concave fold
/// more. Faces without a unit normal measure `0`.
pub(crate) fn dihedral_angle(positions: &[f64], edge: HalfEdge, opposite: HalfEdge) -> f64 {
    let (Some(n1), Some(n2)) = (
        face_normal(positions, edge.face()),
        face_normal(positions, opposite.face()),
    ) else {
        return 0.0;
    };

    let theta = n1.dot(&n2).clamp(-1.0, 1.0).acos();
    let direction = corner(positions, edge.end_corner()) - corner(positions, edge.start_corner());

    if n1.cross(&n2).dot(&direction) >= 0.0 {
        PI - theta
    } else {
        PI + theta
    }
}

fn face_normal(positions: &[f64], face: usize) -> Option<Vector3<f64>> {
    let slice = positions.get(face * 9..face * 9 + 9)?;
    Triangle::from_face_slice(slice)?.normal()
}

fn corner(positions: &[f64], corner: usize) -> Vector3<f64> {
    Vector3::new(
        positions[corner * 3],
        positions[corner * 3 + 1],
        positions[corner * 3 + 2],
    )
}
