//! Property-based tests for island extraction.
//!
//! These tests use proptest to generate random soups and verify invariants.
//!
//! Run with: cargo test -p mesh-islands -- proptest

#![allow(clippy::unwrap_used)]
#![allow(clippy::cast_precision_loss)]

use mesh_islands::{HalfEdge, TopologyParams, find_islands, isolated_geometries, surfaces};
use mesh_types::TriangleSoup;
use proptest::prelude::*;

// =============================================================================
// Strategies for generating random soups
// =============================================================================

/// A corner on a small integer lattice, so faces share vertices often.
fn arb_lattice_corner() -> impl Strategy<Value = [f64; 3]> {
    prop::array::uniform3((0u8..3).prop_map(f64::from))
}

/// An arbitrary soup of lattice triangles: fans, flips, slivers and all.
fn arb_lattice_soup(max_faces: usize) -> impl Strategy<Value = TriangleSoup> {
    prop::collection::vec(prop::array::uniform3(arb_lattice_corner()), 0..=max_faces)
        .prop_map(|faces| {
            TriangleSoup::from_positions(faces.iter().flatten().flatten().copied().collect())
        })
}

const GRID: usize = 4;

/// A height field over a `GRID` x `GRID` quad grid with a random subset of
/// its triangles kept. Every edge is shared by at most two triangles, with
/// opposite windings.
fn arb_heightfield() -> impl Strategy<Value = HeightField> {
    (
        prop::collection::vec(0.0..1.0f64, (GRID + 1) * (GRID + 1)),
        prop::collection::vec(any::<bool>(), GRID * GRID * 2),
    )
        .prop_map(|(heights, keep)| HeightField::new(&heights, &keep))
}

/// A height-field soup together with the lattice ids of its corners.
#[derive(Debug, Clone)]
struct HeightField {
    soup: TriangleSoup,
    faces: Vec<[usize; 3]>,
}

impl HeightField {
    fn new(heights: &[f64], keep: &[bool]) -> Self {
        let id = |i: usize, j: usize| i * (GRID + 1) + j;
        let mut faces = Vec::new();

        for i in 0..GRID {
            for j in 0..GRID {
                let quad = [id(i, j), id(i + 1, j), id(i + 1, j + 1), id(i, j + 1)];
                let slot = (i * GRID + j) * 2;
                if keep[slot] {
                    faces.push([quad[0], quad[1], quad[2]]);
                }
                if keep[slot + 1] {
                    faces.push([quad[0], quad[2], quad[3]]);
                }
            }
        }

        let mut positions = Vec::with_capacity(faces.len() * 9);
        for face in &faces {
            for &v in face {
                let (i, j) = (v / (GRID + 1), v % (GRID + 1));
                positions.extend_from_slice(&[i as f64, j as f64, heights[v]]);
            }
        }

        Self {
            soup: TriangleSoup::from_positions(positions),
            faces,
        }
    }

    /// Components of the faces connected through shared edges.
    fn reference_components(&self) -> usize {
        let mut parent: Vec<usize> = (0..self.faces.len()).collect();
        fn root(parent: &mut [usize], mut x: usize) -> usize {
            while parent[x] != x {
                parent[x] = parent[parent[x]];
                x = parent[x];
            }
            x
        }

        for a in 0..self.faces.len() {
            for b in a + 1..self.faces.len() {
                if shares_edge(&self.faces[a], &self.faces[b]) {
                    let (ra, rb) = (root(&mut parent, a), root(&mut parent, b));
                    parent[ra] = rb;
                }
            }
        }

        (0..self.faces.len())
            .filter(|&f| root(&mut parent, f) == f)
            .count()
    }
}

fn shares_edge(a: &[usize; 3], b: &[usize; 3]) -> bool {
    a.iter().filter(|v| b.contains(v)).count() >= 2
}

fn corners_collapse(mesh: &TriangleSoup, face: usize) -> bool {
    let p = |k| mesh.corner_position(face * 3 + k).unwrap();
    p(0) == p(1) || p(1) == p(2) || p(0) == p(2)
}

// =============================================================================
// Property Tests: Partition
// =============================================================================

proptest! {
    /// Island extraction accepts every unindexed soup.
    #[test]
    fn extraction_never_fails(mesh in arb_lattice_soup(60)) {
        prop_assert!(find_islands(&mesh, &TopologyParams::default()).is_ok());
    }

    /// Every face lands in exactly one island, or is degenerate.
    #[test]
    fn islands_partition_faces(mesh in arb_lattice_soup(40)) {
        let partition = find_islands(&mesh, &TopologyParams::default()).unwrap();
        let mut seen = vec![0usize; mesh.face_count()];

        for (slot, faces) in partition.islands().iter().enumerate() {
            prop_assert!(!faces.is_empty());
            prop_assert!(faces.windows(2).all(|w| w[0] < w[1]));
            for &face in faces {
                seen[face] += 1;
                prop_assert_eq!(partition.island_of(face), Some(slot));
            }
        }
        for &face in partition.degenerate_faces() {
            seen[face] += 1;
            prop_assert!(corners_collapse(&mesh, face));
            prop_assert_eq!(partition.island_of(face), None);
        }

        prop_assert!(seen.iter().all(|&n| n == 1));
        prop_assert_eq!(partition.stats().degenerate_faces, partition.degenerate_faces().len());
    }

    /// Islands are ordered by their lowest face.
    #[test]
    fn islands_ordered_by_first_face(mesh in arb_lattice_soup(40)) {
        let partition = find_islands(&mesh, &TopologyParams::default()).unwrap();
        let firsts: Vec<usize> = partition.islands().iter().map(|faces| faces[0]).collect();
        prop_assert!(firsts.windows(2).all(|w| w[0] < w[1]));
    }

    /// Resolved neighbors are mutual, reversed and inside one island.
    #[test]
    fn neighbors_are_symmetric(mesh in arb_lattice_soup(40)) {
        let partition = find_islands(&mesh, &TopologyParams::default()).unwrap();

        for index in 0..mesh.corner_count() {
            let edge = HalfEdge::from_index(index);
            let Some(partner) = partition.neighbor(edge) else {
                continue;
            };

            prop_assert_eq!(partition.neighbor(partner), Some(edge));
            prop_assert_ne!(partner.face(), edge.face());
            prop_assert_eq!(
                mesh.corner_position(edge.start_corner()),
                mesh.corner_position(partner.end_corner())
            );
            prop_assert_eq!(
                mesh.corner_position(edge.end_corner()),
                mesh.corner_position(partner.start_corner())
            );
            prop_assert_eq!(
                partition.island_of(edge.face()),
                partition.island_of(partner.face())
            );
        }
    }

    /// Two runs over the same soup agree exactly.
    #[test]
    fn extraction_is_deterministic(mesh in arb_lattice_soup(40)) {
        let params = TopologyParams::default();
        let first = find_islands(&mesh, &params).unwrap();
        let second = find_islands(&mesh, &params).unwrap();

        prop_assert_eq!(first.islands(), second.islands());
        prop_assert_eq!(first.stats(), second.stats());
    }

    /// Extracted islands together hold every non-degenerate face.
    #[test]
    fn geometries_keep_all_faces(mesh in arb_lattice_soup(40)) {
        let params = TopologyParams::default();
        let partition = find_islands(&mesh, &params).unwrap();
        let parts = isolated_geometries(&mesh, &params).unwrap();

        let total: usize = parts.iter().map(TriangleSoup::face_count).sum();
        prop_assert_eq!(parts.len(), partition.island_count());
        prop_assert_eq!(total + partition.degenerate_faces().len(), mesh.face_count());
    }
}

// =============================================================================
// Property Tests: Manifold Height Fields
// =============================================================================

proptest! {
    /// On a manifold soup islands are the edge-connected components.
    #[test]
    fn heightfield_islands_match_edge_components(field in arb_heightfield()) {
        let partition = find_islands(&field.soup, &TopologyParams::default()).unwrap();

        prop_assert_eq!(partition.island_count(), field.reference_components());
        prop_assert_eq!(partition.stats().conflicts_broken, 0);
        prop_assert_eq!(partition.stats().dangling_edges, 0);
    }

    /// Re-running extraction on an extracted island returns it unchanged.
    #[test]
    fn heightfield_islands_are_idempotent(field in arb_heightfield()) {
        let params = TopologyParams::default();

        for part in isolated_geometries(&field.soup, &params).unwrap() {
            let again = isolated_geometries(&part, &params).unwrap();
            prop_assert_eq!(again.len(), 1);
            prop_assert_eq!(&again[0], &part);
        }
    }

    /// A flat height field forms one surface per vertex-connected patch.
    #[test]
    fn flat_field_surfaces_cover_faces(keep in prop::collection::vec(any::<bool>(), GRID * GRID * 2)) {
        let heights = vec![0.0; (GRID + 1) * (GRID + 1)];
        let field = HeightField::new(&heights, &keep);
        let face_count = field.faces.len();
        let soup = field.soup.with_normals([0.0, 0.0, 1.0].repeat(face_count * 3));

        let found = surfaces(&soup, &TopologyParams::default()).unwrap();
        let mut seen = vec![false; face_count];
        for surface in &found {
            for &face in &surface.face_indices {
                prop_assert!(!seen[face]);
                seen[face] = true;
            }
        }
        prop_assert!(seen.iter().all(|&s| s));
    }
}
