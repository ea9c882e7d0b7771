//! Island extraction.

use mesh_types::TriangleSoup;
use tracing::{debug, info};

use crate::candidates::CandidateTable;
use crate::error::{IslandResult, check_soup};
use crate::params::TopologyParams;
use crate::resolve::Resolver;
use crate::result::{IslandPartition, ResolveStats};
use crate::vertex_index::VertexIndex;

/// Partition a triangle soup into connected islands.
///
/// Faces are connected when one of their edges resolves to an edge of the
/// other face running the opposite way. Degenerate faces belong to no island.
///
/// # Errors
///
/// Returns an error if the mesh is indexed or its attribute buffers are
/// malformed.
///
/// # Example
///
/// ```
/// use mesh_types::TriangleSoup;
/// use mesh_islands::{find_islands, TopologyParams};
///
/// let soup = TriangleSoup::from_positions(vec![
///     0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, // shares an edge
///     1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, // with this one
///     5.0, 0.0, 0.0, 6.0, 0.0, 0.0, 5.0, 1.0, 0.0, // apart
/// ]);
///
/// let partition = find_islands(&soup, &TopologyParams::default()).unwrap();
/// assert_eq!(partition.islands(), &[vec![0, 1], vec![2]]);
/// ```
pub fn find_islands(mesh: &TriangleSoup, params: &TopologyParams) -> IslandResult<IslandPartition> {
    check_soup(mesh)?;
    let face_count = mesh.face_count();

    info!(faces = face_count, "Finding mesh islands");

    let index = VertexIndex::build(&mesh.positions, params);
    let table = CandidateTable::build(&index, face_count);

    let degenerate_faces: Vec<usize> = (0..face_count)
        .filter(|&face| table.is_degenerate(face))
        .collect();
    if !degenerate_faces.is_empty() {
        debug!(count = degenerate_faces.len(), "Skipping degenerate faces");
    }

    let mut resolution = Resolver::new(&mesh.positions, table).run()?;
    let islands = resolution.tracker.islands();

    let stats = ResolveStats {
        forced_matches: resolution.counters.forced_matches,
        conflicts_broken: resolution.counters.conflicts_broken,
        angle_evaluations: resolution.counters.angle_evaluations,
        dangling_edges: resolution.tracker.frontier_size(),
        degenerate_faces: degenerate_faces.len(),
    };

    info!(islands = islands.len(), %stats, "Island extraction complete");

    Ok(IslandPartition::new(
        islands,
        degenerate_faces,
        resolution.neighbors,
        stats,
    ))
}

/// Split a triangle soup into one soup per connected island.
///
/// Each output copies the positions, and the normals and colors if present,
/// of its faces in ascending face order. Degenerate faces are dropped.
///
/// # Errors
///
/// Returns an error if the mesh is indexed or its attribute buffers are
/// malformed.
///
/// # Example
///
/// ```
/// use mesh_types::TriangleSoup;
/// use mesh_islands::{isolated_geometries, TopologyParams};
///
/// let soup = TriangleSoup::from_positions(vec![
///     0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0,
///     5.0, 0.0, 0.0, 6.0, 0.0, 0.0, 5.0, 1.0, 0.0,
/// ]);
///
/// let parts = isolated_geometries(&soup, &TopologyParams::default()).unwrap();
/// assert_eq!(parts.len(), 2);
/// assert_eq!(parts[1].positions[0], 5.0);
/// ```
pub fn isolated_geometries(
    mesh: &TriangleSoup,
    params: &TopologyParams,
) -> IslandResult<Vec<TriangleSoup>> {
    let partition = find_islands(mesh, params)?;
    Ok(partition
        .islands()
        .iter()
        .map(|faces| extract_faces(mesh, faces))
        .collect())
}

/// Copy the given faces of `mesh` into a new soup.
///
/// `mesh` must be unindexed with whole faces.
pub(crate) fn extract_faces(mesh: &TriangleSoup, faces: &[usize]) -> TriangleSoup {
    fn gather<T: Copy>(buffer: &[T], faces: &[usize]) -> Vec<T> {
        let mut out = Vec::with_capacity(faces.len() * 9);
        for &face in faces {
            out.extend_from_slice(&buffer[face * 9..face * 9 + 9]);
        }
        out
    }

    TriangleSoup {
        positions: gather(&mesh.positions, faces),
        normals: mesh.normals.as_deref().map(|n| gather(n, faces)),
        colors: mesh.colors.as_deref().map(|c| gather(c, faces)),
        indices: None,
    }
}
