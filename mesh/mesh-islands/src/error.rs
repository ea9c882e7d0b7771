//! Error types for topology reconstruction.

use mesh_types::TriangleSoup;
use thiserror::Error;

/// Result type for island and surface operations.
pub type IslandResult<T> = Result<T, IslandError>;

/// Errors that can occur during island or surface extraction.
///
/// Open boundaries and degenerate faces are not errors; they only shape the
/// resulting partition.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IslandError {
    /// The mesh carries an index buffer.
    #[error("indexed meshes are not supported, expand the index buffer first")]
    IndexedInput,

    /// Surface grouping was requested on a mesh without normals.
    #[error("surface grouping requires per-vertex normals")]
    MissingNormals,

    /// The position buffer does not hold whole faces.
    #[error("position buffer length {len} is not a multiple of 9")]
    InvalidPositionLength {
        /// Length of the position buffer.
        len: usize,
    },

    /// An attribute buffer is not parallel to the position buffer.
    #[error("{attribute} buffer has {actual} floats, expected {expected}")]
    AttributeLengthMismatch {
        /// Name of the attribute.
        attribute: &'static str,
        /// Length of the position buffer.
        expected: usize,
        /// Length of the attribute buffer.
        actual: usize,
    },

    /// Conflict breaking found no candidate pair to remove.
    #[error("adjacency resolution stalled with {remaining} unresolved half-edges")]
    ResolverStalled {
        /// Number of half-edges still holding candidates.
        remaining: usize,
    },
}

/// Check that `mesh` is a well-formed unindexed soup.
pub(crate) fn check_soup(mesh: &TriangleSoup) -> IslandResult<()> {
    if mesh.is_indexed() {
        return Err(IslandError::IndexedInput);
    }

    let len = mesh.positions.len();
    if len % 9 != 0 {
        return Err(IslandError::InvalidPositionLength { len });
    }

    if let Some(normals) = &mesh.normals {
        check_parallel("normal", len, normals.len())?;
    }
    if let Some(colors) = &mesh.colors {
        check_parallel("color", len, colors.len())?;
    }

    Ok(())
}

fn check_parallel(attribute: &'static str, expected: usize, actual: usize) -> IslandResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(IslandError::AttributeLengthMismatch {
            attribute,
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_indexed() {
        let mesh = TriangleSoup::from_indexed(vec![0.0; 9], vec![0, 1, 2]);
        assert!(matches!(check_soup(&mesh), Err(IslandError::IndexedInput)));
    }

    #[test]
    fn rejects_partial_face() {
        let mesh = TriangleSoup::from_positions(vec![0.0; 10]);
        assert!(matches!(
            check_soup(&mesh),
            Err(IslandError::InvalidPositionLength { len: 10 })
        ));
    }

    #[test]
    fn rejects_short_colors() {
        let mesh = TriangleSoup::from_positions(vec![0.0; 9]).with_colors(vec![1.0; 3]);
        let err = check_soup(&mesh).unwrap_err();
        assert_eq!(err.to_string(), "color buffer has 3 floats, expected 9");
    }

    #[test]
    fn accepts_empty() {
        assert!(check_soup(&TriangleSoup::new()).is_ok());
    }
}
