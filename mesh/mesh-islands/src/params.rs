//! Parameters for topology reconstruction.

/// How vertex positions are compared when deciding whether two corners are
/// the same point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VertexIdentity {
    /// Corners are the same vertex only if their stored coordinates are
    /// exactly equal (`-0.0` and `0.0` compare equal).
    ///
    /// `precision` does not affect vertex identity in this mode; it is only
    /// used for the normal comparison of surface grouping.
    #[default]
    Exact,

    /// Corners are the same vertex if their coordinates agree after rounding
    /// to `precision` decimal digits.
    Rounded,
}

/// Configuration parameters for island and surface extraction.
///
/// # Example
///
/// ```
/// use mesh_islands::{TopologyParams, VertexIdentity};
///
/// // Exact vertex matching, 4 decimal digits for normal comparison
/// let params = TopologyParams::default();
/// assert_eq!(params.precision, 4);
///
/// // Merge corners that agree to 3 decimal digits
/// let params = TopologyParams::default()
///     .with_precision(3)
///     .with_vertex_identity(VertexIdentity::Rounded);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyParams {
    /// Number of decimal digits used for rounded comparisons.
    ///
    /// Values above 15 are clamped. Default: `4`
    pub precision: u32,

    /// Vertex identity policy.
    ///
    /// Default: [`VertexIdentity::Exact`]
    pub vertex_identity: VertexIdentity,
}

/// Largest precision that still fits in the significand of an `f64`.
const MAX_PRECISION: u32 = 15;

impl Default for TopologyParams {
    fn default() -> Self {
        Self {
            precision: 4,
            vertex_identity: VertexIdentity::Exact,
        }
    }
}

impl TopologyParams {
    /// Create params for exported CAD geometry, where shared corners are
    /// written out bit-identical.
    #[must_use]
    pub fn for_cad() -> Self {
        Self {
            precision: 6,
            vertex_identity: VertexIdentity::Exact,
        }
    }

    /// Create params for scanned or re-tessellated geometry, where shared
    /// corners drift in the last digits.
    #[must_use]
    pub fn for_scans() -> Self {
        Self {
            precision: 3,
            vertex_identity: VertexIdentity::Rounded,
        }
    }

    /// Set the number of decimal digits used for rounded comparisons.
    #[must_use]
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Set the vertex identity policy.
    #[must_use]
    pub fn with_vertex_identity(mut self, identity: VertexIdentity) -> Self {
        self.vertex_identity = identity;
        self
    }

    /// Power-of-ten scale factor for `precision`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)] // clamped to MAX_PRECISION
    pub fn scale(&self) -> f64 {
        10.0_f64.powi(self.precision.min(MAX_PRECISION) as i32)
    }
}
