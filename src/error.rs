use std::fmt;

/// Errors raised while building a [`GridIndex`](crate::GridIndex).
///
/// Querying an index never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// The input geometry is not a polygon.
    InvalidGeometryKind {
        /// The geometry kind that was found instead.
        kind: String,
    },
    /// The polygon has no ring at all.
    MissingOuterRing,
    /// The coordinates of a polygon geometry could not be read as rings of `[Y, X]` pairs.
    InvalidCoordinates {
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGeometryKind { kind } => write!(
                f,
                "expected geometry of type \"Polygon\", \"{kind}\" found instead"
            ),
            Self::MissingOuterRing => write!(f, "a polygon needs at least an outer ring"),
            Self::InvalidCoordinates { reason } => {
                write!(f, "invalid polygon coordinates: {reason}")
            }
        }
    }
}

impl std::error::Error for GeometryError {}
