use crate::coord::Coord;
use crate::error::GeometryError;
use crate::even_odd::{EvenOdd, RingMembership};

/// A polygon made of an outer ring and zero or more holes.
///
/// Ring `0` is the outer boundary and every following ring is a hole. Rings are implicitly
/// closed and are assumed not to self-intersect (this is not checked).
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    rings: Vec<Vec<Coord>>,
}

impl Polygon {
    /// Constructs a new `Polygon` from its rings.
    ///
    /// Fails if `rings` is empty, since there must be an outer ring.
    pub fn new(rings: Vec<Vec<Coord>>) -> Result<Self, GeometryError> {
        if rings.is_empty() {
            return Err(GeometryError::MissingOuterRing);
        }
        Ok(Self { rings })
    }

    /// Constructs a new `Polygon` from rings of raw `[Y, X]` pairs.
    pub fn from_pairs(rings: Vec<Vec<[f64; 2]>>) -> Result<Self, GeometryError> {
        Self::new(
            rings
                .into_iter()
                .map(|ring| ring.iter().map(Coord::from).collect())
                .collect(),
        )
    }

    /// Returns all the rings, outer boundary first.
    pub fn rings(&self) -> &[Vec<Coord>] {
        &self.rings
    }

    /// Returns the outer boundary.
    pub fn outer(&self) -> &[Coord] {
        &self.rings[0]
    }

    /// Returns the holes, in input order.
    pub fn holes(&self) -> &[Vec<Coord>] {
        &self.rings[1..]
    }

    /// Returns the total number of vertices over all rings.
    pub fn vertex_count(&self) -> usize {
        self.rings.iter().map(Vec::len).sum()
    }

    /// Exact membership test across all rings with the given ring test.
    ///
    /// Every ring containing the point flips the result, which gives polygon-with-holes
    /// semantics (and islands inside holes for free).
    pub fn contains_with<M: RingMembership>(&self, membership: &M, point: &Coord) -> bool {
        self.rings.iter().fold(false, |inside, ring| {
            if membership.contains(point, ring) {
                !inside
            } else {
                inside
            }
        })
    }

    /// Exact membership test across all rings using [`EvenOdd`].
    pub fn contains(&self, point: &Coord) -> bool {
        self.contains_with(&EvenOdd, point)
    }
}
