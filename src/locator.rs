use rayon::prelude::*;

use crate::coord::Coord;
use crate::polygon::Polygon;

/// A trait to test whether one or several query points lie within a polygon.
pub trait PointMembership {
    /// Tests one query point.
    fn contains_one(&self, point: &Coord) -> bool;

    /// Tests several query points.
    fn contains_many(&self, points: &[Coord]) -> Vec<bool> {
        points.iter().map(|point| self.contains_one(point)).collect()
    }

    /// Tests several query points in parallel.
    fn par_contains_many(&self, points: &[Coord]) -> Vec<bool>
    where
        Self: std::marker::Sync,
    {
        points
            .par_iter()
            .map(|point| self.contains_one(point))
            .collect()
    }
}

/// Brute-force membership: the exact even-odd test against every ring, for every point.
impl PointMembership for Polygon {
    fn contains_one(&self, point: &Coord) -> bool {
        self.contains(point)
    }
}
