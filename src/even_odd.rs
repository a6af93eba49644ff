use itertools::Itertools;

use crate::coord::Coord;

/// An exact point-in-ring test.
///
/// Implementations treat the ring as implicitly closed: the last vertex connects back to the
/// first one. The grid index never assumes an implementation caches anything, all memoization
/// happens on the index side.
pub trait RingMembership {
    /// Returns `true` if `point` lies inside `ring`.
    fn contains(&self, point: &Coord, ring: &[Coord]) -> bool;
}

/// Ray-casting membership test following the even-odd rule.
///
/// A ray is cast from the query point towards increasing `y` and the number of ring edges it
/// crosses is counted. The point is inside if that number is odd.
///
/// For an axis-aligned square, points on the low-`y` and low-`x` edges count as inside while
/// points on the high-`y` and high-`x` edges count as outside.
#[derive(Debug, Default, Clone, Copy)]
pub struct EvenOdd;

impl RingMembership for EvenOdd {
    fn contains(&self, point: &Coord, ring: &[Coord]) -> bool {
        let mut inside = false;
        for (a, b) in ring.iter().circular_tuple_windows() {
            // Only edges straddling the horizontal line through the point can be crossed
            if (a.x > point.x) != (b.x > point.x) {
                let y_cross = (b.y - a.y) * (point.x - a.x) / (b.x - a.x) + a.y;
                if point.y < y_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }
}
