use crate::coord::Coord;

/// Axis-aligned bounding box of a polygon.
///
/// Computed over every ring, holes included. Holes of a valid polygon lie within the outer
/// ring, so this is always a superset of the outer ring's extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Computes the bounding box of all the points of all the rings.
    ///
    /// Without any point, the result is an "inverted" infinite box that contains nothing.
    pub fn from_rings(rings: &[Vec<Coord>]) -> Self {
        let mut bbox = Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        for &Coord { y, x } in rings.iter().flatten() {
            bbox.min_y = bbox.min_y.min(y);
            bbox.max_y = bbox.max_y.max(y);
            bbox.min_x = bbox.min_x.min(x);
            bbox.max_x = bbox.max_x.max(x);
        }
        bbox
    }

    /// Returns `true` if the point lies in the closed box.
    ///
    /// Points with a NaN coordinate are never contained.
    pub fn contains(&self, point: &Coord) -> bool {
        (self.min_y..=self.max_y).contains(&point.y) && (self.min_x..=self.max_x).contains(&point.x)
    }

    pub fn width_x(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn width_y(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_holes_too() {
        let outer = vec![Coord::new(0., 0.), Coord::new(2., 0.), Coord::new(1., 3.)];
        // Not a valid hole, but it shows that every ring contributes
        let hole = vec![Coord::new(-1., 1.), Coord::new(1., 4.), Coord::new(1., 1.)];

        let bbox = BoundingBox::from_rings(&[outer, hole]);

        assert_eq!(
            bbox,
            BoundingBox {
                min_x: 0.,
                max_x: 4.,
                min_y: -1.,
                max_y: 2.,
            }
        );
        assert_eq!(bbox.width_x(), 4.);
        assert_eq!(bbox.width_y(), 3.);
    }

    #[test]
    fn closed_box_contains_its_boundary() {
        let bbox = BoundingBox::from_rings(&[vec![Coord::new(0., 0.), Coord::new(1., 1.)]]);

        assert!(bbox.contains(&Coord::new(0.5, 0.5)));
        assert!(bbox.contains(&Coord::new(0., 1.)));
        assert!(bbox.contains(&Coord::new(1., 1.)));
        assert!(!bbox.contains(&Coord::new(1.1, 0.5)));
        assert!(!bbox.contains(&Coord::new(0.5, -0.1)));
        assert!(!bbox.contains(&Coord::new(f64::NAN, 0.5)));
    }

    #[test]
    fn no_points_give_an_empty_box() {
        let bbox = BoundingBox::from_rings(&[vec![]]);

        assert!(bbox.min_y.is_infinite() && bbox.max_y.is_infinite());
        assert!(!bbox.contains(&Coord::new(0., 0.)));
    }
}
