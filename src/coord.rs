/// A point of the plane, stored in `[Y, X]` order.
///
/// Raw pairs coming from the outside world (GeoJSON positions, query points)
/// put the Y coordinate first. Going through this type keeps that convention
/// in one place instead of relying on every caller to index pairs correctly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    /// First component of a raw pair.
    pub y: f64,
    /// Second component of a raw pair.
    pub x: f64,
}

impl Coord {
    /// Creates a new [`Coord`].
    pub const fn new(y: f64, x: f64) -> Self {
        Self { y, x }
    }
}

impl From<&Coord> for [f64; 2] {
    fn from(val: &Coord) -> Self {
        [val.y, val.x]
    }
}

impl From<Coord> for [f64; 2] {
    fn from(val: Coord) -> Self {
        (&val).into()
    }
}

impl From<&[f64; 2]> for Coord {
    fn from(value: &[f64; 2]) -> Self {
        Self {
            y: value[0],
            x: value[1],
        }
    }
}

impl From<[f64; 2]> for Coord {
    fn from(value: [f64; 2]) -> Self {
        Self::from(&value)
    }
}

impl From<(f64, f64)> for Coord {
    fn from((y, x): (f64, f64)) -> Self {
        Self { y, x }
    }
}
