use std::num::NonZeroUsize;
use std::ops::RangeInclusive;

use itertools::{iproduct, Itertools};

use crate::bbox::BoundingBox;
use crate::coord::Coord;

/// Slack, in tile units, added around tile footprints when tracing ring boundaries.
///
/// Rounding in the grid-space conversion can then only mark more tiles, never fewer.
const EPSILON: f64 = 1e-9;

/// Largest number of tiles per axis. Larger granularities are capped to it, which keeps the
/// tile and corner counts within `usize` on every platform.
pub const MAX_GRANULARITY: usize = 1 << 15;

/// Classification of a grid tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Every point of the tile is inside the polygon.
    Inside,
    /// Every point of the tile is outside the polygon.
    Outside,
    /// Membership must be resolved with the exact test.
    Uncertain,
}

impl Tile {
    /// Classifies a tile from the number of its corners lying inside a ring.
    pub(crate) fn from_corner_count(count: usize) -> Self {
        match count {
            0 => Self::Outside,
            4 => Self::Inside,
            _ => Self::Uncertain,
        }
    }

    pub(crate) fn flipped(self) -> Self {
        match self {
            Self::Inside => Self::Outside,
            Self::Outside => Self::Inside,
            Self::Uncertain => Self::Uncertain,
        }
    }
}

/// Geometry of the overlay grid: `granularity` tiles per axis laid over a bounding box.
///
/// Tile `(i, j)` covers `[i, i + 1] * tile_y` along `y` and `[j, j + 1] * tile_x` along `x`,
/// both measured from the bottom-left corner of the bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParameters {
    /// Number of tiles per axis, at most [`MAX_GRANULARITY`].
    pub granularity: usize,
    /// Width of a tile along `x`.
    pub tile_x: f64,
    /// Height of a tile along `y`.
    pub tile_y: f64,
    origin: Coord,
}

impl GridParameters {
    /// Lays `granularity` tiles per axis over `bbox`, capped to [`MAX_GRANULARITY`].
    pub fn new(bbox: &BoundingBox, granularity: NonZeroUsize) -> Self {
        let granularity = granularity.get().min(MAX_GRANULARITY);
        let n = granularity as f64;
        Self {
            granularity,
            tile_x: bbox.width_x() / n,
            tile_y: bbox.width_y() / n,
            origin: Coord::new(bbox.min_y, bbox.min_x),
        }
    }

    /// Returns `true` if the tiles do not have a finite, positive size on both axes.
    ///
    /// This happens for flat or empty polygons. Such a grid cannot classify anything.
    pub fn is_degenerate(&self) -> bool {
        !(self.tile_x.is_finite() && self.tile_x > 0. && self.tile_y.is_finite() && self.tile_y > 0.)
    }

    /// Total number of tiles.
    pub fn tile_count(&self) -> usize {
        self.granularity * self.granularity
    }

    /// Returns the grid corner `(ci, cj)`, with `ci` and `cj` in `0..=granularity`.
    pub fn corner(&self, ci: usize, cj: usize) -> Coord {
        Coord::new(
            self.origin.y + self.tile_y * ci as f64,
            self.origin.x + self.tile_x * cj as f64,
        )
    }

    /// Returns the tile containing a point, if any.
    ///
    /// Tiles are half-open: a point on the line between two tiles belongs to the upper one, and
    /// points on the top or right side of the grid map to no tile.
    pub fn tile_of(&self, point: &Coord) -> Option<(usize, usize)> {
        let (u, v) = self.to_grid(point);
        let (i, j) = (u.floor(), v.floor());
        let range = 0. ..self.granularity as f64;
        (range.contains(&i) && range.contains(&j)).then(|| (i as usize, j as usize))
    }

    /// Converts a point to (fractional) tile coordinates.
    fn to_grid(&self, point: &Coord) -> (f64, f64) {
        (
            (point.y - self.origin.y) / self.tile_y,
            (point.x - self.origin.x) / self.tile_x,
        )
    }

    /// Returns the tile indices whose closed footprints intersect `[t0, t1]` along one axis.
    fn span(&self, t0: f64, t1: f64) -> Option<RangeInclusive<usize>> {
        let last = (self.granularity - 1) as f64;
        let lo = (t0 - EPSILON).floor().max(0.);
        let hi = (t1 + EPSILON).floor().min(last);
        (lo <= hi).then(|| (lo as usize)..=(hi as usize))
    }

    /// Calls `visit` for every tile the segment `[a, b]` passes through or touches.
    ///
    /// The segment is walked one row of tiles at a time: it is clipped to the row and the
    /// columns spanned by the clipped part are visited.
    fn for_each_segment_tile(&self, a: &Coord, b: &Coord, mut visit: impl FnMut(usize, usize)) {
        let (au, av) = self.to_grid(a);
        let (bu, bv) = self.to_grid(b);
        let (u0, u1) = if au <= bu { (au, bu) } else { (bu, au) };
        let Some(rows) = self.span(u0, u1) else {
            return;
        };
        for i in rows {
            let lo = u0.max(i as f64 - EPSILON);
            let hi = u1.min((i + 1) as f64 + EPSILON);
            let (v0, v1) = if au == bu {
                (av, bv)
            } else {
                let v_at = |u: f64| av + (bv - av) * (u - au) / (bu - au);
                (v_at(lo), v_at(hi))
            };
            if let Some(cols) = self.span(v0.min(v1), v0.max(v1)) {
                for j in cols {
                    visit(i, j);
                }
            }
        }
    }

    /// Flags every tile touched by the boundary of a ring, vertices and edges alike.
    ///
    /// The returned mask is indexed like a [`TileMap`]. A tile left unflagged lies entirely on
    /// one side of the ring.
    pub(crate) fn boundary_mask(&self, ring: &[Coord]) -> Vec<bool> {
        let mut mask = vec![false; self.tile_count()];
        for (a, b) in ring.iter().circular_tuple_windows() {
            self.for_each_segment_tile(a, b, |i, j| mask[i * self.granularity + j] = true);
        }
        mask
    }
}

/// Classification of every tile of the grid, stored row-major in a flat array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    granularity: usize,
    tiles: Vec<Tile>,
}

impl TileMap {
    /// Creates a map with the same classification everywhere.
    pub(crate) fn uniform(granularity: usize, tile: Tile) -> Self {
        Self {
            granularity,
            tiles: vec![tile; granularity * granularity],
        }
    }

    /// Creates a map by classifying tiles one by one, row after row.
    pub(crate) fn from_fn(granularity: usize, mut classify: impl FnMut(usize, usize) -> Tile) -> Self {
        let tiles = iproduct!(0..granularity, 0..granularity)
            .map(|(i, j)| classify(i, j))
            .collect();
        Self { granularity, tiles }
    }

    pub fn granularity(&self) -> usize {
        self.granularity
    }

    /// Returns the classification of tile `(i, j)`, or [`None`] if it is not part of the grid.
    pub fn get(&self, i: usize, j: usize) -> Option<Tile> {
        (i < self.granularity && j < self.granularity).then(|| self.tiles[i * self.granularity + j])
    }

    pub(crate) fn get_flat(&self, idx: usize) -> Tile {
        self.tiles[idx]
    }

    pub(crate) fn set_flat(&mut self, idx: usize, tile: Tile) {
        self.tiles[idx] = tile;
    }

    /// Iterates over the tiles, row after row.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), Tile)> + '_ {
        iproduct!(0..self.granularity, 0..self.granularity).zip(self.tiles.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn params(lo: f64, hi: f64, granularity: usize) -> GridParameters {
        let bbox = BoundingBox::from_rings(&[vec![Coord::new(lo, lo), Coord::new(hi, hi)]]);
        GridParameters::new(&bbox, NonZeroUsize::new(granularity).unwrap())
    }

    fn segment_tiles(params: &GridParameters, a: [f64; 2], b: [f64; 2]) -> HashSet<(usize, usize)> {
        let mut tiles = HashSet::new();
        params.for_each_segment_tile(&a.into(), &b.into(), |i, j| {
            tiles.insert((i, j));
        });
        tiles
    }

    #[test]
    fn tile_widths() {
        let params = params(0., 10., 4);

        assert_eq!(params.tile_x, 2.5);
        assert_eq!(params.tile_y, 2.5);
        assert_eq!(params.tile_count(), 16);
        assert!(!params.is_degenerate());
        assert_eq!(params.corner(1, 2), Coord::new(2.5, 5.));
    }

    #[test]
    fn oversized_granularity_is_capped() {
        let bbox = BoundingBox::from_rings(&[vec![Coord::new(0., 0.), Coord::new(1., 1.)]]);
        let params = GridParameters::new(&bbox, NonZeroUsize::new(usize::MAX).unwrap());

        assert_eq!(params.granularity, MAX_GRANULARITY);
        assert_eq!(params.tile_count(), 1 << 30);
        assert_eq!(params.tile_x, 1. / MAX_GRANULARITY as f64);
        assert_eq!(params.corner(MAX_GRANULARITY, MAX_GRANULARITY), Coord::new(1., 1.));
    }

    #[test]
    fn flat_box_is_degenerate() {
        let bbox = BoundingBox::from_rings(&[vec![Coord::new(0., 0.), Coord::new(0., 1.)]]);
        let params = GridParameters::new(&bbox, NonZeroUsize::new(20).unwrap());

        assert!(params.is_degenerate());
        assert_eq!(params.tile_of(&Coord::new(0., 0.5)), None);
    }

    #[test]
    fn tile_of_point() {
        let params = params(0., 10., 10);

        assert_eq!(params.tile_of(&Coord::new(0.5, 3.5)), Some((0, 3)));
        assert_eq!(params.tile_of(&Coord::new(0., 0.)), Some((0, 0)));
        // Shared lines belong to the upper tile
        assert_eq!(params.tile_of(&Coord::new(2., 3.)), Some((2, 3)));
        // The top and right sides of the grid are out of range
        assert_eq!(params.tile_of(&Coord::new(10., 3.)), None);
        assert_eq!(params.tile_of(&Coord::new(3., 10.)), None);
        assert_eq!(params.tile_of(&Coord::new(-0.5, 3.)), None);
        assert_eq!(params.tile_of(&Coord::new(f64::NAN, 3.)), None);
    }

    #[test]
    fn segment_along_one_row() {
        let params = params(0., 10., 10);

        let tiles = segment_tiles(&params, [0.5, 0.5], [2.5, 0.5]);

        assert_eq!(tiles, HashSet::from([(0, 0), (1, 0), (2, 0)]));
    }

    #[test]
    fn segment_through_a_grid_corner_touches_all_four_tiles() {
        let params = params(0., 10., 10);

        let tiles = segment_tiles(&params, [0.5, 0.5], [2.5, 2.5]);

        assert_eq!(
            tiles,
            HashSet::from([(0, 0), (0, 1), (1, 0), (1, 1), (1, 2), (2, 1), (2, 2)])
        );
    }

    #[test]
    fn segment_on_a_grid_line_touches_both_sides() {
        let params = params(0., 10., 10);

        let tiles = segment_tiles(&params, [3., 0.5], [3., 1.5]);

        assert_eq!(tiles, HashSet::from([(2, 0), (2, 1), (3, 0), (3, 1)]));
    }

    #[test]
    fn single_vertex_marks_its_tile() {
        let params = params(0., 10., 10);

        let tiles = segment_tiles(&params, [4.5, 7.5], [4.5, 7.5]);

        assert_eq!(tiles, HashSet::from([(4, 7)]));
    }

    #[test]
    fn boundary_mask_of_small_square() {
        let params = params(0., 10., 10);
        let ring: Vec<Coord> = [[4.2, 4.2], [4.8, 4.2], [4.8, 4.8], [4.2, 4.8]]
            .iter()
            .map(Coord::from)
            .collect();

        let mask = params.boundary_mask(&ring);

        assert_eq!(mask.iter().filter(|&&flag| flag).count(), 1);
        assert!(mask[4 * 10 + 4]);
    }

    #[test]
    fn tile_map_addressing() {
        let map = TileMap::from_fn(3, |i, j| {
            if i == j {
                Tile::Inside
            } else {
                Tile::Outside
            }
        });

        assert_eq!(map.get(1, 1), Some(Tile::Inside));
        assert_eq!(map.get(1, 2), Some(Tile::Outside));
        assert_eq!(map.get(3, 0), None);
        assert_eq!(map.iter().filter(|&(_, tile)| tile == Tile::Inside).count(), 3);
        assert_eq!(map.iter().nth(5), Some(((1, 2), Tile::Outside)));
    }

    #[test]
    fn flipping_keeps_uncertain_tiles() {
        assert_eq!(Tile::Inside.flipped(), Tile::Outside);
        assert_eq!(Tile::Outside.flipped(), Tile::Inside);
        assert_eq!(Tile::Uncertain.flipped(), Tile::Uncertain);
        assert_eq!(Tile::from_corner_count(2), Tile::Uncertain);
    }
}
