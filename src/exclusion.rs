use itertools::iproduct;
use tracing::trace;

use crate::corner::CornerClassifier;
use crate::coord::Coord;
use crate::even_odd::RingMembership;
use crate::grid::{GridParameters, Tile, TileMap};

/// Refines the classification of the outer ring with the holes, one hole at a time.
///
/// Holes are processed strictly in input order, each one working on the result of the
/// previous ones. A tile that becomes [`Tile::Uncertain`] stays so for good and is skipped by
/// every later hole.
pub(crate) fn carve_holes<M: RingMembership>(
    params: &GridParameters,
    membership: &M,
    holes: &[Vec<Coord>],
    tiles: &mut TileMap,
) {
    for (idx, hole) in holes.iter().enumerate() {
        let exact_tests = carve_hole(params, membership, hole, tiles);
        trace!(hole = idx + 1, vertices = hole.len(), exact_tests, "hole carved");
    }
}

/// Applies a single hole to the tiles. Returns the number of exact tests run.
///
/// For every tile that is not already uncertain:
/// - a tile touched by the hole boundary becomes uncertain. In particular, a hole lying
///   entirely within one tile makes that tile uncertain.
/// - a tile with its four corners in the hole is flipped: what was inside is now outside and
///   vice versa.
/// - a tile with no corner in the hole is left as is.
///
/// A hole without vertices removes nothing and leaves every tile unchanged.
fn carve_hole<M: RingMembership>(
    params: &GridParameters,
    membership: &M,
    hole: &[Coord],
    tiles: &mut TileMap,
) -> usize {
    if hole.is_empty() {
        return 0;
    }
    let n = params.granularity;
    let boundary = params.boundary_mask(hole);
    let mut corners = CornerClassifier::new(params, membership, hole);
    for (idx, (i, j)) in iproduct!(0..n, 0..n).enumerate() {
        let tile = tiles.get_flat(idx);
        if tile == Tile::Uncertain {
            continue;
        }
        let refined = if boundary[idx] {
            Tile::Uncertain
        } else {
            match corners.inside_count(i, j) {
                0 => tile,
                4 => tile.flipped(),
                _ => Tile::Uncertain,
            }
        };
        tiles.set_flat(idx, refined);
    }
    corners.tests_run()
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;
    use crate::bbox::BoundingBox;
    use crate::even_odd::EvenOdd;
    use crate::inclusion::classify_outer_ring;

    fn square(lo: f64, hi: f64) -> Vec<Coord> {
        [[lo, lo], [hi, lo], [hi, hi], [lo, hi]]
            .iter()
            .map(Coord::from)
            .collect()
    }

    fn classify(rings: &[Vec<Coord>], granularity: usize) -> TileMap {
        let bbox = BoundingBox::from_rings(rings);
        let params = GridParameters::new(&bbox, NonZeroUsize::new(granularity).unwrap());
        let mut tiles = classify_outer_ring(&params, &EvenOdd, &rings[0]);
        carve_holes(&params, &EvenOdd, &rings[1..], &mut tiles);
        tiles
    }

    #[test]
    fn hole_within_a_tile_makes_it_uncertain() {
        let tiles = classify(&[square(0., 10.), square(4.2, 4.8)], 10);

        assert_eq!(tiles.get(4, 4), Some(Tile::Uncertain));
        assert_eq!(tiles.get(5, 5), Some(Tile::Inside));
        assert_eq!(tiles.get(3, 4), Some(Tile::Inside));
    }

    #[test]
    fn hole_covering_tiles_flips_them_outside() {
        let tiles = classify(&[square(0., 10.), square(2.5, 7.5)], 10);

        for k in 3..=6 {
            assert_eq!(tiles.get(k, k), Some(Tile::Outside));
        }
        // Crossed by the hole boundary
        assert_eq!(tiles.get(2, 2), Some(Tile::Uncertain));
        assert_eq!(tiles.get(7, 4), Some(Tile::Uncertain));
        // Untouched by the hole
        assert_eq!(tiles.get(1, 1), Some(Tile::Inside));
        assert_eq!(tiles.get(8, 8), Some(Tile::Inside));
    }

    #[test]
    fn island_in_a_hole_flips_tiles_back_inside() {
        let tiles = classify(&[square(0., 10.), square(1.5, 8.5), square(3.5, 6.5)], 10);

        // Only in the hole
        assert_eq!(tiles.get(2, 2), Some(Tile::Outside));
        assert_eq!(tiles.get(7, 7), Some(Tile::Outside));
        assert_eq!(tiles.get(2, 7), Some(Tile::Outside));
        // In the island
        assert_eq!(tiles.get(4, 4), Some(Tile::Inside));
        assert_eq!(tiles.get(5, 5), Some(Tile::Inside));
        // On the hole and island boundaries
        assert_eq!(tiles.get(1, 5), Some(Tile::Uncertain));
        assert_eq!(tiles.get(3, 4), Some(Tile::Uncertain));
    }

    #[test]
    fn uncertain_tiles_are_sticky() {
        // The first hole makes (4, 4) uncertain. The second one covers it entirely, and would
        // flip it if it were still certain.
        let tiles = classify(&[square(0., 10.), square(4.2, 4.8), square(1.5, 8.5)], 10);

        assert_eq!(tiles.get(4, 4), Some(Tile::Uncertain));
        assert_eq!(tiles.get(5, 5), Some(Tile::Outside));
    }

    #[test]
    fn empty_hole_changes_nothing() {
        let outer = square(0., 10.);
        let bbox = BoundingBox::from_rings(&[outer.clone()]);
        let params = GridParameters::new(&bbox, NonZeroUsize::new(10).unwrap());
        let expected = classify_outer_ring(&params, &EvenOdd, &outer);
        let mut tiles = expected.clone();

        assert_eq!(carve_hole(&params, &EvenOdd, &[], &mut tiles), 0);
        assert_eq!(tiles, expected);
        assert_eq!(classify(&[outer, vec![]], 10), expected);
    }
}
