use tracing::trace;

use crate::corner::CornerClassifier;
use crate::coord::Coord;
use crate::even_odd::RingMembership;
use crate::grid::{GridParameters, Tile, TileMap};

/// Classifies every tile of the grid against the outer ring.
///
/// Tiles touched by the ring boundary, either because they contain a vertex or because an
/// edge goes through them, are marked [`Tile::Uncertain`] before anything else. Four-corner
/// sampling alone would miss a spike or a thin channel that enters and leaves a tile between
/// two corners.
///
/// Every other tile is classified from its corners: all four inside the ring gives
/// [`Tile::Inside`], none gives [`Tile::Outside`]. Since no edge crosses such a tile, mixed
/// corners can only come from rounding and fall back to [`Tile::Uncertain`].
pub(crate) fn classify_outer_ring<M: RingMembership>(
    params: &GridParameters,
    membership: &M,
    ring: &[Coord],
) -> TileMap {
    let n = params.granularity;
    let boundary = params.boundary_mask(ring);
    let mut corners = CornerClassifier::new(params, membership, ring);
    let tiles = TileMap::from_fn(n, |i, j| {
        if boundary[i * n + j] {
            Tile::Uncertain
        } else {
            Tile::from_corner_count(corners.inside_count(i, j))
        }
    });
    trace!(exact_tests = corners.tests_run(), "outer ring classified");
    tiles
}
