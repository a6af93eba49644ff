use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::bbox::BoundingBox;
use crate::coord::Coord;
use crate::error::GeometryError;
use crate::even_odd::{EvenOdd, RingMembership};
use crate::exclusion::carve_holes;
use crate::feature::{Feature, Options};
use crate::grid::{GridParameters, Tile, TileMap};
use crate::inclusion::classify_outer_ring;
use crate::locator::PointMembership;
use crate::polygon::Polygon;
use crate::stats::CacheStats;

/// A polygon indexed by a coarse grid for fast membership queries.
///
/// The bounding box of the polygon is divided into `granularity × granularity` tiles, and each
/// tile is classified once and for all as [`Tile::Inside`], [`Tile::Outside`] or
/// [`Tile::Uncertain`]. Queries falling in a certain tile are answered with a single lookup,
/// the others fall back to the exact test against every ring of the polygon.
///
/// The classification is conservative: a tile is only certain if no part of the polygon
/// boundary touches it. The answer of [`GridIndex::intersects`] is therefore always the one of
/// the exact test, the granularity only changes how often the exact test runs.
///
/// Building the index costs *O*(`granularity²`) exact tests per ring thanks to the memoization
/// of grid corners. Once built, the index is never modified and can be shared between threads.
#[derive(Debug, Clone)]
pub struct GridIndex<M = EvenOdd> {
    polygon: Polygon,
    bbox: BoundingBox,
    params: GridParameters,
    tiles: TileMap,
    membership: M,
}

impl GridIndex {
    /// Builds the index of a polygon.
    pub fn new(polygon: Polygon, options: Options) -> Self {
        Self::with_membership(polygon, options, EvenOdd)
    }

    /// Builds the index of the polygon of a feature.
    ///
    /// Fails with [`GeometryError::InvalidGeometryKind`] if the geometry is not a polygon.
    pub fn from_feature(feature: &Feature, options: Options) -> Result<Self, GeometryError> {
        Ok(Self::new(feature.to_polygon()?, options))
    }

    /// Builds the index of a polygon given as a GeoJSON feature.
    pub fn from_geojson(geojson: &str, options: Options) -> Result<Self> {
        let feature: Feature =
            serde_json::from_str(geojson).context("Failed to parse the GeoJSON feature")?;
        Ok(Self::from_feature(&feature, options)?)
    }
}

impl<M: RingMembership> GridIndex<M> {
    /// Builds the index of a polygon with a custom exact membership test.
    pub fn with_membership(polygon: Polygon, options: Options, membership: M) -> Self {
        let bbox = BoundingBox::from_rings(polygon.rings());
        let params = GridParameters::new(&bbox, options.granularity);
        if params.granularity < options.granularity.get() {
            warn!(
                requested = options.granularity.get(),
                granularity = params.granularity,
                "granularity capped"
            );
        }
        debug!(
            granularity = params.granularity,
            rings = polygon.rings().len(),
            vertices = polygon.vertex_count(),
            "building grid index"
        );

        let tiles = if params.is_degenerate() {
            warn!(?bbox, "degenerate bounding box, every query will use the exact test");
            TileMap::uniform(params.granularity, Tile::Uncertain)
        } else {
            let mut tiles = classify_outer_ring(&params, &membership, polygon.outer());
            carve_holes(&params, &membership, polygon.holes(), &mut tiles);
            tiles
        };

        let index = Self {
            polygon,
            bbox,
            params,
            tiles,
            membership,
        };
        let stats = index.cache_stats();
        debug!(
            inside = stats.inside_count,
            outside = stats.outside_count,
            uncertain = stats.uncertain_count,
            "grid index built"
        );
        index
    }

    /// Returns `true` if the point lies inside the polygon.
    ///
    /// Points are given in `[Y, X]` order when passed as raw pairs.
    pub fn intersects(&self, point: impl Into<Coord>) -> bool {
        let point = point.into();
        if !self.bbox.contains(&point) {
            return false;
        }
        let tile = self
            .params
            .tile_of(&point)
            .and_then(|(i, j)| self.tiles.get(i, j));
        match tile {
            Some(Tile::Inside) => true,
            Some(Tile::Outside) => false,
            // Uncertain tile, or a point on the top or right side of the box
            Some(Tile::Uncertain) | None => self.polygon.contains_with(&self.membership, &point),
        }
    }

    /// Returns the tile classification counts.
    pub fn cache_stats(&self) -> CacheStats {
        CacheStats::from_tiles(&self.tiles)
    }

    /// Returns the classification of tile `(i, j)`, where `i` runs along `y` and `j` along `x`.
    pub fn tile(&self, i: usize, j: usize) -> Option<Tile> {
        self.tiles.get(i, j)
    }

    pub fn tiles(&self) -> &TileMap {
        &self.tiles
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn params(&self) -> &GridParameters {
        &self.params
    }

    pub fn granularity(&self) -> usize {
        self.params.granularity
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }
}

impl<M: RingMembership> PointMembership for GridIndex<M> {
    fn contains_one(&self, point: &Coord) -> bool {
        self.intersects(*point)
    }
}
