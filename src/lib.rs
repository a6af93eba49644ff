//! Fast point-in-polygon queries against a static polygon with holes.
//!
//! Repeatedly asking whether points lie inside the same polygon (geofencing, map tiling...)
//! can be made much cheaper than running an exact point-in-polygon test every time by paying
//! a one-off construction cost. This crate lays a regular grid over the bounding box of the
//! polygon and classifies each tile as inside, outside, or uncertain. Queries landing in a
//! certain tile are answered by a lookup, and only the others run the exact even-odd test.
//!
//! The answer is always the exact one: the granularity of the grid only trades construction
//! time and memory for the share of queries needing the exact test.
//!
//! Coordinates follow the `[Y, X]` order of the input data: the first member of a pair is `y`.
//! The [`Coord`] type makes that explicit.
//!
//! ```
//! use indexed_polygon::{GridIndex, Options, Polygon};
//!
//! let square = vec![[0., 0.], [10., 0.], [10., 10.], [0., 10.]];
//! let hole = vec![[4., 4.], [6., 4.], [6., 6.], [4., 6.]];
//! let polygon = Polygon::from_pairs(vec![square, hole]).unwrap();
//!
//! let index = GridIndex::new(polygon, Options::default());
//!
//! assert!(index.intersects([1., 1.]));
//! assert!(!index.intersects([5., 5.]));
//! assert!(!index.intersects([11., 5.]));
//! ```

mod bbox;
mod coord;
mod corner;
mod error;
mod even_odd;
mod exclusion;
mod feature;
mod grid;
mod grid_index;
mod inclusion;
mod locator;
mod polygon;
mod stats;

pub use bbox::BoundingBox;
pub use coord::Coord;
pub use error::GeometryError;
pub use even_odd::{EvenOdd, RingMembership};
pub use feature::{Feature, Geometry, Options};
pub use grid::{GridParameters, Tile, TileMap, MAX_GRANULARITY};
pub use grid_index::GridIndex;
pub use locator::PointMembership;
pub use polygon::Polygon;
pub use stats::CacheStats;
