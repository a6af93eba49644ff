use std::num::NonZeroUsize;

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

use crate::coord::Coord;
use crate::error::GeometryError;
use crate::grid::MAX_GRANULARITY;
use crate::polygon::Polygon;

const DEFAULT_GRANULARITY: NonZeroUsize = match NonZeroUsize::new(20) {
    Some(granularity) => granularity,
    None => unreachable!(),
};

/// Construction options of a [`GridIndex`](crate::GridIndex).
///
/// Missing members take their default value when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Number of tiles per axis. Defaults to `20`.
    ///
    /// A finer grid leaves fewer queries to the exact test but costs more to build. Values
    /// above [`MAX_GRANULARITY`] are capped when building the index.
    #[serde(deserialize_with = "bounded_granularity")]
    pub granularity: NonZeroUsize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            granularity: DEFAULT_GRANULARITY,
        }
    }
}

impl Options {
    /// Returns options with the given granularity, or [`None`] if it is zero or above
    /// [`MAX_GRANULARITY`].
    pub fn with_granularity(granularity: usize) -> Option<Self> {
        NonZeroUsize::new(granularity)
            .filter(|granularity| granularity.get() <= MAX_GRANULARITY)
            .map(|granularity| Self { granularity })
    }
}

fn bounded_granularity<'de, D>(deserializer: D) -> Result<NonZeroUsize, D::Error>
where
    D: Deserializer<'de>,
{
    let granularity = NonZeroUsize::deserialize(deserializer)?;
    if granularity.get() > MAX_GRANULARITY {
        return Err(de::Error::custom(format!(
            "granularity {granularity} is above the maximum of {MAX_GRANULARITY}"
        )));
    }
    Ok(granularity)
}

/// A GeoJSON-like feature. Only its geometry is used.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self { geometry }
    }

    /// Extracts the polygon of the feature. See [`Geometry::to_polygon`].
    pub fn to_polygon(&self) -> Result<Polygon, GeometryError> {
        self.geometry.to_polygon()
    }
}

/// A GeoJSON-like geometry.
///
/// The coordinates are kept as raw JSON until the kind has been checked, so that a geometry of
/// another kind is reported as such whatever the shape of its coordinates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Value,
}

impl Geometry {
    /// Creates a polygon geometry from rings of `[Y, X]` pairs.
    pub fn polygon(rings: Vec<Vec<[f64; 2]>>) -> Self {
        Self {
            kind: "Polygon".to_string(),
            coordinates: serde_json::json!(rings),
        }
    }

    /// Reads the geometry as a [`Polygon`].
    ///
    /// Fails if the geometry is not of kind `"Polygon"`, or if its coordinates are not rings of
    /// positions. Positions may carry extra members (such as an altitude), only the first two
    /// are kept.
    pub fn to_polygon(&self) -> Result<Polygon, GeometryError> {
        if self.kind != "Polygon" {
            return Err(GeometryError::InvalidGeometryKind {
                kind: self.kind.clone(),
            });
        }
        let rings = Vec::<Vec<Vec<f64>>>::deserialize(&self.coordinates).map_err(|err| {
            GeometryError::InvalidCoordinates {
                reason: err.to_string(),
            }
        })?;
        let rings = rings
            .into_iter()
            .map(|ring| {
                ring.into_iter()
                    .map(|position| match position[..] {
                        [y, x, ..] => Ok(Coord::new(y, x)),
                        _ => Err(GeometryError::InvalidCoordinates {
                            reason: format!("position with {} member(s)", position.len()),
                        }),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Polygon::new(rings)
    }
}
