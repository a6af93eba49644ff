use std::fmt;

use crate::grid::{Tile, TileMap};

/// Classification counts of a [`GridIndex`](crate::GridIndex), used to tune its granularity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStats {
    pub inside_count: usize,
    pub outside_count: usize,
    pub uncertain_count: usize,
    /// `uncertain_count / (inside_count + outside_count)`.
    ///
    /// Not finite when no tile is certain.
    pub uncertain_ratio: f64,
}

impl CacheStats {
    pub(crate) fn from_tiles(tiles: &TileMap) -> Self {
        let (inside_count, outside_count, uncertain_count) = tiles.iter().fold(
            (0, 0, 0),
            |(mut inside, mut outside, mut uncertain), (_, tile)| {
                match tile {
                    Tile::Inside => inside += 1,
                    Tile::Outside => outside += 1,
                    Tile::Uncertain => uncertain += 1,
                };
                (inside, outside, uncertain)
            },
        );
        Self {
            inside_count,
            outside_count,
            uncertain_count,
            uncertain_ratio: uncertain_count as f64 / (inside_count + outside_count) as f64,
        }
    }

    /// Total number of tiles.
    pub fn tile_count(&self) -> usize {
        self.inside_count + self.outside_count + self.uncertain_count
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid index tiles:")?;
        writeln!(f, "\t{} inside", self.inside_count)?;
        writeln!(f, "\t{} outside", self.outside_count)?;
        writeln!(f, "\t{} uncertain", self.uncertain_count)?;
        write!(f, "Uncertain ratio: {:.3}", self.uncertain_ratio)
    }
}
