use anyhow::Result;
use indexed_polygon::{Coord, GridIndex, Options, PointMembership};
use rand::prelude::*;
use tracing_subscriber::fmt::SubscriberBuilder;

const PARIS: &str = include_str!("../tests/fixtures/paris.geojson");

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    let granularity = std::env::args()
        .nth(1)
        .map(|arg| arg.parse())
        .transpose()?
        .unwrap_or(20);
    let options = Options::with_granularity(granularity)
        .ok_or_else(|| anyhow::anyhow!("The granularity should be positive."))?;

    let index = GridIndex::from_geojson(PARIS, options)?;
    println!("{}", index.cache_stats());

    let bbox = index.bounds();
    let mut rng = rand::thread_rng();
    let query: Vec<_> = (0..420_000)
        .map(|_| {
            Coord::new(
                rng.gen_range(bbox.min_y..bbox.max_y),
                rng.gen_range(bbox.min_x..bbox.max_x),
            )
        })
        .collect();

    let inside = index
        .par_contains_many(&query)
        .into_iter()
        .filter(|&inside| inside)
        .count();
    println!("{inside} of {} random points fall in Paris", query.len());

    Ok(())
}
