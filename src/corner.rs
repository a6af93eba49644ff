use crate::coord::Coord;
use crate::even_odd::RingMembership;
use crate::grid::GridParameters;

/// Memoized exact membership of grid corners against one ring.
///
/// A corner is shared by up to four tiles, so caching brings the number of exact tests for a
/// full grid down to at most `(granularity + 1)²` instead of `4 * granularity²`.
pub(crate) struct CornerClassifier<'a, M> {
    params: &'a GridParameters,
    membership: &'a M,
    ring: &'a [Coord],
    // One slot per corner, `None` until tested
    states: Vec<Option<bool>>,
    tests_run: usize,
}

impl<'a, M: RingMembership> CornerClassifier<'a, M> {
    pub(crate) fn new(params: &'a GridParameters, membership: &'a M, ring: &'a [Coord]) -> Self {
        let stride = params.granularity + 1;
        Self {
            params,
            membership,
            ring,
            states: vec![None; stride * stride],
            tests_run: 0,
        }
    }

    /// Returns whether corner `(ci, cj)` is inside the ring, running the exact test on first use.
    pub(crate) fn is_inside(&mut self, ci: usize, cj: usize) -> bool {
        let idx = ci * (self.params.granularity + 1) + cj;
        if let Some(inside) = self.states[idx] {
            return inside;
        }
        let inside = self
            .membership
            .contains(&self.params.corner(ci, cj), self.ring);
        self.tests_run += 1;
        self.states[idx] = Some(inside);
        inside
    }

    /// Counts the corners of tile `(i, j)` lying inside the ring.
    pub(crate) fn inside_count(&mut self, i: usize, j: usize) -> usize {
        [(i, j), (i + 1, j), (i + 1, j + 1), (i, j + 1)]
            .into_iter()
            .filter(|&(ci, cj)| self.is_inside(ci, cj))
            .count()
    }

    /// Number of exact tests actually run so far.
    pub(crate) fn tests_run(&self) -> usize {
        self.tests_run
    }
}
