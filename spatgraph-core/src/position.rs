//! Uniform position sampling for generated nodes.
//!
//! Every node of a generation run owns exactly one position in the
//! d-dimensional unit cube `[0,1)^d`. Positions are sampled once, stored in a
//! flat node-major coordinate buffer, and never mutated afterwards; all
//! layers of a hierarchical run resolve node positions against the same pool.

use rand::Rng;

/// Immutable store of node positions for one generation run.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Positions {
    dimension: usize,
    coords: Vec<f64>,
}

impl Positions {
    /// Draws `count` positions with each coordinate uniform in `[0,1)`.
    ///
    /// A `count` of zero yields an empty store rather than an error.
    pub(crate) fn sample<R: Rng>(rng: &mut R, dimension: usize, count: usize) -> Self {
        let coords = (0..dimension.saturating_mul(count))
            .map(|_| rng.gen_range(0.0..1.0))
            .collect();
        Self { dimension, coords }
    }

    #[cfg(test)]
    pub(crate) fn from_coords(dimension: usize, coords: Vec<f64>) -> Self {
        assert_eq!(coords.len() % dimension, 0, "coords must be node-major");
        Self { dimension, coords }
    }

    pub(crate) fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of nodes with a resolvable position.
    pub(crate) fn len(&self) -> usize {
        if self.dimension == 0 {
            0
        } else {
            self.coords.len() / self.dimension
        }
    }

    /// Returns the coordinates of `node`.
    pub(crate) fn get(&self, node: usize) -> &[f64] {
        let start = node * self.dimension;
        &self.coords[start..start + self.dimension]
    }

    /// Euclidean distance between two nodes.
    pub(crate) fn distance(&self, left: usize, right: usize) -> f64 {
        self.get(left)
            .iter()
            .zip(self.get(right))
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}
