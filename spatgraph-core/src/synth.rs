//! Distance-dependent edge synthesis.
//!
//! For each node the synthesiser expands an integer search radius outward,
//! pulling one disjoint cell shell per step from the layer's grid, and draws
//! an acceptance decision for every candidate pair. The acceptance
//! probability follows a polynomial volume law: it decays with the spatial
//! dimension's power of the Euclidean distance,
//! `p(d) = min(1, theta * d^-dim)`, with `theta` calibrated so the expected
//! accepted degree per node tracks the layer's density parameter. The
//! calibration is first-order: the heavy tail of the law contributes a
//! logarithmic correction which is folded into `theta` once rather than
//! solved to a fixed point.
//!
//! Expansion stops as soon as the expected contribution of everything beyond
//! the processed shells falls below [`TAIL_EPSILON`], or once the next shell
//! lies past the domain diagonal.

use petgraph::graph::NodeIndex;
use rand::Rng;
use tracing::trace;

use crate::{
    error::GridError, generator::SpatialGraph, grid::LayerState, layer::LayerDescriptor,
    position::Positions,
};

/// Expected-edge mass below which radius expansion is considered converged.
const TAIL_EPSILON: f64 = 1e-3;

/// Edge weight used when weighting is disabled.
const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

/// Distance-to-probability law for one layer.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AcceptanceRule {
    theta: f64,
    dimension: i32,
    /// Nodes per unit ball volume: `n * ball_volume(dim)`.
    node_density: f64,
    diagonal: f64,
}

impl AcceptanceRule {
    pub(crate) fn for_layer(dimension: usize, nodes: usize, density: f64) -> Self {
        let ball = unit_ball_volume(dimension);
        let diagonal = (dimension as f64).sqrt();
        let node_density = nodes.max(1) as f64 * ball;
        // Radius at which the uncorrected law saturates to probability one;
        // candidates inside it alone would account for the full density.
        let saturation = (density / node_density).powf(1.0 / dimension as f64);
        let tail = 1.0 + dimension as f64 * (diagonal / saturation).max(1.0).ln();
        let theta = density / (node_density * tail);
        Self {
            theta,
            dimension: dimension as i32,
            node_density,
            diagonal,
        }
    }

    /// Probability of accepting a candidate at the given distance.
    pub(crate) fn probability(&self, distance: f64) -> f64 {
        if self.theta <= 0.0 {
            return 0.0;
        }
        if distance <= 0.0 {
            return 1.0;
        }
        (self.theta / distance.powi(self.dimension)).min(1.0)
    }

    /// Expected number of acceptances contributed by all candidates farther
    /// than `from`, assuming uniformly placed nodes.
    pub(crate) fn tail_expectation(&self, from: f64) -> f64 {
        if self.theta <= 0.0 || from >= self.diagonal {
            return 0.0;
        }
        let saturated_radius = self.theta.powf(1.0 / f64::from(self.dimension));
        let saturated_mass = if from < saturated_radius {
            self.node_density
                * (saturated_radius.powi(self.dimension) - from.max(0.0).powi(self.dimension))
        } else {
            0.0
        };
        let lower = from.max(saturated_radius);
        let tail_mass = if lower < self.diagonal {
            self.theta * self.node_density * f64::from(self.dimension) * (self.diagonal / lower).ln()
        } else {
            0.0
        };
        saturated_mass + tail_mass
    }
}

/// Synthesises the edges of one layer into `graph`, returning the number of
/// inserted edges.
///
/// Every unordered node pair of the layer is evaluated exactly once (from
/// the side of the larger node id), so a single pass can never propose the
/// same pair twice. The base layer writes into a graph without edges and
/// inserts unconditionally; overlay layers check for an existing edge
/// first.
///
/// # Errors
/// Returns [`GridError`] when a computed cell index falls outside the
/// layer's grid, which indicates an internal invariant violation.
pub(crate) fn synthesize_layer<R: Rng>(
    graph: &mut SpatialGraph,
    positions: &Positions,
    state: &LayerState,
    rng: &mut R,
    layer: &LayerDescriptor,
    weighted: bool,
    base_layer: bool,
) -> Result<usize, GridError> {
    let rule = AcceptanceRule::for_layer(positions.dimension(), layer.nodes(), layer.density());
    let cell_width = state.cell_width();
    let max_radius = state.cells_per_dimension();
    let weight = if weighted {
        layer.relative_weight()
    } else {
        DEFAULT_EDGE_WEIGHT
    };
    let mut inserted = 0usize;

    for node in 0..layer.nodes() {
        let origin = state.cell_of(positions.get(node));
        for radius in 0..=max_radius {
            for cell in state.box_surface(origin, radius) {
                for &candidate in state.nodes(cell)? {
                    if candidate >= node {
                        continue;
                    }
                    let distance = positions.distance(node, candidate);
                    if rng.gen_range(0.0..1.0) < rule.probability(distance) {
                        let endpoints = (NodeIndex::new(candidate), NodeIndex::new(node));
                        if base_layer || graph.find_edge(endpoints.0, endpoints.1).is_none() {
                            graph.add_edge(endpoints.0, endpoints.1, weight);
                            inserted += 1;
                        }
                    }
                }
            }
            // Cells of the next shell lie at least `radius` cell widths away.
            let frontier = radius as f64 * cell_width;
            if frontier > 0.0 && rule.tail_expectation(frontier) < TAIL_EPSILON {
                trace!(node, radius, "radius expansion converged");
                break;
            }
        }
    }
    Ok(inserted)
}

/// Volume of the unit ball in `dimension` dimensions, via the recurrence
/// `V_d = (2 pi / d) V_{d-2}` with `V_0 = 1` and `V_1 = 2`.
fn unit_ball_volume(dimension: usize) -> f64 {
    let mut volume = 1.0;
    let mut d = dimension;
    while d > 1 {
        volume *= std::f64::consts::TAU / d as f64;
        d -= 2;
    }
    if d == 1 {
        volume *= 2.0;
    }
    volume
}
