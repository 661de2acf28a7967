//! Layer orchestration for spatial random-graph generation.
//!
//! [`SpatialGenerator`] holds a validated configuration and drives the
//! generation run: sample one position pool, then, per layer, build a fresh
//! grid index and synthesise that layer's edges. Generation is synchronous
//! and single-threaded; the run owns every intermediate structure and the
//! returned graph is complete when the call returns.

use petgraph::graph::UnGraph;
use rand::{SeedableRng, rngs::SmallRng};
use tracing::{debug, instrument};

use crate::{
    Result,
    grid::LayerState,
    layer::LayerDescriptor,
    position::Positions,
    synth::synthesize_layer,
};

/// The graph produced by a generation run.
///
/// Node weights are empty; positions are internal to generation and not
/// exposed on the result. Edge weights carry the originating layer's
/// relative weight in weighted mode and `1.0` otherwise.
pub type SpatialGraph = UnGraph<(), f64>;

/// A configured spatial random-graph generator.
///
/// Nodes are placed uniformly at random in the unit cube and connected with
/// a probability that decays polynomially with distance, so edge density
/// follows a polynomial volume law. Constructed through
/// [`crate::GeneratorBuilder`]; the configuration is immutable once built.
///
/// # Examples
/// ```
/// use spatgraph_core::GeneratorBuilder;
///
/// let generator = GeneratorBuilder::new()
///     .with_dimension(2)
///     .with_nodes(100)
///     .with_density(2.0)
///     .build()
///     .expect("configuration is valid");
/// let graph = generator.generate().expect("generation succeeds");
/// assert_eq!(graph.node_count(), 100);
/// ```
#[derive(Clone, Debug)]
pub struct SpatialGenerator {
    dimension: usize,
    layers: Vec<LayerDescriptor>,
    weighted: bool,
    rng_seed: u64,
}

impl SpatialGenerator {
    pub(crate) fn new(
        dimension: usize,
        layers: Vec<LayerDescriptor>,
        weighted: bool,
        rng_seed: u64,
    ) -> Self {
        Self {
            dimension,
            layers,
            weighted,
            rng_seed,
        }
    }

    /// Returns the spatial dimension of the position domain.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the resolved layer configuration, base layer first.
    #[must_use]
    pub fn layers(&self) -> &[LayerDescriptor] {
        &self.layers
    }

    /// Returns `true` when edges carry their layer's relative weight.
    #[must_use]
    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Returns the seed of the deterministic random source.
    #[must_use]
    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    /// Runs the generator to completion and returns the assembled graph.
    ///
    /// The graph holds one node per position in the shared pool, which is
    /// sized to the largest layer: a layer whose node count exceeds all
    /// previous layers extends the pool, a smaller one overlays a prefix
    /// sub-population. Generation is deterministic for a fixed seed and
    /// configuration.
    ///
    /// # Errors
    /// Returns [`crate::GeneratorError::Grid`] when the spatial index
    /// violates an internal invariant. Configuration problems are rejected
    /// earlier, by [`crate::GeneratorBuilder::build`].
    #[instrument(
        name = "generator.generate",
        err,
        skip(self),
        fields(
            dimension = self.dimension,
            layers = self.layers.len(),
            weighted = self.weighted,
            seed = self.rng_seed,
        ),
    )]
    pub fn generate(&self) -> Result<SpatialGraph> {
        let total_nodes = self
            .layers
            .iter()
            .map(LayerDescriptor::nodes)
            .max()
            .unwrap_or(0);

        let mut rng = SmallRng::seed_from_u64(self.rng_seed);
        let positions = Positions::sample(&mut rng, self.dimension, total_nodes);

        // One graph node per position in the shared pool.
        let mut graph = SpatialGraph::with_capacity(positions.len(), 0);
        for _ in 0..positions.len() {
            graph.add_node(());
        }

        for (index, layer) in self.layers.iter().enumerate() {
            let mut state = LayerState::for_population(self.dimension, layer.nodes());
            for node in 0..layer.nodes() {
                state.add_node(positions.get(node), node);
            }
            let inserted = synthesize_layer(
                &mut graph,
                &positions,
                &state,
                &mut rng,
                layer,
                self.weighted,
                index == 0,
            )?;
            debug!(
                layer = index,
                nodes = layer.nodes(),
                density = layer.density(),
                edges = inserted,
                "layer synthesised"
            );
        }

        Ok(graph)
    }
}
