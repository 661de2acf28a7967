//! Builder for configuring [`SpatialGenerator`] instances.
//!
//! One configuration surface replaces the constructor overload family a
//! direct port would need: node counts are a sequence (a single count is a
//! one-layer sequence), while densities and relative weights broadcast from
//! scalars or are given per layer. Everything is validated once in
//! [`GeneratorBuilder::build`], before any grid work begins.

use crate::{
    Result,
    error::GeneratorError,
    generator::SpatialGenerator,
    layer::{Broadcast, LayerDescriptor},
};

const DEFAULT_RNG_SEED: u64 = 0xDECA_FBAD;

#[derive(Clone, Debug, PartialEq)]
enum WeightMode {
    /// Structural edges only; every edge weight is `1.0`.
    Unweighted,
    /// Weighted edges with a uniform relative weight of `1.0` per layer.
    Uniform,
    /// Weighted edges with an explicit relative weight per layer.
    PerLayer(Vec<f64>),
}

/// Configures and constructs [`SpatialGenerator`] instances.
///
/// # Examples
/// ```
/// use spatgraph_core::GeneratorBuilder;
///
/// let generator = GeneratorBuilder::new()
///     .with_dimension(2)
///     .with_layer_nodes(vec![50, 10])
///     .with_densities(vec![1.0, 0.5])
///     .with_relative_weights(vec![1.0, 0.5])
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(generator.layers().len(), 2);
/// assert!(generator.is_weighted());
/// ```
#[derive(Clone, Debug)]
pub struct GeneratorBuilder {
    dimension: usize,
    layer_nodes: Vec<usize>,
    densities: Broadcast,
    weights: WeightMode,
    rng_seed: u64,
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self {
            dimension: 2,
            layer_nodes: Vec::new(),
            densities: Broadcast::Scalar(1.0),
            weights: WeightMode::Unweighted,
            rng_seed: DEFAULT_RNG_SEED,
        }
    }
}

impl GeneratorBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// The defaults are two-dimensional, unweighted, with a density of
    /// `1.0`; at least one layer node count must be supplied before
    /// [`Self::build`] succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the spatial dimension of the position domain.
    #[must_use]
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Configures a single layer with `nodes` nodes.
    ///
    /// # Examples
    /// ```
    /// use spatgraph_core::GeneratorBuilder;
    ///
    /// let generator = GeneratorBuilder::new()
    ///     .with_nodes(100)
    ///     .build()
    ///     .expect("single-layer configuration is valid");
    /// assert_eq!(generator.layers().len(), 1);
    /// assert_eq!(generator.layers()[0].nodes(), 100);
    /// ```
    #[must_use]
    pub fn with_nodes(mut self, nodes: usize) -> Self {
        self.layer_nodes = vec![nodes];
        self
    }

    /// Configures hierarchical layers with one node count per layer, base
    /// layer first.
    #[must_use]
    pub fn with_layer_nodes(mut self, nodes: Vec<usize>) -> Self {
        self.layer_nodes = nodes;
        self
    }

    /// Sets a single density parameter broadcast to all layers.
    #[must_use]
    pub fn with_density(mut self, density: f64) -> Self {
        self.densities = Broadcast::Scalar(density);
        self
    }

    /// Sets one density parameter per layer.
    #[must_use]
    pub fn with_densities(mut self, densities: Vec<f64>) -> Self {
        self.densities = Broadcast::PerLayer(densities);
        self
    }

    /// Enables or disables uniform edge weighting.
    ///
    /// Enabled weighting stamps a relative weight of `1.0` on every layer;
    /// use [`Self::with_relative_weights`] for per-layer scaling.
    #[must_use]
    pub fn weighted(mut self, weighted: bool) -> Self {
        self.weights = if weighted {
            WeightMode::Uniform
        } else {
            WeightMode::Unweighted
        };
        self
    }

    /// Enables weighting with an explicit relative weight per layer.
    #[must_use]
    pub fn with_relative_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = WeightMode::PerLayer(weights);
        self
    }

    /// Seeds the internal random source to make generation deterministic.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Validates the configuration and constructs a [`SpatialGenerator`].
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidDimension`] for a zero dimension,
    /// [`GeneratorError::NoLayers`] when no node counts were supplied,
    /// [`GeneratorError::BroadcastMismatch`] when a per-layer sequence does
    /// not match the layer count, and [`GeneratorError::InvalidDensity`] or
    /// [`GeneratorError::InvalidRelativeWeight`] for out-of-domain values.
    pub fn build(self) -> Result<SpatialGenerator> {
        if self.dimension == 0 {
            return Err(GeneratorError::InvalidDimension { got: 0 });
        }
        if self.layer_nodes.is_empty() {
            return Err(GeneratorError::NoLayers);
        }
        let layer_count = self.layer_nodes.len();

        let densities = self.densities.resolve(layer_count, "densities")?;
        for (layer, &density) in densities.iter().enumerate() {
            if !density.is_finite() || density < 0.0 {
                return Err(GeneratorError::InvalidDensity {
                    layer,
                    got: density,
                });
            }
        }

        let (weighted, relative_weights) = match self.weights {
            WeightMode::Unweighted => (false, vec![1.0; layer_count]),
            WeightMode::Uniform => (true, vec![1.0; layer_count]),
            WeightMode::PerLayer(weights) => {
                let resolved =
                    Broadcast::PerLayer(weights).resolve(layer_count, "relative weights")?;
                for (layer, &weight) in resolved.iter().enumerate() {
                    if !weight.is_finite() {
                        return Err(GeneratorError::InvalidRelativeWeight { layer, got: weight });
                    }
                }
                (true, resolved)
            }
        };

        let layers = self
            .layer_nodes
            .iter()
            .zip(densities)
            .zip(relative_weights)
            .map(|((&nodes, density), weight)| LayerDescriptor::new(nodes, density, weight))
            .collect();

        Ok(SpatialGenerator::new(
            self.dimension,
            layers,
            weighted,
            self.rng_seed,
        ))
    }
}
