//! Layer descriptors and broadcast resolution for hierarchical generation.

use crate::error::GeneratorError;

/// Configuration of a single layer: a node count, a density parameter, and a
/// relative edge weight.
///
/// Layers are ordered; the first layer is the base layer and is generated
/// into an empty graph, so its edges need no duplicate checks. Subsequent
/// layers overlay sparser structure and are checked against already-present
/// edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerDescriptor {
    nodes: usize,
    density: f64,
    relative_weight: f64,
}

impl LayerDescriptor {
    pub(crate) fn new(nodes: usize, density: f64, relative_weight: f64) -> Self {
        Self {
            nodes,
            density,
            relative_weight,
        }
    }

    /// Number of nodes participating in this layer.
    #[must_use]
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Density parameter controlling the expected edge count per node.
    #[must_use]
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Relative weight carried by this layer's edges in weighted mode.
    #[must_use]
    pub fn relative_weight(&self) -> f64 {
        self.relative_weight
    }
}

/// A per-layer real parameter that is either a scalar broadcast to all
/// layers or an explicit per-layer sequence.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Broadcast {
    Scalar(f64),
    PerLayer(Vec<f64>),
}

impl Broadcast {
    /// Resolves the parameter against `layers` configured layers.
    ///
    /// # Errors
    /// Returns [`GeneratorError::BroadcastMismatch`] when an explicit
    /// sequence does not have exactly one entry per layer.
    pub(crate) fn resolve(
        &self,
        layers: usize,
        parameter: &'static str,
    ) -> Result<Vec<f64>, GeneratorError> {
        match self {
            Self::Scalar(value) => Ok(vec![*value; layers]),
            Self::PerLayer(values) => {
                if values.len() == layers {
                    Ok(values.clone())
                } else {
                    Err(GeneratorError::BroadcastMismatch {
                        parameter,
                        layers,
                        got: values.len(),
                    })
                }
            }
        }
    }
}
