//! Spatgraph core library: spatial random-graph generation.
//!
//! Nodes are placed uniformly at random in the d-dimensional unit cube and
//! connected with a probability that decays polynomially with Euclidean
//! distance. A per-layer grid index with incremental shell expansion keeps
//! candidate search sub-quadratic, and a layer orchestrator composes
//! hierarchical graphs from a base layer plus sparser overlays.

mod builder;
mod error;
mod generator;
mod grid;
mod layer;
mod position;
mod synth;

pub use crate::{
    builder::GeneratorBuilder,
    error::{GeneratorError, GeneratorErrorCode, GridError, GridErrorCode, Result},
    generator::{SpatialGenerator, SpatialGraph},
    grid::LayerState,
    layer::LayerDescriptor,
};
