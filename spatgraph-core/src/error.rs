//! Error types for the spatgraph core library.
//!
//! Defines the configuration and grid error enums exposed by the public API,
//! stable machine-readable error codes, and a convenient result alias.

use thiserror::Error;

/// An error produced by the spatial grid index.
///
/// Grid errors signal violated internal invariants rather than recoverable
/// runtime conditions: a cell index outside the allocated grid means a
/// position was mapped inconsistently with the grid layout. They are
/// surfaced loudly instead of being clamped away.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GridError {
    /// A cell index fell outside the allocated cell array.
    #[error("cell index {cell} is out of range for a grid of {cell_count} cells")]
    CellOutOfRange {
        /// The offending flattened cell index.
        cell: usize,
        /// Total number of cells allocated for the layer.
        cell_count: usize,
    },
}

impl GridError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> GridErrorCode {
        match self {
            Self::CellOutOfRange { .. } => GridErrorCode::CellOutOfRange,
        }
    }
}

/// Machine-readable error codes for [`GridError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum GridErrorCode {
    /// A cell index fell outside the allocated cell array.
    CellOutOfRange,
}

impl GridErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CellOutOfRange => "GRID_CELL_OUT_OF_RANGE",
        }
    }
}

/// Error type produced when configuring or running a
/// [`crate::SpatialGenerator`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeneratorError {
    /// The spatial dimension must be at least one.
    #[error("dimension must be at least 1 (got {got})")]
    InvalidDimension {
        /// The invalid dimension supplied by the caller.
        got: usize,
    },
    /// No layer node counts were configured.
    #[error("at least one layer must be configured")]
    NoLayers,
    /// A per-layer parameter sequence did not match the number of layers.
    #[error("{parameter} has {got} entries but {layers} layers are configured")]
    BroadcastMismatch {
        /// Name of the offending configuration parameter.
        parameter: &'static str,
        /// Number of configured layers.
        layers: usize,
        /// Length of the sequence supplied by the caller.
        got: usize,
    },
    /// A layer density parameter was negative or non-finite.
    #[error("density for layer {layer} must be finite and non-negative (got {got})")]
    InvalidDensity {
        /// Index of the layer with the invalid density.
        layer: usize,
        /// The invalid density value.
        got: f64,
    },
    /// A layer relative weight was non-finite.
    #[error("relative weight for layer {layer} must be finite (got {got})")]
    InvalidRelativeWeight {
        /// Index of the layer with the invalid weight.
        layer: usize,
        /// The invalid weight value.
        got: f64,
    },
    /// The spatial grid index violated an internal invariant.
    #[error("spatial grid failed: {source}")]
    Grid {
        /// Underlying grid error surfaced by the index.
        #[from]
        source: GridError,
    },
}

impl GeneratorError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> GeneratorErrorCode {
        match self {
            Self::InvalidDimension { .. } => GeneratorErrorCode::InvalidDimension,
            Self::NoLayers => GeneratorErrorCode::NoLayers,
            Self::BroadcastMismatch { .. } => GeneratorErrorCode::BroadcastMismatch,
            Self::InvalidDensity { .. } => GeneratorErrorCode::InvalidDensity,
            Self::InvalidRelativeWeight { .. } => GeneratorErrorCode::InvalidRelativeWeight,
            Self::Grid { .. } => GeneratorErrorCode::GridFailure,
        }
    }

    /// Retrieve the inner [`GridErrorCode`] when the error originated in the
    /// spatial grid index.
    #[must_use]
    pub const fn grid_code(&self) -> Option<GridErrorCode> {
        match self {
            Self::Grid { source } => Some(source.code()),
            _ => None,
        }
    }
}

/// Machine-readable error codes for [`GeneratorError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum GeneratorErrorCode {
    /// The spatial dimension must be at least one.
    InvalidDimension,
    /// No layer node counts were configured.
    NoLayers,
    /// A per-layer parameter sequence did not match the number of layers.
    BroadcastMismatch,
    /// A layer density parameter was negative or non-finite.
    InvalidDensity,
    /// A layer relative weight was non-finite.
    InvalidRelativeWeight,
    /// The spatial grid index violated an internal invariant.
    GridFailure,
}

impl GeneratorErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidDimension => "GENERATOR_INVALID_DIMENSION",
            Self::NoLayers => "GENERATOR_NO_LAYERS",
            Self::BroadcastMismatch => "GENERATOR_BROADCAST_MISMATCH",
            Self::InvalidDensity => "GENERATOR_INVALID_DENSITY",
            Self::InvalidRelativeWeight => "GENERATOR_INVALID_RELATIVE_WEIGHT",
            Self::GridFailure => "GENERATOR_GRID_FAILURE",
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, GeneratorError>;
