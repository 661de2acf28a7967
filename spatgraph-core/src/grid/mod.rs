//! Spatial grid index and neighbourhood queries for one layer.
//!
//! A [`LayerState`] partitions the unit cube into a regular grid of cells
//! sized so each cell holds a small, constant number of nodes in
//! expectation. It supports O(1) expected insertion and lookup, mixed-radix
//! conversion between flattened cell indices and multi-dimensional grid
//! coordinates, and the shell queries used for incremental radius expansion
//! during edge synthesis.
//!
//! Each layer owns its own `LayerState`; the state is built fresh before a
//! layer's edges are synthesised and dropped afterwards, so grid state is
//! never aliased across layers.

use crate::error::GridError;

/// Expected number of nodes per grid cell.
const TARGET_CELL_OCCUPANCY: f64 = 2.5;

/// Grid assignment of a layer's nodes to cells.
#[derive(Clone, Debug)]
pub struct LayerState {
    dimension: usize,
    cells_per_dimension: usize,
    cells: Vec<Vec<usize>>,
}

impl LayerState {
    /// Allocates an empty cell array of `cells_per_dimension^dimension`
    /// cells.
    #[must_use]
    pub fn new(dimension: usize, cells_per_dimension: usize) -> Self {
        debug_assert!(dimension >= 1);
        debug_assert!(cells_per_dimension >= 1);
        let cell_count = cells_per_dimension.pow(dimension as u32);
        Self {
            dimension,
            cells_per_dimension,
            cells: vec![Vec::new(); cell_count],
        }
    }

    /// Allocates a grid sized for `nodes` positioned nodes, keeping the
    /// expected occupancy per cell small and constant.
    #[must_use]
    pub fn for_population(dimension: usize, nodes: usize) -> Self {
        let per_dimension = (nodes as f64 / TARGET_CELL_OCCUPANCY)
            .powf(1.0 / dimension as f64)
            .floor()
            .max(1.0) as usize;
        Self::new(dimension, per_dimension)
    }

    /// Number of cells along each axis of the grid.
    #[must_use]
    pub fn cells_per_dimension(&self) -> usize {
        self.cells_per_dimension
    }

    /// Total number of allocated cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Width of one cell in position-coordinate units.
    #[must_use]
    pub fn cell_width(&self) -> f64 {
        1.0 / self.cells_per_dimension as f64
    }

    /// Appends `node` to the cell covering `position`.
    pub fn add_node(&mut self, position: &[f64], node: usize) {
        let cell = self.cell_of(position);
        self.cells[cell].push(node);
    }

    /// Returns the nodes stored in `cell`.
    ///
    /// # Errors
    /// Returns [`GridError::CellOutOfRange`] when `cell` does not address an
    /// allocated cell. Such an index indicates an internal invariant
    /// violation, not a recoverable condition.
    pub fn nodes(&self, cell: usize) -> Result<&[usize], GridError> {
        self.cells
            .get(cell)
            .map(Vec::as_slice)
            .ok_or(GridError::CellOutOfRange {
                cell,
                cell_count: self.cells.len(),
            })
    }

    /// Maps a real-valued position to its flattened cell index.
    ///
    /// Each coordinate is scaled by `cells_per_dimension` and truncated;
    /// a coordinate exactly at `1.0` clamps to the last cell instead of
    /// falling off the grid.
    #[must_use]
    pub fn cell_of(&self, position: &[f64]) -> usize {
        debug_assert_eq!(position.len(), self.dimension);
        let last = self.cells_per_dimension - 1;
        let coords: Vec<usize> = position
            .iter()
            .map(|&coordinate| {
                let scaled = (coordinate * self.cells_per_dimension as f64).floor();
                (scaled.max(0.0) as usize).min(last)
            })
            .collect();
        self.flatten(&coords)
    }

    /// Flattens a multi-dimensional grid coordinate into a cell index
    /// (mixed-radix, base `cells_per_dimension`).
    #[must_use]
    pub fn flatten(&self, coords: &[usize]) -> usize {
        debug_assert_eq!(coords.len(), self.dimension);
        debug_assert!(coords.iter().all(|&c| c < self.cells_per_dimension));
        coords
            .iter()
            .fold(0, |index, &coordinate| {
                index * self.cells_per_dimension + coordinate
            })
    }

    /// Decomposes a flattened cell index into its grid coordinates.
    #[must_use]
    pub fn unflatten(&self, cell: usize) -> Vec<usize> {
        debug_assert!(cell < self.cells.len());
        let mut coords = vec![0usize; self.dimension];
        let mut rest = cell;
        for axis in (0..self.dimension).rev() {
            coords[axis] = rest % self.cells_per_dimension;
            rest /= self.cells_per_dimension;
        }
        coords
    }

    /// Returns the cells at exact Chebyshev grid distance `radius` from
    /// `cell`, clipped to the grid.
    ///
    /// `radius == 0` returns the cell itself. Successive radii enumerate
    /// disjoint shells, so repeated calls accumulate a neighbourhood without
    /// revisiting cells.
    #[must_use]
    pub fn box_surface(&self, cell: usize, radius: usize) -> Vec<usize> {
        let origin = self.unflatten(cell);
        let mut coords = vec![0usize; self.dimension];
        let mut shell = Vec::new();
        self.collect_surface(&origin, radius as i64, 0, false, &mut coords, &mut shell);
        shell
    }

    /// Returns all cells that could hold a node within `real_radius` of a
    /// point in `cell`: the union of shells up to the grid radius obtained by
    /// dividing `real_radius` by the cell width and rounding up.
    ///
    /// Callers expanding incrementally should prefer repeated
    /// [`Self::box_surface`] calls to avoid recomputing inner shells.
    #[must_use]
    pub fn box_volume(&self, cell: usize, real_radius: f64) -> Vec<usize> {
        let grid_radius = (real_radius.max(0.0) * self.cells_per_dimension as f64).ceil() as usize;
        // Shells past the grid extent are clipped empty; don't walk them.
        let grid_radius = grid_radius.min(self.cells_per_dimension);
        let mut volume = Vec::new();
        for radius in 0..=grid_radius {
            volume.extend(self.box_surface(cell, radius));
        }
        volume
    }

    fn collect_surface(
        &self,
        origin: &[usize],
        radius: i64,
        axis: usize,
        pinned: bool,
        coords: &mut [usize],
        shell: &mut Vec<usize>,
    ) {
        if axis == self.dimension {
            shell.push(self.flatten(coords));
            return;
        }
        let base = origin[axis] as i64;
        let last_axis = axis + 1 == self.dimension;
        for offset in -radius..=radius {
            // The shell requires at least one axis offset at exactly the
            // radius; prune interior combinations on the final axis.
            if last_axis && !pinned && offset.abs() != radius {
                continue;
            }
            let coordinate = base + offset;
            if coordinate < 0 || coordinate >= self.cells_per_dimension as i64 {
                continue;
            }
            coords[axis] = coordinate as usize;
            self.collect_surface(
                origin,
                radius,
                axis + 1,
                pinned || offset.abs() == radius,
                coords,
                shell,
            );
        }
    }
}

#[cfg(test)]
mod tests;
