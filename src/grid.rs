//! Occupancy grid and folding output.
//!
//! The grid is a flat array of per-cell cube counts over a cube of
//! `2 * half_extent + 1` cells per axis, centred on the origin.
//! A count above 1 marks two cubes folded onto the same cell.

use crate::error::FoldError;
use crate::geometry::Position;

/// Default number of cells on each side of the origin.
pub const DEFAULT_HALF_EXTENT: usize = 14;

/// Bounded count grid tracking how many placed cubes sit on each cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    half_extent: i32,
    dim: usize,
    counts: Vec<u16>,
    /// Number of cells whose count is above 1.
    overlapping_cells: usize,
}

impl OccupancyGrid {
    pub fn new(half_extent: usize) -> Self {
        let dim = 2 * half_extent + 1;
        Self {
            half_extent: half_extent as i32,
            dim,
            counts: vec![0; dim * dim * dim],
            overlapping_cells: 0,
        }
    }

    /// Converts a position to a linear cell index, or `None` outside the grid.
    ///
    /// Index order is x-major: `idx = x * dim * dim + y * dim + z` on the
    /// origin-shifted coordinates.
    #[inline]
    pub fn cell_index(&self, position: Position) -> Option<usize> {
        let shift = |c: i32| {
            let shifted = c + self.half_extent;
            (0..self.dim as i32)
                .contains(&shifted)
                .then_some(shifted as usize)
        };
        let (x, y, z) = (shift(position.x)?, shift(position.y)?, shift(position.z)?);
        Some(x * self.dim * self.dim + y * self.dim + z)
    }

    /// Converts a linear cell index back to a position.
    #[inline]
    pub fn cell_position(&self, cell_index: usize) -> Position {
        let dim = self.dim;
        Position::new(
            (cell_index / (dim * dim)) as i32 - self.half_extent,
            ((cell_index / dim) % dim) as i32 - self.half_extent,
            (cell_index % dim) as i32 - self.half_extent,
        )
    }

    /// Number of cubes on the cell at `position` (0 outside the grid).
    pub fn count(&self, position: Position) -> u16 {
        self.cell_index(position)
            .map_or(0, |cell_index| self.counts[cell_index])
    }

    /// Adds one cube at `position` and returns the new count.
    pub fn increment(&mut self, position: Position) -> Result<u16, FoldError> {
        let cell_index = self
            .cell_index(position)
            .ok_or(FoldError::OutOfGrid { position })?;
        let count = &mut self.counts[cell_index];
        *count += 1;
        if *count == 2 {
            self.overlapping_cells += 1;
        }
        Ok(*count)
    }

    /// Removes one cube at `position` and returns the new count.
    pub fn decrement(&mut self, position: Position) -> Result<u16, FoldError> {
        let cell_index = self
            .cell_index(position)
            .ok_or(FoldError::OutOfGrid { position })?;
        let count = &mut self.counts[cell_index];
        debug_assert!(*count > 0, "decrementing empty cell {position}");
        *count = count.saturating_sub(1);
        if *count == 1 {
            self.overlapping_cells -= 1;
        }
        Ok(*count)
    }

    /// Returns `true` if any cell holds more than one cube.
    #[inline]
    pub fn has_overlap(&self) -> bool {
        self.overlapping_cells > 0
    }
}

impl Default for OccupancyGrid {
    fn default() -> Self {
        Self::new(DEFAULT_HALF_EXTENT)
    }
}

/// Formats a folding as one `(x, y, z)` line per cube, in placement order.
pub fn format_folding(folding: &[Position]) -> String {
    let mut output = String::new();
    for position in folding {
        output.push_str(&position.to_string());
        output.push('\n');
    }
    output
}

/// Formats a folding as z-slices side by side.
///
/// Each cell shows the 1-based placement order of the cube on it, empty
/// cells show as '.'. Rows run from top (highest y) to bottom, and the
/// folding is translated so its minimum corner sits at the origin.
pub fn format_layers(folding: &[Position]) -> String {
    let Some(first) = folding.first() else {
        return String::new();
    };

    let mut min = first.coords();
    let mut max = min;
    for position in folding {
        for (axis, coord) in position.coords().into_iter().enumerate() {
            min[axis] = min[axis].min(coord);
            max[axis] = max[axis].max(coord);
        }
    }
    let [dim_x, dim_y, dim_z] = [0, 1, 2].map(|axis| (max[axis] - min[axis] + 1) as usize);
    let cell_width = folding.len().to_string().len();
    let slice_width = dim_x * (cell_width + 1) - 1;

    let mut order = vec![0usize; dim_x * dim_y * dim_z];
    for (placed, position) in folding.iter().enumerate() {
        let [x, y, z] = [0, 1, 2].map(|axis| (position.coords()[axis] - min[axis]) as usize);
        order[x * dim_y * dim_z + y * dim_z + z] = placed + 1;
    }

    let mut lines = Vec::with_capacity(dim_y + 1);

    // header: z=0, z=1, ...
    let header: Vec<String> = (0..dim_z)
        .map(|z| format!("{:<slice_width$}", format!("z={z}")))
        .collect();
    lines.push(header.join("  "));

    // rows from top (highest y) to bottom
    for y in (0..dim_y).rev() {
        let slices: Vec<String> = (0..dim_z)
            .map(|z| {
                let cells: Vec<String> = (0..dim_x)
                    .map(|x| match order[x * dim_y * dim_z + y * dim_z + z] {
                        0 => format!("{:>cell_width$}", '.'),
                        placed => format!("{placed:>cell_width$}"),
                    })
                    .collect();
                cells.join(" ")
            })
            .collect();
        lines.push(slices.join("  "));
    }

    let mut output = String::new();
    for line in lines {
        output.push_str(line.trim_end());
        output.push('\n');
    }
    output
}
