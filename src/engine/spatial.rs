//! Spatial indexing for candidate-partner enumeration.
//!
//! A uniform grid over frame origins; the finder asks for all residues
//! within the coarse cutoff of one origin. Results come back sorted so that
//! candidate iteration order is always ascending residue index.

use std::collections::HashMap;

/// Grid-based spatial index for 3D point queries.
#[derive(Debug)]
pub(crate) struct SpatialGrid {
    /// Inverse cell size for fast coordinate-to-cell conversion.
    inv_cell_size: f64,
    /// Map from cell coordinates to point indices.
    cells: HashMap<(i32, i32, i32), Vec<usize>>,
}

impl SpatialGrid {
    /// Creates a grid with the given cell size (typically the query cutoff).
    ///
    /// # Panics
    ///
    /// Panics if `cell_size <= 0.0`.
    pub fn new(cell_size: f64) -> Self {
        assert!(cell_size > 0.0, "Cell size must be positive");
        Self {
            inv_cell_size: 1.0 / cell_size,
            cells: HashMap::new(),
        }
    }

    /// Builds a grid over the `Some` entries of a sparse position table,
    /// keeping the table indices as point ids.
    pub fn from_origins(origins: &[Option<[f64; 3]>], cell_size: f64) -> Self {
        let mut grid = Self::new(cell_size);
        for (idx, origin) in origins.iter().enumerate() {
            if let Some(pos) = origin {
                grid.insert(idx, *pos);
            }
        }
        grid
    }

    fn cell_coords(&self, pos: [f64; 3]) -> (i32, i32, i32) {
        (
            (pos[0] * self.inv_cell_size).floor() as i32,
            (pos[1] * self.inv_cell_size).floor() as i32,
            (pos[2] * self.inv_cell_size).floor() as i32,
        )
    }

    pub fn insert(&mut self, idx: usize, pos: [f64; 3]) {
        let cell = self.cell_coords(pos);
        self.cells.entry(cell).or_default().push(idx);
    }

    /// All point indices within `cutoff` of `query`, ascending.
    pub fn query_radius(
        &self,
        query: [f64; 3],
        origins: &[Option<[f64; 3]>],
        cutoff: f64,
    ) -> Vec<usize> {
        let cutoff_sq = cutoff * cutoff;
        let (cx, cy, cz) = self.cell_coords(query);

        let mut results = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let cell = (cx + dx, cy + dy, cz + dz);
                    if let Some(indices) = self.cells.get(&cell) {
                        for &idx in indices {
                            let Some(pos) = origins[idx] else { continue };
                            let dist_sq = (pos[0] - query[0]).powi(2)
                                + (pos[1] - query[1]).powi(2)
                                + (pos[2] - query[2]).powi(2);
                            if dist_sq <= cutoff_sq {
                                results.push(idx);
                            }
                        }
                    }
                }
            }
        }

        results.sort_unstable();
        results
    }
}
