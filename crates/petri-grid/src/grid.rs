//! Fixed-size 2D cell matrix and the Life rule.

use crate::cell::Cell;
use crate::error::GridError;
use rand::Rng;

/// All 8 neighbor offsets: N, S, W, E, NW, NE, SW, SE.
///
/// Process-wide constant; `(0, 0)` is deliberately excluded — a cell is
/// never its own neighbor.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// A finite, bounded two-dimensional grid of [`Cell`] states.
///
/// Cells are stored row-major. The grid is a value type: mutating
/// operations ([`with_cell`](Grid::with_cell)) and generation advancement
/// ([`step`](Grid::step)) return a *new* grid rather than updating in
/// place, so a reader holding a grid never observes a partially-updated
/// generation.
///
/// The boundary is non-wrapping: cells outside `[0, rows) x [0, cols)` are
/// treated as permanently dead. Corner cells therefore have 3 in-bounds
/// neighbors and edge cells 5.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: u32,
    cols: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid of the given dimensions with every cell dead.
    ///
    /// Returns [`GridError::InvalidDimension`] if either dimension is zero
    /// or negative. Dimensions are signed so that a negative request is
    /// representable and rejected rather than silently wrapped.
    pub fn empty(rows: i32, cols: i32) -> Result<Self, GridError> {
        let (rows, cols) = check_dimensions(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Dead; (rows as usize) * (cols as usize)],
        })
    }

    /// Create a grid where each cell is independently alive with
    /// probability 0.5, drawn from `rng`.
    ///
    /// Returns [`GridError::InvalidDimension`] if either dimension is zero
    /// or negative.
    pub fn random<R: Rng + ?Sized>(rows: i32, cols: i32, rng: &mut R) -> Result<Self, GridError> {
        let (rows, cols) = check_dimensions(rows, cols)?;
        let cells = (0..(rows as usize) * (cols as usize))
            .map(|_| Cell::from(rng.random_bool(0.5)))
            .collect();
        Ok(Self { rows, cols, cells })
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// The state of the cell at `(row, col)`.
    ///
    /// Returns [`GridError::OutOfBounds`] outside the grid extent.
    pub fn get(&self, row: i32, col: i32) -> Result<Cell, GridError> {
        let idx = self.index(row, col)?;
        Ok(self.cells[idx])
    }

    /// A new grid identical to this one except the cell at `(row, col)` is
    /// set to `state`.
    ///
    /// Returns [`GridError::OutOfBounds`] outside the grid extent; the
    /// receiver is never modified. Repeated identical calls are idempotent.
    pub fn with_cell(&self, row: i32, col: i32, state: Cell) -> Result<Self, GridError> {
        let idx = self.index(row, col)?;
        let mut next = self.clone();
        next.cells[idx] = state;
        Ok(next)
    }

    /// Count the live cells among the up-to-8 neighbors of `(row, col)`.
    ///
    /// Offsets landing outside the grid contribute 0 — the boundary is
    /// absorbing, never wrapping or reflecting. Returns
    /// [`GridError::OutOfBounds`] if the *center* coordinate itself is
    /// outside the grid.
    pub fn live_neighbors(&self, row: i32, col: i32) -> Result<u8, GridError> {
        self.index(row, col)?;
        Ok(self.live_neighbors_unchecked(row, col))
    }

    /// Compute the next generation.
    ///
    /// Total over any well-formed grid. The update is simultaneous: every
    /// neighbor count reads this (pre-step) grid exclusively, and the next
    /// generation is built as a separate value. Rules:
    ///
    /// - live cell with fewer than 2 live neighbors dies (underpopulation)
    /// - live cell with 2 or 3 live neighbors survives
    /// - live cell with more than 3 live neighbors dies (overpopulation)
    /// - dead cell with exactly 3 live neighbors becomes alive (reproduction)
    /// - any other dead cell stays dead
    pub fn step(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for row in 0..self.rows as i32 {
            for col in 0..self.cols as i32 {
                let alive = self.cells[self.index_unchecked(row, col)].is_alive();
                let n = self.live_neighbors_unchecked(row, col);
                let next = match (alive, n) {
                    (true, 2 | 3) => Cell::Alive,
                    (false, 3) => Cell::Alive,
                    _ => Cell::Dead,
                };
                cells.push(next);
            }
        }
        Self {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }

    /// Iterate over all cells in row-major order as `(row, col, state)`.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        let cols = self.cols as i32;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| ((i as i32) / cols, (i as i32) % cols, cell))
    }

    /// Bounds-checked row-major index.
    fn index(&self, row: i32, col: i32) -> Result<usize, GridError> {
        if row < 0 || row >= self.rows as i32 || col < 0 || col >= self.cols as i32 {
            return Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.index_unchecked(row, col))
    }

    fn index_unchecked(&self, row: i32, col: i32) -> usize {
        (row as usize) * (self.cols as usize) + (col as usize)
    }

    /// Neighbor count for an in-bounds center. Out-of-bounds offsets are
    /// skipped, which is exactly the "dead outside the edge" policy.
    fn live_neighbors_unchecked(&self, row: i32, col: i32) -> u8 {
        let mut count = 0u8;
        for (dr, dc) in NEIGHBOR_OFFSETS {
            let nr = row + dr;
            let nc = col + dc;
            if nr < 0 || nr >= self.rows as i32 || nc < 0 || nc >= self.cols as i32 {
                continue;
            }
            count += self.cells[self.index_unchecked(nr, nc)] as u8;
        }
        count
    }
}

/// Validate requested dimensions and convert to the internal unsigned form.
fn check_dimensions(rows: i32, cols: i32) -> Result<(u32, u32), GridError> {
    if rows <= 0 || cols <= 0 {
        return Err(GridError::InvalidDimension { rows, cols });
    }
    Ok((rows as u32, cols as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Build a grid from live coordinates on an otherwise-empty grid.
    fn grid_with_live(rows: i32, cols: i32, live: &[(i32, i32)]) -> Grid {
        let mut g = Grid::empty(rows, cols).unwrap();
        for &(r, c) in live {
            g = g.with_cell(r, c, Cell::Alive).unwrap();
        }
        g
    }

    fn live_cells(g: &Grid) -> Vec<(i32, i32)> {
        g.iter()
            .filter(|(_, _, cell)| cell.is_alive())
            .map(|(r, c, _)| (r, c))
            .collect()
    }

    // ── Constructor tests ───────────────────────────────────────

    #[test]
    fn empty_grid_is_all_dead() {
        let g = Grid::empty(4, 7).unwrap();
        assert_eq!(g.rows(), 4);
        assert_eq!(g.cols(), 7);
        assert_eq!(g.population(), 0);
    }

    #[test]
    fn zero_rows_is_invalid_dimension() {
        assert_eq!(
            Grid::empty(0, 5),
            Err(GridError::InvalidDimension { rows: 0, cols: 5 })
        );
    }

    #[test]
    fn negative_cols_is_invalid_dimension() {
        assert_eq!(
            Grid::empty(5, -1),
            Err(GridError::InvalidDimension { rows: 5, cols: -1 })
        );
    }

    #[test]
    fn random_rejects_invalid_dimensions() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(
            Grid::random(-3, 4, &mut rng),
            Err(GridError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn random_is_deterministic_for_equal_seeds() {
        let a = Grid::random(25, 25, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        let b = Grid::random(25, 25, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    // ── Cell addressing tests ───────────────────────────────────

    #[test]
    fn with_cell_sets_exactly_one_cell() {
        let g = Grid::empty(3, 3).unwrap();
        let g2 = g.with_cell(1, 2, Cell::Alive).unwrap();
        assert_eq!(g.population(), 0, "receiver untouched");
        assert_eq!(g2.population(), 1);
        assert_eq!(g2.get(1, 2).unwrap(), Cell::Alive);
    }

    #[test]
    fn with_cell_is_idempotent() {
        let g = grid_with_live(3, 3, &[(0, 0)]);
        let again = g.with_cell(0, 0, Cell::Alive).unwrap();
        assert_eq!(g, again);
    }

    #[test]
    fn with_cell_out_of_bounds_leaves_grid_unchanged() {
        let g = grid_with_live(3, 3, &[(1, 1)]);
        let before = g.clone();
        assert_eq!(
            g.with_cell(3, 0, Cell::Alive),
            Err(GridError::OutOfBounds {
                row: 3,
                col: 0,
                rows: 3,
                cols: 3
            })
        );
        assert!(g.with_cell(-1, 2, Cell::Alive).is_err());
        assert_eq!(g, before);
    }

    #[test]
    fn get_out_of_bounds_errors() {
        let g = Grid::empty(2, 2).unwrap();
        assert!(g.get(0, 0).is_ok());
        assert!(g.get(2, 0).is_err());
        assert!(g.get(0, -1).is_err());
    }

    // ── Neighbor counting tests ─────────────────────────────────

    #[test]
    fn live_neighbors_interior() {
        // Ring of 8 around (2, 2).
        let ring: Vec<(i32, i32)> = NEIGHBOR_OFFSETS
            .iter()
            .map(|(dr, dc)| (2 + dr, 2 + dc))
            .collect();
        let g = grid_with_live(5, 5, &ring);
        assert_eq!(g.live_neighbors(2, 2).unwrap(), 8);
        // Center itself is dead and never counted.
        assert_eq!(g.get(2, 2).unwrap(), Cell::Dead);
    }

    #[test]
    fn live_neighbors_never_reads_outside_grid() {
        // Lone live cell at the corner: it contributes to at most the 3
        // in-bounds neighbor counts and sees 0 itself.
        let g = grid_with_live(5, 5, &[(0, 0)]);
        assert_eq!(g.live_neighbors(0, 0).unwrap(), 0);
        let mut touched = 0;
        for r in 0..5 {
            for c in 0..5 {
                if (r, c) != (0, 0) && g.live_neighbors(r, c).unwrap() > 0 {
                    touched += 1;
                }
            }
        }
        assert_eq!(touched, 3);
    }

    #[test]
    fn live_neighbors_edge_cell_counts_five_at_most() {
        // Fully live grid: an edge (non-corner) cell has 5 in-bounds neighbors.
        let mut g = Grid::empty(3, 3).unwrap();
        for r in 0..3 {
            for c in 0..3 {
                g = g.with_cell(r, c, Cell::Alive).unwrap();
            }
        }
        assert_eq!(g.live_neighbors(0, 1).unwrap(), 5);
        assert_eq!(g.live_neighbors(0, 0).unwrap(), 3);
        assert_eq!(g.live_neighbors(1, 1).unwrap(), 8);
    }

    #[test]
    fn live_neighbors_out_of_bounds_center_errors() {
        let g = Grid::empty(3, 3).unwrap();
        assert!(matches!(
            g.live_neighbors(3, 1),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    // ── Rule tests ──────────────────────────────────────────────

    #[test]
    fn lone_live_cell_dies_of_underpopulation() {
        let g = grid_with_live(5, 5, &[(2, 2)]);
        assert_eq!(g.step().population(), 0);
    }

    #[test]
    fn block_is_a_still_life() {
        let g = grid_with_live(4, 4, &[(1, 1), (1, 2), (2, 1), (2, 2)]);
        assert_eq!(g.step(), g);
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        let vertical = grid_with_live(5, 5, &[(1, 2), (2, 2), (3, 2)]);
        let after_one = vertical.step();
        assert_eq!(live_cells(&after_one), vec![(2, 1), (2, 2), (2, 3)]);
        assert_eq!(after_one.step(), vertical);
    }

    #[test]
    fn overpopulated_cell_dies() {
        // Center of a fully live 3x3 has 8 neighbors.
        let all: Vec<(i32, i32)> = (0..3).flat_map(|r| (0..3).map(move |c| (r, c))).collect();
        let g = grid_with_live(3, 3, &all);
        assert_eq!(g.step().get(1, 1).unwrap(), Cell::Dead);
    }

    #[test]
    fn dead_cell_with_three_neighbors_is_born() {
        let g = grid_with_live(3, 3, &[(0, 0), (0, 1), (0, 2)]);
        assert_eq!(g.step().get(1, 1).unwrap(), Cell::Alive);
    }

    #[test]
    fn step_reads_only_the_previous_generation() {
        // Glider on a 6x6 grid after one step — the canonical result of
        // simultaneous update. A sequential in-place scan produces a
        // different (wrong) shape.
        let g = grid_with_live(6, 6, &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
        let next = g.step();
        assert_eq!(
            live_cells(&next),
            vec![(1, 0), (1, 2), (2, 1), (2, 2), (3, 1)]
        );
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        #[test]
        fn step_preserves_dimensions(rows in 1i32..20, cols in 1i32..20, seed in any::<u64>()) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let g = Grid::random(rows, cols, &mut rng).unwrap();
            let next = g.step();
            prop_assert_eq!(next.rows(), g.rows());
            prop_assert_eq!(next.cols(), g.cols());
        }

        #[test]
        fn all_dead_grid_stays_all_dead(rows in 1i32..20, cols in 1i32..20) {
            let g = Grid::empty(rows, cols).unwrap();
            prop_assert_eq!(g.step().population(), 0);
        }

        #[test]
        fn neighbor_counts_are_bounded_by_in_bounds_offsets(
            rows in 1i32..12,
            cols in 1i32..12,
            seed in any::<u64>(),
        ) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let g = Grid::random(rows, cols, &mut rng).unwrap();
            for (r, c, _) in g.iter() {
                let in_bounds = NEIGHBOR_OFFSETS
                    .iter()
                    .filter(|(dr, dc)| {
                        let nr = r + dr;
                        let nc = c + dc;
                        nr >= 0 && nr < rows && nc >= 0 && nc < cols
                    })
                    .count() as u8;
                prop_assert!(g.live_neighbors(r, c).unwrap() <= in_bounds);
            }
        }

        #[test]
        fn with_cell_round_trips_through_get(
            rows in 1i32..12,
            cols in 1i32..12,
            r in 0i32..12,
            c in 0i32..12,
        ) {
            let g = Grid::empty(rows, cols).unwrap();
            prop_assume!(r < rows && c < cols);
            let g2 = g.with_cell(r, c, Cell::Alive).unwrap();
            prop_assert_eq!(g2.get(r, c).unwrap(), Cell::Alive);
            prop_assert_eq!(g2.population(), 1);
        }
    }
}
