use std::{mem, ops::Range};

use crate::grid::{Cell, GridStore, RADIUS};

/// Per-worker scratch that convolves one row at a time against pre-pass
/// values only.
///
/// A pass overwrites the grid in place, so by the time row `i` is processed
/// some neighbor rows have already been replaced in the live grid. The
/// window keeps private copies of exactly the rows whose live values may be
/// stale for this worker:
///
/// * `cur` - row `i` itself, snapshotted before anything overwrites it;
/// * `prev` - last iteration's `cur`, i.e. the pre-pass value of row `i - 1`;
/// * `upper` / `lower` - the single row on each side of the assigned range,
///   snapshotted once while no worker has committed anything yet.
///
/// The row below `i` inside the range is read live: it belongs to this
/// worker and has not been committed yet. The net effect is that every
/// neighbor read observes the pre-pass value, whatever the worker count or
/// where the range boundaries fall.
pub struct RowWindow {
    range: Range<usize>,
    prev: Vec<Cell>,
    cur: Vec<Cell>,
    upper: Option<Vec<Cell>>,
    lower: Option<Vec<Cell>>,
}

impl RowWindow {
    /// Creates a window for the worker owning `range` of a `cols`-wide grid.
    pub fn new(range: Range<usize>, cols: usize) -> Self {
        Self {
            range,
            prev: vec![0; cols],
            cur: vec![0; cols],
            upper: None,
            lower: None,
        }
    }

    /// The row range this window belongs to.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Snapshots the rows just outside the range.
    ///
    /// Must run while the whole grid still holds pre-pass values, i.e.
    /// before the first commit of the pass anywhere in the system.
    pub fn load_halos(&mut self, grid: &GridStore) {
        let cols = grid.cols();

        if self.range.start > 0 {
            let mut halo = vec![0; cols];
            grid.snapshot_row(self.range.start - 1, &mut halo);
            self.upper = Some(halo);
        }
        if self.range.end < grid.rows() {
            let mut halo = vec![0; cols];
            grid.snapshot_row(self.range.end, &mut halo);
            self.lower = Some(halo);
        }
    }

    /// Takes the private snapshot of `row`, rolling the old snapshot into
    /// the row-above slot.
    pub fn cache_row(&mut self, grid: &GridStore, row: usize) {
        debug_assert!(self.range.contains(&row));

        mem::swap(&mut self.prev, &mut self.cur);
        grid.snapshot_row(row, &mut self.cur);
    }

    /// Convolves `row` into `out` using the grid's kernel.
    ///
    /// Neighbor indices outside the grid clamp to the nearest edge. `row`
    /// must be the row passed to the latest `cache_row` call.
    pub fn convolve_into(&self, grid: &GridStore, row: usize, out: &mut [Cell]) {
        let rows = grid.rows();
        let cols = grid.cols();
        let kernel = grid.kernel();

        for (col, slot) in out.iter_mut().enumerate() {
            let mut sum = 0;
            for ki in -RADIUS..=RADIUS {
                let nrow = clamp_index(row as isize + ki, rows);
                for kj in -RADIUS..=RADIUS {
                    let ncol = clamp_index(col as isize + kj, cols);
                    sum += self.neighbor(grid, row, nrow, ncol) * kernel.weight(ki, kj);
                }
            }
            *slot = sum;
        }
    }

    /// Resolves one clamped neighbor read to its pre-pass source.
    fn neighbor(&self, grid: &GridStore, row: usize, nrow: usize, ncol: usize) -> Cell {
        if nrow == row {
            self.cur[ncol]
        } else if nrow < row {
            // nrow == row - 1; a halo at the range edge, the rolled snapshot inside.
            if row == self.range.start {
                let upper = self.upper.as_ref().expect("halo loaded: range starts past row 0");
                upper[ncol]
            } else {
                self.prev[ncol]
            }
        } else if nrow < self.range.end {
            // Own row below; not committed yet this pass.
            grid.cell(nrow, ncol)
        } else {
            let lower = self.lower.as_ref().expect("halo loaded: range ends before last row");
            lower[ncol]
        }
    }
}

/// Maps an index to the nearest valid one in `0..len` (mirror boundary).
fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}
