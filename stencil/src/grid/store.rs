use std::sync::atomic::{AtomicI64, Ordering};

use crate::{
    error::{Result, StencilErr},
    grid::{Cell, Kernel},
};

/// Shared storage for the cell matrix and its convolution kernel.
///
/// Cells live in one row-major buffer of atomics so every worker of a pass
/// can hold `&GridStore` at the same time. All cell accesses are `Relaxed`:
/// cross-worker ordering comes entirely from the barrier protocol in
/// `execution`, the store itself only promises tear-free cells. There is no
/// per-cell or per-row lock.
#[derive(Debug)]
pub struct GridStore {
    rows: usize,
    cols: usize,
    cells: Box<[AtomicI64]>,
    kernel: Kernel,
}

impl GridStore {
    /// Builds a store from a flat row-major cell buffer.
    ///
    /// # Arguments
    /// * `rows` / `cols` - Grid dimensions, both at least 1.
    /// * `data` - Exactly `rows * cols` cell values, row-major.
    /// * `kernel` - The weight matrix for every pass over this grid.
    ///
    /// # Returns
    /// `StencilErr::EmptyGrid` or `StencilErr::CellCount` on bad input.
    pub fn new(rows: usize, cols: usize, data: Vec<Cell>, kernel: Kernel) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(StencilErr::EmptyGrid { rows, cols });
        }
        if data.len() != rows * cols {
            return Err(StencilErr::CellCount {
                got: data.len(),
                expected: rows * cols,
            });
        }

        Ok(Self {
            rows,
            cols,
            cells: data.into_iter().map(AtomicI64::new).collect(),
            kernel,
        })
    }

    /// Builds a store from nested rows, validating that they are rectangular.
    ///
    /// # Returns
    /// `StencilErr::EmptyGrid` or `StencilErr::RaggedRow` on bad input.
    pub fn from_rows(data: &[Vec<Cell>], kernel: Kernel) -> Result<Self> {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(StencilErr::EmptyGrid { rows, cols });
        }

        for (row, values) in data.iter().enumerate() {
            if values.len() != cols {
                return Err(StencilErr::RaggedRow {
                    row,
                    got: values.len(),
                    expected: cols,
                });
            }
        }

        let flat = data.iter().flatten().copied().collect();
        Self::new(rows, cols, flat, kernel)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) out of bounds for a {}x{} grid",
            self.rows,
            self.cols,
        );
        row * self.cols + col
    }

    /// Reads one cell. Out-of-range indices panic; callers clamp first.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[self.idx(row, col)].load(Ordering::Relaxed)
    }

    /// Overwrites one cell. Out-of-range indices panic.
    #[inline]
    pub fn set_cell(&self, row: usize, col: usize, value: Cell) {
        self.cells[self.idx(row, col)].store(value, Ordering::Relaxed);
    }

    /// Copies row `row` into `out`, which must be exactly one row wide.
    pub fn snapshot_row(&self, row: usize, out: &mut [Cell]) {
        assert_eq!(out.len(), self.cols, "snapshot buffer width mismatch");

        let base = self.idx(row, 0);
        for (dst, cell) in out.iter_mut().zip(&self.cells[base..base + self.cols]) {
            *dst = cell.load(Ordering::Relaxed);
        }
    }

    /// Overwrites row `row` with `values`, column by column.
    pub fn commit_row(&self, row: usize, values: &[Cell]) {
        assert_eq!(values.len(), self.cols, "result buffer width mismatch");

        let base = self.idx(row, 0);
        for (cell, &value) in self.cells[base..base + self.cols].iter().zip(values) {
            cell.store(value, Ordering::Relaxed);
        }
    }

    /// Snapshot of the whole grid as nested rows, for serialization.
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        let mut out = Vec::with_capacity(self.rows);
        let mut buf = vec![0; self.cols];
        for row in 0..self.rows {
            self.snapshot_row(row, &mut buf);
            out.push(buf.clone());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ones_kernel() -> Kernel {
        Kernel::new([[1; 3]; 3])
    }

    #[test]
    fn new_validates_dimensions() {
        assert!(matches!(
            GridStore::new(0, 5, vec![], ones_kernel()),
            Err(StencilErr::EmptyGrid { rows: 0, cols: 5 })
        ));
        assert!(matches!(
            GridStore::new(2, 2, vec![1, 2, 3], ones_kernel()),
            Err(StencilErr::CellCount {
                got: 3,
                expected: 4
            })
        ));
    }

    #[test]
    fn from_rows_rejects_ragged_data() {
        let data = vec![vec![1, 2], vec![3]];
        assert!(matches!(
            GridStore::from_rows(&data, ones_kernel()),
            Err(StencilErr::RaggedRow {
                row: 1,
                got: 1,
                expected: 2
            })
        ));
    }

    #[test]
    fn cell_roundtrip() {
        let grid = GridStore::new(2, 3, vec![1, 2, 3, 4, 5, 6], ones_kernel()).unwrap();
        assert_eq!(grid.cell(1, 2), 6);

        grid.set_cell(1, 2, -9);
        assert_eq!(grid.cell(1, 2), -9);
    }

    #[test]
    fn row_snapshot_and_commit() {
        let grid = GridStore::new(2, 3, vec![1, 2, 3, 4, 5, 6], ones_kernel()).unwrap();

        let mut buf = vec![0; 3];
        grid.snapshot_row(1, &mut buf);
        assert_eq!(buf, [4, 5, 6]);

        grid.commit_row(0, &[7, 8, 9]);
        assert_eq!(grid.to_rows(), vec![vec![7, 8, 9], vec![4, 5, 6]]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_range_cell_panics() {
        let grid = GridStore::new(2, 2, vec![0; 4], ones_kernel()).unwrap();
        grid.cell(0, 2);
    }
}
