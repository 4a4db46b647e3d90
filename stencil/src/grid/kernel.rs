use crate::{
    error::{Result, StencilErr},
    grid::Cell,
};

/// Side length of the convolution kernel.
pub const KERNEL_SIZE: usize = 3;

/// Neighborhood radius derived from the kernel size.
pub const RADIUS: isize = KERNEL_SIZE as isize / 2;

/// The fixed 3x3 integer weight matrix applied to every cell's neighborhood.
///
/// Read-only for the whole duration of a pass; every worker shares it
/// through the grid store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    weights: [[Cell; KERNEL_SIZE]; KERNEL_SIZE],
}

impl Kernel {
    /// Creates a kernel directly from a weight matrix.
    pub fn new(weights: [[Cell; KERNEL_SIZE]; KERNEL_SIZE]) -> Self {
        Self { weights }
    }

    /// Creates a kernel from row-major weight rows.
    ///
    /// # Arguments
    /// * `rows` - Exactly `KERNEL_SIZE` rows of `KERNEL_SIZE` weights each.
    ///
    /// # Returns
    /// `StencilErr::KernelShape` when the shape is off.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Result<Self> {
        let shape_err = StencilErr::KernelShape {
            rows: rows.len(),
            cols: rows.iter().map(Vec::len).max().unwrap_or(0),
        };

        if rows.len() != KERNEL_SIZE || rows.iter().any(|row| row.len() != KERNEL_SIZE) {
            return Err(shape_err);
        }

        let mut weights = [[0; KERNEL_SIZE]; KERNEL_SIZE];
        for (dst, src) in weights.iter_mut().zip(rows) {
            dst.copy_from_slice(src);
        }
        Ok(Self { weights })
    }

    /// Returns the weight at kernel offset (`ki`, `kj`).
    ///
    /// # Arguments
    /// * `ki` / `kj` - Row and column offsets, both in `-RADIUS..=RADIUS`.
    ///   Offsets outside that range are a programming error and panic.
    pub fn weight(&self, ki: isize, kj: isize) -> Cell {
        self.weights[(ki + RADIUS) as usize][(kj + RADIUS) as usize]
    }

    /// Sum of all weights; a 1x1 grid convolves to `cell * weight_sum()`.
    pub fn weight_sum(&self) -> Cell {
        self.weights.iter().flatten().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_accepts_3x3() {
        let kernel = Kernel::from_rows(&[vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]).unwrap();
        assert_eq!(kernel.weight(-1, -1), 1);
        assert_eq!(kernel.weight(0, 0), 5);
        assert_eq!(kernel.weight(1, 1), 9);
        assert_eq!(kernel.weight_sum(), 45);
    }

    #[test]
    fn from_rows_rejects_wrong_shape() {
        assert!(matches!(
            Kernel::from_rows(&[vec![1, 2, 3], vec![4, 5, 6]]),
            Err(StencilErr::KernelShape { rows: 2, cols: 3 })
        ));
        assert!(matches!(
            Kernel::from_rows(&[vec![1, 2, 3], vec![4, 5], vec![7, 8, 9]]),
            Err(StencilErr::KernelShape { rows: 3, cols: 3 })
        ));
    }

    #[test]
    #[should_panic]
    fn weight_out_of_radius_panics() {
        Kernel::new([[1; KERNEL_SIZE]; KERNEL_SIZE]).weight(2, 0);
    }
}
