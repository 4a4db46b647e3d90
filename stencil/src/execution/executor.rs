use crate::{error::Result, grid::GridStore};

/// Executes one in-place convolution pass.
///
/// An `Executor` owns a scheduling strategy; the arithmetic itself is fixed
/// by the grid's kernel and the row convolver, so every executor produces
/// the same cells.
pub trait Executor {
    /// Convolves every row of `grid` exactly once, in place.
    ///
    /// # Arguments
    /// * `grid` - The shared grid store to rewrite.
    fn run(&self, grid: &GridStore) -> Result<()>;
}
