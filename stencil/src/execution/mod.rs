mod ensemble;
mod executor;
mod soloist;
mod worker;

pub use ensemble::EnsembleExec;
pub use executor::Executor;
pub use soloist::SoloistExec;

use std::num::NonZeroUsize;

use crate::{error::Result, grid::GridStore};

/// Runs one in-place convolution pass over `grid` with `workers` workers.
///
/// Blocks until every row has been rewritten. The output is cell-for-cell
/// identical for every worker count.
///
/// # Arguments
/// * `grid` - The grid store to rewrite; validated at construction.
/// * `workers` - How many workers to use; `1` runs on the calling thread.
pub fn run_pass(grid: &GridStore, workers: NonZeroUsize) -> Result<()> {
    if workers.get() == 1 {
        SoloistExec::new().run(grid)
    } else {
        EnsembleExec::new(workers).run(grid)
    }
}
