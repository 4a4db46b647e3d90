use std::sync::Barrier;

use log::info;

use super::{Executor, worker::RowWorker};
use crate::{convolve::RowWindow, error::Result, grid::GridStore};

/// Executes a pass on the calling thread, as a one-participant ensemble.
///
/// The worker state machine is the same one the ensemble runs; both barriers
/// have a single participant, so every arrival releases immediately. The
/// cache/compute/commit ordering per row is preserved, which keeps the
/// soloist's output cell-for-cell identical to any ensemble's.
#[derive(Default)]
pub struct SoloistExec;

impl SoloistExec {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for SoloistExec {
    fn run(&self, grid: &GridStore) -> Result<()> {
        info!(rows = grid.rows(), cols = grid.cols(); "starting soloist pass");

        let rows = grid.rows();
        let phase = Barrier::new(1);
        let compute = Barrier::new(1);

        let window = RowWindow::new(0..rows, grid.cols());
        let mut worker = RowWorker::new(window, grid.cols());
        worker.run(grid, &phase, &compute, rows);

        info!("soloist pass complete");
        Ok(())
    }
}
