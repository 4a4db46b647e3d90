use std::sync::Barrier;

use crate::{
    convolve::RowWindow,
    grid::{Cell, GridStore},
};

/// One barrier-synchronized worker of a convolution pass.
///
/// All workers of a pass march through the same number of rounds in lock
/// step, one row per round, against two shared reusable barriers:
///
/// 1. arrive at the phase barrier - nobody has started writing this round;
/// 2. cache the own row (and, on round 0, the halo rows) and compute the
///    result row in private buffers;
/// 3. arrive at the compute barrier - every pre-pass read has settled;
/// 4. commit the result row to the grid;
/// 5. arrive at the phase barrier again - no one caches for the next round
///    until every commit of this round landed.
///
/// A worker never writes outside its own range; any row may be read.
pub struct RowWorker {
    window: RowWindow,
    out: Vec<Cell>,
}

impl RowWorker {
    /// Creates a worker around its scratch window.
    ///
    /// # Arguments
    /// * `window` - The window covering this worker's row range.
    /// * `cols` - Grid width, for the private result-row buffer.
    pub fn new(window: RowWindow, cols: usize) -> Self {
        Self {
            window,
            out: vec![0; cols],
        }
    }

    /// Runs `rounds` lock-step rounds against the two shared barriers.
    ///
    /// `rounds` is the longest range length among all workers of the pass.
    /// A worker whose range is shorter idles through the surplus rounds but
    /// keeps arriving at both barriers, which require everyone.
    pub fn run(&mut self, grid: &GridStore, phase: &Barrier, compute: &Barrier, rounds: usize) {
        let range = self.window.range();
        debug_assert!(rounds >= range.len());

        for round in 0..rounds {
            phase.wait();

            let row = range.start + round;
            let active = row < range.end;
            if active {
                if round == 0 {
                    // Last chance to see the neighbor ranges pre-pass: the
                    // first commits happen right after this round's compute
                    // barrier.
                    self.window.load_halos(grid);
                }
                self.window.cache_row(grid, row);
                self.window.convolve_into(grid, row, &mut self.out);
            }

            compute.wait();

            if active {
                grid.commit_row(row, &self.out);
            }

            phase.wait();
        }
    }
}
