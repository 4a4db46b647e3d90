use std::{num::NonZeroUsize, sync::Barrier, thread};

use log::{debug, info};
use parking_lot::{Condvar, Mutex};

use super::{Executor, worker::RowWorker};
use crate::{
    convolve::{RowWindow, partition_rows},
    error::{Result, StencilErr},
    grid::GridStore,
};

/// Release gate the launcher opens once every worker thread exists.
///
/// A failed spawn would otherwise leave the already-running workers parked
/// on a barrier that the missing participants never reach.
struct StartGate {
    verdict: Mutex<Option<bool>>,
    cond: Condvar,
}

impl StartGate {
    fn new() -> Self {
        Self {
            verdict: Mutex::new(None),
            cond: Condvar::new(),
        }
    }

    /// Releases all waiting workers; `go` tells them whether to run.
    fn open(&self, go: bool) {
        let mut verdict = self.verdict.lock();
        *verdict = Some(go);
        self.cond.notify_all();
    }

    /// Blocks until the gate opens, returning whether to proceed.
    fn wait(&self) -> bool {
        let mut verdict = self.verdict.lock();
        while verdict.is_none() {
            self.cond.wait(&mut verdict);
        }
        matches!(*verdict, Some(true))
    }
}

/// Executes a pass with a fixed pool of barrier-synchronized OS threads,
/// one per non-empty row range.
///
/// Workers are created once, run the whole pass in lock step, and are all
/// joined before `run` returns. There is no work stealing and no timeout: a
/// worker that never arrives at a barrier hangs the pass by design.
pub struct EnsembleExec {
    workers: NonZeroUsize,
}

impl EnsembleExec {
    /// Creates a new `EnsembleExec`.
    ///
    /// # Arguments
    /// * `workers` - The requested worker count; ranges that come out empty
    ///   spawn no thread.
    pub fn new(workers: NonZeroUsize) -> Self {
        Self { workers }
    }
}

impl Executor for EnsembleExec {
    fn run(&self, grid: &GridStore) -> Result<()> {
        let ranges = partition_rows(grid.rows(), self.workers);
        let live = ranges.len();
        let rounds = ranges.iter().map(|r| r.len()).max().unwrap_or(0);

        info!(rows = grid.rows(), cols = grid.cols(), workers = live; "starting ensemble pass");

        let phase = Barrier::new(live);
        let compute = Barrier::new(live);
        let gate = StartGate::new();
        let mut spawn_err = None;

        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(live);

            for (id, range) in ranges.into_iter().enumerate() {
                debug!(worker = id, start = range.start, end = range.end; "assigning row range");

                let mut worker = RowWorker::new(RowWindow::new(range, grid.cols()), grid.cols());
                let (phase, compute, gate) = (&phase, &compute, &gate);

                let spawned = thread::Builder::new()
                    .name(format!("stencil-{id}"))
                    .spawn_scoped(scope, move || {
                        if gate.wait() {
                            worker.run(grid, phase, compute, rounds);
                        }
                    });

                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(source) => {
                        spawn_err = Some(StencilErr::WorkerSpawn { worker: id, source });
                        break;
                    }
                }
            }

            gate.open(spawn_err.is_none());

            for handle in handles {
                // Workers have no recoverable error paths; a panicked worker
                // would already have deadlocked the others at a barrier.
                handle.join().expect("worker thread panicked");
            }
        });

        match spawn_err {
            Some(e) => Err(e),
            None => {
                info!("ensemble pass complete");
                Ok(())
            }
        }
    }
}
