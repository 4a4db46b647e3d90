use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// The result type used in the entire stencil crate.
pub type Result<T> = std::result::Result<T, StencilErr>;

/// All errors that can occur while building a grid or running a pass.
///
/// Configuration problems are caught at construction time, before any worker
/// thread exists. The only runtime failure is a refused thread spawn; it
/// aborts the whole pass.
#[derive(Debug)]
pub enum StencilErr {
    /// The grid must have at least one row and one column.
    EmptyGrid { rows: usize, cols: usize },
    /// Row `row` has a different length than the first row.
    RaggedRow {
        row: usize,
        got: usize,
        expected: usize,
    },
    /// The flat cell buffer doesn't hold `rows * cols` values.
    CellCount { got: usize, expected: usize },
    /// The kernel is not exactly `KERNEL_SIZE` rows of `KERNEL_SIZE` weights.
    KernelShape { rows: usize, cols: usize },
    /// The OS refused to create worker thread `worker`; no partial result.
    WorkerSpawn { worker: usize, source: io::Error },
}

impl Display for StencilErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { rows, cols } => {
                write!(f, "grid must be non-empty, got {rows}x{cols}")
            }
            Self::RaggedRow { row, got, expected } => {
                write!(f, "row {row} has {got} cells, expected {expected}")
            }
            Self::CellCount { got, expected } => {
                write!(f, "cell buffer holds {got} values, expected {expected}")
            }
            Self::KernelShape { rows, cols } => {
                write!(f, "kernel must be 3x3, got {rows}x{cols}")
            }
            Self::WorkerSpawn { worker, source } => {
                write!(f, "failed to spawn worker {worker}: {source}")
            }
        }
    }
}

impl Error for StencilErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::WorkerSpawn { source, .. } => Some(source),
            _ => None,
        }
    }
}
