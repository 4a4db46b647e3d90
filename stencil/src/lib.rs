pub mod convolve;
pub mod error;
pub mod execution;
pub mod grid;

pub use error::{Result, StencilErr};
pub use execution::{EnsembleExec, Executor, SoloistExec, run_pass};
pub use grid::{Cell, GridStore, KERNEL_SIZE, Kernel};
