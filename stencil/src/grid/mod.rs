mod kernel;
mod store;

pub use kernel::{KERNEL_SIZE, Kernel, RADIUS};
pub use store::GridStore;

/// A single grid or kernel value.
///
/// 64 bits so a full 3x3 weighted sum of 32-bit input data cannot overflow.
pub type Cell = i64;
