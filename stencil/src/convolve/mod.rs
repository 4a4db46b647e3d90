mod partition;
mod row;

pub use partition::partition_rows;
pub use row::RowWindow;
