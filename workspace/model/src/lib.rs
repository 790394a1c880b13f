pub mod entities;
pub mod lifecycle;

pub use lifecycle::{Lifecycle, RecordStatus};
