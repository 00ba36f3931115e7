//! Sky coordinate systems and the rotations between them.

pub mod rotation;
pub mod sys;

pub use rotation::Rotation;
pub use sys::{ColumnInfo, SkySys};
