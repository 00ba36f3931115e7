pub mod convert;
pub mod grid;
pub mod input;
pub mod proj;
