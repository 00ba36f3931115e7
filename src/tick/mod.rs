//! Grid and tick positions.

pub mod angscale;
pub mod linear;
pub mod slave;

pub use angscale::{AngFormat, AngScale, Scaling, TableSet};
pub use slave::{Lut, SlaveTicker};

/// Maximum number of values a tick generator returns; larger requests give no tick.
pub const MAX_TICKS: usize = 10_000;

/// A tick: data value and graphics position along the axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
  pub value: f64,
  pub gpos: f64,
}
