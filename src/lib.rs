//! Geometry for plotting astronomical data on a 2-D graphics surface.
//!
//! The crate maps data-space coordinates (sky positions, HEALPix cells, planes, cubes,
//! time series) to plane coordinates and back, holds immutable view states
//! ([aspects](aspect)) updated by [navigators](nav), and computes "nice" grid intervals
//! and slave-axis tick positions ([tick]).
//!
//! Conventions:
//! * sky positions are unit vectors `(x, y, z)` with `x` toward `(lon=0, lat=0)` and `z`
//!   toward the north pole;
//! * a projection always looks at the point `(1, 0, 0)`, the plane `x` axis following the
//!   vector `y` component and the plane `y` axis following the vector `z` component;
//! * rotation matrices are stored row major and applied to column vectors.

use std::f64::consts::PI;

pub mod aspect;
pub mod config;
pub mod data_geom;
pub mod error;
pub mod math;
pub mod nav;
pub mod proj;
pub mod sky;
pub mod surface;
pub mod tick;

pub use error::Error;

/// Constant = 2 * pi.
///
/// ```rust
/// use skyplot_geom::TWICE_PI;
/// use std::f64::consts::PI;
/// assert_eq!(2f64 * PI, TWICE_PI);
/// ```
pub const TWICE_PI: f64 = 2.0 * PI;

/// Constant = pi / 2.
///
/// ```rust
/// use skyplot_geom::HALF_PI;
/// use std::f64::consts::PI;
/// assert_eq!(0.5 * PI, HALF_PI);
/// ```
pub const HALF_PI: f64 = 0.5 * PI;

/// Absolute tolerance under which a floating point value is considered null.
pub const EPSILON: f64 = 1e-14;

pub trait Customf64 {
  fn pow2(self) -> f64;
  fn twice(self) -> f64;
  fn half(self) -> f64;
  /// Returns `true` if the absolute value is lower than [EPSILON].
  fn eq0(self) -> bool;
}

impl Customf64 for f64 {
  /// Returns x^2
  #[inline]
  fn pow2(self) -> f64 {
    self * self
  }
  /// Returns 2 * x
  #[inline]
  fn twice(self) -> f64 {
    2.0 * self
  }
  /// Returns x / 2
  #[inline]
  fn half(self) -> f64 {
    0.5 * self
  }
  #[inline]
  fn eq0(self) -> bool {
    self.abs() < EPSILON
  }
}
