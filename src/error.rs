use std::io;

use thiserror::Error;

/// Construction-time errors.
///
/// Domain failures (a point on the far side of a projection, a degenerate range, ...) are
/// not errors: they are reported by `None` or sentinel values.
#[derive(Error, Debug)]
pub enum Error {
  #[error("Wrong number of matrix elements. Expected: 9. Actual: {len:}.")]
  InvalidMatrixLength { len: usize },
  #[error("Invalid range. Min: {min:}. Max: {max:}.")]
  InvalidRange { min: f64, max: f64 },
  #[error("Zoom factor must be strictly positive and finite. Actual: {0}.")]
  InvalidZoom(f64),
  #[error("Unknown sky system '{0}'.")]
  UnknownSkySys(String),
  #[error("Unknown projection '{0}'.")]
  UnknownProjection(String),
  #[error("Unknown angle format '{0}'.")]
  UnknownAngFormat(String),
  #[error("Unexpected HEALPix depth. Max expected: {depth_max:}. Actual: {depth:}.")]
  InvalidDepth { depth: u8, depth_max: u8 },
  #[error("Configuration error: {0}")]
  Config(#[from] toml::de::Error),
  #[error("Configuration serialization error: {0}")]
  ConfigSer(#[from] toml::ser::Error),
  #[error("Invalid configuration: {0}")]
  InvalidConfig(String),
  /// IO error
  #[error("I/O error. Path: {path:}. Error: {err:?}.")]
  IoWithPath { path: String, err: io::Error },
}
