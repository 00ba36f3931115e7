//! Reading of data positions from table rows.
//!
//! A missing coordinate (NaN float, or [MISSING_LONG] integer) or an invalid one leads to
//! "no position" (`None`), never to an error.

use crate::{error::Error, math::XYZ, sky::Rotation};

/// Missing value of integer columns.
pub const MISSING_LONG: i64 = i64::MIN;

/// Read access to the coordinate columns of a row.
pub trait CoordRow {
  /// Value of the given column, NaN if missing.
  fn double_value(&self, icol: usize) -> f64;

  /// Integer value of the given column, [MISSING_LONG] if missing.
  fn long_value(&self, icol: usize) -> i64;
}

impl CoordRow for [f64] {
  fn double_value(&self, icol: usize) -> f64 {
    self.get(icol).copied().unwrap_or(f64::NAN)
  }

  fn long_value(&self, icol: usize) -> i64 {
    match self.get(icol) {
      Some(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e18 => *v as i64,
      _ => MISSING_LONG,
    }
  }
}

impl CoordRow for [i64] {
  fn double_value(&self, icol: usize) -> f64 {
    match self.get(icol) {
      Some(v) if *v != MISSING_LONG => *v as f64,
      _ => f64::NAN,
    }
  }

  fn long_value(&self, icol: usize) -> i64 {
    self.get(icol).copied().unwrap_or(MISSING_LONG)
  }
}

/// Conversion of some columns of a row into a data position.
pub trait DataGeom {
  type Pos;

  /// Short name of the geometry.
  fn variant_name(&self) -> &'static str;

  /// Number of columns read.
  fn n_coords(&self) -> usize;

  /// Reads the position stored in the `n_coords` columns starting at `icol`.
  fn read_position<R: CoordRow + ?Sized>(&self, row: &R, icol: usize) -> Option<Self::Pos>;
}

fn finite(v: f64) -> Option<f64> {
  if v.is_finite() {
    Some(v)
  } else {
    None
  }
}

/// Unit vector of the given position in degrees, `None` for invalid latitudes.
fn lonlat_deg_to_xyz(lon: f64, lat: f64) -> Option<XYZ> {
  let (lon, lat) = (finite(lon)?, finite(lat)?);
  if (-90.0..=90.0).contains(&lat) {
    Some(XYZ::from_deg(lon, lat))
  } else {
    None
  }
}

/// `(x, y)` positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaneDataGeom;

impl DataGeom for PlaneDataGeom {
  type Pos = [f64; 2];

  fn variant_name(&self) -> &'static str {
    "Plane"
  }

  fn n_coords(&self) -> usize {
    2
  }

  fn read_position<R: CoordRow + ?Sized>(&self, row: &R, icol: usize) -> Option<[f64; 2]> {
    Some([
      finite(row.double_value(icol))?,
      finite(row.double_value(icol + 1))?,
    ])
  }
}

/// `(x, y, z)` positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct CubeDataGeom;

impl DataGeom for CubeDataGeom {
  type Pos = [f64; 3];

  fn variant_name(&self) -> &'static str {
    "Cube"
  }

  fn n_coords(&self) -> usize {
    3
  }

  fn read_position<R: CoordRow + ?Sized>(&self, row: &R, icol: usize) -> Option<[f64; 3]> {
    Some([
      finite(row.double_value(icol))?,
      finite(row.double_value(icol + 1))?,
      finite(row.double_value(icol + 2))?,
    ])
  }
}

/// Sky positions given by a longitude and a latitude, in degrees, rotated into the
/// view sky system.
#[derive(Debug, Clone, Copy)]
pub struct SkyDataGeom {
  rotation: Rotation,
}

impl SkyDataGeom {
  pub fn new(rotation: Rotation) -> Self {
    Self { rotation }
  }
}

impl Default for SkyDataGeom {
  fn default() -> Self {
    Self::new(Rotation::Identity)
  }
}

impl DataGeom for SkyDataGeom {
  type Pos = XYZ;

  fn variant_name(&self) -> &'static str {
    "Sky"
  }

  fn n_coords(&self) -> usize {
    2
  }

  fn read_position<R: CoordRow + ?Sized>(&self, row: &R, icol: usize) -> Option<XYZ> {
    let v = lonlat_deg_to_xyz(row.double_value(icol), row.double_value(icol + 1))?;
    Some(self.rotation.rotate(&v))
  }
}

/// Sky positions given by the index of a HEALPix cell (NESTED scheme) at a given depth:
/// the position is the centre of the cell.
#[derive(Debug, Clone, Copy)]
pub struct HealpixDataGeom {
  depth: u8,
  rotation: Rotation,
}

impl HealpixDataGeom {
  pub fn new(depth: u8, rotation: Rotation) -> Result<Self, Error> {
    if depth > cdshealpix::DEPTH_MAX {
      Err(Error::InvalidDepth {
        depth,
        depth_max: cdshealpix::DEPTH_MAX,
      })
    } else {
      Ok(Self { depth, rotation })
    }
  }

  pub fn depth(&self) -> u8 {
    self.depth
  }
}

impl DataGeom for HealpixDataGeom {
  type Pos = XYZ;

  fn variant_name(&self) -> &'static str {
    "HEALPix"
  }

  fn n_coords(&self) -> usize {
    1
  }

  fn read_position<R: CoordRow + ?Sized>(&self, row: &R, icol: usize) -> Option<XYZ> {
    let index = row.long_value(icol);
    if index < 0 || index as u64 >= cdshealpix::n_hash(self.depth) {
      return None;
    }
    let (lon, lat) = cdshealpix::nested::center(self.depth, index as u64);
    Some(self.rotation.rotate(&XYZ::from_coo(lon, lat)))
  }
}

/// Positions in a sphere: longitude and latitude in degrees, and radius.
#[derive(Debug, Clone, Copy)]
pub struct SphereDataGeom {
  rotation: Rotation,
}

impl SphereDataGeom {
  pub fn new(rotation: Rotation) -> Self {
    Self { rotation }
  }
}

impl Default for SphereDataGeom {
  fn default() -> Self {
    Self::new(Rotation::Identity)
  }
}

impl DataGeom for SphereDataGeom {
  type Pos = [f64; 3];

  fn variant_name(&self) -> &'static str {
    "Sphere"
  }

  fn n_coords(&self) -> usize {
    3
  }

  fn read_position<R: CoordRow + ?Sized>(&self, row: &R, icol: usize) -> Option<[f64; 3]> {
    let v = lonlat_deg_to_xyz(row.double_value(icol), row.double_value(icol + 1))?;
    let r = finite(row.double_value(icol + 2))?;
    Some(self.rotation.rotate(&v).time(r).to_array())
  }
}
