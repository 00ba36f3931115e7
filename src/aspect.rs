//! Immutable descriptions of the current view state of a plot.
//!
//! An aspect is never modified: navigation actions build new ones.

use crate::{
  error::Error,
  math::M3x3,
  proj::{Projection, SkyProjection},
};

fn check_range(min: f64, max: f64) -> Result<(), Error> {
  if min.is_finite() && max.is_finite() && min < max {
    Ok(())
  } else {
    Err(Error::InvalidRange { min, max })
  }
}

fn check_zoom(zoom: f64) -> Result<(), Error> {
  if zoom.is_finite() && zoom > 0.0 {
    Ok(())
  } else {
    Err(Error::InvalidZoom(zoom))
  }
}

/// Data limits of a two dimensional Cartesian plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneAspect {
  xmin: f64,
  xmax: f64,
  ymin: f64,
  ymax: f64,
}

impl PlaneAspect {
  pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Self, Error> {
    check_range(xmin, xmax)?;
    check_range(ymin, ymax)?;
    Ok(Self {
      xmin,
      xmax,
      ymin,
      ymax,
    })
  }

  pub fn x_range(&self) -> (f64, f64) {
    (self.xmin, self.xmax)
  }

  pub fn y_range(&self) -> (f64, f64) {
    (self.ymin, self.ymax)
  }
}

/// Limits (in seconds since the Unix epoch) of a time plot, together with its vertical limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAspect {
  tmin: f64,
  tmax: f64,
  ymin: f64,
  ymax: f64,
}

impl TimeAspect {
  pub fn new(tmin: f64, tmax: f64, ymin: f64, ymax: f64) -> Result<Self, Error> {
    check_range(tmin, tmax)?;
    check_range(ymin, ymax)?;
    Ok(Self {
      tmin,
      tmax,
      ymin,
      ymax,
    })
  }

  pub fn t_range(&self) -> (f64, f64) {
    (self.tmin, self.tmax)
  }

  pub fn y_range(&self) -> (f64, f64) {
    (self.ymin, self.ymax)
  }
}

/// View of a three dimensional cube: data limits on each axis, orientation, zoom and
/// offsets of the cube centre (in units of the normalised `[-1, 1]` cube).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeAspect {
  dlos: [f64; 3],
  dhis: [f64; 3],
  rotmat: M3x3,
  zoom: f64,
  xoff: f64,
  yoff: f64,
}

impl CubeAspect {
  pub fn new(
    dlos: [f64; 3],
    dhis: [f64; 3],
    rotmat: M3x3,
    zoom: f64,
    xoff: f64,
    yoff: f64,
  ) -> Result<Self, Error> {
    for (lo, hi) in dlos.iter().zip(dhis.iter()) {
      check_range(*lo, *hi)?;
    }
    check_zoom(zoom)?;
    Ok(Self {
      dlos,
      dhis,
      rotmat,
      zoom,
      xoff,
      yoff,
    })
  }

  /// Unrotated, unzoomed view of the given data limits.
  pub fn from_limits(dlos: [f64; 3], dhis: [f64; 3]) -> Result<Self, Error> {
    Self::new(dlos, dhis, M3x3::IDENTITY, 1.0, 0.0, 0.0)
  }

  pub fn dlos(&self) -> &[f64; 3] {
    &self.dlos
  }

  pub fn dhis(&self) -> &[f64; 3] {
    &self.dhis
  }

  pub fn rotmat(&self) -> &M3x3 {
    &self.rotmat
  }

  pub fn zoom(&self) -> f64 {
    self.zoom
  }

  pub fn offsets(&self) -> (f64, f64) {
    (self.xoff, self.yoff)
  }
}

/// View of the celestial sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyAspect {
  projection: SkyProjection,
  rotmat: M3x3,
  zoom: f64,
  xoff: f64,
  yoff: f64,
}

impl SkyAspect {
  /// # Params
  /// * `rotmat`: rotation from the data frame to the canonical frame of the projection
  /// * `zoom`: magnification with respect to the view showing the full projection shape
  /// * `xoff`, `yoff`: offsets of the projection origin, in projection plane units
  pub fn new(
    projection: SkyProjection,
    rotmat: M3x3,
    zoom: f64,
    xoff: f64,
    yoff: f64,
  ) -> Result<Self, Error> {
    check_zoom(zoom)?;
    Ok(Self {
      projection,
      rotmat,
      zoom,
      xoff,
      yoff,
    })
  }

  /// Default view, looking at `(lon, lat) = (0, 0)` with the north up.
  /// If `reflect` is `true`, the longitudes increase to the left, as when looking at the sky.
  pub fn new_default(projection: SkyProjection, reflect: bool) -> Self {
    Self::centred_on(projection, 0.0, 0.0, reflect)
  }

  /// View looking at the given position (in radians), with the north up.
  pub fn centred_on(projection: SkyProjection, lon: f64, lat: f64, reflect: bool) -> Self {
    let rotmat = M3x3::from_roty(lat).time(&M3x3::from_rotz(-lon));
    let rotmat = if reflect {
      M3x3::from_row_major([1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0]).time(&rotmat)
    } else {
      rotmat
    };
    Self {
      projection,
      rotmat,
      zoom: 1.0,
      xoff: 0.0,
      yoff: 0.0,
    }
  }

  pub fn projection(&self) -> &SkyProjection {
    &self.projection
  }

  pub fn rotmat(&self) -> &M3x3 {
    &self.rotmat
  }

  pub fn zoom(&self) -> f64 {
    self.zoom
  }

  pub fn offsets(&self) -> (f64, f64) {
    (self.xoff, self.yoff)
  }

  /// Tells whether the view is a mirror image of the sphere seen from outside.
  pub fn is_reflected(&self) -> bool {
    self.rotmat.det() < 0.0
  }
}

impl Default for SkyAspect {
  fn default() -> Self {
    Self::new_default(SkyProjection::default(), true)
  }
}

impl std::fmt::Display for SkyAspect {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{} zoom={} offsets=({}, {}) reflected={}",
      self.projection.name(),
      self.zoom,
      self.xoff,
      self.yoff,
      self.is_reflected()
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_checked_constructors() {
    assert!(PlaneAspect::new(0.0, 1.0, -1.0, 1.0).is_ok());
    assert!(matches!(
      PlaneAspect::new(1.0, 1.0, 0.0, 1.0),
      Err(Error::InvalidRange { .. })
    ));
    assert!(TimeAspect::new(0.0, f64::INFINITY, 0.0, 1.0).is_err());
    assert!(matches!(
      CubeAspect::new([0.0; 3], [1.0; 3], M3x3::IDENTITY, 0.0, 0.0, 0.0),
      Err(Error::InvalidZoom(_))
    ));
    assert!(CubeAspect::new([0.0; 3], [1.0, 1.0, f64::NAN], M3x3::IDENTITY, 1.0, 0.0, 0.0).is_err());
    assert!(SkyAspect::new(SkyProjection::sin(), M3x3::IDENTITY, -1.0, 0.0, 0.0).is_err());
  }

  #[test]
  fn test_reflection() {
    assert!(SkyAspect::new_default(SkyProjection::aitoff(), true).is_reflected());
    assert!(!SkyAspect::new_default(SkyProjection::aitoff(), false).is_reflected());
    assert!(SkyAspect::default().is_reflected());
  }

  #[test]
  fn test_centred_on() {
    use crate::math::{HasXYZ, XYZ};
    let (lon, lat) = (250_f64.to_radians(), (-35_f64).to_radians());
    for reflect in [false, true] {
      let aspect = SkyAspect::centred_on(SkyProjection::sin(), lon, lat, reflect);
      let c = aspect.rotmat().rotate(&XYZ::from_coo(lon, lat));
      assert!((c - XYZ::new(1.0, 0.0, 0.0)).norm() < 1e-14);
      let north = aspect.rotmat().rotate(&XYZ::new(0.0, 0.0, 1.0));
      assert!(north.y().abs() < 1e-14 && north.z() > 0.0);
      assert_eq!(aspect.is_reflected(), reflect);
    }
  }
}
