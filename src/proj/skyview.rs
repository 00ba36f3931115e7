//! All-sky projections delegated to the canonical projections of [mapproj].

use std::{f64::consts::PI, ops::RangeInclusive};

use mapproj::{cylindrical::car::Car, pseudocyl::ait::Ait, CanonicalProjection, ProjXY};

use super::{PlanePoint, ProjShape, Projection};
use crate::math::{HasXYZ, M3x3, XYZ};

/// The canonical projection actually performing the computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projecter {
  /// Hammer-Aitoff equal-area projection, elliptical.
  Aitoff,
  /// Plate carrée, plane coordinates are the view longitude and latitude (radians).
  Car,
}

impl Projecter {
  fn proj(&self, xyz: &mapproj::XYZ) -> Option<ProjXY> {
    match self {
      Projecter::Aitoff => Ait::new().proj(xyz),
      Projecter::Car => Car::new().proj(xyz),
    }
  }

  fn unproj(&self, pos: &ProjXY) -> Option<mapproj::XYZ> {
    match self {
      Projecter::Aitoff => Ait::new().unproj(pos),
      Projecter::Car => Car::new().unproj(pos),
    }
  }

  fn plane_bounds(&self) -> (RangeInclusive<f64>, RangeInclusive<f64>) {
    fn or_default(
      r: &Option<RangeInclusive<f64>>,
      default: RangeInclusive<f64>,
    ) -> RangeInclusive<f64> {
      r.as_ref().cloned().unwrap_or(default)
    }
    match self {
      Projecter::Aitoff => {
        let proj = Ait::new();
        (
          or_default(proj.bounds().x_bounds(), -PI..=PI),
          or_default(proj.bounds().y_bounds(), -PI..=PI),
        )
      }
      Projecter::Car => {
        let proj = Car::new();
        (
          or_default(proj.bounds().x_bounds(), -PI..=PI),
          or_default(proj.bounds().y_bounds(), -PI / 2.0..=PI / 2.0),
        )
      }
    }
  }
}

/// Projection wrapping a [Projecter].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkyviewProjection {
  projecter: Projecter,
}

impl SkyviewProjection {
  pub const fn new(projecter: Projecter) -> Self {
    Self { projecter }
  }

  pub fn projecter(&self) -> Projecter {
    self.projecter
  }
}

impl Projection for SkyviewProjection {
  fn name(&self) -> &'static str {
    match self.projecter {
      Projecter::Aitoff => "Aitoff",
      Projecter::Car => "Car",
    }
  }

  fn description(&self) -> &'static str {
    match self.projecter {
      Projecter::Aitoff => "Hammer-Aitoff projection",
      Projecter::Car => "Plate Carree projection",
    }
  }

  fn project(&self, r: &XYZ) -> Option<PlanePoint> {
    self
      .projecter
      .proj(&mapproj::XYZ::new(r.x(), r.y(), r.z()))
      .filter(|xy| xy.x().is_finite() && xy.y().is_finite())
      .map(|xy| PlanePoint::new(xy.x(), xy.y()))
  }

  fn unproject(&self, p: &PlanePoint) -> Option<XYZ> {
    if !self.projection_shape().contains(p) {
      return None;
    }
    self
      .projecter
      .unproj(&ProjXY::new(p.x, p.y))
      .map(|xyz| XYZ::new(xyz.x(), xyz.y(), xyz.z()))
  }

  fn projection_shape(&self) -> ProjShape {
    let (x, y) = self.projecter.plane_bounds();
    match self.projecter {
      Projecter::Aitoff => ProjShape::Ellipse {
        a: x.end().abs().max(x.start().abs()),
        b: y.end().abs().max(y.start().abs()),
      },
      Projecter::Car => ProjShape::Rect {
        xmin: *x.start(),
        xmax: *x.end(),
        ymin: *y.start(),
        ymax: *y.end(),
      },
    }
  }

  fn is_continuous(&self) -> bool {
    false
  }

  fn cursor_rotate(&self, rotmat: &M3x3, p0: &PlanePoint, p1: &PlanePoint) -> Option<M3x3> {
    match self.projecter {
      Projecter::Aitoff => self.proj_rotate(rotmat, p0, p1),
      Projecter::Car => {
        // Longitude move around the data pole, latitude move around the view y axis:
        // the data pole stays on the central meridian
        let (dx, dy) = (p1.x - p0.x, p1.y - p0.y);
        let dlon = if rotmat.det() < 0.0 { -dx } else { dx };
        Some(
          M3x3::from_roty(-dy)
            .time(rotmat)
            .time(&M3x3::from_rotz(dlon)),
        )
      }
    }
  }
}
