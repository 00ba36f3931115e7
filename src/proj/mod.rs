//! Projections of the unit sphere on a two dimensional plane.
//!
//! A projection always works in its own canonical frame: it looks at the point `(1, 0, 0)`,
//! the plane `x` axis following the `y` component of the vectors and the plane `y` axis
//! their `z` component. The view orientation is given by a rotation matrix applied to
//! data vectors beforehand (see [SkyAspect](crate::aspect::SkyAspect)).

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
  error::Error,
  math::{sinc, HasXYZ, M3x3, XYZ},
  Customf64,
};

pub mod hemisphere;
pub mod sin;
pub mod skyview;

pub use hemisphere::HemisphereProjection;
pub use sin::SinProjection;
pub use skyview::{Projecter, SkyviewProjection};

/// Position on the projection plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanePoint {
  pub x: f64,
  pub y: f64,
}

impl PlanePoint {
  pub const fn new(x: f64, y: f64) -> Self {
    Self { x, y }
  }

  pub fn is_finite(&self) -> bool {
    self.x.is_finite() && self.y.is_finite()
  }
}

/// Closed region of the projection plane containing all the valid projected positions.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjShape {
  /// Disc centred on the origin.
  Disc { radius: f64 },
  /// Ellipse centred on the origin, of semi-axes `a` along `x` and `b` along `y`.
  Ellipse { a: f64, b: f64 },
  /// Axis aligned rectangle.
  Rect {
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
  },
}

impl ProjShape {
  pub fn contains(&self, p: &PlanePoint) -> bool {
    match self {
      Self::Disc { radius } => p.x.pow2() + p.y.pow2() <= radius.pow2(),
      Self::Ellipse { a, b } => (p.x / a).pow2() + (p.y / b).pow2() <= 1.0,
      Self::Rect {
        xmin,
        xmax,
        ymin,
        ymax,
      } => (*xmin..=*xmax).contains(&p.x) && (*ymin..=*ymax).contains(&p.y),
    }
  }

  /// Bounding box `(xmin, xmax, ymin, ymax)` of the shape.
  pub fn bounds(&self) -> (f64, f64, f64, f64) {
    match self {
      Self::Disc { radius } => (-radius, *radius, -radius, *radius),
      Self::Ellipse { a, b } => (-a, *a, -b, *b),
      Self::Rect {
        xmin,
        xmax,
        ymin,
        ymax,
      } => (*xmin, *xmax, *ymin, *ymax),
    }
  }
}

/// Bidirectional mapping between unit vectors and a two dimensional plane.
pub trait Projection {
  fn name(&self) -> &'static str;

  fn description(&self) -> &'static str;

  /// Projects the given unit vector (in the canonical frame of the projection).
  /// # Output
  /// * `None` if the vector is on the invisible side or out of the projection domain
  fn project(&self, r: &XYZ) -> Option<PlanePoint>;

  /// Computes the unit vector projected at the given plane position.
  /// # Output
  /// * `None` if the position is outside of the [projection shape](Projection::projection_shape)
  fn unproject(&self, p: &PlanePoint) -> Option<XYZ>;

  /// Region bounding all the valid projected positions.
  fn projection_shape(&self) -> ProjShape;

  /// Tells whether a line joining two projected points can be drawn straight,
  /// i.e. whether the plane has no seam.
  fn is_continuous(&self) -> bool;

  /// Returns a new rotation matrix approximating a drag of the view from `p0` to `p1`,
  /// or `None` if the projection does not support such a drag.
  fn cursor_rotate(&self, rotmat: &M3x3, p0: &PlanePoint, p1: &PlanePoint) -> Option<M3x3>;

  /// Returns the rotation matrix which makes the sky point currently projected at `p0`
  /// be projected exactly at `p1`.
  /// # Output
  /// * `None` if one of the positions cannot be unprojected, if the matrix is singular,
  ///   or if the two positions are antipodal (no unique rotation).
  fn proj_rotate(&self, rotmat: &M3x3, p0: &PlanePoint, p1: &PlanePoint) -> Option<M3x3> {
    let unrot = rotmat.invert()?;
    let r0 = unrot.rotate(&self.unproject(p0)?).normalized()?;
    let r1 = unrot.rotate(&self.unproject(p1)?).normalized()?;
    let axis = r0.cross(&r1);
    let (sin_ang, cos_ang) = (axis.norm(), r0.scalar(&r1));
    if sin_ang.eq0() {
      return if cos_ang > 0.0 { Some(*rotmat) } else { None };
    }
    // |axis| = sin(angle) so that angle / |axis| = 1 / sinc(angle), regular when |axis| -> 0
    let angle = sin_ang.atan2(cos_ang);
    let q = M3x3::from_rotation_vector(&axis.time(1.0 / sinc(angle)));
    Some(rotmat.time(&q))
  }
}

/// The projections available to sky views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SkyProjection {
  Sin(SinProjection),
  Skyview(SkyviewProjection),
  Hemisphere(HemisphereProjection),
}

impl SkyProjection {
  pub const fn sin() -> Self {
    Self::Sin(SinProjection)
  }

  pub const fn aitoff() -> Self {
    Self::Skyview(SkyviewProjection::new(Projecter::Aitoff))
  }

  pub const fn car() -> Self {
    Self::Skyview(SkyviewProjection::new(Projecter::Car))
  }

  pub const fn hemisphere(up_north: bool) -> Self {
    Self::Hemisphere(HemisphereProjection::new(up_north))
  }

  /// All known projections.
  pub fn all() -> [SkyProjection; 4] {
    [
      Self::sin(),
      Self::aitoff(),
      Self::car(),
      Self::hemisphere(true),
    ]
  }

  fn inner(&self) -> &dyn Projection {
    match self {
      Self::Sin(p) => p,
      Self::Skyview(p) => p,
      Self::Hemisphere(p) => p,
    }
  }
}

impl Default for SkyProjection {
  fn default() -> Self {
    Self::sin()
  }
}

impl Projection for SkyProjection {
  fn name(&self) -> &'static str {
    self.inner().name()
  }
  fn description(&self) -> &'static str {
    self.inner().description()
  }
  fn project(&self, r: &XYZ) -> Option<PlanePoint> {
    self.inner().project(r)
  }
  fn unproject(&self, p: &PlanePoint) -> Option<XYZ> {
    self.inner().unproject(p)
  }
  fn projection_shape(&self) -> ProjShape {
    self.inner().projection_shape()
  }
  fn is_continuous(&self) -> bool {
    self.inner().is_continuous()
  }
  fn cursor_rotate(&self, rotmat: &M3x3, p0: &PlanePoint, p1: &PlanePoint) -> Option<M3x3> {
    self.inner().cursor_rotate(rotmat, p0, p1)
  }
  fn proj_rotate(&self, rotmat: &M3x3, p0: &PlanePoint, p1: &PlanePoint) -> Option<M3x3> {
    self.inner().proj_rotate(rotmat, p0, p1)
  }
}

impl fmt::Display for SkyProjection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for SkyProjection {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "sin" | "sine" => Ok(Self::sin()),
      "ait" | "aitoff" => Ok(Self::aitoff()),
      "car" | "car1" => Ok(Self::car()),
      "hemisphere" => Ok(Self::hemisphere(true)),
      _ => Err(Error::UnknownProjection(s.to_string())),
    }
  }
}

impl TryFrom<String> for SkyProjection {
  type Error = Error;

  fn try_from(s: String) -> Result<Self, Self::Error> {
    s.parse()
  }
}

impl From<SkyProjection> for String {
  fn from(p: SkyProjection) -> Self {
    p.name().to_ascii_lowercase()
  }
}

#[cfg(test)]
mod tests {
  use rand::Rng;

  use super::*;

  /// Random unit vectors on the visible (`x >= 0`) hemisphere.
  pub(crate) fn random_front_vectors(n: usize) -> Vec<XYZ> {
    let mut rng = rand::thread_rng();
    (0..n)
      .map(|_| XYZ::from_deg(rng.gen_range(-89.0..89.0), rng.gen_range(-89.0..89.0)))
      .collect()
  }

  #[test]
  fn test_shapes() {
    let disc = ProjShape::Disc { radius: 1.0 };
    assert!(disc.contains(&PlanePoint::new(0.6, 0.8)));
    assert!(!disc.contains(&PlanePoint::new(0.8, 0.8)));
    let ell = ProjShape::Ellipse { a: 2.0, b: 1.0 };
    assert!(ell.contains(&PlanePoint::new(1.9, 0.0)));
    assert!(!ell.contains(&PlanePoint::new(0.0, 1.1)));
    let rect = ProjShape::Rect {
      xmin: -1.0,
      xmax: 1.0,
      ymin: -0.5,
      ymax: 0.5,
    };
    assert!(rect.contains(&PlanePoint::new(1.0, -0.5)));
    assert!(!rect.contains(&PlanePoint::new(0.0, 0.6)));
    assert!(!rect.contains(&PlanePoint::new(f64::NAN, 0.0)));
    assert_eq!(ell.bounds(), (-2.0, 2.0, -1.0, 1.0));
  }

  #[test]
  fn test_round_trips() {
    for proj in SkyProjection::all() {
      for v in random_front_vectors(200) {
        let p = proj
          .project(&v)
          .unwrap_or_else(|| panic!("{} failed on {:?}", proj, v));
        assert!(proj.projection_shape().contains(&p), "{}: {:?}", proj, p);
        let u = proj.unproject(&p).unwrap();
        assert!((u - v).norm() < 1e-9, "{}: {:?} != {:?}", proj, u, v);
      }
    }
  }

  #[test]
  fn test_proj_rotate_moves_point_exactly() {
    let rotmat = M3x3::from_rotz(0.4).time(&M3x3::from_rotx(0.2));
    let p0 = PlanePoint::new(0.1, -0.2);
    let p1 = PlanePoint::new(-0.3, 0.25);
    for proj in SkyProjection::all() {
      let r0 = rotmat.unrotate(&proj.unproject(&p0).unwrap());
      let new_rot = proj.proj_rotate(&rotmat, &p0, &p1).unwrap();
      assert!(new_rot.is_orthonormal(1e-12));
      let p = proj.project(&new_rot.rotate(&r0)).unwrap();
      assert!((p.x - p1.x).abs() < 1e-9, "{}: {:?}", proj, p);
      assert!((p.y - p1.y).abs() < 1e-9, "{}: {:?}", proj, p);
    }
  }

  #[test]
  fn test_proj_rotate_degenerate() {
    let proj = SkyProjection::sin();
    let rotmat = M3x3::from_roty(0.3);
    let p = PlanePoint::new(0.2, 0.1);
    // No move: unchanged matrix
    assert_eq!(proj.proj_rotate(&rotmat, &p, &p), Some(rotmat));
    // Outside the disc
    assert!(proj
      .proj_rotate(&rotmat, &p, &PlanePoint::new(2.0, 0.0))
      .is_none());
    // Reflected view
    let reflect = M3x3::from_row_major([1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0]);
    let rotmat = reflect.time(&rotmat);
    let p1 = PlanePoint::new(-0.1, 0.3);
    let r0 = rotmat.invert().unwrap().rotate(&proj.unproject(&p).unwrap());
    let new_rot = proj.proj_rotate(&rotmat, &p, &p1).unwrap();
    assert!(new_rot.det() < 0.0);
    let q = proj.project(&new_rot.rotate(&r0)).unwrap();
    assert!((q.x - p1.x).abs() < 1e-9 && (q.y - p1.y).abs() < 1e-9);
  }

  #[test]
  fn test_names() {
    for proj in SkyProjection::all() {
      let name: String = proj.into();
      let parsed: SkyProjection = name.parse().unwrap();
      assert_eq!(parsed.name(), proj.name());
    }
    assert!("mollweide".parse::<SkyProjection>().is_err());
  }
}
