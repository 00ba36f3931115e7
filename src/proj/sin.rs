use super::{PlanePoint, ProjShape, Projection};
use crate::math::{HasXYZ, M3x3, XYZ};

/// Orthographic (Sine) projection of the front hemisphere on the unit disc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SinProjection;

/// Small drag rotation shared by the projections whose plane coordinates are (close to)
/// angles around the view centre: the frame is rolled about the view `z` axis by `-dx`
/// then about the view `y` axis by `+dy`, i.e. the sky rotates the opposite way.
pub(crate) fn small_drag_rotate(rotmat: &M3x3, p0: &PlanePoint, p1: &PlanePoint) -> M3x3 {
  let (dx, dy) = (p1.x - p0.x, p1.y - p0.y);
  M3x3::from_roty(-dy)
    .time(&M3x3::from_rotz(dx))
    .time(rotmat)
}

/// Projection on the plane tangent at `(1, 0, 0)` of the points having `x >= 0`.
pub(crate) fn ortho_project(r: &XYZ) -> Option<PlanePoint> {
  if r.x() >= 0.0 {
    Some(PlanePoint::new(r.y(), r.z()))
  } else {
    None
  }
}

pub(crate) fn ortho_unproject(p: &PlanePoint) -> Option<XYZ> {
  let rho2 = p.x * p.x + p.y * p.y;
  if rho2 <= 1.0 {
    Some(XYZ::new((1.0 - rho2).sqrt(), p.x, p.y))
  } else {
    None
  }
}

impl Projection for SinProjection {
  fn name(&self) -> &'static str {
    "Sin"
  }

  fn description(&self) -> &'static str {
    "rotatable sphere"
  }

  fn project(&self, r: &XYZ) -> Option<PlanePoint> {
    ortho_project(r)
  }

  fn unproject(&self, p: &PlanePoint) -> Option<XYZ> {
    ortho_unproject(p)
  }

  fn projection_shape(&self) -> ProjShape {
    ProjShape::Disc { radius: 1.0 }
  }

  fn is_continuous(&self) -> bool {
    true
  }

  fn cursor_rotate(&self, rotmat: &M3x3, p0: &PlanePoint, p1: &PlanePoint) -> Option<M3x3> {
    Some(small_drag_rotate(rotmat, p0, p1))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_front_and_back() {
    let proj = SinProjection;
    assert_eq!(
      proj.project(&XYZ::new(1.0, 0.0, 0.0)),
      Some(PlanePoint::new(0.0, 0.0))
    );
    // Limb is visible
    assert_eq!(
      proj.project(&XYZ::new(0.0, 1.0, 0.0)),
      Some(PlanePoint::new(1.0, 0.0))
    );
    assert_eq!(proj.project(&XYZ::new(-0.1, 0.0, 0.995)), None);
    assert_eq!(proj.unproject(&PlanePoint::new(0.8, 0.7)), None);
    let v = proj.unproject(&PlanePoint::new(0.6, 0.0)).unwrap();
    assert!((v.x() - 0.8).abs() < 1e-15);
  }

  #[test]
  fn test_cursor_rotate_follows_cursor() {
    let proj = SinProjection;
    let p0 = PlanePoint::new(0.0, 0.0);
    let p1 = PlanePoint::new(0.01, -0.02);
    let rotmat = M3x3::from_rotz(1.0);
    let centre = rotmat.unrotate(&XYZ::new(1.0, 0.0, 0.0));
    let new_rot = proj.cursor_rotate(&rotmat, &p0, &p1).unwrap();
    assert!(new_rot.is_orthonormal(1e-12));
    let p = proj.project(&new_rot.rotate(&centre)).unwrap();
    assert!((p.x - p1.x).abs() < 1e-3, "{:?}", p);
    assert!((p.y - p1.y).abs() < 1e-3, "{:?}", p);
  }
}
