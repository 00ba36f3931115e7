use log::debug;

use super::{
  sin::{ortho_project, ortho_unproject, small_drag_rotate},
  PlanePoint, ProjShape, Projection,
};
use crate::math::{HasXYZ, M3x3, XYZ};

/// Minimal distance, on the plane, between the projected north pole and the view centre
/// for the north direction to be defined.
const MIN_POLE_DIST: f64 = 1e-3;

/// Orthographic view of the front hemisphere which, optionally, keeps the north pole of the
/// data up while dragging.
///
/// The north correction is a roll around the line of sight applied after the drag. It is
/// skipped when the pole is close to the line of sight, and the point under the cursor does
/// not strictly follow the cursor when the roll is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HemisphereProjection {
  up_north: bool,
}

impl HemisphereProjection {
  pub const fn new(up_north: bool) -> Self {
    Self { up_north }
  }

  pub fn is_up_north(&self) -> bool {
    self.up_north
  }

  /// Rolls the view around its `x` axis so that the data north pole is projected
  /// straight above the view centre.
  fn north_up(rotmat: &M3x3) -> M3x3 {
    let north = rotmat.rotate(&XYZ::new(0.0, 0.0, 1.0));
    if north.y().hypot(north.z()) < MIN_POLE_DIST {
      debug!("North pole along the line of sight, no roll applied.");
      *rotmat
    } else {
      M3x3::from_rotx(north.y().atan2(north.z())).time(rotmat)
    }
  }
}

impl Projection for HemisphereProjection {
  fn name(&self) -> &'static str {
    "Hemisphere"
  }

  fn description(&self) -> &'static str {
    "Hemisphere with north up"
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
    let rot = small_drag_rotate(rotmat, p0, p1);
    Some(if self.up_north {
      Self::north_up(&rot)
    } else {
      rot
    })
  }
}
