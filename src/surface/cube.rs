use super::{GPoint, GraphicsBounds, Surface};
use crate::{
  aspect::CubeAspect,
  math::{HasXYZ, M3x3, XYZ},
};

/// Projection of a rotatable three dimensional cube on the graphics surface.
///
/// Data are first normalised into the `[-1, 1]^3` cube, then rotated by the aspect matrix.
/// The first two components of the rotated vector give the graphics position, the third is
/// the depth (positive toward the viewer).
#[derive(Debug, Clone, PartialEq)]
pub struct CubeSurface {
  bounds: GraphicsBounds,
  aspect: CubeAspect,
  /// Number of pixels per normalised unit.
  scale: f64,
}

impl CubeSurface {
  pub fn new(bounds: GraphicsBounds, aspect: CubeAspect) -> Self {
    // The cube diagonal fits in the smallest graphics dimension at zoom 1
    let scale = bounds.min_dim() / (2.0 * 3_f64.sqrt()) * aspect.zoom();
    Self {
      bounds,
      aspect,
      scale,
    }
  }

  pub fn scale(&self) -> f64 {
    self.scale
  }

  pub fn rotmat(&self) -> &M3x3 {
    self.aspect.rotmat()
  }

  /// Normalised coordinates of the given data point, in `[-1, 1]` inside the limits.
  pub fn normalise(&self, d: &[f64; 3]) -> XYZ {
    let (lo, hi) = (self.aspect.dlos(), self.aspect.dhis());
    let n = |i: usize| 2.0 * (d[i] - lo[i]) / (hi[i] - lo[i]) - 1.0;
    XYZ::new(n(0), n(1), n(2))
  }

  pub fn denormalise(&self, n: &XYZ) -> [f64; 3] {
    let (lo, hi) = (self.aspect.dlos(), self.aspect.dhis());
    let a = n.to_array();
    [0, 1, 2].map(|i| lo[i] + 0.5 * (a[i] + 1.0) * (hi[i] - lo[i]))
  }

  /// Graphics position and depth of the given data point.
  pub fn data_to_graphics(&self, d: &[f64; 3]) -> Option<(GPoint, f64)> {
    let r = self.aspect.rotmat().rotate(&self.normalise(d));
    if !r.is_finite() {
      return None;
    }
    let (xoff, yoff) = self.aspect.offsets();
    let c = self.bounds.centre();
    Some((
      GPoint::new(
        c.x + (r.x() + xoff) * self.scale,
        c.y - (r.y() + yoff) * self.scale,
      ),
      r.z(),
    ))
  }

  /// Rotated (view frame) vector of depth 0 displayed at the given graphics position.
  pub fn graphics_to_view(&self, p: &GPoint) -> XYZ {
    let (xoff, yoff) = self.aspect.offsets();
    let c = self.bounds.centre();
    XYZ::new(
      (p.x - c.x) / self.scale - xoff,
      (c.y - p.y) / self.scale - yoff,
      0.0,
    )
  }

  /// Data point displayed at the given graphics position, on the plane containing the cube
  /// centre and perpendicular to the line of sight.
  /// # Output
  /// * `None` if the point is outside of the cube (or if the rotation matrix is singular)
  pub fn graphics_to_data(&self, p: &GPoint) -> Option<[f64; 3]> {
    let n = self
      .aspect
      .rotmat()
      .invert()?
      .rotate(&self.graphics_to_view(p));
    if n.to_array().iter().all(|v| v.abs() <= 1.0) {
      Some(self.denormalise(&n))
    } else {
      None
    }
  }
}

impl Surface for CubeSurface {
  type Aspect = CubeAspect;

  fn bounds(&self) -> &GraphicsBounds {
    &self.bounds
  }

  fn aspect(&self) -> &CubeAspect {
    &self.aspect
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn surface(rotmat: M3x3) -> CubeSurface {
    let aspect = CubeAspect::new(
      [0.0, -5.0, 100.0],
      [10.0, 5.0, 200.0],
      rotmat,
      2.0,
      0.1,
      -0.2,
    )
    .unwrap();
    CubeSurface::new(GraphicsBounds::new(0.0, 0.0, 400.0, 300.0), aspect)
  }

  #[test]
  fn test_centre_and_corners() {
    let surf = surface(M3x3::IDENTITY);
    let (g, depth) = surf.data_to_graphics(&[5.0, 0.0, 150.0]).unwrap();
    let s = surf.scale();
    assert!((s - 300.0 / (2.0 * 3_f64.sqrt()) * 2.0).abs() < 1e-9);
    assert!((g.x - (200.0 + 0.1 * s)).abs() < 1e-9);
    assert!((g.y - (150.0 + 0.2 * s)).abs() < 1e-9);
    assert!(depth.abs() < 1e-12);
    let (g, _) = surf.data_to_graphics(&[10.0, 5.0, 150.0]).unwrap();
    assert!((g.x - (200.0 + 1.1 * s)).abs() < 1e-9);
    assert!((g.y - (150.0 - 0.8 * s)).abs() < 1e-9);
  }

  #[test]
  fn test_click_inverse() {
    let surf = surface(M3x3::from_rotx(0.3).time(&M3x3::from_roty(-0.4)));
    let (g, _) = surf.data_to_graphics(&[5.0, 0.0, 150.0]).unwrap();
    let d = surf.graphics_to_data(&g).unwrap();
    assert!((d[0] - 5.0).abs() < 1e-9 && d[1].abs() < 1e-9 && (d[2] - 150.0).abs() < 1e-9);
    // Far away from the cube
    assert!(surf.graphics_to_data(&GPoint::new(-1e4, 0.0)).is_none());
  }
}
