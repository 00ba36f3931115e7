use super::{GPoint, GraphicsBounds, Surface};
use crate::{
  aspect::SkyAspect,
  math::XYZ,
  proj::{PlanePoint, Projection},
};

/// Projection of the celestial sphere on the graphics surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SkySurface {
  bounds: GraphicsBounds,
  aspect: SkyAspect,
  /// Number of pixels per projection plane unit.
  scale: f64,
}

impl SkySurface {
  pub fn new(bounds: GraphicsBounds, aspect: SkyAspect) -> Self {
    // At zoom 1, the whole projection shape fits in the bounds
    let (xmin, xmax, ymin, ymax) = aspect.projection().projection_shape().bounds();
    let scale =
      (bounds.width / (xmax - xmin)).min(bounds.height / (ymax - ymin)) * aspect.zoom();
    Self {
      bounds,
      aspect,
      scale,
    }
  }

  pub fn scale(&self) -> f64 {
    self.scale
  }

  pub fn plane_to_graphics(&self, p: &PlanePoint) -> GPoint {
    let (xoff, yoff) = self.aspect.offsets();
    let c = self.bounds.centre();
    GPoint::new(
      c.x + (p.x + xoff) * self.scale,
      c.y - (p.y + yoff) * self.scale,
    )
  }

  pub fn graphics_to_plane(&self, g: &GPoint) -> PlanePoint {
    let (xoff, yoff) = self.aspect.offsets();
    let c = self.bounds.centre();
    PlanePoint::new(
      (g.x - c.x) / self.scale - xoff,
      (c.y - g.y) / self.scale - yoff,
    )
  }

  /// Graphics position of the given data unit vector, `None` if it is not visible.
  pub fn data_to_graphics(&self, v: &XYZ) -> Option<GPoint> {
    let r = self.aspect.rotmat().rotate(v);
    self
      .aspect
      .projection()
      .project(&r)
      .map(|p| self.plane_to_graphics(&p))
  }

  /// Data unit vector displayed at the given graphics position, `None` outside of the sky.
  pub fn graphics_to_data(&self, g: &GPoint) -> Option<XYZ> {
    let p = self.graphics_to_plane(g);
    let r = self.aspect.projection().unproject(&p)?;
    // Rotation matrices, possibly reflected, are orthogonal
    Some(self.aspect.rotmat().unrotate(&r))
  }
}

impl Surface for SkySurface {
  type Aspect = SkyAspect;

  fn bounds(&self) -> &GraphicsBounds {
    &self.bounds
  }

  fn aspect(&self) -> &SkyAspect {
    &self.aspect
  }
}
