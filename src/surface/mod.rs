//! Mappings between data coordinates and graphics (pixel) coordinates for a given aspect.
//!
//! Graphics coordinates follow the usual screen convention: `x` to the right, `y` downward.

pub mod axis;
pub mod cube;
pub mod plane;
pub mod sky;
pub mod time;

pub use axis::Axis;
pub use cube::CubeSurface;
pub use plane::PlaneSurface;
pub use sky::SkySurface;
pub use time::TimeSurface;

/// Position on the graphics surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GPoint {
  pub x: f64,
  pub y: f64,
}

impl GPoint {
  pub const fn new(x: f64, y: f64) -> Self {
    Self { x, y }
  }
}

/// Rectangle of the graphics surface on which the data are plotted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphicsBounds {
  pub x: f64,
  pub y: f64,
  pub width: f64,
  pub height: f64,
}

impl GraphicsBounds {
  pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
    Self {
      x,
      y,
      width,
      height,
    }
  }

  pub fn centre(&self) -> GPoint {
    GPoint::new(self.x + 0.5 * self.width, self.y + 0.5 * self.height)
  }

  pub fn min_dim(&self) -> f64 {
    self.width.min(self.height)
  }

  pub fn contains(&self, p: &GPoint) -> bool {
    (self.x..=self.x + self.width).contains(&p.x) && (self.y..=self.y + self.height).contains(&p.y)
  }
}

/// A plotting surface: graphics bounds plus the aspect they display.
pub trait Surface {
  type Aspect;

  fn bounds(&self) -> &GraphicsBounds;

  fn aspect(&self) -> &Self::Aspect;
}

/// Surface made of two independent axes.
pub trait TwoAxesSurface: Surface {
  fn x_axis(&self) -> &Axis;

  fn y_axis(&self) -> &Axis;

  /// Builds the aspect having the given data ranges, keeping the other properties.
  /// Returns `None` if the ranges are not valid.
  fn with_ranges(&self, xrange: (f64, f64), yrange: (f64, f64)) -> Option<Self::Aspect>;
}
