use super::{Axis, GPoint, GraphicsBounds, Surface, TwoAxesSurface};
use crate::{aspect::PlaneAspect, error::Error};

/// Two dimensional Cartesian plotting surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneSurface {
  bounds: GraphicsBounds,
  aspect: PlaneAspect,
  xaxis: Axis,
  yaxis: Axis,
}

impl PlaneSurface {
  /// # Params
  /// * `logs`: logarithmic scale flags of the `x` and `y` axes
  /// * `flips`: reversed direction flags of the `x` and `y` axes
  pub fn new(
    bounds: GraphicsBounds,
    aspect: PlaneAspect,
    logs: [bool; 2],
    flips: [bool; 2],
  ) -> Result<Self, Error> {
    let (xmin, xmax) = aspect.x_range();
    let (ymin, ymax) = aspect.y_range();
    let xaxis = Axis::new(
      bounds.x,
      bounds.x + bounds.width,
      xmin,
      xmax,
      logs[0],
      flips[0],
    )?;
    // Graphics y axis pointing downward
    let yaxis = Axis::new(
      bounds.y + bounds.height,
      bounds.y,
      ymin,
      ymax,
      logs[1],
      flips[1],
    )?;
    Ok(Self {
      bounds,
      aspect,
      xaxis,
      yaxis,
    })
  }

  /// Graphics position of the given data point, `None` if it cannot be plotted
  /// (e.g. negative value on a logarithmic axis).
  pub fn data_to_graphics(&self, x: f64, y: f64) -> Option<GPoint> {
    let g = GPoint::new(
      self.xaxis.data_to_graphics(x),
      self.yaxis.data_to_graphics(y),
    );
    if g.x.is_finite() && g.y.is_finite() {
      Some(g)
    } else {
      None
    }
  }

  pub fn graphics_to_data(&self, p: &GPoint) -> (f64, f64) {
    (
      self.xaxis.graphics_to_data(p.x),
      self.yaxis.graphics_to_data(p.y),
    )
  }
}

impl Surface for PlaneSurface {
  type Aspect = PlaneAspect;

  fn bounds(&self) -> &GraphicsBounds {
    &self.bounds
  }

  fn aspect(&self) -> &PlaneAspect {
    &self.aspect
  }
}

impl TwoAxesSurface for PlaneSurface {
  fn x_axis(&self) -> &Axis {
    &self.xaxis
  }

  fn y_axis(&self) -> &Axis {
    &self.yaxis
  }

  fn with_ranges(&self, xrange: (f64, f64), yrange: (f64, f64)) -> Option<PlaneAspect> {
    PlaneAspect::new(xrange.0, xrange.1, yrange.0, yrange.1).ok()
  }
}
