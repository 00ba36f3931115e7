use super::{Axis, GPoint, GraphicsBounds, Surface, TwoAxesSurface};
use crate::{aspect::TimeAspect, error::Error};

/// Plotting surface with a horizontal time axis (seconds since the Unix epoch).
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSurface {
  bounds: GraphicsBounds,
  aspect: TimeAspect,
  taxis: Axis,
  yaxis: Axis,
}

impl TimeSurface {
  pub fn new(bounds: GraphicsBounds, aspect: TimeAspect, ylog: bool) -> Result<Self, Error> {
    let (tmin, tmax) = aspect.t_range();
    let (ymin, ymax) = aspect.y_range();
    let taxis = Axis::new(bounds.x, bounds.x + bounds.width, tmin, tmax, false, false)?;
    let yaxis = Axis::new(bounds.y + bounds.height, bounds.y, ymin, ymax, ylog, false)?;
    Ok(Self {
      bounds,
      aspect,
      taxis,
      yaxis,
    })
  }

  pub fn data_to_graphics(&self, t: f64, y: f64) -> Option<GPoint> {
    let g = GPoint::new(
      self.taxis.data_to_graphics(t),
      self.yaxis.data_to_graphics(y),
    );
    Some(g).filter(|g| g.x.is_finite() && g.y.is_finite())
  }

  pub fn graphics_to_data(&self, p: &GPoint) -> (f64, f64) {
    (
      self.taxis.graphics_to_data(p.x),
      self.yaxis.graphics_to_data(p.y),
    )
  }
}

impl Surface for TimeSurface {
  type Aspect = TimeAspect;

  fn bounds(&self) -> &GraphicsBounds {
    &self.bounds
  }

  fn aspect(&self) -> &TimeAspect {
    &self.aspect
  }
}

impl TwoAxesSurface for TimeSurface {
  fn x_axis(&self) -> &Axis {
    &self.taxis
  }

  fn y_axis(&self) -> &Axis {
    &self.yaxis
  }

  fn with_ranges(&self, trange: (f64, f64), yrange: (f64, f64)) -> Option<TimeAspect> {
    TimeAspect::new(trange.0, trange.1, yrange.0, yrange.1).ok()
  }
}
