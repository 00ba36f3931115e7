use super::{
  reference_distance, zoom_power, Button, Decoration, NavAction, Navigator, DEFAULT_ZOOM_FACTOR,
};
use crate::surface::{GPoint, Surface, TwoAxesSurface};

/// Navigator of surfaces made of two independent axes (Cartesian planes, time plots).
///
/// * drag button 1 (or 2): pan
/// * drag button 3: zoom around the drag origin, independently on each axis
/// * wheel: zoom around the cursor, on both axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneNavigator {
  zoom_factor: f64,
}

/// Time plots navigate exactly like planes.
pub type TimeNavigator = PlaneNavigator;

impl Default for PlaneNavigator {
  fn default() -> Self {
    Self::new(DEFAULT_ZOOM_FACTOR)
  }
}

impl PlaneNavigator {
  pub fn new(zoom_factor: f64) -> Self {
    Self { zoom_factor }
  }

  fn zoom<S: TwoAxesSurface>(
    surface: &S,
    centre: &GPoint,
    xfactor: f64,
    yfactor: f64,
  ) -> Option<NavAction<S::Aspect>> {
    let xrange = surface.x_axis().zoom(centre.x, xfactor);
    let yrange = surface.y_axis().zoom(centre.y, yfactor);
    surface.with_ranges(xrange, yrange).map(|a| {
      NavAction::new(
        a,
        Decoration::Zoom {
          centre: *centre,
          xfactor,
          yfactor,
        },
      )
    })
  }
}

impl<S: TwoAxesSurface> Navigator<S> for PlaneNavigator {
  fn drag(
    &self,
    surface: &S,
    origin: &GPoint,
    pos: &GPoint,
    button: Button,
  ) -> Option<NavAction<S::Aspect>> {
    match button {
      Button::Left | Button::Center => {
        let xrange = surface.x_axis().pan(origin.x, pos.x);
        let yrange = surface.y_axis().pan(origin.y, pos.y);
        surface
          .with_ranges(xrange, yrange)
          .map(|a| NavAction::new(a, Decoration::Pan { from: *origin, to: *pos }))
      }
      Button::Right => {
        let rd = reference_distance(surface);
        let fx = zoom_power(self.zoom_factor, (pos.x - origin.x) / rd);
        let fy = zoom_power(self.zoom_factor, (origin.y - pos.y) / rd);
        Self::zoom(surface, origin, fx, fy)
      }
    }
  }

  fn wheel(&self, surface: &S, pos: &GPoint, rotation: f64) -> Option<NavAction<S::Aspect>> {
    let f = zoom_power(self.zoom_factor, -rotation);
    Self::zoom(surface, pos, f, f)
  }

  fn click(&self, _surface: &S, _pos: &GPoint, _button: Button) -> Option<NavAction<S::Aspect>> {
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    aspect::{PlaneAspect, TimeAspect},
    surface::{GraphicsBounds, PlaneSurface, TimeSurface},
  };

  fn bounds() -> GraphicsBounds {
    GraphicsBounds::new(0.0, 0.0, 200.0, 200.0)
  }

  #[test]
  fn test_pan_follows_cursor() {
    let nav = PlaneNavigator::default();
    let surf = PlaneSurface::new(
      bounds(),
      PlaneAspect::new(0.0, 10.0, 1.0, 1000.0).unwrap(),
      [false, true],
      [true, false],
    )
    .unwrap();
    let g0 = GPoint::new(40.0, 60.0);
    let (x, y) = surf.graphics_to_data(&g0);
    let g1 = GPoint::new(70.0, 20.0);
    let aspect = nav.drag(&surf, &g0, &g1, Button::Left).unwrap().aspect.unwrap();
    let panned = PlaneSurface::new(bounds(), aspect, [false, true], [true, false]).unwrap();
    let g = panned.data_to_graphics(x, y).unwrap();
    assert!((g.x - g1.x).abs() < 1e-9 && (g.y - g1.y).abs() < 1e-9);
  }

  #[test]
  fn test_zoom() {
    let nav = TimeNavigator::new(2.0);
    let surf = TimeSurface::new(
      bounds(),
      TimeAspect::new(1.6e9, 1.7e9, -1.0, 1.0).unwrap(),
      false,
    )
    .unwrap();
    let action = nav.wheel(&surf, &GPoint::new(100.0, 100.0), -1.0).unwrap();
    let (tmin, tmax) = action.aspect.unwrap().t_range();
    assert!((tmin - 1.625e9).abs() < 1e-3 && (tmax - 1.675e9).abs() < 1e-3);
    // Horizontal drag: zoom on the time axis only
    let aspect = nav
      .drag(&surf, &GPoint::new(100.0, 100.0), &GPoint::new(200.0, 100.0), Button::Right)
      .unwrap()
      .aspect
      .unwrap();
    assert_eq!(aspect.y_range(), (-1.0, 1.0));
    assert!(aspect.t_range().1 - aspect.t_range().0 < 0.99e8);
    assert!(nav.click(&surf, &GPoint::new(0.0, 0.0), Button::Left).is_none());
  }
}
