use log::debug;
use serde::{Deserialize, Serialize};

use super::{
  clamp_zoom, reference_distance, zoom_power, Button, Decoration, NavAction, Navigator,
  DEFAULT_ZOOM_FACTOR,
};
use crate::{
  aspect::CubeAspect,
  math::M3x3,
  surface::{CubeSurface, GPoint, Surface},
};

/// One of the three data axes of a cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CubeAxis {
  X,
  Y,
  Z,
}

impl CubeAxis {
  pub fn index(self) -> usize {
    match self {
      CubeAxis::X => 0,
      CubeAxis::Y => 1,
      CubeAxis::Z => 2,
    }
  }
}

/// Subset of the cube data axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisSet([bool; 3]);

impl AxisSet {
  pub const ALL: AxisSet = AxisSet([true; 3]);

  pub fn from_axes(axes: &[CubeAxis]) -> Self {
    let mut flags = [false; 3];
    for axis in axes {
      flags[axis.index()] = true;
    }
    AxisSet(flags)
  }

  pub fn contains(&self, axis: CubeAxis) -> bool {
    self.0[axis.index()]
  }

  pub fn is_all(&self) -> bool {
    self.0.iter().all(|b| *b)
  }

  pub fn is_empty(&self) -> bool {
    !self.0.iter().any(|b| *b)
  }
}

/// Navigator of a rotatable cube.
///
/// * drag button 1: rotation
/// * drag button 2: pan
/// * drag button 3: zoom (independent horizontal and vertical factors unless the zoom is
///   restricted to a subset of the axes)
/// * wheel: zoom around the cube centre
/// * click: recentre on the clicked position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeNavigator {
  zoom_factor: f64,
  /// Axes affected by zooms, `None` for unrestricted zooms.
  zoom_axes: Option<AxisSet>,
}

impl Default for CubeNavigator {
  fn default() -> Self {
    Self::new(DEFAULT_ZOOM_FACTOR, None)
  }
}

/// Data limits magnified by `factor` around their centre.
fn zoom_limits(lo: f64, hi: f64, factor: f64) -> (f64, f64) {
  let mid = 0.5 * (lo + hi);
  let half = 0.5 * (hi - lo) / factor;
  (mid - half, mid + half)
}

fn zoom_axis_limits(aspect: &CubeAspect, factors: [f64; 3]) -> Option<CubeAspect> {
  let (mut dlos, mut dhis) = (*aspect.dlos(), *aspect.dhis());
  for i in 0..3 {
    (dlos[i], dhis[i]) = zoom_limits(dlos[i], dhis[i], factors[i]);
  }
  let (xoff, yoff) = aspect.offsets();
  CubeAspect::new(dlos, dhis, *aspect.rotmat(), aspect.zoom(), xoff, yoff)
    .map_err(|e| debug!("Zoom ignored: {}", e))
    .ok()
}

impl CubeNavigator {
  pub fn new(zoom_factor: f64, zoom_axes: Option<AxisSet>) -> Self {
    Self {
      zoom_factor,
      zoom_axes,
    }
  }

  pub fn zoom_factor(&self) -> f64 {
    self.zoom_factor
  }

  pub fn zoom_axes(&self) -> Option<AxisSet> {
    self.zoom_axes
  }

  fn rotate(&self, surface: &CubeSurface, dx: f64, dy: f64) -> Option<CubeAspect> {
    let aspect = surface.aspect();
    let rd = reference_distance(surface);
    let rotmat = M3x3::from_rotx(dy / rd)
      .time(&M3x3::from_roty(dx / rd))
      .time(aspect.rotmat());
    let (xoff, yoff) = aspect.offsets();
    CubeAspect::new(*aspect.dlos(), *aspect.dhis(), rotmat, aspect.zoom(), xoff, yoff).ok()
  }

  fn pan(&self, surface: &CubeSurface, dx: f64, dy: f64) -> Option<CubeAspect> {
    let aspect = surface.aspect();
    let (xoff, yoff) = aspect.offsets();
    let s = surface.scale();
    CubeAspect::new(
      *aspect.dlos(),
      *aspect.dhis(),
      *aspect.rotmat(),
      aspect.zoom(),
      xoff + dx / s,
      yoff - dy / s,
    )
    .ok()
  }

  /// Scales the data limits, `fx` and `fy` being the horizontal and vertical factors.
  fn zoom_drag(&self, surface: &CubeSurface, fx: f64, fy: f64) -> Option<CubeAspect> {
    let aspect = surface.aspect();
    let factors = match self.zoom_axes {
      None => {
        // Each data axis takes from the screen axes its squared alignment with them
        let m = aspect.rotmat().to_row_major();
        [0, 1, 2].map(|i| fx.powf(m[i] * m[i]) * fy.powf(m[3 + i] * m[3 + i]))
      }
      Some(axes) => {
        let f = fx * fy;
        [CubeAxis::X, CubeAxis::Y, CubeAxis::Z].map(|a| if axes.contains(a) { f } else { 1.0 })
      }
    };
    zoom_axis_limits(aspect, factors)
  }

  fn zoom_centre(&self, surface: &CubeSurface, factor: f64) -> Option<CubeAspect> {
    let aspect = surface.aspect();
    match self.zoom_axes.filter(|axes| !axes.is_all()) {
      None => {
        let (xoff, yoff) = aspect.offsets();
        let zoom = clamp_zoom(aspect.zoom() * factor);
        CubeAspect::new(*aspect.dlos(), *aspect.dhis(), *aspect.rotmat(), zoom, xoff, yoff).ok()
      }
      Some(axes) => zoom_axis_limits(
        aspect,
        [CubeAxis::X, CubeAxis::Y, CubeAxis::Z].map(|a| if axes.contains(a) { factor } else { 1.0 }),
      ),
    }
  }
}

impl Navigator<CubeSurface> for CubeNavigator {
  fn drag(
    &self,
    surface: &CubeSurface,
    origin: &GPoint,
    pos: &GPoint,
    button: Button,
  ) -> Option<NavAction<CubeAspect>> {
    let (dx, dy) = (pos.x - origin.x, pos.y - origin.y);
    match button {
      Button::Left => self.rotate(surface, dx, dy).map(|a| {
        NavAction::new(
          a,
          Decoration::Rotation {
            centre: surface.bounds().centre(),
          },
        )
      }),
      Button::Center => self
        .pan(surface, dx, dy)
        .map(|a| NavAction::new(a, Decoration::Pan { from: *origin, to: *pos })),
      Button::Right => {
        let rd = reference_distance(surface);
        let fx = zoom_power(self.zoom_factor, dx / rd);
        let fy = zoom_power(self.zoom_factor, -dy / rd);
        self.zoom_drag(surface, fx, fy).map(|a| {
          NavAction::new(
            a,
            Decoration::Zoom {
              centre: *origin,
              xfactor: fx,
              yfactor: fy,
            },
          )
        })
      }
    }
  }

  fn wheel(
    &self,
    surface: &CubeSurface,
    _pos: &GPoint,
    rotation: f64,
  ) -> Option<NavAction<CubeAspect>> {
    let factor = zoom_power(self.zoom_factor, -rotation);
    self.zoom_centre(surface, factor).map(|a| {
      NavAction::new(
        a,
        Decoration::Zoom {
          centre: surface.bounds().centre(),
          xfactor: factor,
          yfactor: factor,
        },
      )
    })
  }

  fn click(
    &self,
    surface: &CubeSurface,
    pos: &GPoint,
    _button: Button,
  ) -> Option<NavAction<CubeAspect>> {
    let d = surface.graphics_to_data(pos)?;
    let aspect = surface.aspect();
    let (mut dlos, mut dhis) = (*aspect.dlos(), *aspect.dhis());
    for i in 0..3 {
      let half = 0.5 * (dhis[i] - dlos[i]);
      (dlos[i], dhis[i]) = (d[i] - half, d[i] + half);
    }
    CubeAspect::new(dlos, dhis, *aspect.rotmat(), aspect.zoom(), 0.0, 0.0)
      .ok()
      .map(|a| NavAction::new(a, Decoration::Centre { at: *pos }))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    nav::{MAX_ZOOM, MIN_ZOOM},
    surface::GraphicsBounds,
  };

  fn bounds() -> GraphicsBounds {
    GraphicsBounds::new(0.0, 0.0, 400.0, 400.0)
  }

  fn surface(rotmat: M3x3) -> CubeSurface {
    let aspect = CubeAspect::new([0.0; 3], [10.0; 3], rotmat, 1.0, 0.0, 0.0).unwrap();
    CubeSurface::new(bounds(), aspect)
  }

  #[test]
  fn test_wheel_zoom_stays_positive() {
    let nav = CubeNavigator::default();
    let mut surf = surface(M3x3::IDENTITY);
    for rotation in [1e6, -1e6, f64::NAN, f64::INFINITY, 3.0, -1e300, 0.5] {
      for _ in 0..50 {
        let action = nav.wheel(&surf, &GPoint::new(0.0, 0.0), rotation).unwrap();
        let aspect = action.aspect.unwrap();
        assert!(aspect.zoom() > 0.0 && aspect.zoom().is_finite());
        assert!((MIN_ZOOM..=MAX_ZOOM).contains(&aspect.zoom()));
        surf = CubeSurface::new(bounds(), aspect);
      }
    }
    // Zoom in
    let surf = surface(M3x3::IDENTITY);
    let a = nav.wheel(&surf, &GPoint::new(0.0, 0.0), -1.0).unwrap().aspect.unwrap();
    assert!((a.zoom() - 1.2).abs() < 1e-12);
  }

  #[test]
  fn test_restricted_wheel_zoom() {
    let nav = CubeNavigator::new(2.0, Some(AxisSet::from_axes(&[CubeAxis::Z])));
    let surf = surface(M3x3::IDENTITY);
    let a = nav.wheel(&surf, &GPoint::new(0.0, 0.0), -1.0).unwrap().aspect.unwrap();
    assert_eq!(a.zoom(), 1.0);
    assert_eq!(a.dlos()[..2], [0.0, 0.0]);
    assert_eq!(a.dhis()[..2], [10.0, 10.0]);
    assert!((a.dlos()[2] - 2.5).abs() < 1e-12 && (a.dhis()[2] - 7.5).abs() < 1e-12);
    // All axes: equivalent to no restriction
    let nav = CubeNavigator::new(2.0, Some(AxisSet::ALL));
    let a = nav.wheel(&surf, &GPoint::new(0.0, 0.0), -1.0).unwrap().aspect.unwrap();
    assert_eq!(a.zoom(), 2.0);
  }

  #[test]
  fn test_drag_rotate() {
    let nav = CubeNavigator::default();
    let surf = surface(M3x3::from_rotz(0.2));
    let action = nav
      .drag(&surf, &GPoint::new(200.0, 200.0), &GPoint::new(250.0, 180.0), Button::Left)
      .unwrap();
    let aspect = action.aspect.unwrap();
    assert!(aspect.rotmat().is_orthonormal(1e-12));
    assert!(aspect.rotmat().max_abs_diff(surf.aspect().rotmat()) > 1e-3);
    assert!(matches!(action.decoration, Some(Decoration::Rotation { .. })));
  }

  #[test]
  fn test_drag_pan_follows_cursor() {
    let nav = CubeNavigator::default();
    let surf = surface(M3x3::from_rotx(0.5));
    let d = [2.0, 3.0, 5.0];
    let (g0, _) = surf.data_to_graphics(&d).unwrap();
    let g1 = GPoint::new(g0.x + 30.0, g0.y - 12.0);
    let aspect = nav.drag(&surf, &g0, &g1, Button::Center).unwrap().aspect.unwrap();
    let (g, _) = CubeSurface::new(bounds(), aspect).data_to_graphics(&d).unwrap();
    assert!((g.x - g1.x).abs() < 1e-9 && (g.y - g1.y).abs() < 1e-9);
  }

  #[test]
  fn test_drag_zoom() {
    let origin = GPoint::new(200.0, 200.0);
    // Right and up: zoom in horizontally and vertically
    let pos = GPoint::new(300.0, 100.0);
    let surf = surface(M3x3::IDENTITY);
    let nav = CubeNavigator::new(2.0, None);
    let a = nav.drag(&surf, &origin, &pos, Button::Right).unwrap().aspect.unwrap();
    // 100 pixels = half the reference distance: factor sqrt(2)
    let half = 5.0 / 2_f64.sqrt();
    assert!((a.dlos()[0] - (5.0 - half)).abs() < 1e-9);
    assert!((a.dhis()[1] - (5.0 + half)).abs() < 1e-9);
    assert_eq!((a.dlos()[2], a.dhis()[2]), (0.0, 10.0));
    // Restricted: combined factor on the selected axes only
    let nav = CubeNavigator::new(2.0, Some(AxisSet::from_axes(&[CubeAxis::Y, CubeAxis::Z])));
    let a = nav.drag(&surf, &origin, &pos, Button::Right).unwrap().aspect.unwrap();
    assert_eq!((a.dlos()[0], a.dhis()[0]), (0.0, 10.0));
    assert!((a.dlos()[1] - 2.5).abs() < 1e-9);
    assert!((a.dhis()[2] - 7.5).abs() < 1e-9);
  }

  #[test]
  fn test_click_recentre() {
    let nav = CubeNavigator::default();
    let surf = surface(M3x3::IDENTITY);
    let centre = surf.bounds().centre();
    let pos = GPoint::new(centre.x + 0.5 * surf.scale(), centre.y);
    let a = nav.click(&surf, &pos, Button::Left).unwrap().aspect.unwrap();
    assert!((a.dlos()[0] - 2.5).abs() < 1e-9 && (a.dhis()[0] - 12.5).abs() < 1e-9);
    assert_eq!(a.offsets(), (0.0, 0.0));
    assert!(nav.click(&surf, &GPoint::new(-1e5, 0.0), Button::Left).is_none());
  }
}
