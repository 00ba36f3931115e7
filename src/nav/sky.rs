use log::debug;

use super::{
  clamp_zoom, reference_distance, zoom_power, Button, Decoration, NavAction, Navigator,
  DEFAULT_ZOOM_FACTOR,
};
use crate::{
  aspect::SkyAspect,
  proj::{PlanePoint, Projection},
  surface::{GPoint, SkySurface, Surface},
};

/// Navigator of a sky view.
///
/// * drag button 1: rotation of the sky following the cursor (pan of the offsets where the
///   projection cannot rotate)
/// * drag button 2: pan of the offsets
/// * drag button 3: zoom around the drag origin
/// * wheel: zoom around the cursor
/// * click: recentre on the clicked sky position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyNavigator {
  zoom_factor: f64,
}

impl Default for SkyNavigator {
  fn default() -> Self {
    Self::new(DEFAULT_ZOOM_FACTOR)
  }
}

impl SkyNavigator {
  pub fn new(zoom_factor: f64) -> Self {
    Self { zoom_factor }
  }

  fn pan(surface: &SkySurface, origin: &GPoint, pos: &GPoint) -> Option<SkyAspect> {
    let aspect = surface.aspect();
    let (xoff, yoff) = aspect.offsets();
    let s = surface.scale();
    SkyAspect::new(
      *aspect.projection(),
      *aspect.rotmat(),
      aspect.zoom(),
      xoff + (pos.x - origin.x) / s,
      yoff - (pos.y - origin.y) / s,
    )
    .ok()
  }

  fn rotate(surface: &SkySurface, origin: &GPoint, pos: &GPoint) -> Option<SkyAspect> {
    let aspect = surface.aspect();
    let p0 = surface.graphics_to_plane(origin);
    let p1 = surface.graphics_to_plane(pos);
    let proj = aspect.projection();
    let rotmat = proj.cursor_rotate(aspect.rotmat(), &p0, &p1);
    match rotmat {
      Some(rotmat) => {
        let (xoff, yoff) = aspect.offsets();
        SkyAspect::new(*proj, rotmat, aspect.zoom(), xoff, yoff).ok()
      }
      None => {
        debug!("No rotation for {} from {:?} to {:?}, pan instead.", proj, p0, p1);
        Self::pan(surface, origin, pos)
      }
    }
  }

  /// Magnifies by `factor` keeping the plane point displayed at `g` at the same place.
  fn zoom_around(surface: &SkySurface, g: &GPoint, factor: f64) -> Option<SkyAspect> {
    let aspect = surface.aspect();
    let zoom = clamp_zoom(aspect.zoom() * factor);
    let p = surface.graphics_to_plane(g);
    let c = surface.bounds().centre();
    let s = surface.scale() * zoom / aspect.zoom();
    SkyAspect::new(
      *aspect.projection(),
      *aspect.rotmat(),
      zoom,
      (g.x - c.x) / s - p.x,
      (c.y - g.y) / s - p.y,
    )
    .ok()
  }
}

impl Navigator<SkySurface> for SkyNavigator {
  fn drag(
    &self,
    surface: &SkySurface,
    origin: &GPoint,
    pos: &GPoint,
    button: Button,
  ) -> Option<NavAction<SkyAspect>> {
    match button {
      Button::Left => Self::rotate(surface, origin, pos)
        .map(|a| NavAction::new(a, Decoration::Pan { from: *origin, to: *pos })),
      Button::Center => Self::pan(surface, origin, pos)
        .map(|a| NavAction::new(a, Decoration::Pan { from: *origin, to: *pos })),
      Button::Right => {
        let rd = reference_distance(surface);
        // Right or up: zoom in
        let shift = (pos.x - origin.x) - (pos.y - origin.y);
        let factor = zoom_power(self.zoom_factor, shift / rd);
        Self::zoom_around(surface, origin, factor).map(|a| {
          NavAction::new(
            a,
            Decoration::Zoom {
              centre: *origin,
              xfactor: factor,
              yfactor: factor,
            },
          )
        })
      }
    }
  }

  fn wheel(
    &self,
    surface: &SkySurface,
    pos: &GPoint,
    rotation: f64,
  ) -> Option<NavAction<SkyAspect>> {
    let factor = zoom_power(self.zoom_factor, -rotation);
    Self::zoom_around(surface, pos, factor).map(|a| {
      NavAction::new(
        a,
        Decoration::Zoom {
          centre: *pos,
          xfactor: factor,
          yfactor: factor,
        },
      )
    })
  }

  /// Rotates the sky so that the clicked position lands at the projection origin, and
  /// resets the offsets so that the origin is at the centre of the graphics bounds.
  fn click(
    &self,
    surface: &SkySurface,
    pos: &GPoint,
    _button: Button,
  ) -> Option<NavAction<SkyAspect>> {
    let aspect = surface.aspect();
    let proj = aspect.projection();
    let p = surface.graphics_to_plane(pos);
    let rotmat = proj.proj_rotate(aspect.rotmat(), &p, &PlanePoint::new(0.0, 0.0))?;
    SkyAspect::new(*proj, rotmat, aspect.zoom(), 0.0, 0.0)
      .ok()
      .map(|a| NavAction::new(a, Decoration::Centre { at: *pos }))
  }
}
