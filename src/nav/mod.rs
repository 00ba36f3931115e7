//! Interpretation of user gestures as new aspects.
//!
//! Navigators are pure: given a surface (graphics bounds + current aspect) and a gesture,
//! they return the aspect to display next, if any, and an optional decoration giving visual
//! feedback of the action.

use log::debug;

use crate::surface::{GPoint, Surface};

pub mod cube;
pub mod plane;
pub mod sky;

pub use cube::{AxisSet, CubeAxis, CubeNavigator};
pub use plane::{PlaneNavigator, TimeNavigator};
pub use sky::SkyNavigator;

/// Default multiplicative factor of a unit zoom step.
pub const DEFAULT_ZOOM_FACTOR: f64 = 1.2;

/// Bounds of a single zoom step factor.
pub const MIN_FACTOR: f64 = 1e-4;
pub const MAX_FACTOR: f64 = 1e4;
/// Bounds of the zoom of an aspect.
pub const MIN_ZOOM: f64 = 1e-6;
pub const MAX_ZOOM: f64 = 1e6;

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
  /// Button 1
  Left,
  /// Button 2
  Center,
  /// Button 3
  Right,
}

/// User gesture on a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
  /// Drag from `origin` (the position at the start of the drag) to `pos`.
  Drag {
    origin: GPoint,
    pos: GPoint,
    button: Button,
  },
  /// Wheel rotation at `pos`, positive values meaning "toward the user".
  Wheel { pos: GPoint, rotation: f64 },
  Click { pos: GPoint, button: Button },
}

/// Visual feedback of a navigation action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decoration {
  /// Free rotation around the given position.
  Rotation { centre: GPoint },
  /// Pan from one position to another.
  Pan { from: GPoint, to: GPoint },
  /// Zoom around the given position by the given horizontal and vertical factors.
  Zoom { centre: GPoint, xfactor: f64, yfactor: f64 },
  /// Recentring on the given position.
  Centre { at: GPoint },
}

/// Result of a navigation action.
#[derive(Debug, Clone, PartialEq)]
pub struct NavAction<A> {
  pub aspect: Option<A>,
  pub decoration: Option<Decoration>,
}

impl<A> NavAction<A> {
  pub fn new(aspect: A, decoration: Decoration) -> Self {
    Self {
      aspect: Some(aspect),
      decoration: Some(decoration),
    }
  }
}

/// Turns gestures on a surface into new aspects.
/// A `None` result means that the gesture has no effect.
pub trait Navigator<S: Surface> {
  fn drag(
    &self,
    surface: &S,
    origin: &GPoint,
    pos: &GPoint,
    button: Button,
  ) -> Option<NavAction<S::Aspect>>;

  fn wheel(&self, surface: &S, pos: &GPoint, rotation: f64) -> Option<NavAction<S::Aspect>>;

  fn click(&self, surface: &S, pos: &GPoint, button: Button) -> Option<NavAction<S::Aspect>>;

  fn navigate(&self, surface: &S, gesture: &Gesture) -> Option<NavAction<S::Aspect>> {
    match gesture {
      Gesture::Drag {
        origin,
        pos,
        button,
      } => self.drag(surface, origin, pos, *button),
      Gesture::Wheel { pos, rotation } => self.wheel(surface, pos, *rotation),
      Gesture::Click { pos, button } => self.click(surface, pos, *button),
    }
  }
}

/// Clamps a multiplicative zoom step, a non-finite factor being replaced by 1.
pub fn clamp_factor(factor: f64) -> f64 {
  if factor.is_finite() {
    factor.clamp(MIN_FACTOR, MAX_FACTOR)
  } else {
    debug!("Non-finite zoom factor {} ignored.", factor);
    1.0
  }
}

/// Clamps the zoom of an aspect.
pub fn clamp_zoom(zoom: f64) -> f64 {
  if zoom.is_finite() {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
  } else {
    1.0
  }
}

/// Zoom factor of `exponent` zoom steps of size `zoom_factor`, clamped.
pub(crate) fn zoom_power(zoom_factor: f64, exponent: f64) -> f64 {
  clamp_factor(zoom_factor.powf(exponent))
}

/// Pixel distance corresponding to one zoom step for drag zooms.
pub(crate) fn reference_distance<S: Surface>(surface: &S) -> f64 {
  (0.5 * surface.bounds().min_dim()).max(1.0)
}
