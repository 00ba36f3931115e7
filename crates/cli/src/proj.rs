//! Projection of sky positions on the plane of a sky projection, and the reverse.

use std::{error::Error, io::Write};

use clap::Args;
use log::debug;

use skyplot::{
  aspect::SkyAspect,
  proj::{PlanePoint, Projection, SkyProjection},
};

use crate::input::{lonlat_deg2xyz, PairInput};

/// View of the projection, common to `proj` and `unproj`.
#[derive(Debug, Clone, Args)]
pub struct View {
  /// Projection: sin, aitoff, car or hemisphere
  #[clap(value_name = "PROJ")]
  projection: SkyProjection,
  /// Longitude of the view centre, in degrees
  #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
  center_lon: f64,
  /// Latitude of the view centre, in degrees
  #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
  center_lat: f64,
  /// Longitudes increasing to the right [default: to the left, as when looking at the sky]
  #[arg(long)]
  no_reflect: bool,
}

impl View {
  fn aspect(&self) -> Result<SkyAspect, Box<dyn Error>> {
    if !(-90.0..=90.0).contains(&self.center_lat) {
      return Err(format!("Centre latitude must be in [-90, 90]. Actual: {}.", self.center_lat).into());
    }
    let aspect = SkyAspect::centred_on(
      self.projection,
      self.center_lon.to_radians(),
      self.center_lat.to_radians(),
      !self.no_reflect,
    );
    debug!("Aspect: {}", &aspect);
    Ok(aspect)
  }
}

/// Computes the projection plane coordinates (x, y) of sky positions.
/// Positions with no projection (e.g. on the far side of a sin projection) lead to NaN values.
#[derive(Debug, Clone, Args)]
pub struct Proj {
  #[command(flatten)]
  view: View,
  #[command(subcommand)]
  input: PairInput,
}

impl Proj {
  pub fn exec(self) -> Result<(), Box<dyn Error>> {
    let aspect = self.view.aspect()?;
    self.input.exec(move |lon_deg, lat_deg, write, sep| {
      let v = aspect.rotmat().rotate(&lonlat_deg2xyz(lon_deg, lat_deg)?);
      let p = aspect
        .projection()
        .project(&v)
        .unwrap_or(PlanePoint::new(f64::NAN, f64::NAN));
      write!(write, "{:+017.15}{}{:+017.15}", p.x, sep, p.y).map_err(|e| e.into())
    })
  }
}

/// Computes the sky positions of projection plane coordinates (x, y).
/// Coordinates outside the projection shape lead to NaN values.
#[derive(Debug, Clone, Args)]
pub struct Unproj {
  #[command(flatten)]
  view: View,
  #[command(subcommand)]
  input: PairInput,
}

impl Unproj {
  pub fn exec(self) -> Result<(), Box<dyn Error>> {
    let aspect = self.view.aspect()?;
    self.input.exec(move |x, y, write, sep| {
      let (lon, lat) = aspect
        .projection()
        .unproject(&PlanePoint::new(x, y))
        .map(|v| aspect.rotmat().unrotate(&v).to_deg())
        .unwrap_or((f64::NAN, f64::NAN));
      write!(write, "{:017.13}{}{:+017.13}", lon, sep, lat).map_err(|e| e.into())
    })
  }
}
