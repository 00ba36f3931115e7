use std::{error::Error, io::Write};

use clap::Args;
use log::debug;

use skyplot::sky::{Rotation, SkySys};

use crate::input::{lonlat_deg2xyz, PairInput};

/// Converts sky positions from one sky system into another.
#[derive(Debug, Clone, Args)]
pub struct Convert {
  /// Sky system of the input positions (equatorial, galactic, supergalactic, ecliptic)
  #[clap(value_name = "FROM")]
  from: SkySys,
  /// Sky system of the output positions
  #[clap(value_name = "TO")]
  to: SkySys,
  #[command(subcommand)]
  input: PairInput,
}

impl Convert {
  pub fn exec(self) -> Result<(), Box<dyn Error>> {
    let rotation = Rotation::create(Some(self.from), Some(self.to));
    debug!("Rotation from {} to {}: {:?}", self.from, self.to, rotation);
    self.input.exec(move |lon_deg, lat_deg, write, sep| {
      let (lon, lat) = rotation.rotate(&lonlat_deg2xyz(lon_deg, lat_deg)?).to_deg();
      write!(write, "{:017.13}{}{:+017.13}", lon, sep, lat).map_err(|e| e.into())
    })
  }
}
