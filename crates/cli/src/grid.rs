use std::{
  error::Error,
  io::{stdout, Write},
  path::PathBuf,
};

use clap::Args;
use log::debug;

use skyplot::{
  config::{Config, GridConfig},
  tick::{AngFormat, TableSet, MAX_TICKS},
};

/// Computes round grid values, with their labels, over an angular range.
/// A range such that MIN > MAX wraps around 360 degrees (or 24 hours).
#[derive(Debug, Clone, Args)]
pub struct Grid {
  /// Lower bound of the range, in degrees (in hours for the sexagesimal-time format)
  #[clap(allow_negative_numbers = true, value_name = "MIN")]
  min: f64,
  /// Upper bound of the range, in degrees (in hours for the sexagesimal-time format)
  #[clap(allow_negative_numbers = true, value_name = "MAX")]
  max: f64,
  /// Label format: decimal, sexagesimal-angle (dms) or sexagesimal-time (hms)
  #[arg(short, long)]
  format: Option<AngFormat>,
  /// Also consider the half and full period intervals
  #[arg(long)]
  sparse: bool,
  /// Number of divisions the range must be larger than
  #[arg(long, value_name = "N")]
  min_divs: Option<f64>,
  /// TOML configuration file providing the defaults of the above options (section [grid])
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,
}

impl Grid {
  pub fn exec(self) -> Result<(), Box<dyn Error>> {
    let mut grid = match &self.config {
      Some(path) => Config::from_file(path)?.grid,
      None => GridConfig::default(),
    };
    if let Some(format) = self.format {
      grid.format = format;
    }
    if self.sparse {
      grid.tables = TableSet::Sparse;
    }
    if let Some(min_divs) = self.min_divs {
      grid.min_divs = min_divs;
    }
    grid.check()?;
    let scale = grid.ang_scale();
    let scaling = scale
      .scaling(self.min, self.max)
      .ok_or_else(|| format!("No grid interval for range [{}, {}].", self.min, self.max))?;
    debug!("Grid start: {}; step: {}", scaling.start, scaling.step);
    let ticks = scale.ticks(self.min, self.max);
    if ticks.is_empty() {
      return Err(
        format!(
          "No grid value listed for range [{}, {}]: none in the range, or more than {}.",
          self.min, self.max, MAX_TICKS
        )
        .into(),
      );
    }
    let mut lock = stdout().lock();
    for value in ticks {
      writeln!(
        &mut lock,
        "{}\t{}",
        value,
        scale.format_value(value, scaling.step)
      )?;
    }
    Ok(())
  }
}
