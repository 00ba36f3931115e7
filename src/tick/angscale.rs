//! Selection of round grid intervals for angular coordinates.
//!
//! Intervals are chosen from fixed tables of "nice" values, in decimal degrees, in
//! sexagesimal degrees (degrees, arcminutes, arcseconds) or in sexagesimal hours
//! (hours, minutes, seconds of time).

use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

use super::MAX_TICKS;
use crate::error::Error;

/// Kind of values the grid is labelled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AngFormat {
  /// Decimal degrees.
  #[default]
  Decimal,
  /// Degrees, arcminutes, arcseconds. Values in degrees.
  SexagesimalAngle,
  /// Hours, minutes, seconds. Values in hours.
  SexagesimalTime,
}

impl FromStr for AngFormat {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "decimal" | "deg" => Ok(Self::Decimal),
      "sexagesimal-angle" | "dms" => Ok(Self::SexagesimalAngle),
      "sexagesimal-time" | "hms" => Ok(Self::SexagesimalTime),
      _ => Err(Error::UnknownAngFormat(s.to_string())),
    }
  }
}

/// Set of intervals the large steps are chosen from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableSet {
  #[default]
  Standard,
  /// Standard tables extended with the full and half period, for very coarse grids.
  Sparse,
}

const ARCMIN: f64 = 1.0 / 60.0;
const ARCSEC: f64 = 1.0 / 3600.0;

const DECIMAL_BIGS: [f64; 8] = [90.0, 60.0, 30.0, 20.0, 10.0, 5.0, 2.0, 1.0];
const DECIMAL_SMALLS: [f64; 3] = [0.5, 0.2, 0.1];

const SEX_ANGLE_BIGS: [f64; 24] = [
  90.0,
  60.0,
  45.0,
  30.0,
  20.0,
  15.0,
  10.0,
  5.0,
  2.0,
  1.0,
  30.0 * ARCMIN,
  20.0 * ARCMIN,
  15.0 * ARCMIN,
  10.0 * ARCMIN,
  5.0 * ARCMIN,
  2.0 * ARCMIN,
  1.0 * ARCMIN,
  30.0 * ARCSEC,
  20.0 * ARCSEC,
  15.0 * ARCSEC,
  10.0 * ARCSEC,
  5.0 * ARCSEC,
  2.0 * ARCSEC,
  1.0 * ARCSEC,
];

const SEX_TIME_BIGS: [f64; 19] = [
  6.0,
  4.0,
  3.0,
  2.0,
  1.0,
  30.0 * ARCMIN,
  20.0 * ARCMIN,
  15.0 * ARCMIN,
  10.0 * ARCMIN,
  5.0 * ARCMIN,
  2.0 * ARCMIN,
  1.0 * ARCMIN,
  30.0 * ARCSEC,
  20.0 * ARCSEC,
  15.0 * ARCSEC,
  10.0 * ARCSEC,
  5.0 * ARCSEC,
  2.0 * ARCSEC,
  1.0 * ARCSEC,
];

const SEX_SMALLS: [f64; 3] = [0.5 * ARCSEC, 0.2 * ARCSEC, 0.1 * ARCSEC];

/// Largest power of ten dividing the small intervals.
const MAX_SMALL_POW: i32 = 10;

/// First grid line and interval between successive grid lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaling {
  pub start: f64,
  pub step: f64,
}

/// Chooser of round grid intervals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngScale {
  format: AngFormat,
  tables: TableSet,
  /// Number of divisions a range must be strictly larger than.
  min_divs: f64,
}

impl Default for AngScale {
  fn default() -> Self {
    Self::new(AngFormat::default(), TableSet::default())
  }
}

impl AngScale {
  pub const DEFAULT_MIN_DIVS: f64 = 3.0;

  pub fn new(format: AngFormat, tables: TableSet) -> Self {
    Self {
      format,
      tables,
      min_divs: Self::DEFAULT_MIN_DIVS,
    }
  }

  pub fn with_min_divs(mut self, min_divs: f64) -> Self {
    self.min_divs = min_divs;
    self
  }

  pub fn format(&self) -> AngFormat {
    self.format
  }

  pub fn tables(&self) -> TableSet {
    self.tables
  }

  pub fn min_divs(&self) -> f64 {
    self.min_divs
  }

  /// Full period of the coordinate: 24 (hours) for time, else 360 (degrees).
  pub fn period(&self) -> f64 {
    match self.format {
      AngFormat::SexagesimalTime => 24.0,
      _ => 360.0,
    }
  }

  /// Large intervals, in descending order.
  fn bigs(&self) -> impl Iterator<Item = f64> + '_ {
    let sparse: &[f64] = match (self.tables, self.format) {
      (TableSet::Standard, _) => &[],
      (TableSet::Sparse, AngFormat::SexagesimalTime) => &[24.0, 12.0],
      (TableSet::Sparse, _) => &[360.0, 180.0],
    };
    let standard: &[f64] = match self.format {
      AngFormat::Decimal => &DECIMAL_BIGS,
      AngFormat::SexagesimalAngle => &SEX_ANGLE_BIGS,
      AngFormat::SexagesimalTime => &SEX_TIME_BIGS,
    };
    sparse.iter().chain(standard.iter()).copied()
  }

  fn smalls(&self) -> &'static [f64; 3] {
    match self.format {
      AngFormat::Decimal => &DECIMAL_SMALLS,
      _ => &SEX_SMALLS,
    }
  }

  /// Returns the largest table interval dividing `delta` in strictly more than
  /// `min_divs` parts, or `0` if `delta` is null or too small.
  pub fn scale(&self, delta: f64) -> f64 {
    if delta == 0.0 {
      return 0.0;
    }
    let delta = delta.abs();
    let qualifies = |step: &f64| delta / step > self.min_divs;
    if let Some(big) = self.bigs().find(qualifies) {
      return big;
    }
    (0..=MAX_SMALL_POW)
      .flat_map(|k| {
        let p = 10_f64.powi(k);
        self.smalls().iter().map(move |s| s / p)
      })
      .find(qualifies)
      .unwrap_or(0.0)
  }

  /// Returns the grid interval for the range from `min` to `max` together with the first
  /// grid value, or `None` if `min == max` or if no interval can be found.
  /// A range such that `min > max` wraps around the period.
  pub fn scaling(&self, min: f64, max: f64) -> Option<Scaling> {
    if min == max {
      return None;
    }
    let mut delta = max - min;
    if min > max {
      delta += self.period();
    }
    let step = self.scale(delta);
    if !(step > 0.0) {
      return None;
    }
    // Null min takes the non-positive branch
    let start = if min > 0.0 {
      min - (min % step) + step
    } else {
      min - (min % step)
    };
    Some(Scaling { start, step })
  }

  /// Grid values from `min` to `max`, the values crossing the period (if `min > max`)
  /// being reduced to `[0, period)`.
  /// Empty if the range holds more than `MAX_TICKS` grid values.
  pub fn ticks(&self, min: f64, max: f64) -> Vec<f64> {
    let Some(Scaling { start, step }) = self.scaling(min, max) else {
      return Vec::new();
    };
    let wraps = min > max;
    let end = if wraps { max + self.period() } else { max };
    let n = ((end - start) / step + 1e-9).floor();
    if !(n >= 0.0) {
      return Vec::new();
    }
    if n >= MAX_TICKS as f64 {
      warn!(
        "Too many grid values on [{}, {}] with step {}: {}. Max: {}.",
        min, max, step, n + 1.0, MAX_TICKS
      );
      return Vec::new();
    }
    (0..=n as i64)
      .map(|i| start + i as f64 * step)
      .map(|v| if wraps { v.rem_euclid(self.period()) } else { v })
      .collect()
  }

  /// Label of the given grid value, with a precision adapted to the grid interval.
  pub fn format_value(&self, value: f64, step: f64) -> String {
    match self.format {
      AngFormat::Decimal => {
        let ndec = decimals(step);
        format!("{:.*}", ndec, value)
      }
      AngFormat::SexagesimalAngle => format_sexagesimal(value, step, ["°", "'", "\""], false),
      AngFormat::SexagesimalTime => format_sexagesimal(value, step, ["h", "m", "s"], true),
    }
  }
}

/// Number of decimals needed to distinguish multiples of `step`.
fn decimals(step: f64) -> usize {
  if step > 0.0 && step < 1.0 {
    (-step.log10().floor()).max(0.0) as usize
  } else {
    0
  }
}

fn format_sexagesimal(value: f64, step: f64, units: [&str; 3], colons: bool) -> String {
  let sign = if value < 0.0 { "-" } else { "" };
  let v = value.abs();
  if step >= 1.0 {
    format!("{}{}{}", sign, v.round(), units[0])
  } else if step >= ARCMIN * (1.0 - 1e-9) {
    let total = (v * 60.0).round() as i64;
    if colons {
      format!("{}{:02}:{:02}", sign, total / 60, total % 60)
    } else {
      format!("{}{}{}{:02}{}", sign, total / 60, units[0], total % 60, units[1])
    }
  } else {
    let ndec = decimals(step * 3600.0);
    let scale = 10_i64.pow(ndec as u32);
    let total = (v * 3600.0 * scale as f64).round() as i64;
    let (whole, frac) = (total / scale, total % scale);
    let (d, m, s) = (whole / 3600, (whole / 60) % 60, whole % 60);
    let s = if ndec > 0 {
      format!("{:02}.{:0w$}", s, frac, w = ndec)
    } else {
      format!("{:02}", s)
    };
    if colons {
      format!("{}{:02}:{:02}:{}", sign, d, m, s)
    } else {
      format!("{}{}{}{:02}{}{}{}", sign, d, units[0], m, units[1], s, units[2])
    }
  }
}
