//! Ticks of a secondary axis functionally related to a master axis.

use std::cmp::Ordering;

use itertools::Itertools;
use log::{debug, warn};

use super::{linear, Tick};
use crate::surface::Axis;

/// Samples of a monotonic function on each integer of a range, for reverse lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct Lut {
  ilo: i64,
  /// Samples in ascending order.
  values: Vec<f64>,
  /// The samples are stored in the reverse order of the integer range.
  is_flip: bool,
}

impl Lut {
  /// Samples `f` on each integer from `ilo` to `ihi` inclusive.
  /// A non-monotonic function only leads to a warning: lookups then give approximate results.
  pub fn build<F>(ilo: i64, ihi: i64, f: F) -> Self
  where
    F: Fn(i64) -> f64,
  {
    let mut values: Vec<f64> = (ilo..=ihi).map(f).collect();
    let is_flip = matches!((values.first(), values.last()), (Some(a), Some(b)) if a > b);
    if is_flip {
      values.reverse();
    }
    if values.iter().tuple_windows().any(|(a, b)| a > b) {
      warn!(
        "Function not monotonic on [{}, {}]: inaccurate lookups expected.",
        ilo, ihi
      );
    }
    debug!("Lut built on [{}, {}], flip: {}.", ilo, ihi, is_flip);
    Self {
      ilo,
      values,
      is_flip,
    }
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  pub fn is_flip(&self) -> bool {
    self.is_flip
  }

  /// Smallest and largest sampled values.
  pub fn value_range(&self) -> Option<(f64, f64)> {
    self.values.first().copied().zip(self.values.last().copied())
  }

  /// Fractional integer at which the function takes the given value, linearly
  /// interpolated between samples and clamped to the sampled range.
  /// Returns NaN for an empty table.
  pub fn lookup_index(&self, value: f64) -> f64 {
    let n = self.values.len();
    if n == 0 {
      return f64::NAN;
    }
    let raw = match self
      .values
      .binary_search_by(|v| v.partial_cmp(&value).unwrap_or(Ordering::Less))
    {
      Ok(i) => i as f64,
      Err(0) => 0.0,
      Err(i) if i >= n => (n - 1) as f64,
      Err(i) => {
        let (v0, v1) = (self.values[i - 1], self.values[i]);
        (i - 1) as f64 + (value - v0) / (v1 - v0)
      }
    };
    let index = if self.is_flip {
      (n - 1) as f64 - raw
    } else {
      raw
    };
    self.ilo as f64 + index
  }
}

/// Ticker of an axis whose values are a function of the values of a master axis.
#[derive(Debug, Clone, PartialEq)]
pub struct SlaveTicker {
  master: Axis,
  lut: Lut,
}

impl SlaveTicker {
  /// # Params
  /// * `master`: the master axis, whose graphics range is sampled pixel by pixel
  /// * `f`: slave value as a function of the master data value, monotonic on the axis range
  pub fn new<F>(master: Axis, f: F) -> Self
  where
    F: Fn(f64) -> f64,
  {
    let (glo, ghi) = master.graphics_limits();
    let ilo = glo.min(ghi).round() as i64;
    let ihi = glo.max(ghi).round() as i64;
    let lut = Lut::build(ilo, ihi, |i| f(master.graphics_to_data(i as f64)));
    Self { master, lut }
  }

  pub fn master(&self) -> &Axis {
    &self.master
  }

  pub fn lut(&self) -> &Lut {
    &self.lut
  }

  /// Graphics position on the master axis of the given slave value.
  pub fn graphics_position(&self, slave_value: f64) -> f64 {
    self.lut.lookup_index(slave_value)
  }

  /// Round slave values, about `approx_count` intervals over the slave range, with their
  /// positions on the master axis.
  pub fn ticks(&self, approx_count: usize) -> Vec<Tick> {
    match self.lut.value_range() {
      Some((lo, hi)) => linear::ticks(lo, hi, approx_count)
        .into_iter()
        .map(|value| Tick {
          value,
          gpos: self.lut.lookup_index(value),
        })
        .collect(),
      None => Vec::new(),
    }
  }
}
