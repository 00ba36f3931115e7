//! Round decimal (1, 2, 5 x 10^n) tick intervals.

use log::warn;

use super::MAX_TICKS;

/// Returns the round decimal step giving about `approx_count` intervals over `range`,
/// or `None` if the range is not a strictly positive finite number.
pub fn step(range: f64, approx_count: usize) -> Option<f64> {
  if !(range.is_finite() && range > 0.0) || approx_count == 0 {
    return None;
  }
  let raw = range / approx_count as f64;
  let mag = 10_f64.powf(raw.log10().floor());
  let r = raw / mag;
  let nice = if r < 1.5 {
    1.0
  } else if r < 3.5 {
    2.0
  } else if r < 7.5 {
    5.0
  } else {
    10.0
  };
  Some(nice * mag)
}

/// Multiples of `step` in `[min, max]` (bounds in any order).
/// Empty if there are more than `MAX_TICKS` of them.
pub fn multiples(min: f64, max: f64, step: f64) -> Vec<f64> {
  let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
  if !(step > 0.0 && lo.is_finite() && hi.is_finite()) {
    return Vec::new();
  }
  let first = (lo / step).ceil();
  let last = (hi / step + 1e-9).floor();
  if !(last - first < MAX_TICKS as f64) {
    warn!(
      "Too many multiples of {} in [{}, {}]. Max: {}.",
      step, lo, hi, MAX_TICKS
    );
    return Vec::new();
  }
  (first as i64..=last as i64).map(|i| i as f64 * step).collect()
}

/// Round ticks covering `[min, max]` with about `approx_count` intervals.
pub fn ticks(min: f64, max: f64, approx_count: usize) -> Vec<f64> {
  match step((max - min).abs(), approx_count) {
    Some(s) => multiples(min, max, s),
    None => Vec::new(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_step() {
    assert_eq!(step(10.0, 5), Some(2.0));
    assert_eq!(step(100.0, 4), Some(20.0));
    assert!((step(0.7, 10).unwrap() - 0.05).abs() < 1e-15);
    assert_eq!(step(0.0, 10), None);
    assert_eq!(step(f64::NAN, 10), None);
    assert_eq!(step(1.0, 0), None);
  }

  #[test]
  fn test_ticks() {
    assert_eq!(ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    assert_eq!(ticks(10.0, 0.0, 5).len(), 6);
    assert_eq!(multiples(-3.0, 3.0, 2.0), vec![-2.0, 0.0, 2.0]);
    assert!(ticks(1.0, 1.0, 5).is_empty());
  }

  #[test]
  fn test_too_many_multiples() {
    assert!(multiples(0.0, 1.0, 1e-12).is_empty());
    assert!(multiples(-1e300, 1e300, f64::MIN_POSITIVE).is_empty());
    assert_eq!(multiples(0.0, 1.0, 1e-3).len(), 1001);
  }
}
