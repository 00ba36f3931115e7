use crate::error::Error;

/// One dimensional mapping between a data range and a graphics range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
  glo: f64,
  ghi: f64,
  dlo: f64,
  dhi: f64,
  log: bool,
  flip: bool,
}

impl Axis {
  /// # Params
  /// * `glo`, `ghi`: graphics coordinates of the ends of the axis, `glo` being where `dlo`
  ///   is plotted when the axis is not flipped (possibly `glo > ghi`, e.g. for vertical axes)
  /// * `dlo`, `dhi`: data range, `dlo < dhi` and `dlo > 0` for logarithmic axes
  /// * `log`: logarithmic scale
  /// * `flip`: `dlo` is plotted at `ghi` instead of `glo`
  pub fn new(glo: f64, ghi: f64, dlo: f64, dhi: f64, log: bool, flip: bool) -> Result<Self, Error> {
    if !(dlo.is_finite() && dhi.is_finite() && dlo < dhi && (!log || dlo > 0.0)) {
      return Err(Error::InvalidRange { min: dlo, max: dhi });
    }
    if !(glo.is_finite() && ghi.is_finite() && glo != ghi) {
      return Err(Error::InvalidRange { min: glo, max: ghi });
    }
    Ok(Self {
      glo,
      ghi,
      dlo,
      dhi,
      log,
      flip,
    })
  }

  pub fn graphics_limits(&self) -> (f64, f64) {
    (self.glo, self.ghi)
  }

  pub fn data_limits(&self) -> (f64, f64) {
    (self.dlo, self.dhi)
  }

  pub fn is_log(&self) -> bool {
    self.log
  }

  pub fn is_flip(&self) -> bool {
    self.flip
  }

  fn scale(&self, d: f64) -> f64 {
    if self.log {
      if d > 0.0 {
        d.ln()
      } else {
        f64::NAN
      }
    } else {
      d
    }
  }

  fn unscale(&self, s: f64) -> f64 {
    if self.log {
      s.exp()
    } else {
      s
    }
  }

  /// Graphics coordinate of the given data value, NaN if the value cannot be plotted.
  pub fn data_to_graphics(&self, d: f64) -> f64 {
    let (slo, shi) = (self.scale(self.dlo), self.scale(self.dhi));
    let mut frac = (self.scale(d) - slo) / (shi - slo);
    if self.flip {
      frac = 1.0 - frac;
    }
    self.glo + frac * (self.ghi - self.glo)
  }

  pub fn graphics_to_data(&self, g: f64) -> f64 {
    let (slo, shi) = (self.scale(self.dlo), self.scale(self.dhi));
    let mut frac = (g - self.glo) / (self.ghi - self.glo);
    if self.flip {
      frac = 1.0 - frac;
    }
    self.unscale(slo + frac * (shi - slo))
  }

  /// Data range obtained by dragging the axis content from `g0` to `g1`.
  pub fn pan(&self, g0: f64, g1: f64) -> (f64, f64) {
    let dg = g1 - g0;
    let a = self.graphics_to_data(self.glo - dg);
    let b = self.graphics_to_data(self.ghi - dg);
    (a.min(b), a.max(b))
  }

  /// Data range obtained by magnifying the axis by `factor` around the graphics
  /// position `g`, the data value at `g` staying at `g`.
  pub fn zoom(&self, g: f64, factor: f64) -> (f64, f64) {
    let sc = self.scale(self.graphics_to_data(g));
    let lo = self.unscale(sc + (self.scale(self.dlo) - sc) / factor);
    let hi = self.unscale(sc + (self.scale(self.dhi) - sc) / factor);
    (lo, hi)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9 * (1.0 + b.abs()), "{} != {}", a, b);
  }

  #[test]
  fn test_linear() {
    let axis = Axis::new(10.0, 110.0, -1.0, 1.0, false, false).unwrap();
    assert_close(axis.data_to_graphics(0.0), 60.0);
    assert_close(axis.graphics_to_data(110.0), 1.0);
    let flipped = Axis::new(10.0, 110.0, -1.0, 1.0, false, true).unwrap();
    assert_close(flipped.data_to_graphics(-1.0), 110.0);
    assert_close(flipped.graphics_to_data(35.0), 0.5);
  }

  #[test]
  fn test_log() {
    let axis = Axis::new(0.0, 300.0, 1.0, 1000.0, true, false).unwrap();
    assert_close(axis.data_to_graphics(10.0), 100.0);
    assert_close(axis.graphics_to_data(200.0), 100.0);
    assert!(axis.data_to_graphics(-1.0).is_nan());
    assert!(Axis::new(0.0, 300.0, 0.0, 1000.0, true, false).is_err());
    assert!(Axis::new(0.0, 0.0, 1.0, 2.0, false, false).is_err());
  }

  #[test]
  fn test_pan_and_zoom() {
    for (log, flip) in [(false, false), (false, true), (true, false), (true, true)] {
      let axis = Axis::new(400.0, 0.0, 2.0, 50.0, log, flip).unwrap();
      let d = axis.graphics_to_data(120.0);
      let (lo, hi) = axis.pan(120.0, 170.0);
      assert!(lo < hi);
      let panned = Axis::new(400.0, 0.0, lo, hi, log, flip).unwrap();
      assert_close(panned.data_to_graphics(d), 170.0);
      let (lo, hi) = axis.zoom(120.0, 2.0);
      let zoomed = Axis::new(400.0, 0.0, lo, hi, log, flip).unwrap();
      assert_close(zoomed.data_to_graphics(d), 120.0);
      if log {
        assert_close((hi / lo).ln(), 0.5 * 25_f64.ln());
      } else {
        assert_close(hi - lo, 24.0);
      }
    }
  }
}
