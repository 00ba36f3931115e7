//! TOML configuration of grids, navigation and sky views.
//!
//! Example:
//! ```toml
//! [grid]
//! format = "sexagesimal-angle"
//! tables = "standard"
//! min_divs = 3.0
//!
//! [navigation]
//! zoom_factor = 1.2
//! zoom_axes = ["x", "y"]
//!
//! [sky]
//! projection = "aitoff"
//! view_sys = "galactic"
//! data_sys = "equatorial"
//! reflect = true
//! ```
//! All sections and fields are optional.

use std::{fs, path::Path};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
  aspect::SkyAspect,
  error::Error,
  nav::{AxisSet, CubeAxis, CubeNavigator, PlaneNavigator, SkyNavigator, DEFAULT_ZOOM_FACTOR},
  proj::SkyProjection,
  sky::{Rotation, SkySys},
  tick::{AngFormat, AngScale, TableSet},
};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  pub grid: GridConfig,
  pub navigation: NavConfig,
  pub sky: SkyConfig,
}

/// Grid interval selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
  pub format: AngFormat,
  pub tables: TableSet,
  pub min_divs: f64,
}

impl Default for GridConfig {
  fn default() -> Self {
    Self {
      format: AngFormat::default(),
      tables: TableSet::default(),
      min_divs: AngScale::DEFAULT_MIN_DIVS,
    }
  }
}

impl GridConfig {
  pub fn ang_scale(&self) -> AngScale {
    AngScale::new(self.format, self.tables).with_min_divs(self.min_divs)
  }

  /// Checks the values that deserialisation alone does not constrain.
  pub fn check(&self) -> Result<(), Error> {
    let md = self.min_divs;
    if md.is_finite() && md >= 0.0 {
      Ok(())
    } else {
      Err(Error::InvalidConfig(format!(
        "min_divs must be positive. Actual: {}.",
        md
      )))
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
  /// Multiplicative factor of one zoom step (one wheel click).
  pub zoom_factor: f64,
  /// Cube axes affected by zooms, all of them if absent.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub zoom_axes: Option<Vec<CubeAxis>>,
}

impl Default for NavConfig {
  fn default() -> Self {
    Self {
      zoom_factor: DEFAULT_ZOOM_FACTOR,
      zoom_axes: None,
    }
  }
}

impl NavConfig {
  pub fn cube_navigator(&self) -> CubeNavigator {
    CubeNavigator::new(
      self.zoom_factor,
      self.zoom_axes.as_deref().map(AxisSet::from_axes),
    )
  }

  pub fn sky_navigator(&self) -> SkyNavigator {
    SkyNavigator::new(self.zoom_factor)
  }

  pub fn plane_navigator(&self) -> PlaneNavigator {
    PlaneNavigator::new(self.zoom_factor)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkyConfig {
  pub projection: SkyProjection,
  /// Sky system of the view.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub view_sys: Option<SkySys>,
  /// Sky system of the input positions.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data_sys: Option<SkySys>,
  /// Longitudes increasing to the left.
  pub reflect: bool,
}

impl Default for SkyConfig {
  fn default() -> Self {
    Self {
      projection: SkyProjection::default(),
      view_sys: None,
      data_sys: None,
      reflect: true,
    }
  }
}

impl SkyConfig {
  /// Rotation from the data sky system to the view sky system.
  pub fn rotation(&self) -> Rotation {
    Rotation::create(self.data_sys, self.view_sys)
  }

  pub fn default_aspect(&self) -> SkyAspect {
    SkyAspect::new_default(self.projection, self.reflect)
  }
}

impl Config {
  pub fn from_toml_str(content: &str) -> Result<Self, Error> {
    let config: Config = toml::from_str(content)?;
    config.check()?;
    Ok(config)
  }

  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
    let path = path.as_ref();
    debug!("Read configuration file: {}", path.to_string_lossy());
    fs::read_to_string(path)
      .map_err(|err| Error::IoWithPath {
        path: path.to_string_lossy().into(),
        err,
      })
      .and_then(|content| Self::from_toml_str(&content))
  }

  pub fn to_toml_string(&self) -> Result<String, Error> {
    toml::to_string_pretty(self).map_err(|e| e.into())
  }

  fn check(&self) -> Result<(), Error> {
    let zf = self.navigation.zoom_factor;
    if !(zf.is_finite() && zf > 0.0) {
      return Err(Error::InvalidConfig(format!(
        "zoom_factor must be strictly positive. Actual: {}.",
        zf
      )));
    }
    self.grid.check()?;
    if self.navigation.zoom_axes.as_ref().is_some_and(|v| v.is_empty()) {
      return Err(Error::InvalidConfig("zoom_axes must not be empty.".into()));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::proj::Projection;

  #[test]
  fn test_defaults() {
    let config = Config::from_toml_str("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.grid.ang_scale(), AngScale::default());
    assert!(config.sky.rotation().is_identity());
    assert!(config.sky.default_aspect().is_reflected());
    assert_eq!(config.navigation.cube_navigator().zoom_axes(), None);
  }

  #[test]
  fn test_full() {
    let config = Config::from_toml_str(
      r#"
[grid]
format = "sexagesimal-time"
tables = "sparse"
min_divs = 4.0

[navigation]
zoom_factor = 1.5
zoom_axes = ["x", "z"]

[sky]
projection = "aitoff"
view_sys = "galactic"
data_sys = "equatorial"
reflect = false
"#,
    )
    .unwrap();
    let scale = config.grid.ang_scale();
    assert_eq!(scale.format(), AngFormat::SexagesimalTime);
    assert_eq!(scale.tables(), TableSet::Sparse);
    assert_eq!(scale.min_divs(), 4.0);
    let axes = config.navigation.cube_navigator().zoom_axes().unwrap();
    assert!(axes.contains(CubeAxis::X) && !axes.contains(CubeAxis::Y));
    assert_eq!(config.sky.projection.name(), "Aitoff");
    assert_eq!(
      config.sky.rotation(),
      Rotation::create(Some(SkySys::Equatorial), Some(SkySys::Galactic))
    );
    assert!(!config.sky.default_aspect().is_reflected());
    // Round trip through TOML
    let content = config.to_toml_string().unwrap();
    assert_eq!(Config::from_toml_str(&content).unwrap(), config);
  }

  #[test]
  fn test_grid_check() {
    let mut grid = GridConfig::default();
    assert!(grid.check().is_ok());
    grid.min_divs = 0.0;
    assert!(grid.check().is_ok());
    for md in [f64::NAN, f64::INFINITY, -2.0] {
      grid.min_divs = md;
      assert!(matches!(grid.check(), Err(Error::InvalidConfig(_))));
    }
  }

  #[test]
  fn test_errors() {
    assert!(matches!(
      Config::from_toml_str("[sky]\nprojection = \"mollweide\"\n"),
      Err(Error::Config(_))
    ));
    assert!(matches!(
      Config::from_toml_str("[navigation]\nzoom_factor = -2.0\n"),
      Err(Error::InvalidConfig(_))
    ));
    assert!(Config::from_toml_str("[grid]\nunknown = 1\n").is_err());
    assert!(matches!(
      Config::from_toml_str("[grid]\nmin_divs = -1.0\n"),
      Err(Error::InvalidConfig(_))
    ));
    assert!(matches!(
      Config::from_file("/nonexistent/skyplot.toml"),
      Err(Error::IoWithPath { .. })
    ));
  }
}
