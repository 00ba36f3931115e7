//! Named sky coordinate systems and the guessing of the columns holding their coordinates.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
  error::Error,
  math::{M3x3, XYZt},
};

/// Equatorial (FK5 J2000 or ICRS, ESA convention) to Galactic rotation matrix.
/// Computed using the ZYZ Euler transformation from the coordinates of the North Galactic
/// Pole (12h51m26.2755s, +27.12825 deg) plus its position angle (122.93192 deg), see
/// Eq. (1.5.9) and (1.5.10) of Hipparcos and Tycho Vol1.
const EQ2GAL: M3x3 = M3x3(
  XYZt(
    -0.054_875_560_416_215_368,
    -0.873_437_090_234_885,
    -0.483_835_015_548_713_2,
  ),
  XYZt(
    0.494_109_427_875_583_65,
    -0.444_829_629_960_011_2,
    0.746_982_244_497_218_8,
  ),
  XYZt(
    -0.867_666_149_019_004_7,
    -0.198_076_373_431_201_52,
    0.455_983_776_175_066_9,
  ),
);

/// Galactic to Supergalactic rotation matrix (de Vaucouleurs et al. 1976 pole at
/// `l = 47.37 deg, b = 6.32 deg`, origin at `l = 137.37 deg, b = 0`).
const GAL2SGAL: M3x3 = M3x3(
  XYZt(-0.735_742_574_804, 0.677_261_296_414, 0.0),
  XYZt(-0.074_553_778_365, -0.080_991_471_307, 0.993_922_590_400),
  XYZt(0.673_145_302_109, 0.731_271_165_817, 0.110_081_262_225),
);

/// IAU 1976 mean obliquity of the ecliptic at J2000: 23deg 26' 21.448", in degrees.
pub const OBLIQUITY_J2000_DEG: f64 = 23.439_291_111;

/// A sky coordinate system, defined by its rotation with respect to the Equatorial system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkySys {
  Equatorial,
  Galactic,
  Supergalactic,
  #[serde(rename = "ecliptic", alias = "ecliptic2000")]
  Ecliptic2000,
}

/// Identifiers of the (longitude, latitude) columns of a sky system.
struct CoordIds {
  /// UCD1+ atoms
  ucd_lon: &'static str,
  ucd_lat: &'static str,
  /// Legacy UCD1 words
  ucd1_lon: &'static str,
  ucd1_lat: &'static str,
  /// Known (lon, lat) column name pairs, lower case
  names: &'static [(&'static str, &'static str)],
}

const EQUATORIAL_IDS: CoordIds = CoordIds {
  ucd_lon: "pos.eq.ra",
  ucd_lat: "pos.eq.dec",
  ucd1_lon: "POS_EQ_RA",
  ucd1_lat: "POS_EQ_DEC",
  names: &[
    ("ra", "dec"),
    ("ra2000", "dec2000"),
    ("raj2000", "dej2000"),
    ("raj2000", "decj2000"),
    ("ra_icrs", "de_icrs"),
    ("ra_icrs", "dec_icrs"),
    ("ra_deg", "dec_deg"),
    ("right_ascension", "declination"),
    ("alpha", "delta"),
  ],
};

const GALACTIC_IDS: CoordIds = CoordIds {
  ucd_lon: "pos.galactic.lon",
  ucd_lat: "pos.galactic.lat",
  ucd1_lon: "POS_GAL_LON",
  ucd1_lat: "POS_GAL_LAT",
  names: &[
    ("glon", "glat"),
    ("gal_lon", "gal_lat"),
    ("gal_long", "gal_lat"),
    ("lii", "bii"),
  ],
};

const SUPERGALACTIC_IDS: CoordIds = CoordIds {
  ucd_lon: "pos.supergalactic.lon",
  ucd_lat: "pos.supergalactic.lat",
  ucd1_lon: "POS_SG_LON",
  ucd1_lat: "POS_SG_LAT",
  names: &[("sglon", "sglat"), ("sg_lon", "sg_lat"), ("sgl", "sgb")],
};

const ECLIPTIC_IDS: CoordIds = CoordIds {
  ucd_lon: "pos.ecliptic.lon",
  ucd_lat: "pos.ecliptic.lat",
  ucd1_lon: "POS_ECL_LON",
  ucd1_lat: "POS_ECL_LAT",
  names: &[
    ("elon", "elat"),
    ("ecl_lon", "ecl_lat"),
    ("ecliptic_lon", "ecliptic_lat"),
    ("lambda", "beta"),
  ],
};

/// Metadata of a table column, as far as coordinate guessing is concerned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnInfo {
  pub name: Option<String>,
  pub ucd: Option<String>,
}

impl ColumnInfo {
  pub fn new<S: Into<String>>(name: S) -> Self {
    Self {
      name: Some(name.into()),
      ucd: None,
    }
  }

  pub fn with_ucd<S: Into<String>>(mut self, ucd: S) -> Self {
    self.ucd = Some(ucd.into());
    self
  }

  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }

  pub fn ucd(&self) -> Option<&str> {
    self.ucd.as_deref().map(str::trim)
  }
}

impl SkySys {
  pub const ALL: [SkySys; 4] = [
    SkySys::Equatorial,
    SkySys::Galactic,
    SkySys::Supergalactic,
    SkySys::Ecliptic2000,
  ];

  pub fn name(&self) -> &'static str {
    match self {
      Self::Equatorial => "equatorial",
      Self::Galactic => "galactic",
      Self::Supergalactic => "supergalactic",
      Self::Ecliptic2000 => "ecliptic",
    }
  }

  pub fn description(&self) -> &'static str {
    match self {
      Self::Equatorial => "J2000 equatorial system",
      Self::Galactic => "IAU 1958 galactic system",
      Self::Supergalactic => "De Vaucouleurs supergalactic system",
      Self::Ecliptic2000 => "ecliptic system based on conversion at 2000.0",
    }
  }

  pub fn lon_name(&self) -> &'static str {
    match self {
      Self::Equatorial => "RA",
      Self::Galactic => "Lon",
      Self::Supergalactic => "Lon",
      Self::Ecliptic2000 => "Lon",
    }
  }

  pub fn lat_name(&self) -> &'static str {
    match self {
      Self::Equatorial => "Dec",
      Self::Galactic => "Lat",
      Self::Supergalactic => "Lat",
      Self::Ecliptic2000 => "Lat",
    }
  }

  /// Returns the rotation matrix transforming a unit vector in this system into
  /// a unit vector in the Equatorial system.
  pub fn to_equatorial(&self) -> M3x3 {
    match self {
      Self::Equatorial => M3x3::IDENTITY,
      Self::Galactic => EQ2GAL.transpose(),
      Self::Supergalactic => GAL2SGAL.time(&EQ2GAL).transpose(),
      Self::Ecliptic2000 => M3x3::from_rotx(OBLIQUITY_J2000_DEG.to_radians()),
    }
  }

  /// Returns the rotation matrix transforming a unit vector in the Equatorial system into
  /// a unit vector in this system.
  pub fn from_equatorial(&self) -> M3x3 {
    self.to_equatorial().transpose()
  }

  fn coord_ids(&self) -> &'static CoordIds {
    match self {
      Self::Equatorial => &EQUATORIAL_IDS,
      Self::Galactic => &GALACTIC_IDS,
      Self::Supergalactic => &SUPERGALACTIC_IDS,
      Self::Ecliptic2000 => &ECLIPTIC_IDS,
    }
  }

  /// Guesses which columns hold the (longitude, latitude) coordinates of this system.
  ///
  /// The strategies are tried from the most to the least specific:
  /// * UCD1+ with the `meta.main` marker (e.g. `pos.eq.ra;meta.main`);
  /// * UCD1+ without marker (e.g. `pos.eq.ra`);
  /// * legacy UCD1 `MAIN` words (e.g. `POS_EQ_RA_MAIN`);
  /// * legacy UCD1 words (e.g. `POS_EQ_RA`);
  /// * known column name pairs (e.g. `ra`/`dec`, `glon`/`glat`).
  ///
  /// Comparisons are case-insensitive. If several columns match the same role within a
  /// strategy, the last one wins.
  /// # Output
  /// * `Some((ilon, ilat))` the indices of the columns in the input slice
  /// * `None` if no strategy leads to a full match
  pub fn coord_pair(&self, columns: &[ColumnInfo]) -> Option<(usize, usize)> {
    let ids = self.coord_ids();
    find_pair(columns, ucd_main(ids.ucd_lon), ucd_main(ids.ucd_lat))
      .or_else(|| find_pair(columns, ucd_plain(ids.ucd_lon), ucd_plain(ids.ucd_lat)))
      .or_else(|| find_pair(columns, ucd1_main(ids.ucd1_lon), ucd1_main(ids.ucd1_lat)))
      .or_else(|| find_pair(columns, ucd1_plain(ids.ucd1_lon), ucd1_plain(ids.ucd1_lat)))
      .or_else(|| {
        ids.names.iter().find_map(|(lon, lat)| {
          find_pair(columns, |c| name_eq(c, lon), |c| name_eq(c, lat))
        })
      })
  }
}

/// Looks for the last column satisfying `is_lon` and the last one satisfying `is_lat`.
fn find_pair<L, B>(columns: &[ColumnInfo], is_lon: L, is_lat: B) -> Option<(usize, usize)>
where
  L: Fn(&ColumnInfo) -> bool,
  B: Fn(&ColumnInfo) -> bool,
{
  let (mut ilon, mut ilat) = (None, None);
  for (i, col) in columns.iter().enumerate() {
    if is_lon(col) {
      ilon = Some(i);
    }
    if is_lat(col) {
      ilat = Some(i);
    }
  }
  ilon.zip(ilat)
}

fn ucd_main(atom: &'static str) -> impl Fn(&ColumnInfo) -> bool {
  let ucd = format!("{};meta.main", atom);
  move |c: &ColumnInfo| ucd_eq(c, &ucd)
}

fn ucd_plain(atom: &'static str) -> impl Fn(&ColumnInfo) -> bool {
  move |c: &ColumnInfo| ucd_has_atom(c, atom)
}

fn ucd1_main(word: &'static str) -> impl Fn(&ColumnInfo) -> bool {
  let ucd = format!("{}_MAIN", word);
  move |c: &ColumnInfo| ucd_eq(c, &ucd)
}

fn ucd1_plain(word: &'static str) -> impl Fn(&ColumnInfo) -> bool {
  move |c: &ColumnInfo| ucd_eq(c, word)
}

fn ucd_eq(col: &ColumnInfo, ucd: &str) -> bool {
  col.ucd().is_some_and(|u| u.eq_ignore_ascii_case(ucd))
}

/// The UCD1+ is exactly the given atom, or starts with it followed by other words.
fn ucd_has_atom(col: &ColumnInfo, atom: &str) -> bool {
  col.ucd().is_some_and(|u| {
    u.split(';')
      .next()
      .is_some_and(|first| first.trim().eq_ignore_ascii_case(atom))
  })
}

fn name_eq(col: &ColumnInfo, name: &str) -> bool {
  col.name().is_some_and(|n| n.trim().eq_ignore_ascii_case(name))
}

impl fmt::Display for SkySys {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for SkySys {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    Self::ALL
      .into_iter()
      .find(|sys| sys.name().eq_ignore_ascii_case(s))
      .or_else(|| {
        match s.to_ascii_lowercase().as_str() {
          "icrs" | "fk5" | "eq" => Some(Self::Equatorial),
          "gal" => Some(Self::Galactic),
          "supergal" | "sgal" => Some(Self::Supergalactic),
          "ecl" | "ecliptic2000" => Some(Self::Ecliptic2000),
          _ => None,
        }
      })
      .ok_or_else(|| Error::UnknownSkySys(s.to_string()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::math::{HasXYZ, XYZ};

  fn cols(names: &[&str]) -> Vec<ColumnInfo> {
    names.iter().map(|n| ColumnInfo::new(*n)).collect()
  }

  #[test]
  fn test_matrices_are_rotations() {
    for sys in SkySys::ALL {
      let m = sys.to_equatorial();
      assert!(m.is_orthonormal(1e-9), "{}", sys);
      assert!((m.det() - 1.0).abs() < 1e-9, "{}", sys);
    }
  }

  #[test]
  fn test_galactic_landmarks() {
    let m = SkySys::Galactic.to_equatorial();
    // Galactic center
    let (ra, dec) = m.rotate(&XYZ::from_deg(0.0, 0.0)).to_deg();
    assert!((ra - 266.404_99).abs() < 1e-3, "{}", ra);
    assert!((dec + 28.936_17).abs() < 1e-3, "{}", dec);
    // North galactic pole
    let (ra, dec) = m.rotate(&XYZ::from_deg(0.0, 90.0)).to_deg();
    assert!((ra - 192.859_48).abs() < 1e-3, "{}", ra);
    assert!((dec - 27.128_25).abs() < 1e-3, "{}", dec);
  }

  #[test]
  fn test_supergalactic_pole() {
    // The supergalactic north pole is at (l, b) = (47.37, 6.32) deg
    let sg2eq = SkySys::Supergalactic.to_equatorial();
    let gal2eq = SkySys::Galactic.to_equatorial();
    let pole_eq = sg2eq.rotate(&XYZ::from_deg(0.0, 90.0));
    let expected = gal2eq.rotate(&XYZ::from_deg(47.37, 6.32));
    assert!((pole_eq - expected).norm() < 1e-6);
  }

  #[test]
  fn test_ecliptic_pole() {
    let (ra, dec) = SkySys::Ecliptic2000
      .to_equatorial()
      .rotate(&XYZ::from_deg(0.0, 90.0))
      .to_deg();
    assert!((ra - 270.0).abs() < 1e-9);
    assert!((dec - (90.0 - OBLIQUITY_J2000_DEG)).abs() < 1e-9);
  }

  #[test]
  fn test_coord_pair_by_names() {
    let eq = SkySys::Equatorial;
    assert_eq!(eq.coord_pair(&cols(&["ra", "dec"])), Some((0, 1)));
    assert_eq!(eq.coord_pair(&cols(&["RA", "Dec"])), Some((0, 1)));
    assert_eq!(eq.coord_pair(&cols(&["DEC", "mag", "ra"])), Some((2, 0)));
    assert_eq!(eq.coord_pair(&cols(&["x", "y"])), None);
    assert_eq!(eq.coord_pair(&cols(&["ra"])), None);
    assert_eq!(eq.coord_pair(&[]), None);
    assert_eq!(
      SkySys::Galactic.coord_pair(&cols(&["id", "GLON", "GLAT"])),
      Some((1, 2))
    );
    assert_eq!(SkySys::Galactic.coord_pair(&cols(&["ra", "dec"])), None);
  }

  #[test]
  fn test_coord_pair_strategy_order() {
    let columns = vec![
      ColumnInfo::new("ra").with_ucd("pos.eq.ra"),
      ColumnInfo::new("dec").with_ucd("pos.eq.dec"),
      ColumnInfo::new("ra_best").with_ucd("POS.EQ.RA;meta.main"),
      ColumnInfo::new("dec_best").with_ucd("pos.eq.dec;meta.main"),
    ];
    assert_eq!(SkySys::Equatorial.coord_pair(&columns), Some((2, 3)));

    let columns = vec![
      ColumnInfo::new("alpha").with_ucd("POS_EQ_RA"),
      ColumnInfo::new("delta").with_ucd("POS_EQ_DEC"),
      ColumnInfo::new("a").with_ucd("POS_EQ_RA_MAIN"),
      ColumnInfo::new("d").with_ucd("pos_eq_dec_main"),
    ];
    assert_eq!(SkySys::Equatorial.coord_pair(&columns), Some((2, 3)));

    // UCD1+ with trailing words, without the main marker
    let columns = vec![
      ColumnInfo::new("c1").with_ucd("pos.galactic.lat;stat.mean"),
      ColumnInfo::new("c2").with_ucd("pos.galactic.lon;stat.mean"),
    ];
    assert_eq!(SkySys::Galactic.coord_pair(&columns), Some((1, 0)));

    // Last found wins
    let columns = vec![
      ColumnInfo::new("a").with_ucd("pos.eq.ra"),
      ColumnInfo::new("b").with_ucd("pos.eq.dec"),
      ColumnInfo::new("c").with_ucd("pos.eq.ra"),
    ];
    assert_eq!(SkySys::Equatorial.coord_pair(&columns), Some((2, 1)));

    // Missing metadata never matches
    let columns = vec![ColumnInfo::default(), ColumnInfo::default()];
    assert_eq!(SkySys::Equatorial.coord_pair(&columns), None);
  }

  #[test]
  fn test_from_str() {
    assert_eq!("Galactic".parse::<SkySys>().unwrap(), SkySys::Galactic);
    assert_eq!("ICRS".parse::<SkySys>().unwrap(), SkySys::Equatorial);
    assert_eq!("ecliptic".parse::<SkySys>().unwrap(), SkySys::Ecliptic2000);
    assert!(matches!(
      "foo".parse::<SkySys>(),
      Err(Error::UnknownSkySys(_))
    ));
  }
}
