//! Pairs of numbers, either sky positions `(lon, lat)` in degrees or projection plane
//! coordinates `(x, y)`.

use std::{
  error::Error,
  fs::File,
  io::{stdout, BufRead, BufReader, StdoutLock, Write},
  path::PathBuf,
};

use clap::{Args, Subcommand};

use skyplot::math::XYZ;

#[derive(Debug, Clone, Subcommand)]
pub enum PairInput {
  Value(PairVal),
  List(PairList),
}
impl PairInput {
  /// # Params
  /// * `f`: input parameters are
  ///     + first value of the pair
  ///     + second value of the pair
  ///     + writer
  ///     + separator
  pub fn exec<F>(self, f: F) -> Result<(), Box<dyn Error>>
  where
    F: Fn(f64, f64, &mut StdoutLock<'static>, char) -> Result<(), Box<dyn Error>>,
  {
    match self {
      Self::Value(e) => e.exec(f),
      Self::List(e) => e.exec(f),
    }
  }
}

/// Single pair provided in the command line
#[derive(Debug, Clone, Args)]
pub struct PairVal {
  /// Longitude in degrees, or plane x coordinate
  #[clap(allow_negative_numbers = true, value_name = "LON_OR_X")]
  pub a: f64,
  /// Latitude in degrees, or plane y coordinate
  #[clap(allow_negative_numbers = true, value_name = "LAT_OR_Y")]
  pub b: f64,
}

impl PairVal {
  fn exec<F>(self, f: F) -> Result<(), Box<dyn Error>>
  where
    F: Fn(f64, f64, &mut StdoutLock<'static>, char) -> Result<(), Box<dyn Error>>,
  {
    let mut lock = stdout().lock();
    f(self.a, self.b, &mut lock, ' ').and_then(|()| writeln!(&mut lock).map_err(|e| e.into()))
  }
}

/// List of DELIM separated pairs; one pair per line.
#[derive(Debug, Clone, Args)]
pub struct PairList {
  /// Path of the input file ('-' for stdin)
  #[clap(value_name = "FILE", default_value = "-")]
  pub input: PathBuf,
  /// Use DELIM delimiter
  #[clap(short, long, value_name = "DELIM", default_value_t = '\t')]
  pub delimiter: char,
}

impl PairList {
  fn exec<F>(self, f: F) -> Result<(), Box<dyn Error>>
  where
    F: Fn(f64, f64, &mut StdoutLock<'static>, char) -> Result<(), Box<dyn Error>>,
  {
    if self.input == PathBuf::from(r"-") {
      let stdin = std::io::stdin();
      self.exec_on_reader(stdin.lock(), f)
    } else {
      let file = File::open(&self.input)?;
      let reader = BufReader::new(file);
      self.exec_on_reader(reader, f)
    }
  }

  fn exec_on_reader<R, F>(&self, read: R, f: F) -> Result<(), Box<dyn Error>>
  where
    R: BufRead,
    F: Fn(f64, f64, &mut StdoutLock<'static>, char) -> Result<(), Box<dyn Error>>,
  {
    let mut lock = stdout().lock();
    for line in read.lines() {
      listline2pair(self.delimiter, line)
        .and_then(|(a, b)| f(a, b, &mut lock, self.delimiter))
        .and_then(|()| writeln!(&mut lock).map_err(|e| e.into()))?;
    }
    Ok(())
  }
}

fn listline2pair(
  separator: char,
  line: std::io::Result<String>,
) -> Result<(f64, f64), Box<dyn Error>> {
  let line = line?;
  let (a_str, b_str) = line
    .trim()
    .split_once(separator)
    .ok_or_else(|| format!("Split failed on '{}' with delimiter '{}'.", line, separator))?;
  let a = parse_f64(a_str)?;
  let b = parse_f64(b_str)?;
  Ok((a, b))
}

fn parse_f64(s: &str) -> Result<f64, Box<dyn Error>> {
  s.trim()
    .parse::<f64>()
    .map_err(|e| format!("Error parsing: '{}': {:?}", s, e).into())
}

/// Unit vector of a position in degrees.
pub fn lonlat_deg2xyz(lon_deg: f64, lat_deg: f64) -> Result<XYZ, Box<dyn Error>> {
  if !lon_deg.is_finite() {
    Err(format!("Longitude must be finite. Actual: {}.", lon_deg).into())
  } else if !(-90.0..=90.0).contains(&lat_deg) {
    Err(format!("Latitude must be in [-90, 90]. Actual: {}.", lat_deg).into())
  } else {
    Ok(XYZ::from_deg(lon_deg, lat_deg))
  }
}
