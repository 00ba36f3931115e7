use std::error::Error;

use clap::Parser;

use skyplot::config::Config;

use skyplot_cli::{
  convert::Convert,
  grid::Grid,
  proj::{Proj, Unproj},
};

// Avoid musl's default allocator due to lackluster performance
// https://nickb.dev/blog/default-musl-allocator-considered-harmful-to-performance
#[cfg(all(target_env = "musl", target_arch = "x86_64"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Perform sky plot geometry operations on the command line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
enum Args {
  Convert(Convert),
  Proj(Proj),
  Unproj(Unproj),
  Grid(Grid),
  /// Prints the default TOML configuration
  Config,
}

impl Args {
  fn exec(self) -> Result<(), Box<dyn Error>> {
    match self {
      Self::Convert(e) => e.exec(),
      Self::Proj(e) => e.exec(),
      Self::Unproj(e) => e.exec(),
      Self::Grid(e) => e.exec(),
      Self::Config => Config::default()
        .to_toml_string()
        .map(|s| print!("{}", s))
        .map_err(|e| e.into()),
    }
  }
}

fn main() -> Result<(), Box<dyn Error>> {
  env_logger::init();
  let args = Args::parse();
  args.exec()
}
