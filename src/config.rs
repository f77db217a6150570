use crate::data::DataPaths;
use crate::map::CacheStrategy;
use crate::playback::DEFAULT_CADENCE;
use crate::timeline::TimeRange;
use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;

/// Fires vs planted forests in Brazil, month by month.
#[derive(Parser, Debug, Clone)]
#[command(name = "brazil-fires", version, about)]
pub struct Args {
    /// Directory holding the input tables and the map asset
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Fires table: code, name, month, year, fire count
    #[arg(long, default_value = "fires_data.csv")]
    pub fires: PathBuf,

    /// Planted-forests table: code, _, year, area in hectares
    #[arg(long, default_value = "planted_forests_data.csv")]
    pub planted: PathBuf,

    /// Marker anchors: code, _, x, y (design-space pixels)
    #[arg(long, default_value = "positions.csv")]
    pub positions: PathBuf,

    /// GeoJSON FeatureCollection with one feature per region code
    #[arg(long, default_value = "brazil.geojson")]
    pub map: PathBuf,

    #[arg(long, default_value_t = 2006)]
    pub start_year: i32,

    #[arg(long, default_value_t = 2016)]
    pub end_year: i32,

    /// Display ticks (~16ms each) between frames while playing
    #[arg(long, default_value_t = DEFAULT_CADENCE)]
    pub cadence: u32,

    /// Render frames on first display instead of all at startup
    #[arg(long, conflicts_with = "sequential_frames")]
    pub lazy_frames: bool,

    /// Render all frames at startup on the main thread only
    #[arg(long)]
    pub sequential_frames: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Validated runtime settings
#[derive(Debug, Clone)]
pub struct Config {
    pub fires: PathBuf,
    pub planted: PathBuf,
    pub positions: PathBuf,
    pub map: PathBuf,
    pub time: TimeRange,
    pub cadence: u32,
    pub strategy: CacheStrategy,
}

impl Config {
    pub fn from_args(args: &Args) -> Result<Self> {
        if args.cadence == 0 {
            bail!("--cadence must be at least 1");
        }
        Ok(Self {
            fires: args.data_dir.join(&args.fires),
            planted: args.data_dir.join(&args.planted),
            positions: args.data_dir.join(&args.positions),
            map: args.data_dir.join(&args.map),
            time: TimeRange::new(args.start_year, args.end_year)?,
            cadence: args.cadence,
            strategy: match (args.lazy_frames, args.sequential_frames) {
                (true, _) => CacheStrategy::Lazy,
                (false, true) => CacheStrategy::Sequential,
                (false, false) => CacheStrategy::Eager,
            },
        })
    }

    pub fn data_paths(&self) -> DataPaths<'_> {
        DataPaths {
            fires: &self.fires,
            planted: &self.planted,
            positions: &self.positions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["brazil-fires"]);
        let config = Config::from_args(&args).unwrap();
        assert_eq!(config.fires, PathBuf::from("data/fires_data.csv"));
        assert_eq!(config.map, PathBuf::from("data/brazil.geojson"));
        assert_eq!(config.time.frame_count(), 132);
        assert_eq!(config.cadence, 35);
        assert_eq!(config.strategy, CacheStrategy::Eager);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "brazil-fires",
            "--data-dir",
            "/tmp/in",
            "--start-year",
            "2010",
            "--end-year",
            "2012",
            "--lazy-frames",
        ]);
        let config = Config::from_args(&args).unwrap();
        assert_eq!(config.positions, PathBuf::from("/tmp/in/positions.csv"));
        assert_eq!(config.time.frame_count(), 36);
        assert_eq!(config.strategy, CacheStrategy::Lazy);
    }

    #[test]
    fn test_sequential_frames() {
        let args = Args::parse_from(["brazil-fires", "--sequential-frames"]);
        assert_eq!(Config::from_args(&args).unwrap().strategy, CacheStrategy::Sequential);
        assert!(Args::try_parse_from(["brazil-fires", "--sequential-frames", "--lazy-frames"]).is_err());
    }

    #[test]
    fn test_invalid_settings() {
        let args = Args::parse_from(["brazil-fires", "--start-year", "2016", "--end-year", "2006"]);
        assert!(Config::from_args(&args).is_err());
        let args = Args::parse_from(["brazil-fires", "--cadence", "0"]);
        assert!(Config::from_args(&args).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
