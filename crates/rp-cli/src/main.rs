//! `replay`: query simulation replay data from the command line and load map
//! data into the SQLite store the service reads.

#[macro_use]
extern crate log;

mod import;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use structopt::StructOpt;

use rp_core::{LaneKindFilter, MapReference};
use rp_service::config::DEFAULT_CONFIG_NAME;
use rp_service::service::ROAD_STATUS_TABLE_SUFFIX;
use rp_service::{ReplayService, ReplayServiceBuilder, ServiceConfig, StepRange};
use rp_status::{MemoryStepSource, RoadStatus};

#[derive(StructOpt)]
#[structopt(name = "replay", about = "Traffic-simulation replay data tool")]
struct Opt {
    /// Path to a JSON config file.  Defaults to ./replay.json when present.
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,
    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(StructOpt)]
enum Command {
    /// List the metadata of every simulation
    Sims,
    /// Print the metadata of one simulation
    Sim {
        name: String,
    },
    /// Print the lanes inside a simulation's microscopic area as GeoJSON
    Lanes {
        name: String,
        /// "all", "junction" or "road"
        #[structopt(long, default_value = "all")]
        kind: LaneKindFilter,
    },
    /// Print one representative lane per road as GeoJSON, keyed by road id
    RoadLanes {
        name: String,
    },
    /// Print the areas of interest inside a simulation's microscopic area as GeoJSON
    Aois {
        name: String,
    },
    /// Summarise congestion per step from a CSV of road status samples
    RoadStatusStat {
        name: String,
        /// CSV with columns step,id,level
        #[structopt(long, parse(from_os_str))]
        samples: PathBuf,
        #[structopt(long)]
        begin: i64,
        /// Exclusive
        #[structopt(long)]
        end: i64,
        #[structopt(long, default_value = "1")]
        interval: i64,
    },
    /// Load map documents, one JSON object per line, into the database
    ImportMap {
        /// Target map, as "database.collection"
        #[structopt(long)]
        map: String,
        #[structopt(parse(from_os_str))]
        input: PathBuf,
    },
    /// Load simulation metadata rows from a JSON array into the database
    ImportMeta {
        #[structopt(parse(from_os_str))]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opt = Opt::from_args();
    let config = load_config(opt.config.as_deref())?;
    run(opt.cmd, &config)
}

fn load_config(path: Option<&Path>) -> Result<ServiceConfig> {
    match path {
        Some(path) => ServiceConfig::load(path).with_context(|| format!("loading {}", path.display())),
        None if Path::new(DEFAULT_CONFIG_NAME).exists() => {
            Ok(ServiceConfig::load(Path::new(DEFAULT_CONFIG_NAME))?)
        }
        None => Ok(ServiceConfig::default()),
    }
}

fn run(cmd: Command, config: &ServiceConfig) -> Result<()> {
    match cmd {
        Command::Sims => print_json(&open(config)?.list_sims()?),
        Command::Sim { name } => print_json(&open(config)?.sim_by_name(&name)?),
        Command::Lanes { name, kind } => print_json(&open(config)?.lanes(&name, kind)?),
        Command::RoadLanes { name } => print_json(&open(config)?.road_lanes(&name)?),
        Command::Aois { name } => print_json(&open(config)?.aois(&name)?),
        Command::RoadStatusStat { name, samples, begin, end, interval } => {
            let mut source: MemoryStepSource<RoadStatus> = MemoryStepSource::new();
            source
                .load_csv(&format!("{name}{ROAD_STATUS_TABLE_SUFFIX}"), &samples)
                .with_context(|| format!("reading {}", samples.display()))?;
            let service = ReplayServiceBuilder::open_sqlite(config)?.road_status(Arc::new(source)).build();
            let range = StepRange::new(begin, end).with_interval(interval);
            print_json(&service.road_status_stat(&name, &range)?)
        }
        Command::ImportMap { map, input } => {
            let n = import::import_map(config, &map.parse::<MapReference>()?, &input)?;
            info!("imported {n} document(s) into {map}");
            Ok(())
        }
        Command::ImportMeta { input } => {
            let n = import::import_metadata(config, &input)?;
            info!("imported {n} metadata row(s)");
            Ok(())
        }
    }
}

fn open(config: &ServiceConfig) -> Result<ReplayService> {
    Ok(ReplayServiceBuilder::open_sqlite(config)?.build())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
