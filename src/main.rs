use anyhow::Context;
use clap::Parser;
use env_logger::Builder;
use log::{LevelFilter, info};
use std::path::PathBuf;
use std::time::Instant;

use crate::config::Config;
use crate::simulation::{SimulationContext, TraceWriter};

mod amc;
mod config;
mod error_model;
mod geometry;
mod numerology;
mod pool;
mod propagation;
mod scene;
mod scheduler;
mod simulation;
mod subframe;

pub(crate) type NodeId = u32;

/// Sidelink V2X semi-persistent scheduling simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scene file (nodes, resource pool, propagation, regions)
    scene: PathBuf,

    /// Run configuration; all defaults when omitted
    config: Option<PathBuf>,

    /// Debug logging for the simulator
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let mut builder = Builder::new();
    builder.filter_level(LevelFilter::Info);
    if verbose {
        builder.filter(Some("sidelink_sps_simulator"), LevelFilter::Debug);
    }
    builder.parse_default_env().init();
}

fn print_summary(ctx: &SimulationContext) {
    let stats = &ctx.stats;
    let scheduler = ctx.scheduler_stats();
    println!("packets generated        {}", stats.generated);
    println!("packets expired          {}", stats.expired);
    println!("transmissions            {}", stats.transmissions);
    println!("retransmissions          {}", stats.retransmissions);
    println!("receptions ok            {}", stats.successes);
    println!("  half-duplex failures   {}", stats.half_duplex_failures);
    println!("  propagation failures   {}", stats.propagation_failures);
    println!("  collision failures     {}", stats.collision_failures);
    println!("  SCI failures           {}", stats.sci_failures);
    println!("departed nodes           {}", stats.departed_nodes);
    println!("selections               {}", scheduler.selections);
    println!("  counter reselections   {}", scheduler.counter_reselections);
    println!("  latency reselections   {}", scheduler.latency_reselections);
    println!("  size reselections      {}", scheduler.size_reselections);
    println!("  latency and size       {}", scheduler.latency_and_size_reselections);
    println!("  relaxed threshold      {}", scheduler.relaxed_selections);
    println!("  whole window fallback  {}", scheduler.fallback_selections);
    println!("reservations used        {}", scheduler.used_reservations);
    println!("reservations unutilized  {}", scheduler.unutilized_reservations);
    println!("reservations kept        {}", scheduler.kept_reservations);
    println!("packets dropped by MAC   {}", scheduler.dropped_packets);
    match stats.overall_prr() {
        Some(prr) => println!("overall PRR              {prr:.4}"),
        None => println!("overall PRR              n/a"),
    }
    for (distance, prr) in stats.prr() {
        println!("  PRR @ {distance:>7.1} m  {prr:.4}");
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => {
            let config = Config::default();
            config.validate()?;
            config
        }
    };
    init_logging(args.verbose || config.simulation.verbose);
    info!("Starting up");

    let scene_path = args.scene.display().to_string();
    let scene = scene::load_scene(&scene_path).with_context(|| format!("Failed to load scene {}", scene_path))?;

    let traces = match &config.simulation.trace_dir {
        Some(dir) => TraceWriter::open(dir, &format!("scene {}, seed {}, run {}", scene_path, config.simulation.seed, config.simulation.run)),
        None => TraceWriter::disabled(),
    };

    let mut ctx = SimulationContext::new(config, scene, traces)?;
    let started = Instant::now();
    simulation::run(&mut ctx)?;
    info!("Simulated {} ms in {:.2?}", ctx.config.simulation.duration_ms, started.elapsed());

    print_summary(&ctx);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_line_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn scene_config_and_verbose_flag() {
        let args = Args::try_parse_from(["sidelink-sps-simulator", "highway.json", "run.toml", "--verbose"]).unwrap();
        assert_eq!(args.scene, PathBuf::from("highway.json"));
        assert_eq!(args.config, Some(PathBuf::from("run.toml")));
        assert!(args.verbose);

        let args = Args::try_parse_from(["sidelink-sps-simulator", "-v", "highway.json"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.verbose);
    }

    #[test]
    fn scene_is_required() {
        assert!(Args::try_parse_from(["sidelink-sps-simulator"]).is_err());
        assert!(Args::try_parse_from(["sidelink-sps-simulator", "a.json", "b.toml", "c"]).is_err());
    }
}
