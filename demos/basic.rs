//! Basic example of using the AirAlloc library.

use airalloc::config::Config;
use airalloc::decoder::decode;
use airalloc::instance::Instance;
use airalloc::metrics::compute_metrics;
use airalloc::network::RouteNetwork;
use airalloc::GaAlgorithm;
use clap::Parser;
use log::info;

/// Allocate aircraft to flight legs with a genetic algorithm
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Instance file (JSON with airports, routes, aircraft and demands)
    #[arg(long, default_value = "demos/data/instance.json")]
    instance: String,

    #[arg(long, default_value_t = 60)]
    pop: usize,

    #[arg(long, default_value_t = 40)]
    genes: usize,

    #[arg(long, default_value_t = 50)]
    generations: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    info!("Loading instance from: {}", args.instance);
    let instance = Instance::from_file(&args.instance)?;

    let config = Config::new()
        .with_pop_size(args.pop)
        .with_n_genes(args.genes)
        .with_generations(args.generations)
        .with_seed(args.seed);

    let mut algorithm = GaAlgorithm::new(&instance, config)?;
    let (best, score) = algorithm.run()?;

    let schedules = decode(&best, &instance)?;
    let metrics = compute_metrics(&schedules, &instance)?;

    println!("{}", algorithm.statistics().format());
    println!("Best fitness: {:.2}", score);
    println!("Metrics: {:?}", metrics);
    println!();

    for legs in schedules.values() {
        for leg in legs {
            println!("{}", leg);
        }
    }
    println!();

    let network = RouteNetwork::from_instance(&instance);
    for ((origin, dest), count) in network.flown_edges(&schedules) {
        println!("{} -> {}: {} legs", origin, dest, count);
    }

    Ok(())
}
