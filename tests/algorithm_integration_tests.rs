//! Integration tests for the full search.

use airalloc::config::Config;
use airalloc::decoder::decode;
use airalloc::error::Error;
use airalloc::individual::Individual;
use airalloc::instance::{Aircraft, Airport, DemandEntry, Instance, Route};
use airalloc::metrics::{compute_metrics, fitness};
use airalloc::population::Population;
use airalloc::{run_ga, GaAlgorithm};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Creates a moderate network: four airports connected through a hub.
fn create_moderate_instance() -> Instance {
    let codes = ["HUB", "N", "S", "E"];
    let airports = codes.iter().map(|c| Airport::new(c)).collect();

    let mut routes = Vec::new();
    for spoke in &codes[1..] {
        routes.push(Route::new("HUB", spoke, 70, 360, 1320));
        routes.push(Route::new(spoke, "HUB", 70, 360, 1320));
    }
    routes.push(Route::new("N", "S", 120, 420, 1200));

    let aircraft = vec![
        Aircraft::new("AC1", 150, "HUB", 40),
        Aircraft::new("AC2", 150, "HUB", 40),
        Aircraft::new("AC3", 90, "N", 30),
        Aircraft::new("AC4", 90, "S", 30),
    ];

    let demands = vec![
        DemandEntry::new("HUB", "N", 420, 30, 140),
        DemandEntry::new("N", "HUB", 600, 30, 120),
        DemandEntry::new("HUB", "S", 480, 30, 100),
        DemandEntry::new("S", "HUB", 720, 30, 90),
        DemandEntry::new("HUB", "E", 540, 60, 160),
        DemandEntry::new("E", "HUB", 900, 60, 150),
        DemandEntry::new("N", "S", 780, 60, 70),
    ];

    Instance::new(airports, routes, aircraft, demands)
}

fn small_config(seed: u64) -> Config {
    Config::new()
        .with_pop_size(20)
        .with_n_genes(12)
        .with_generations(10)
        .with_seed(seed)
}

#[test]
fn test_algorithm_initialization() {
    let instance = create_moderate_instance();
    let mut algorithm = GaAlgorithm::new(&instance, small_config(1)).unwrap();
    algorithm.initialize().unwrap();

    assert_eq!(algorithm.population.get_pop_size(), 20);
    assert!(algorithm.best().is_some());
    assert_eq!(algorithm.statistics().history.len(), 1);
}

#[test]
fn test_algorithm_short_run() {
    let instance = create_moderate_instance();
    let config = small_config(2);

    let mut algorithm = GaAlgorithm::new(&instance, config.clone()).unwrap();
    let (best, score) = algorithm.run().unwrap();

    assert_eq!(best.len(), config.n_genes);
    assert_eq!(algorithm.generation, config.generations);
    assert_eq!(algorithm.statistics().generations, config.generations);
    assert_eq!(algorithm.statistics().history.len(), config.generations + 1);
    assert_eq!(algorithm.statistics().best_fitness, score);

    // The reported score is the fitness of the returned chromosome
    let schedules = decode(&best, &instance).unwrap();
    let metrics = compute_metrics(&schedules, &instance).unwrap();
    assert!((fitness(&metrics, &config.weights) - score).abs() < 1e-9);

    // ...and the minimum of the final generation
    for individual in &algorithm.population.individuals {
        assert!(score <= individual.fitness);
    }
}

#[test]
fn test_zero_generations_returns_initial_best() {
    let instance = create_moderate_instance();
    let config = small_config(99).with_generations(0);

    let (best, score) = run_ga(&instance, &config).unwrap();

    let mut population = Population::new(&config, &instance).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    population
        .initialize(&instance, &config.weights, &mut rng)
        .unwrap();
    let expected = population.get_best().unwrap();

    assert_eq!(best, expected.chromosome);
    assert_eq!(score, expected.fitness);

    let minimum = population
        .individuals
        .iter()
        .map(|i| i.fitness)
        .fold(f64::INFINITY, f64::min);
    assert_eq!(score, minimum);
}

#[test]
fn test_same_seed_same_result() {
    let instance = create_moderate_instance();

    let first = run_ga(&instance, &small_config(5)).unwrap();
    let second = run_ga(&instance, &small_config(5)).unwrap();

    assert_eq!(first.0, second.0);
    assert_eq!(first.1, second.1);
}

#[test]
fn test_returned_chromosome_reevaluates_to_score() {
    let instance = create_moderate_instance();
    let config = small_config(17).with_generations(25);

    let (best, score) = run_ga(&instance, &config).unwrap();
    let individual = Individual::evaluate(best, &instance, &config.weights).unwrap();

    assert_eq!(individual.fitness, score);
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let instance = create_moderate_instance();

    let result = GaAlgorithm::new(&instance, small_config(1).with_pop_size(0));
    assert!(matches!(result, Err(Error::EmptyPopulation)));

    let result = run_ga(&instance, &small_config(1).with_cx_prob(1.5));
    assert!(matches!(
        result,
        Err(Error::InvalidProbability { name: "cx_prob", .. })
    ));

    let result = run_ga(&instance, &small_config(1).with_mut_prob(-0.1));
    assert!(matches!(
        result,
        Err(Error::InvalidProbability { name: "mut_prob", .. })
    ));
}

#[test]
fn test_instance_without_fleet_is_rejected() {
    let instance = Instance::new(
        vec![Airport::new("A"), Airport::new("B")],
        vec![Route::new("A", "B", 60, 360, 1320)],
        Vec::new(),
        Vec::new(),
    );

    assert!(matches!(
        run_ga(&instance, &small_config(1)),
        Err(Error::EmptyFleet)
    ));
}

#[test]
fn test_empty_chromosomes() {
    let instance = create_moderate_instance();
    let config = small_config(3).with_n_genes(0);

    let (best, score) = run_ga(&instance, &config).unwrap();

    assert!(best.is_empty());
    // Every demand entry is fully unmet
    assert_eq!(score, 10.0 * instance.total_pax() as f64);
}
