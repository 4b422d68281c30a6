//! # AirAlloc
//!
//! A genetic algorithm that assigns aircraft to flight legs over a fixed
//! planning horizon.
//!
//! A chromosome is a list of candidate legs (aircraft, origin, destination,
//! desired departure). The decoder simulates each aircraft through its legs
//! to obtain actual timings and feasibility, the evaluator measures demand
//! coverage, delay, repositioning and infeasible legs, and a weighted sum of
//! those metrics is minimized by generational evolution with tournament
//! selection, one-point crossover and gene mutation.

pub mod config;
pub mod decoder;
pub mod error;
pub mod genetic;
pub mod individual;
pub mod instance;
pub mod metrics;
pub mod network;
pub mod population;
pub mod schedule;
pub mod utils;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::genetic::Genetic;
use crate::individual::Individual;
use crate::instance::Instance;
use crate::population::Population;
use crate::schedule::Chromosome;
use crate::utils::{GenerationStats, SearchStatistics};

use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

/// The main algorithm structure that drives the generational search.
pub struct GaAlgorithm<'a> {
    pub instance: &'a Instance,
    pub population: Population,
    pub config: Config,
    pub generation: usize,
    pub genetic: Genetic,
    pub statistics: SearchStatistics,
    rng: ChaCha8Rng,
}

impl<'a> GaAlgorithm<'a> {
    /// Create a new search over the given instance.
    pub fn new(instance: &'a Instance, config: Config) -> Result<Self> {
        config.validate()?;
        let population = Population::new(&config, instance)?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(GaAlgorithm {
            instance,
            population,
            config,
            generation: 0,
            genetic: Genetic,
            statistics: SearchStatistics::default(),
            rng,
        })
    }

    /// Initialize the population with random chromosomes.
    pub fn initialize(&mut self) -> Result<()> {
        self.population
            .initialize(self.instance, &self.config.weights, &mut self.rng)?;
        self.generation = 0;
        self.statistics.history.clear();
        self.record_generation();
        Ok(())
    }

    /// Replace the current generation with the next one.
    pub fn step(&mut self) -> Result<()> {
        self.population.next_generation(
            self.instance,
            &self.config,
            &self.genetic,
            &mut self.rng,
        )?;
        self.generation += 1;
        self.record_generation();
        Ok(())
    }

    /// Run all configured generations and return the best chromosome of the
    /// final generation with its fitness.
    pub fn run(&mut self) -> Result<(Chromosome, f64)> {
        let start_time = Instant::now();
        info!(
            "starting search: {} chromosomes x {} genes, {} generations",
            self.config.pop_size, self.config.n_genes, self.config.generations
        );

        self.initialize()?;
        while !self.should_terminate() {
            self.step()?;
        }

        let best = self.best().ok_or(Error::EmptyPopulation)?.clone();
        self.statistics.generations = self.generation;
        self.statistics.runtime = start_time.elapsed();
        self.statistics.best_fitness = best.fitness;

        info!(
            "search finished after {} generations: fitness {:.2}, {:.1}% demand served",
            self.generation, best.fitness, best.metrics.pct_demand_served
        );
        Ok((best.chromosome, best.fitness))
    }

    /// Best individual of the current generation.
    pub fn best(&self) -> Option<&Individual> {
        self.population.get_best()
    }

    /// Statistics gathered so far.
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Wall-clock time spent in the last completed run.
    pub fn run_time(&self) -> Duration {
        self.statistics.runtime
    }

    fn should_terminate(&self) -> bool {
        self.generation >= self.config.generations
    }

    fn record_generation(&mut self) {
        let best_fitness = self.best().map_or(f64::INFINITY, |b| b.fitness);
        let stats = GenerationStats {
            generation: self.generation,
            best_fitness,
            mean_fitness: self.population.mean_fitness(),
            feasible_individuals: self.population.feasible_count(),
        };
        debug!(
            "generation {}: best {:.2}, mean {:.2}, {} fully feasible",
            stats.generation, stats.best_fitness, stats.mean_fitness, stats.feasible_individuals
        );
        self.statistics.history.push(stats);
    }
}

/// Run the genetic algorithm on an instance.
pub fn run_ga(instance: &Instance, config: &Config) -> Result<(Chromosome, f64)> {
    GaAlgorithm::new(instance, config.clone())?.run()
}
