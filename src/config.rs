//! Configuration parameters for the allocation search.

use crate::error::{Error, Result};
use crate::metrics::FitnessWeights;
use serde::{Deserialize, Serialize};

/// Configuration settings for the genetic algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Number of chromosomes per generation
    pub pop_size: usize,
    /// Number of genes per chromosome
    pub n_genes: usize,
    /// Number of generational replacements
    pub generations: usize,
    /// Probability of applying crossover to a parent pair
    pub cx_prob: f64,
    /// Per-gene mutation probability
    pub mut_prob: f64,
    /// Seed of the random generator; drawn from entropy when absent
    pub seed: Option<u64>,
    /// Number of candidates per tournament
    pub tournament_size: usize,
    /// Fitness weights
    pub weights: FitnessWeights,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            pop_size: 60,
            n_genes: 40,
            generations: 50,
            cx_prob: 0.8,
            mut_prob: 0.1,
            seed: None,
            tournament_size: 3,
            weights: FitnessWeights::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Set the population size.
    pub fn with_pop_size(mut self, size: usize) -> Self {
        self.pop_size = size;
        self
    }

    /// Set the number of genes per chromosome.
    pub fn with_n_genes(mut self, n: usize) -> Self {
        self.n_genes = n;
        self
    }

    /// Set the number of generations.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Set the crossover probability.
    pub fn with_cx_prob(mut self, prob: f64) -> Self {
        self.cx_prob = prob;
        self
    }

    /// Set the per-gene mutation probability.
    pub fn with_mut_prob(mut self, prob: f64) -> Self {
        self.mut_prob = prob;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Set the fitness weights.
    pub fn with_weights(mut self, weights: FitnessWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Check the parameters that would otherwise make the search ill-defined.
    pub fn validate(&self) -> Result<()> {
        if self.pop_size == 0 {
            return Err(Error::EmptyPopulation);
        }
        for (name, value) in [("cx_prob", self.cx_prob), ("mut_prob", self.mut_prob)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidProbability { name, value });
            }
        }
        Ok(())
    }
}
