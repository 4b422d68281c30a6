//! Individual representation for the genetic algorithm population.

use crate::decoder::Decoder;
use crate::error::Result;
use crate::instance::Instance;
use crate::metrics::{compute_metrics, fitness, FitnessWeights, Metrics};
use crate::schedule::Chromosome;
use std::cmp::Ordering;

/// An evaluated chromosome.
#[derive(Debug, Clone)]
pub struct Individual {
    /// The genes of this individual
    pub chromosome: Chromosome,
    /// Metrics of the decoded schedule
    pub metrics: Metrics,
    /// Scalar fitness (lower is better)
    pub fitness: f64,
}

impl Individual {
    /// Decode, measure and score a chromosome.
    pub fn evaluate(
        chromosome: Chromosome,
        instance: &Instance,
        weights: &FitnessWeights,
    ) -> Result<Self> {
        let schedules = Decoder::decode(&chromosome, instance)?;
        let metrics = compute_metrics(&schedules, instance)?;
        let fitness = fitness(&metrics, weights);

        Ok(Individual {
            chromosome,
            metrics,
            fitness,
        })
    }

    /// Get the fitness of the individual.
    pub fn get_fitness(&self) -> f64 {
        self.fitness
    }

    /// Check if every leg of the decoded schedule is feasible.
    pub fn is_feasible(&self) -> bool {
        self.metrics.off_schedule_legs == 0
    }
}

impl PartialEq for Individual {
    fn eq(&self, other: &Self) -> bool {
        self.fitness == other.fitness
    }
}

impl PartialOrd for Individual {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.fitness.partial_cmp(&other.fitness)
    }
}
