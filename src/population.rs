//! Population management for the genetic algorithm.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::genetic::{random_route, Genetic};
use crate::individual::Individual;
use crate::instance::Instance;
use crate::metrics::FitnessWeights;
use crate::schedule::{AircraftId, Chromosome, Gene, Minutes};
use log::debug;
use rand::seq::index;
use rand::Rng;

/// Earliest desired departure drawn at initialization (06:00).
pub const DEPARTURE_EARLIEST: Minutes = 6 * 60;
/// Latest desired departure drawn at initialization (22:00).
pub const DEPARTURE_LATEST: Minutes = 22 * 60;

/// One generation of evaluated chromosomes.
pub struct Population {
    /// The evaluated members of the current generation
    pub individuals: Vec<Individual>,
    /// Target number of individuals per generation
    pub size: usize,
    /// Genes per chromosome
    pub n_genes: usize,
    aircraft_ids: Vec<AircraftId>,
    airports: Vec<String>,
}

impl Population {
    /// Create an empty population drawing genes from the instance's fleet and airports.
    pub fn new(config: &Config, instance: &Instance) -> Result<Self> {
        let aircraft_ids = instance.aircraft_ids();
        let airports = instance.airport_codes();

        if aircraft_ids.is_empty() {
            return Err(Error::EmptyFleet);
        }
        if airports.len() < 2 {
            return Err(Error::NotEnoughAirports(airports.len()));
        }

        Ok(Population {
            individuals: Vec::with_capacity(config.pop_size),
            size: config.pop_size,
            n_genes: config.n_genes,
            aircraft_ids,
            airports,
        })
    }

    /// Aircraft ids genes are drawn from.
    pub fn aircraft_ids(&self) -> &[AircraftId] {
        &self.aircraft_ids
    }

    /// Airport codes genes are drawn from.
    pub fn airports(&self) -> &[String] {
        &self.airports
    }

    /// Draw a uniformly random gene.
    pub fn random_gene<R: Rng>(&self, rng: &mut R) -> Gene {
        let aircraft_id = self.aircraft_ids[rng.gen_range(0..self.aircraft_ids.len())].clone();
        let (origin, dest) = random_route(rng, &self.airports);
        let dep_time = rng.gen_range(DEPARTURE_EARLIEST..=DEPARTURE_LATEST);

        Gene {
            aircraft_id,
            origin,
            dest,
            dep_time,
        }
    }

    /// Draw a chromosome of `n_genes` random genes.
    pub fn random_chromosome<R: Rng>(&self, rng: &mut R) -> Chromosome {
        (0..self.n_genes).map(|_| self.random_gene(rng)).collect()
    }

    /// Fill the population with random chromosomes and evaluate them.
    pub fn initialize<R: Rng>(
        &mut self,
        instance: &Instance,
        weights: &FitnessWeights,
        rng: &mut R,
    ) -> Result<()> {
        let chromosomes: Vec<Chromosome> =
            (0..self.size).map(|_| self.random_chromosome(rng)).collect();
        self.individuals = Self::evaluate_all(chromosomes, instance, weights)?;

        debug!(
            "initialized {} chromosomes of {} genes",
            self.individuals.len(),
            self.n_genes
        );
        Ok(())
    }

    /// Evaluate each chromosome independently.
    pub fn evaluate_all(
        chromosomes: Vec<Chromosome>,
        instance: &Instance,
        weights: &FitnessWeights,
    ) -> Result<Vec<Individual>> {
        chromosomes
            .into_iter()
            .map(|chromosome| Individual::evaluate(chromosome, instance, weights))
            .collect()
    }

    /// Tournament selection.
    ///
    /// Samples `k` distinct members (capped at the population size) and
    /// returns a copy of the genes of the fittest one.
    pub fn tournament_selection<R: Rng>(&self, k: usize, rng: &mut R) -> Chromosome {
        if self.individuals.is_empty() {
            return Chromosome::new();
        }
        let k = k.clamp(1, self.individuals.len());

        let mut best: Option<&Individual> = None;
        for idx in index::sample(rng, self.individuals.len(), k) {
            let candidate = &self.individuals[idx];
            if best.map_or(true, |b| candidate.fitness < b.fitness) {
                best = Some(candidate);
            }
        }

        best.map(|b| b.chromosome.clone()).unwrap_or_default()
    }

    /// Replace the whole population with offspring of tournament-selected parents.
    pub fn next_generation<R: Rng>(
        &mut self,
        instance: &Instance,
        config: &Config,
        genetic: &Genetic,
        rng: &mut R,
    ) -> Result<()> {
        let mut offspring: Vec<Chromosome> = Vec::with_capacity(self.size + 1);

        while offspring.len() < self.size {
            let parent1 = self.tournament_selection(config.tournament_size, rng);
            let parent2 = self.tournament_selection(config.tournament_size, rng);

            let (mut child1, mut child2) =
                genetic.crossover(&parent1, &parent2, config.cx_prob, rng);

            genetic.mutate(
                &mut child1,
                config.mut_prob,
                &self.aircraft_ids,
                &self.airports,
                rng,
            );
            genetic.mutate(
                &mut child2,
                config.mut_prob,
                &self.aircraft_ids,
                &self.airports,
                rng,
            );

            offspring.push(child1);
            offspring.push(child2);
        }
        offspring.truncate(self.size);

        self.individuals = Self::evaluate_all(offspring, instance, &config.weights)?;
        Ok(())
    }

    /// Get the total population size.
    pub fn get_pop_size(&self) -> usize {
        self.individuals.len()
    }

    /// The lowest-fitness individual; the first one wins ties.
    pub fn get_best(&self) -> Option<&Individual> {
        self.individuals.iter().min_by(|a, b| {
            a.fitness
                .partial_cmp(&b.fitness)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// Mean fitness of the current generation.
    pub fn mean_fitness(&self) -> f64 {
        if self.individuals.is_empty() {
            return 0.0;
        }
        self.individuals.iter().map(|i| i.fitness).sum::<f64>() / self.individuals.len() as f64
    }

    /// Number of individuals without any infeasible leg.
    pub fn feasible_count(&self) -> usize {
        self.individuals.iter().filter(|i| i.is_feasible()).count()
    }
}
