//! Genetic operators: one-point crossover and gene mutation.

use crate::schedule::{Chromosome, Gene, Minutes};
use log::trace;
use rand::Rng;

/// Largest shift, in minutes, applied by the time mutation.
pub const MAX_TIME_SHIFT: Minutes = 15;

/// The three mutually exclusive ways a gene can be mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// Hand the leg to another aircraft.
    Aircraft,
    /// Draw a new origin and a distinct destination.
    Route,
    /// Shift the desired departure by up to ±15 minutes.
    TimeShift,
}

/// Pick a uniform origin and a uniform destination distinct from it.
///
/// `airports` must hold at least two codes.
pub fn random_route<R: Rng>(rng: &mut R, airports: &[String]) -> (String, String) {
    let o = rng.gen_range(0..airports.len());
    let mut d = rng.gen_range(0..airports.len() - 1);
    if d >= o {
        d += 1;
    }
    (airports[o].clone(), airports[d].clone())
}

/// Implements the genetic operators over flight-leg chromosomes.
pub struct Genetic;

impl Genetic {
    /// One-point crossover.
    ///
    /// With probability `cx_prob` the tails after a point drawn in
    /// `[1, min(len1, len2) - 1]` are swapped; otherwise, or when a parent
    /// has fewer than two genes, the offspring are copies of the parents.
    pub fn crossover<R: Rng>(
        &self,
        parent1: &[Gene],
        parent2: &[Gene],
        cx_prob: f64,
        rng: &mut R,
    ) -> (Chromosome, Chromosome) {
        if rng.gen::<f64>() >= cx_prob || parent1.len() < 2 || parent2.len() < 2 {
            return (parent1.to_vec(), parent2.to_vec());
        }

        let cut = rng.gen_range(1..parent1.len().min(parent2.len()));
        trace!("crossover at {}", cut);

        let offspring1 = parent1[..cut]
            .iter()
            .chain(&parent2[cut..])
            .cloned()
            .collect();
        let offspring2 = parent2[..cut]
            .iter()
            .chain(&parent1[cut..])
            .cloned()
            .collect();

        (offspring1, offspring2)
    }

    /// Mutate each gene in place with probability `mutation_rate`.
    pub fn mutate<R: Rng>(
        &self,
        chromosome: &mut [Gene],
        mutation_rate: f64,
        aircraft_ids: &[String],
        airports: &[String],
        rng: &mut R,
    ) {
        for gene in chromosome.iter_mut() {
            if rng.gen::<f64>() < mutation_rate {
                let kind = match rng.gen_range(0..3) {
                    0 => MutationKind::Aircraft,
                    1 => MutationKind::Route,
                    _ => MutationKind::TimeShift,
                };
                Self::apply(gene, kind, aircraft_ids, airports, rng);
            }
        }
    }

    /// Apply a single mutation to a gene.
    pub fn apply<R: Rng>(
        gene: &mut Gene,
        kind: MutationKind,
        aircraft_ids: &[String],
        airports: &[String],
        rng: &mut R,
    ) {
        match kind {
            MutationKind::Aircraft => {
                gene.aircraft_id = aircraft_ids[rng.gen_range(0..aircraft_ids.len())].clone();
            }
            MutationKind::Route => {
                let (origin, dest) = random_route(rng, airports);
                gene.origin = origin;
                gene.dest = dest;
            }
            MutationKind::TimeShift => {
                let shift = rng.gen_range(-MAX_TIME_SHIFT..=MAX_TIME_SHIFT);
                gene.dep_time = (gene.dep_time + shift).max(0);
            }
        }
    }
}
