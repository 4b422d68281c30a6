//! Gene, chromosome and leg representation.

use crate::utils::format_clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Minutes since midnight of the first planning day.
pub type Minutes = i64;

pub type AircraftId = String;

/// One candidate flight assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gene {
    pub aircraft_id: AircraftId,
    pub origin: String,
    pub dest: String,
    /// Desired takeoff; not wrapped at 1440
    pub dep_time: Minutes,
}

impl Gene {
    /// Create a new gene.
    pub fn new(aircraft_id: &str, origin: &str, dest: &str, dep_time: Minutes) -> Self {
        Gene {
            aircraft_id: aircraft_id.to_string(),
            origin: origin.to_string(),
            dest: dest.to_string(),
            dep_time,
        }
    }
}

/// Fixed-length ordered sequence of genes.
pub type Chromosome = Vec<Gene>;

/// A gene realized by the decoder with simulated timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    pub gene: Gene,
    pub act_dep: Minutes,
    pub act_arr: Minutes,
    pub feasible: bool,
}

impl Leg {
    /// Departure delay relative to the desired time, never negative.
    pub fn delay(&self) -> Minutes {
        (self.act_dep - self.gene.dep_time).max(0)
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}->{} desired {} dep {} arr {} delay {}m {}",
            self.gene.aircraft_id,
            self.gene.origin,
            self.gene.dest,
            format_clock(self.gene.dep_time),
            format_clock(self.act_dep),
            format_clock(self.act_arr),
            self.delay(),
            if self.feasible { "ok" } else { "infeasible" }
        )
    }
}

/// Legs per aircraft in execution order, keyed by aircraft id.
pub type Schedules = BTreeMap<AircraftId, Vec<Leg>>;

/// Total number of legs across all aircraft.
pub fn leg_count(schedules: &Schedules) -> usize {
    schedules.values().map(Vec::len).sum()
}
