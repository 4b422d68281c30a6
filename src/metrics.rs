//! Schedule metrics and the scalar fitness built from them.

use crate::error::{Error, Result};
use crate::instance::Instance;
use crate::schedule::{Minutes, Schedules};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Width of the departure buckets used to match supply against demand.
pub const BIN_WIDTH: Minutes = 10;

/// Seats offered keyed by (origin, destination, bin start minute).
pub type Supply = BTreeMap<(String, String, Minutes), u64>;

/// Aggregate statistics of a decoded schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Share of demanded passengers that found a seat, in percent
    pub pct_demand_served: f64,
    /// Mean delay over all legs, feasible or not
    pub avg_delay_min: f64,
    pub off_schedule_legs: usize,
    pub ferries: usize,
    pub total_legs: usize,
    /// Passengers left without a seat
    pub unmet_demand: u64,
}

/// Weights of the linear fitness combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessWeights {
    pub unmet: f64,
    pub delay: f64,
    pub ferry: f64,
    pub off_schedule: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        FitnessWeights {
            unmet: 10.0,
            delay: 0.05,
            ferry: 0.5,
            off_schedule: 2.0,
        }
    }
}

/// Start minute of the bin containing `t`.
pub fn bin10(t: Minutes) -> Minutes {
    t.div_euclid(BIN_WIDTH) * BIN_WIDTH
}

/// Seats offered by feasible legs, bucketed by departure bin.
pub fn aggregate_supply(schedules: &Schedules, instance: &Instance) -> Result<Supply> {
    let mut supply = Supply::new();

    for (aircraft_id, legs) in schedules {
        let capacity = instance
            .aircraft(aircraft_id)
            .ok_or_else(|| Error::UnknownAircraft(aircraft_id.clone()))?
            .capacity as u64;

        for leg in legs.iter().filter(|leg| leg.feasible) {
            let key = (
                leg.gene.origin.clone(),
                leg.gene.dest.clone(),
                bin10(leg.act_dep),
            );
            *supply.entry(key).or_insert(0) += capacity;
        }
    }

    Ok(supply)
}

/// Compute demand coverage, delay, ferry and feasibility statistics.
pub fn compute_metrics(schedules: &Schedules, instance: &Instance) -> Result<Metrics> {
    let supply = aggregate_supply(schedules, instance)?;

    let mut delay_sum: Minutes = 0;
    let mut off_schedule_legs = 0;
    let mut ferries = 0;
    let mut total_legs = 0;

    for (aircraft_id, legs) in schedules {
        let aircraft = instance
            .aircraft(aircraft_id)
            .ok_or_else(|| Error::UnknownAircraft(aircraft_id.clone()))?;

        let mut prev_dest = aircraft.base.as_str();
        for leg in legs {
            total_legs += 1;
            if leg.feasible {
                delay_sum += leg.delay();
            } else {
                off_schedule_legs += 1;
            }
            // Continuity is judged on the planned leg, feasible or not
            if leg.gene.origin != prev_dest {
                ferries += 1;
            }
            prev_dest = leg.gene.dest.as_str();
        }
    }

    let mut unmet_demand = 0u64;
    for demand in instance.demands() {
        let mut offered = 0u64;
        let mut t = demand.dep_time - demand.window;
        while t <= demand.dep_time + demand.window {
            let key = (demand.origin.clone(), demand.dest.clone(), t.max(0));
            offered += supply.get(&key).copied().unwrap_or(0);
            t += BIN_WIDTH;
        }
        unmet_demand += (demand.pax as u64).saturating_sub(offered);
    }

    let total_pax = instance.total_pax();
    let pct_demand_served = if total_pax == 0 {
        0.0
    } else {
        (1.0 - unmet_demand as f64 / total_pax as f64) * 100.0
    };
    let avg_delay_min = if total_legs == 0 {
        0.0
    } else {
        delay_sum as f64 / total_legs as f64
    };

    Ok(Metrics {
        pct_demand_served,
        avg_delay_min,
        off_schedule_legs,
        ferries,
        total_legs,
        unmet_demand,
    })
}

/// Scalar objective, lower is better.
///
/// Average delay is multiplied back by the leg count to recover total delay.
pub fn fitness(metrics: &Metrics, weights: &FitnessWeights) -> f64 {
    weights.unmet * metrics.unmet_demand as f64
        + weights.delay * metrics.avg_delay_min * metrics.total_legs as f64
        + weights.ferry * metrics.ferries as f64
        + weights.off_schedule * metrics.off_schedule_legs as f64
}
