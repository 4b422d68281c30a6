//! Decoder turning a chromosome into per-aircraft flight timelines.

use crate::error::{Error, Result};
use crate::instance::Instance;
use crate::schedule::{AircraftId, Gene, Leg, Minutes, Schedules};
use itertools::Itertools;
use log::trace;
use std::collections::BTreeMap;

/// Simulates each aircraft's sequence of genes to obtain actual timings and feasibility.
pub struct Decoder;

impl Decoder {
    /// Decode a chromosome into schedules.
    ///
    /// Genes are grouped by aircraft and ordered by desired departure (ties
    /// keep chromosome order). Each aircraft starts at its base with clock 0.
    /// Unknown routes yield an infeasible leg that leaves the aircraft where
    /// it was; known routes always move the aircraft, feasible or not.
    pub fn decode(chromosome: &[Gene], instance: &Instance) -> Result<Schedules> {
        let mut by_aircraft: BTreeMap<&str, Vec<&Gene>> = BTreeMap::new();
        for gene in chromosome {
            by_aircraft
                .entry(gene.aircraft_id.as_str())
                .or_default()
                .push(gene);
        }

        let mut schedules = Schedules::new();
        for (aircraft_id, genes) in by_aircraft {
            let aircraft = instance
                .aircraft(aircraft_id)
                .ok_or_else(|| Error::UnknownAircraft(aircraft_id.to_string()))?;

            let mut position = aircraft.base.as_str();
            let mut clock: Minutes = 0;
            let mut legs = Vec::with_capacity(genes.len());

            for gene in genes.into_iter().sorted_by_key(|g| g.dep_time) {
                let route = match instance.route(&gene.origin, &gene.dest) {
                    Some(route) => route,
                    None => {
                        let t = clock.max(gene.dep_time);
                        trace!("{}: no route {}->{}", aircraft_id, gene.origin, gene.dest);
                        legs.push(Leg {
                            gene: gene.clone(),
                            act_dep: t,
                            act_arr: t,
                            feasible: false,
                        });
                        continue;
                    }
                };

                let mut feasible = gene.origin == position;
                let act_dep = clock.max(gene.dep_time).max(route.slot_from);
                if act_dep > route.slot_to {
                    feasible = false;
                }
                let act_arr = act_dep + route.duration_min;

                position = route.dest.as_str();
                clock = act_arr + aircraft.turnaround_min;

                legs.push(Leg {
                    gene: gene.clone(),
                    act_dep,
                    act_arr,
                    feasible,
                });
            }

            schedules.insert(AircraftId::from(aircraft_id), legs);
        }

        Ok(schedules)
    }
}

/// Decode a chromosome against an instance.
pub fn decode(chromosome: &[Gene], instance: &Instance) -> Result<Schedules> {
    Decoder::decode(chromosome, instance)
}
