//! Network, fleet and demand records making up a planning instance.

use crate::error::Result;
use crate::schedule::{AircraftId, Minutes};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// An airport, identified by its code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
}

impl Airport {
    pub fn new(code: &str) -> Self {
        Airport {
            code: code.to_string(),
        }
    }
}

/// A directed route with its flight duration and permitted takeoff window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub origin: String,
    pub dest: String,
    /// Flight time in minutes
    pub duration_min: Minutes,
    /// Earliest takeoff (minutes since midnight)
    pub slot_from: Minutes,
    /// Latest takeoff (minutes since midnight)
    pub slot_to: Minutes,
}

impl Route {
    /// Create a new route.
    pub fn new(
        origin: &str,
        dest: &str,
        duration_min: Minutes,
        slot_from: Minutes,
        slot_to: Minutes,
    ) -> Self {
        Route {
            origin: origin.to_string(),
            dest: dest.to_string(),
            duration_min,
            slot_from,
            slot_to,
        }
    }

    /// The (origin, destination) lookup key.
    pub fn key(&self) -> (String, String) {
        (self.origin.clone(), self.dest.clone())
    }
}

/// An aircraft of the fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aircraft {
    pub id: AircraftId,
    pub capacity: u32,
    /// Home base airport code
    pub base: String,
    /// Minimum ground time between landing and the next takeoff
    pub turnaround_min: Minutes,
}

impl Aircraft {
    /// Create a new aircraft.
    pub fn new(id: &str, capacity: u32, base: &str, turnaround_min: Minutes) -> Self {
        Aircraft {
            id: id.to_string(),
            capacity,
            base: base.to_string(),
            turnaround_min,
        }
    }
}

/// Passengers observed on a route around a departure time.
///
/// Demand covers `[dep_time - window, dep_time + window]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandEntry {
    pub origin: String,
    pub dest: String,
    pub dep_time: Minutes,
    pub window: Minutes,
    pub pax: u32,
}

impl DemandEntry {
    pub fn new(origin: &str, dest: &str, dep_time: Minutes, window: Minutes, pax: u32) -> Self {
        DemandEntry {
            origin: origin.to_string(),
            dest: dest.to_string(),
            dep_time,
            window,
            pax,
        }
    }
}

/// Read-only lookup tables shared by every stage of the search.
///
/// Tables are ordered maps so that iterating airports, routes or aircraft
/// always yields the same sequence for the same data.
#[derive(Debug, Clone, Default)]
pub struct Instance {
    airports: BTreeMap<String, Airport>,
    routes: BTreeMap<(String, String), Route>,
    aircraft: BTreeMap<AircraftId, Aircraft>,
    demands: Vec<DemandEntry>,
}

impl Instance {
    /// Build an instance from plain record lists. Later duplicates replace earlier ones.
    pub fn new(
        airports: Vec<Airport>,
        routes: Vec<Route>,
        aircraft: Vec<Aircraft>,
        demands: Vec<DemandEntry>,
    ) -> Self {
        Instance {
            airports: airports.into_iter().map(|a| (a.code.clone(), a)).collect(),
            routes: routes.into_iter().map(|r| (r.key(), r)).collect(),
            aircraft: aircraft.into_iter().map(|a| (a.id.clone(), a)).collect(),
            demands,
        }
    }

    /// Parse an instance from a JSON document with `airports`, `routes`,
    /// `aircraft` and `demands` arrays.
    pub fn from_json(data: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct RawData {
            airports: Vec<Airport>,
            routes: Vec<Route>,
            aircraft: Vec<Aircraft>,
            #[serde(default)]
            demands: Vec<DemandEntry>,
        }
        let raw: RawData = serde_json::from_str(data)?;

        Ok(Instance::new(raw.airports, raw.routes, raw.aircraft, raw.demands))
    }

    /// Load an instance from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn airport(&self, code: &str) -> Option<&Airport> {
        self.airports.get(code)
    }

    pub fn route(&self, origin: &str, dest: &str) -> Option<&Route> {
        self.routes.get(&(origin.to_string(), dest.to_string()))
    }

    pub fn aircraft(&self, id: &str) -> Option<&Aircraft> {
        self.aircraft.get(id)
    }

    pub fn demands(&self) -> &[DemandEntry] {
        &self.demands
    }

    pub fn airports(&self) -> impl Iterator<Item = &Airport> {
        self.airports.values()
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    pub fn fleet(&self) -> impl Iterator<Item = &Aircraft> {
        self.aircraft.values()
    }

    /// All airport codes in sorted order.
    pub fn airport_codes(&self) -> Vec<String> {
        self.airports.keys().cloned().collect()
    }

    /// All aircraft ids in sorted order.
    pub fn aircraft_ids(&self) -> Vec<AircraftId> {
        self.aircraft.keys().cloned().collect()
    }

    /// Total passengers over all demand entries.
    pub fn total_pax(&self) -> u64 {
        self.demands.iter().map(|d| d.pax as u64).sum()
    }
}
