//! Error type shared by the decoder, evaluator and search driver.

use thiserror::Error;

/// Errors raised by the allocation engine.
#[derive(Debug, Error)]
pub enum Error {
    /// A gene references an aircraft that is not in the fleet.
    #[error("unknown aircraft id: {0}")]
    UnknownAircraft(String),
    /// The fleet is empty, so no gene can be generated.
    #[error("instance has no aircraft")]
    EmptyFleet,
    /// At least two airports are needed to draw a leg with a distinct destination.
    #[error("instance needs at least 2 airports, found {0}")]
    NotEnoughAirports(usize),
    /// Population size of zero leaves nothing to return.
    #[error("population size must be greater than zero")]
    EmptyPopulation,
    /// A probability parameter is outside [0, 1].
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("failed to read instance: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse instance: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
