//! Formatting helpers and search statistics.

use crate::schedule::Minutes;
use std::time::Duration;

/// Format a duration as hours, minutes, and seconds.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}h {:02}m {:02}s", hours, minutes, seconds)
}

/// Format minutes since midnight as a wall clock "HH:MM", wrapping at 24h.
pub fn format_clock(minutes: Minutes) -> String {
    let minutes = minutes.rem_euclid(24 * 60);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Best and mean fitness of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    pub generation: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    pub feasible_individuals: usize,
}

/// Statistics about the search process.
#[derive(Debug, Clone, Default)]
pub struct SearchStatistics {
    pub generations: usize,
    pub runtime: Duration,
    pub best_fitness: f64,
    /// Entry 0 is the initial population
    pub history: Vec<GenerationStats>,
}

impl SearchStatistics {
    /// Format the statistics as a string.
    pub fn format(&self) -> String {
        let first = self.history.first().map_or(0.0, |g| g.best_fitness);
        format!(
            "Search Statistics:
- Generations: {}
- Runtime: {}
- Initial Best Fitness: {:.2}
- Final Best Fitness: {:.2}",
            self.generations,
            format_duration(self.runtime),
            first,
            self.best_fitness
        )
    }
}
