//! Per-generation statistics.

use std::fmt;

use serde::Serialize;

use super::LifeGrid;

/// Summary of one generation, relative to the one before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    /// Generation number (0 = seed).
    pub generation: u64,
    /// Live cells.
    pub population: usize,
    /// Cells that were dead in the previous generation and are now live.
    pub births: usize,
    /// Cells that were live in the previous generation and are now dead.
    pub deaths: usize,
}

impl GenerationStats {
    /// Statistics for a seed board, with no previous generation.
    pub fn from_grid(generation: u64, grid: &LifeGrid) -> Self {
        Self {
            generation,
            population: grid.population(),
            births: 0,
            deaths: 0,
        }
    }

    /// Statistics for `after`, comparing cell-for-cell against `before`.
    ///
    /// Both boards are expected to share dimensions, which `step()` preserves.
    pub fn between(generation: u64, before: &LifeGrid, after: &LifeGrid) -> Self {
        debug_assert_eq!(
            (before.width(), before.height()),
            (after.width(), after.height()),
            "generation boards differ in size"
        );

        let mut births = 0;
        let mut deaths = 0;
        for (&was, &now) in before.cells().iter().zip(after.cells()) {
            match (was, now) {
                (false, true) => births += 1,
                (true, false) => deaths += 1,
                _ => {}
            }
        }

        Self {
            generation,
            population: after.population(),
            births,
            deaths,
        }
    }

    /// True if nothing changed since the previous generation.
    pub fn is_static(&self) -> bool {
        self.births == 0 && self.deaths == 0
    }
}

impl fmt::Display for GenerationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "generation {}: population={}, births={}, deaths={}",
            self.generation, self.population, self.births, self.deaths
        )
    }
}
