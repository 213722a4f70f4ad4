//! Seed types for initializing Life Board runs.

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::compute::{GridError, LifeGrid};

/// Complete seed specification for board initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seed {
    /// Pattern to use for seeding.
    pub pattern: Pattern,
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            pattern: Pattern::Glider { x: 1, y: 1 },
        }
    }
}

/// Predefined patterns for initialization.
///
/// Positions are `(x, y)` = (column, row). Cells falling outside the board
/// are clipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    /// All cells dead.
    Empty,
    /// Horizontal period-2 oscillator centered on (x, y).
    Blinker { x: usize, y: usize },
    /// 2x2 still life with its top-left cell at (x, y).
    Block { x: usize, y: usize },
    /// Glider heading down-right, 3x3 bounding box at (x, y).
    Glider { x: usize, y: usize },
    /// Explicit list of live cells.
    Cells { cells: Vec<(usize, usize)> },
    /// Uniform random fill.
    Random {
        /// Probability that a cell starts live (0.0-1.0).
        density: f64,
        /// Random seed.
        seed: u64,
    },
    /// Seed file in text seed format. Dimensions come from the file.
    File { path: PathBuf },
}

const GLIDER: [(usize, usize); 5] = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
const BLOCK: [(usize, usize); 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];

impl Seed {
    /// Build the initial board.
    pub fn build(&self, width: usize, height: usize) -> Result<LifeGrid, GridError> {
        let mut grid = LifeGrid::dead(width, height)?;

        match &self.pattern {
            Pattern::Empty => {}
            Pattern::Blinker { x, y } => {
                let cells = (0..3).filter_map(|i| Some((x.checked_add(i)?.checked_sub(1)?, *y)));
                place(&mut grid, cells)?;
            }
            Pattern::Block { x, y } => {
                place(&mut grid, offset(&BLOCK, *x, *y))?;
            }
            Pattern::Glider { x, y } => {
                place(&mut grid, offset(&GLIDER, *x, *y))?;
            }
            Pattern::Cells { cells } => {
                place(&mut grid, cells.iter().copied())?;
            }
            Pattern::Random { density, seed } => {
                let p = if density.is_nan() {
                    0.0
                } else {
                    density.clamp(0.0, 1.0)
                };
                let mut rng = StdRng::seed_from_u64(*seed);
                for y in 0..height {
                    for x in 0..width {
                        grid.set_cell(x, y, rng.gen_bool(p))?;
                    }
                }
            }
            Pattern::File { path } => {
                grid.load(path)?;
            }
        }

        Ok(grid)
    }
}

/// Shift a shape to (x, y), dropping cells whose position overflows.
fn offset(
    shape: &[(usize, usize)],
    x: usize,
    y: usize,
) -> impl Iterator<Item = (usize, usize)> + '_ {
    shape
        .iter()
        .filter_map(move |&(dx, dy)| Some((x.checked_add(dx)?, y.checked_add(dy)?)))
}

/// Mark cells live, skipping any outside the board.
fn place(
    grid: &mut LifeGrid,
    cells: impl IntoIterator<Item = (usize, usize)>,
) -> Result<(), GridError> {
    let (width, height) = (grid.width(), grid.height());
    for (x, y) in cells {
        if x < width && y < height {
            grid.set_cell(x, y, true)?;
        }
    }
    Ok(())
}
