//! LifeGrid - One generation of a bounded Game of Life board.
//!
//! # Axis convention
//!
//! Every coordinate taken or returned by this module is `(x, y)` where `x` is
//! the column (horizontal axis) and `y` is the row (vertical axis). Cells are
//! stored row-major as a flat array indexed `y * width + x`, and the nested
//! view returned by [`LifeGrid::get`] is indexed `[y][x]`.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use super::codec::{self, FormatError};
use super::rule;

/// Errors raised by board construction, mutation and persistence.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("Invalid board shape: {0}")]
    Shape(#[from] ShapeError),
    #[error("Cell ({x}, {y}) is outside the {width}x{height} board")]
    Range {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("Malformed seed: {0}")]
    Format(#[from] FormatError),
    #[error("Seed I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Reasons a matrix handed to [`LifeGrid::set`] is not a valid board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("board has no rows")]
    NoRows,
    #[error("{width}x{height} board exceeds addressable size")]
    TooLarge { width: usize, height: usize },
    #[error("row {row} is empty")]
    EmptyRow { row: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// A fixed-size boolean board and the B3/S23 transition over it.
///
/// Two grids compare equal when their dimensions and cells are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LifeGrid {
    /// Cell states, row-major [y * width + x].
    cells: Vec<bool>,
    width: usize,
    height: usize,
}

impl LifeGrid {
    /// Create an empty 0x0 board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `width` x `height` board with every cell dead.
    ///
    /// A zero dimension yields the empty 0x0 board.
    pub fn dead(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Ok(Self::new());
        }
        let size = width
            .checked_mul(height)
            .ok_or(ShapeError::TooLarge { width, height })?;
        Ok(Self {
            cells: vec![false; size],
            width,
            height,
        })
    }

    /// Build a board from a matrix of rows (see [`LifeGrid::set`]).
    pub fn from_rows<R: AsRef<[bool]>>(matrix: &[R]) -> Result<Self, GridError> {
        let mut grid = Self::new();
        grid.set(matrix)?;
        Ok(grid)
    }

    /// Replace the board with `matrix`, indexed `[y][x]`.
    ///
    /// Width is taken from the first row and height from the row count. The
    /// matrix must be non-empty and rectangular; on failure the current board
    /// is left untouched.
    pub fn set<R: AsRef<[bool]>>(&mut self, matrix: &[R]) -> Result<(), GridError> {
        let width = check_shape(matrix)?;
        self.cells = matrix
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .collect();
        self.width = width;
        self.height = matrix.len();
        Ok(())
    }

    /// Owned snapshot of the board, indexed `[y][x]`.
    pub fn get(&self) -> Vec<Vec<bool>> {
        self.rows().map(<[bool]>::to_vec).collect()
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        // chunks(0) panics; an empty board has no cells to chunk anyway
        self.cells.chunks(self.width.max(1))
    }

    /// Flat row-major view of the cells.
    #[inline]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// True if the board holds no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// State of the cell at column `x`, row `y`.
    pub fn cell(&self, x: usize, y: usize) -> Result<bool, GridError> {
        let idx = self.checked_idx(x, y)?;
        Ok(self.cells[idx])
    }

    /// Flip the cell at column `x`, row `y`.
    pub fn toggle(&mut self, x: usize, y: usize) -> Result<(), GridError> {
        let idx = self.checked_idx(x, y)?;
        self.cells[idx] = !self.cells[idx];
        Ok(())
    }

    /// Set the cell at column `x`, row `y`.
    pub fn set_cell(&mut self, x: usize, y: usize, alive: bool) -> Result<(), GridError> {
        let idx = self.checked_idx(x, y)?;
        self.cells[idx] = alive;
        Ok(())
    }

    /// Count live cells in the Moore neighborhood of column `x`, row `y`.
    ///
    /// The neighborhood is clipped at the board edges, so corner cells have
    /// at most 3 candidates and edge cells at most 5.
    pub fn count_neighbors(&self, x: usize, y: usize) -> Result<usize, GridError> {
        self.checked_idx(x, y)?;
        Ok(self.live_neighbors(x, y))
    }

    /// Advance one generation.
    ///
    /// Every cell is evaluated against the current generation before any cell
    /// is written, then the whole board is replaced at once.
    pub fn step(&mut self) {
        let next: Vec<bool> = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .map(|(x, y)| rule::next_state(self.cells[self.idx(x, y)], self.live_neighbors(x, y)))
            .collect();
        self.cells = next;
    }

    /// Advance `generations` generations.
    pub fn run(&mut self, generations: u64) {
        for _ in 0..generations {
            self.step();
        }
    }

    /// Write the board in seed format: one line per row, cells as
    /// comma-separated `0`/`1`.
    pub fn save_to<W: Write>(&self, writer: &mut W) -> Result<(), GridError> {
        codec::encode_rows(writer, self.rows())?;
        Ok(())
    }

    /// Save the board to a seed file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), GridError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.save_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Replace the board with one read in seed format.
    ///
    /// The board is only replaced once the whole input has been validated.
    pub fn load_from<R: BufRead>(&mut self, reader: R) -> Result<(), GridError> {
        let rows = codec::decode_rows(reader)?;
        self.set(&rows)
    }

    /// Replace the board with the contents of a seed file.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), GridError> {
        let reader = BufReader::new(File::open(path)?);
        self.load_from(reader)
    }

    /// Replace the board with seed-format text.
    pub fn load_str(&mut self, text: &str) -> Result<(), GridError> {
        self.load_from(text.as_bytes())
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn checked_idx(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::Range {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.idx(x, y))
    }

    /// Live neighbor count for an in-bounds cell.
    fn live_neighbors(&self, x: usize, y: usize) -> usize {
        let xs = x.saturating_sub(1)..=(x + 1).min(self.width - 1);
        let ys = y.saturating_sub(1)..=(y + 1).min(self.height - 1);

        let mut count = 0;
        for ny in ys {
            for nx in xs.clone() {
                if (nx, ny) != (x, y) && self.cells[self.idx(nx, ny)] {
                    count += 1;
                }
            }
        }
        count
    }
}

/// Validate a matrix and return its width.
fn check_shape<R: AsRef<[bool]>>(matrix: &[R]) -> Result<usize, ShapeError> {
    let width = matrix.first().ok_or(ShapeError::NoRows)?.as_ref().len();
    for (row, cells) in matrix.iter().enumerate() {
        let found = cells.as_ref().len();
        if found == 0 {
            return Err(ShapeError::EmptyRow { row });
        }
        if found != width {
            return Err(ShapeError::Ragged {
                row,
                expected: width,
                found,
            });
        }
    }
    Ok(width)
}

impl fmt::Display for LifeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{}", codec::encode_line(row))?;
        }
        Ok(())
    }
}

impl FromStr for LifeGrid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut grid = Self::new();
        grid.load_str(s)?;
        Ok(grid)
    }
}
