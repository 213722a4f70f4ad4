//! Life Board - Conway's Game of Life on a bounded rectangular board.
//!
//! This crate provides the simulation kernel of a Game of Life editor: a
//! fixed-size boolean board, the classic B3/S23 transition with clipped
//! (non-wrapping) neighborhoods, single-cell editing, and a plain-text seed
//! format for saving and loading boards.
//!
//! # Architecture
//!
//! - `compute`: The kernel (board, transition rule, seed codec, statistics)
//! - `schema`: Configuration types and seed patterns for runs
//! - `animation`: Recording generations to disk and playing them back
//!
//! Coordinates are always `(x, y)` = (column, row).
//!
//! # Example
//!
//! ```rust
//! use life_board::LifeGrid;
//!
//! let mut grid: LifeGrid = "0,0,0\n1,1,1\n0,0,0\n".parse().unwrap();
//! grid.step();
//! assert_eq!(grid.to_string(), "0,1,0\n0,1,0\n0,1,0\n");
//!
//! grid.toggle(0, 0).unwrap();
//! assert_eq!(grid.count_neighbors(1, 1).unwrap(), 3);
//! ```

pub mod animation;
pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{GenerationStats, GridError, LifeGrid};
pub use schema::{Pattern, Seed, SimulationConfig};
