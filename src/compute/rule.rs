//! Transition rule for Conway's Game of Life.
//!
//! The classic B3/S23 rule: a dead cell is born with exactly three live
//! neighbors, a live cell survives with two or three.

/// Neighbor count that brings a dead cell to life.
pub const BIRTH: usize = 3;

/// Neighbor counts under which a live cell survives.
pub const SURVIVAL: [usize; 2] = [2, 3];

/// Compute the next state of a single cell.
///
/// - Dead with exactly 3 live neighbors: born
/// - Live with 2 or 3 live neighbors: survives
/// - Anything else: dead
#[inline]
pub fn next_state(alive: bool, live_neighbors: usize) -> bool {
    if alive {
        SURVIVAL.contains(&live_neighbors)
    } else {
        live_neighbors == BIRTH
    }
}
