//! Compute module - The Game of Life kernel.
//!
//! Pure data and pure functions: no logging, no display, no global state.

mod codec;
mod grid;
mod rule;
mod stats;

pub use codec::*;
pub use grid::*;
pub use rule::*;
pub use stats::*;
