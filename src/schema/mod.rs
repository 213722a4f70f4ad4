//! Schema module - Configuration and seeding types for Life Board runs.

mod config;
mod seed;

pub use config::*;
pub use seed::*;
