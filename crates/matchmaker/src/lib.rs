//! Candidate evaluation engine for the matchmaking game: trait catalogs, match criteria,
//! the evaluation pipeline, and review sessions that score the player's calls.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
