//! Solver configuration

pub mod settings;

pub use settings::{ImplicitItems, SolverConfig, SolverMode};
