//! Problem-level API: solver handle, solutions and validation

pub mod solution;
pub mod solver;
pub mod validator;

pub use solution::{SelectedOption, Solution, SolutionEntry};
pub use solver::{SolveStatus, Solver, Solutions};
pub use validator::{brute_force_solutions, SolutionValidator, ValidationReport};
