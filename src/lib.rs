//! Exact cover with colors (XCC) solving engine
//!
//! This library enumerates the ways a set of named options can cover a
//! universe of items: every primary item exactly once, secondary items
//! optionally and with mutually consistent colors. The search is the
//! classic branch-and-cover walk over a dancing-links structure, held in
//! index arrays rather than pointer cycles, and driven as an explicit
//! state machine so enumeration is resumable: each solve call hands back
//! one solution and the next call picks up at the next untried branch.
//!
//! ```
//! use xcover::{Solver, SolverMode};
//!
//! let mut solver = Solver::new(SolverMode::ExactCoverColors);
//! solver.declare_primary("p").unwrap();
//! solver.declare_primary("q").unwrap();
//! solver.declare_secondary("s").unwrap();
//! solver.add_option("first", &["p", "s:red"]).unwrap();
//! solver.add_option("second", &["q", "s:red"]).unwrap();
//! solver.add_option("third", &["q", "s:blue"]).unwrap();
//!
//! let solutions = solver.solve_all();
//! assert_eq!(solutions.len(), 1);
//! assert_eq!(solutions[0].option_names(), vec!["first", "second"]);
//! ```

pub mod config;
pub mod dlx;
pub mod error;
pub mod model;
pub mod solve;
pub mod utils;

pub use config::{ImplicitItems, SolverConfig, SolverMode};
pub use error::XccError;
pub use model::{ColorId, ItemId, ItemKind, OptionId};
pub use solve::{SolutionValidator, SolveStatus, Solver, Solution, Solutions};

use anyhow::Result;

/// Build a problem through `build`, then enumerate its solutions,
/// honoring the configured solution cap.
pub fn solve_with_config<F>(config: &SolverConfig, build: F) -> Result<Vec<Solution>>
where
    F: FnOnce(&mut Solver) -> std::result::Result<(), XccError>,
{
    config.validate()?;
    let mut solver = Solver::from_config(config);
    build(&mut solver)?;
    Ok(solver.solve_all())
}
