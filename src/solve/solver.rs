//! Solver handle: staged problem construction and resumable solving
//!
//! A [`Solver`] owns one problem instance end to end: items and options
//! go in while it is building, then the first [`Solver::solve`] call
//! freezes the problem, derives the cover matrix and starts the search.
//! Every later call resumes the same search state, so callers can pull
//! solutions one at a time. Multiple independent solvers can coexist in
//! one process; destruction is ordinary drop.

use crate::config::{ImplicitItems, SolverConfig, SolverMode};
use crate::dlx::{CoverMatrix, SearchEngine};
use crate::error::XccError;
use crate::model::{ColorTable, ItemId, ItemRegistry, OptionEntry, OptionId, OptionTable};
use crate::solve::solution::Solution;

/// Result of one solve call.
///
/// The numeric codes are a stable contract for callers that thread the
/// status through foreign interfaces: 10 means a solution is ready to
/// report, 20 means the search is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// A solution was found and can be read until the next solve call.
    SolutionFound,
    /// Every branch is explored; no further solutions exist.
    Exhausted,
}

impl SolveStatus {
    pub const SOLUTION_FOUND_CODE: i32 = 10;
    pub const EXHAUSTED_CODE: i32 = 20;

    /// Stable integer form of the status.
    pub fn code(self) -> i32 {
        match self {
            SolveStatus::SolutionFound => Self::SOLUTION_FOUND_CODE,
            SolveStatus::Exhausted => Self::EXHAUSTED_CODE,
        }
    }

    pub fn found(self) -> bool {
        self == SolveStatus::SolutionFound
    }
}

/// Lifecycle of one solver instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Items and options may still be added.
    Building,
    /// The matrix exists and the search is underway.
    Solving,
    /// The search ran out of branches.
    Done,
}

/// An engine instance: item registry, option table and search state under
/// one owner.
#[derive(Debug)]
pub struct Solver {
    mode: SolverMode,
    implicit_items: ImplicitItems,
    max_solutions: Option<usize>,
    registry: ItemRegistry,
    table: OptionTable,
    colors: ColorTable,
    engine: Option<SearchEngine>,
    stage: Stage,
    have_solution: bool,
}

impl Solver {
    /// Create a solver with the given variant profile and default policies.
    pub fn new(mode: SolverMode) -> Self {
        Self {
            mode,
            implicit_items: ImplicitItems::Permissive,
            max_solutions: None,
            registry: ItemRegistry::new(),
            table: OptionTable::new(),
            colors: ColorTable::new(),
            engine: None,
            stage: Stage::Building,
            have_solution: false,
        }
    }

    /// Create a solver from configuration.
    pub fn from_config(config: &SolverConfig) -> Self {
        let mut solver = Self::new(config.mode);
        solver.implicit_items = config.implicit_items;
        solver.max_solutions = config.max_solutions;
        solver
    }

    pub fn mode(&self) -> SolverMode {
        self.mode
    }

    pub fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    pub fn options(&self) -> &OptionTable {
        &self.table
    }

    pub fn colors(&self) -> &ColorTable {
        &self.colors
    }

    fn require_building(&self, action: &'static str) -> Result<(), XccError> {
        if self.stage == Stage::Building {
            Ok(())
        } else {
            Err(XccError::InvalidState(action))
        }
    }

    /// Declare a primary item.
    pub fn declare_primary(&mut self, name: &str) -> Result<ItemId, XccError> {
        self.require_building("declare an item")?;
        self.registry.declare_primary(name)
    }

    /// Declare a secondary item with unchecked colors.
    pub fn declare_secondary(&mut self, name: &str) -> Result<ItemId, XccError> {
        self.declare_secondary_with_domain(name, 0)
    }

    /// Declare a secondary item whose colors must lie in `1..=domain`.
    /// A domain of zero means colors are only compared, never checked.
    pub fn declare_secondary_with_domain(
        &mut self,
        name: &str,
        domain: u32,
    ) -> Result<ItemId, XccError> {
        self.require_building("declare an item")?;
        self.registry.declare_secondary(name, domain)
    }

    /// Intern a color name, returning its dense id.
    pub fn define_color(&mut self, name: &str) -> u32 {
        self.colors.intern(name)
    }

    /// Add an option from item references written as `name` or
    /// `name:color`. Color tokens that parse as a positive integer are
    /// taken as raw color values; anything else is interned by name.
    /// Unknown items are auto-registered as primary under the permissive
    /// policy and rejected under the strict one.
    pub fn add_option(&mut self, name: &str, items: &[&str]) -> Result<OptionId, XccError> {
        self.require_building("add an option")?;
        // A rejected option must leave no trace: roll back colors interned
        // and items implicitly registered on its behalf.
        let color_mark = self.colors.len();
        let item_mark = self.registry.len();
        let result = self.parse_option(name, items);
        if result.is_err() {
            self.colors.truncate(color_mark);
            self.registry.truncate(item_mark);
        }
        result
    }

    fn parse_option(&mut self, name: &str, items: &[&str]) -> Result<OptionId, XccError> {
        let mut entries = Vec::with_capacity(items.len());
        for spec in items {
            let (item_name, color_token) = match spec.split_once(':') {
                Some((item, color)) if !color.is_empty() => (item, Some(color)),
                Some((item, _)) => (item, None),
                None => (*spec, None),
            };
            let item = match self.registry.lookup(item_name) {
                Some(id) => id,
                None => match self.implicit_items {
                    ImplicitItems::Permissive => self.registry.declare_primary(item_name)?,
                    ImplicitItems::Strict => {
                        return Err(XccError::UnknownItem {
                            option: name.to_string(),
                            item: item_name.to_string(),
                        })
                    }
                },
            };
            let color = color_token.map(|token| match token.parse::<u32>() {
                Ok(value) if value > 0 => value,
                _ => self.colors.intern(token),
            });
            entries.push(OptionEntry { item, color });
        }
        self.add_option_with(name, entries)
    }

    /// Add an option from already resolved entries.
    pub fn add_option_with(
        &mut self,
        name: &str,
        entries: Vec<OptionEntry>,
    ) -> Result<OptionId, XccError> {
        self.require_building("add an option")?;
        if self.mode == SolverMode::ExactCover && entries.iter().any(|e| e.color.is_some()) {
            return Err(XccError::ColorNotAllowed(name.to_string()));
        }
        self.table.add(name, entries, &self.registry)
    }

    /// Advance the search to the next solution.
    ///
    /// The first call freezes the problem and builds the cover matrix;
    /// later calls resume the same search from the next untried branch.
    /// After exhaustion the call is idempotent and keeps reporting
    /// [`SolveStatus::Exhausted`].
    pub fn solve(&mut self) -> SolveStatus {
        match self.stage {
            Stage::Building => {
                let matrix = CoverMatrix::build(&self.registry, &self.table);
                self.engine = Some(SearchEngine::new(matrix));
                self.stage = Stage::Solving;
            }
            Stage::Solving => {}
            Stage::Done => return SolveStatus::Exhausted,
        }

        let Some(engine) = self.engine.as_mut() else {
            return SolveStatus::Exhausted;
        };
        if engine.next_solution() {
            self.have_solution = true;
            SolveStatus::SolutionFound
        } else {
            self.have_solution = false;
            self.stage = Stage::Done;
            SolveStatus::Exhausted
        }
    }

    /// Copy out the most recently found solution.
    pub fn current_solution(&self) -> Option<Solution> {
        if !self.have_solution {
            return None;
        }
        let engine = self.engine.as_ref()?;
        Some(Solution::from_selection(
            &engine.selected_options(),
            &self.table,
            &self.registry,
            &self.colors,
        ))
    }

    /// Invoke `callback(item, option, color)` for every entry of the most
    /// recently found solution. Returns false when there is none.
    pub fn iterate_solution<F>(&self, callback: F) -> bool
    where
        F: FnMut(&str, &str, Option<&str>),
    {
        match self.current_solution() {
            Some(solution) => {
                solution.for_each_entry(callback);
                true
            }
            None => false,
        }
    }

    /// Lazy pull-based enumeration: each `next()` resumes the search.
    /// Dropping the iterator keeps the search state, so a caller can mix
    /// iterator pulls with direct solve calls.
    pub fn solutions(&mut self) -> Solutions<'_> {
        Solutions { solver: self }
    }

    /// Enumerate solutions until exhaustion or the configured
    /// `max_solutions` cap.
    pub fn solve_all(&mut self) -> Vec<Solution> {
        let cap = self.max_solutions.unwrap_or(usize::MAX);
        self.solutions().take(cap).collect()
    }

    /// Whether the search has run out of branches.
    pub fn is_exhausted(&self) -> bool {
        self.stage == Stage::Done
    }

    /// Discard the search state and allow structural changes again.
    /// The next solve call restarts enumeration from the beginning.
    pub fn reset(&mut self) {
        self.engine = None;
        self.stage = Stage::Building;
        self.have_solution = false;
    }

    /// Search effort spent so far, in state-machine transitions.
    pub fn step_count(&self) -> u64 {
        self.engine.as_ref().map_or(0, SearchEngine::step_count)
    }
}

/// Iterator over the remaining solutions of a solver.
pub struct Solutions<'a> {
    solver: &'a mut Solver,
}

impl Iterator for Solutions<'_> {
    type Item = Solution;

    fn next(&mut self) -> Option<Solution> {
        match self.solver.solve() {
            SolveStatus::SolutionFound => self.solver.current_solution(),
            SolveStatus::Exhausted => None,
        }
    }
}
