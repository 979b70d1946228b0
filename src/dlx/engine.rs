//! Resumable depth-first search over a cover matrix
//!
//! The search runs as an explicit state machine instead of native
//! recursion, so a solution can be handed back mid-search and the next
//! call picks up exactly where the previous one stopped. The states
//! follow the classic branch-and-cover loop: enter a level, choose the
//! active primary item with the fewest covering options, cover it, try
//! each of its rows in table order, recurse, and undo on the way back.

use super::matrix::CoverMatrix;
use crate::model::OptionId;

/// Where the state machine resumes on the next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Fresh engine; nothing covered yet.
    Init,
    /// Check for a complete cover, otherwise branch deeper.
    EnterLevel,
    /// Pick the next item to branch on.
    ChooseItem,
    /// Cover the chosen item and start on its first row.
    CoverItem,
    /// Commit the current row and descend, or give up on the item.
    TryOption,
    /// Undo the current row and advance to the item's next row.
    NextOption,
    /// Restore the chosen item after all its rows failed.
    UncoverItem,
    /// Pop one level; exhausted when none remain.
    LeaveLevel,
}

/// Backtracking search engine. Owns the cover matrix and the selection
/// stack for its whole lifetime; repeated [`Self::next_solution`] calls
/// enumerate solutions one at a time.
#[derive(Debug)]
pub struct SearchEngine {
    matrix: CoverMatrix,
    /// Selected row node per level of the current partial solution.
    x: Vec<usize>,
    level: usize,
    /// Item slot currently branched on.
    item: usize,
    state: State,
    steps: u64,
}

impl SearchEngine {
    pub fn new(matrix: CoverMatrix) -> Self {
        let x = vec![0; matrix.option_count + 1];
        Self {
            matrix,
            x,
            level: 0,
            item: 0,
            state: State::Init,
            steps: 0,
        }
    }

    /// Advance the search to the next complete cover. Returns `true` with
    /// the selection available through [`Self::selection`], or `false`
    /// once every branch is explored. Further calls after exhaustion keep
    /// returning `false` without touching any state.
    pub fn next_solution(&mut self) -> bool {
        loop {
            self.steps += 1;
            match self.state {
                State::Init => {
                    self.level = 0;
                    self.state = State::EnterLevel;
                }
                State::EnterLevel => {
                    if self.matrix.rlink[0] == 0 {
                        // Every primary item is covered.
                        self.state = State::LeaveLevel;
                        return true;
                    }
                    self.state = State::ChooseItem;
                }
                State::ChooseItem => {
                    self.item = self.matrix.choose_mrv();
                    self.state = State::CoverItem;
                }
                State::CoverItem => {
                    self.matrix.cover(self.item);
                    self.x[self.level] = self.matrix.dlink[self.item];
                    self.state = State::TryOption;
                }
                State::TryOption => {
                    let row = self.x[self.level];
                    if row == self.item {
                        // Back at the header: no row left to try.
                        self.state = State::UncoverItem;
                    } else {
                        let mut p = row + 1;
                        while p != row {
                            let j = self.matrix.top[p];
                            if j <= 0 {
                                p = self.matrix.ulink[p];
                            } else {
                                self.matrix.commit(p, j as usize);
                                p += 1;
                            }
                        }
                        self.level += 1;
                        self.state = State::EnterLevel;
                    }
                }
                State::NextOption => {
                    let row = self.x[self.level];
                    let mut p = row - 1;
                    while p != row {
                        let j = self.matrix.top[p];
                        if j <= 0 {
                            p = self.matrix.dlink[p];
                        } else {
                            self.matrix.uncommit(p, j as usize);
                            p -= 1;
                        }
                    }
                    self.item = self.matrix.top[row] as usize;
                    self.x[self.level] = self.matrix.dlink[row];
                    self.state = State::TryOption;
                }
                State::UncoverItem => {
                    self.matrix.uncover(self.item);
                    self.state = State::LeaveLevel;
                }
                State::LeaveLevel => {
                    if self.level == 0 {
                        return false;
                    }
                    self.level -= 1;
                    self.state = State::NextOption;
                }
            }
        }
    }

    /// Row nodes of the most recent solution, in selection order.
    pub fn selection(&self) -> &[usize] {
        &self.x[..self.level]
    }

    /// Options of the most recent solution, in selection order.
    pub fn selected_options(&self) -> Vec<OptionId> {
        self.selection()
            .iter()
            .map(|&node| self.matrix.option_of_node(node))
            .collect()
    }

    pub fn matrix(&self) -> &CoverMatrix {
        &self.matrix
    }

    /// State transitions taken so far, a rough measure of search effort.
    pub fn step_count(&self) -> u64 {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemRegistry, OptionEntry, OptionTable};

    fn engine_for(registry: &ItemRegistry, table: &OptionTable) -> SearchEngine {
        SearchEngine::new(CoverMatrix::build(registry, table))
    }

    fn entry(item: usize, color: Option<u32>) -> OptionEntry {
        OptionEntry { item, color }
    }

    #[test]
    fn test_two_solutions_then_exhaustion() {
        let mut registry = ItemRegistry::new();
        let a = registry.declare_primary("a").unwrap();
        let b = registry.declare_primary("b").unwrap();
        let mut table = OptionTable::new();
        table
            .add("ab", vec![entry(a, None), entry(b, None)], &registry)
            .unwrap();
        table.add("a", vec![entry(a, None)], &registry).unwrap();
        table.add("b", vec![entry(b, None)], &registry).unwrap();
        let mut engine = engine_for(&registry, &table);

        assert!(engine.next_solution());
        let first = engine.selected_options();
        assert!(engine.next_solution());
        let second = engine.selected_options();
        assert!(!engine.next_solution());

        // Option order is the tie-break, so [a b] comes first.
        assert_eq!(first, vec![0]);
        let mut second_sorted = second;
        second_sorted.sort_unstable();
        assert_eq!(second_sorted, vec![1, 2]);
    }

    #[test]
    fn test_exhaustion_is_idempotent() {
        let mut registry = ItemRegistry::new();
        let a = registry.declare_primary("a").unwrap();
        let mut table = OptionTable::new();
        table.add("a", vec![entry(a, None)], &registry).unwrap();
        let mut engine = engine_for(&registry, &table);

        assert!(engine.next_solution());
        assert!(!engine.next_solution());
        assert!(!engine.next_solution());
        assert!(!engine.next_solution());
    }

    #[test]
    fn test_uncovered_primary_yields_nothing() {
        let mut registry = ItemRegistry::new();
        let a = registry.declare_primary("a").unwrap();
        registry.declare_primary("never-covered").unwrap();
        let mut table = OptionTable::new();
        table.add("a", vec![entry(a, None)], &registry).unwrap();
        let mut engine = engine_for(&registry, &table);

        assert!(!engine.next_solution());
    }

    #[test]
    fn test_empty_problem_has_the_empty_solution() {
        let registry = ItemRegistry::new();
        let table = OptionTable::new();
        let mut engine = engine_for(&registry, &table);

        assert!(engine.next_solution());
        assert!(engine.selection().is_empty());
        assert!(!engine.next_solution());
    }

    #[test]
    fn test_color_conflict_never_selected_together() {
        let mut registry = ItemRegistry::new();
        let p = registry.declare_primary("p").unwrap();
        let q = registry.declare_primary("q").unwrap();
        let s = registry.declare_secondary("s", 0).unwrap();
        let mut table = OptionTable::new();
        table
            .add("p-red", vec![entry(p, None), entry(s, Some(1))], &registry)
            .unwrap();
        table
            .add("q-red", vec![entry(q, None), entry(s, Some(1))], &registry)
            .unwrap();
        table
            .add("q-blue", vec![entry(q, None), entry(s, Some(2))], &registry)
            .unwrap();
        let mut engine = engine_for(&registry, &table);

        // Only the agreeing pair survives.
        assert!(engine.next_solution());
        let mut options = engine.selected_options();
        options.sort_unstable();
        assert_eq!(options, vec![0, 1]);
        assert!(!engine.next_solution());
    }

    #[test]
    fn test_uncolored_coverage_is_exclusive() {
        let mut registry = ItemRegistry::new();
        let p = registry.declare_primary("p").unwrap();
        let q = registry.declare_primary("q").unwrap();
        let s = registry.declare_secondary("s", 0).unwrap();
        let mut table = OptionTable::new();
        // Both options take s without a color: they cover it outright and
        // can never appear together.
        table
            .add("p-s", vec![entry(p, None), entry(s, None)], &registry)
            .unwrap();
        table
            .add("q-s", vec![entry(q, None), entry(s, None)], &registry)
            .unwrap();
        let mut engine = engine_for(&registry, &table);

        assert!(!engine.next_solution());
    }

    #[test]
    fn test_secondary_item_may_stay_uncovered() {
        let mut registry = ItemRegistry::new();
        let p = registry.declare_primary("p").unwrap();
        registry.declare_secondary("s", 0).unwrap();
        let mut table = OptionTable::new();
        table.add("p", vec![entry(p, None)], &registry).unwrap();
        let mut engine = engine_for(&registry, &table);

        assert!(engine.next_solution());
        assert_eq!(engine.selected_options(), vec![0]);
        assert!(!engine.next_solution());
    }
}
