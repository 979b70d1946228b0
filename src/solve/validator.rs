//! Independent solution checking and brute-force cross-checks
//!
//! The validator replays a selection against the registry and option
//! table without any dancing-links machinery, so engine results can be
//! checked by an implementation that shares no code with the search.

use crate::model::{ColorId, ItemKind, ItemRegistry, OptionId, OptionTable};
use crate::solve::solution::Solution;
use itertools::Itertools;
use std::collections::HashMap;

/// Outcome of validating one solution.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub error: Option<String>,
}

/// Replays selections against the problem definition.
pub struct SolutionValidator<'a> {
    registry: &'a ItemRegistry,
    table: &'a OptionTable,
}

impl<'a> SolutionValidator<'a> {
    pub fn new(registry: &'a ItemRegistry, table: &'a OptionTable) -> Self {
        Self { registry, table }
    }

    /// Validate a reported solution.
    pub fn validate(&self, solution: &Solution) -> ValidationReport {
        self.validate_ids(&solution.option_ids())
    }

    /// Validate a raw selection of option ids.
    pub fn validate_ids(&self, selection: &[OptionId]) -> ValidationReport {
        match self.check(selection) {
            Ok(()) => ValidationReport {
                is_valid: true,
                error: None,
            },
            Err(message) => ValidationReport {
                is_valid: false,
                error: Some(message),
            },
        }
    }

    fn check(&self, selection: &[OptionId]) -> Result<(), String> {
        let mut primary_cover: HashMap<usize, usize> = HashMap::new();
        // Per secondary item: committed color (None = covered uncolored)
        // and how many options cover it.
        let mut secondary_cover: HashMap<usize, (Option<ColorId>, usize)> = HashMap::new();

        for (pos, &id) in selection.iter().enumerate() {
            if id >= self.table.len() {
                return Err(format!("selection references unknown option {id}"));
            }
            if selection[..pos].contains(&id) {
                return Err(format!(
                    "option '{}' is selected twice",
                    self.table.name(id)
                ));
            }
            for entry in &self.table.get(id).entries {
                match self.registry.get(entry.item).kind {
                    ItemKind::Primary => {
                        *primary_cover.entry(entry.item).or_insert(0) += 1;
                    }
                    ItemKind::Secondary => {
                        let slot = secondary_cover.entry(entry.item).or_insert((entry.color, 0));
                        if slot.1 > 0 && slot.0 != entry.color {
                            return Err(format!(
                                "item '{}' is covered with conflicting colors",
                                self.registry.name(entry.item)
                            ));
                        }
                        slot.1 += 1;
                    }
                }
            }
        }

        for (id, item) in self.registry.iter() {
            if item.kind != ItemKind::Primary {
                continue;
            }
            match primary_cover.get(&id).copied().unwrap_or(0) {
                1 => {}
                0 => return Err(format!("primary item '{}' is not covered", item.name)),
                n => {
                    return Err(format!(
                        "primary item '{}' is covered {n} times",
                        item.name
                    ))
                }
            }
        }

        // An uncolored cover of a secondary item claims it exclusively.
        for (&id, &(color, count)) in &secondary_cover {
            if color.is_none() && count > 1 {
                return Err(format!(
                    "item '{}' is covered uncolored by {count} options",
                    self.registry.name(id)
                ));
            }
        }

        Ok(())
    }
}

/// Enumerate every valid selection by checking all option subsets.
/// Only meant for small synthetic instances; panics beyond 25 options.
pub fn brute_force_solutions(registry: &ItemRegistry, table: &OptionTable) -> Vec<Vec<OptionId>> {
    assert!(
        table.len() <= 25,
        "brute force is limited to small instances"
    );
    let validator = SolutionValidator::new(registry, table);
    (0..table.len())
        .powerset()
        .filter(|subset| validator.validate_ids(subset).is_valid)
        .collect()
}
