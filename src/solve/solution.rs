//! Solution representation: an immutable copy of one complete cover

use crate::model::{ColorTable, ItemRegistry, OptionId, OptionTable};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One (item, optional color) cell of a selected option, resolved to names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionEntry {
    pub item: String,
    /// Display form of the color: its name when interned, its decimal
    /// value otherwise.
    pub color: Option<String>,
}

/// A selected option with its resolved entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub id: OptionId,
    pub name: String,
    pub entries: Vec<SolutionEntry>,
}

/// An immutable solution: the selected options in selection order.
///
/// Everything is copied out of the engine at the instant the cover is
/// found; the engine is free to backtrack right after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub options: Vec<SelectedOption>,
}

impl Solution {
    /// Resolve a selection stack into an owned solution.
    pub fn from_selection(
        selection: &[OptionId],
        table: &OptionTable,
        registry: &ItemRegistry,
        colors: &ColorTable,
    ) -> Self {
        let options = selection
            .iter()
            .map(|&id| {
                let def = table.get(id);
                let entries = def
                    .entries
                    .iter()
                    .map(|e| SolutionEntry {
                        item: registry.name(e.item).to_string(),
                        color: e.color.map(|c| colors.display(c)),
                    })
                    .collect();
                SelectedOption {
                    id,
                    name: def.name.clone(),
                    entries,
                }
            })
            .collect();
        Self { options }
    }

    /// Number of selected options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Selected option ids in selection order.
    pub fn option_ids(&self) -> Vec<OptionId> {
        self.options.iter().map(|o| o.id).collect()
    }

    /// Selected option ids in ascending order, for order-insensitive
    /// comparison of solutions.
    pub fn sorted_option_ids(&self) -> Vec<OptionId> {
        let mut ids = self.option_ids();
        ids.sort_unstable();
        ids
    }

    /// Selected option names in selection order.
    pub fn option_names(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.name.as_str()).collect()
    }

    /// Invoke `callback(item, option, color)` once per entry, outer loop in
    /// selection order, inner loop in item order within each option.
    pub fn for_each_entry<F>(&self, mut callback: F)
    where
        F: FnMut(&str, &str, Option<&str>),
    {
        for option in &self.options {
            for entry in &option.entries {
                callback(&entry.item, &option.name, entry.color.as_deref());
            }
        }
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize solution")
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for option in &self.options {
            write!(f, "{}:", option.name)?;
            for entry in &option.entries {
                match &entry.color {
                    Some(color) => write!(f, " {}:{}", entry.item, color)?,
                    None => write!(f, " {}", entry.item)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
