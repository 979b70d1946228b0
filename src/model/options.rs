//! Option table: named, ordered, append-only candidate subsets

use crate::error::XccError;
use crate::model::colors::{ColorId, MAX_COLOR};
use crate::model::items::{ItemId, ItemRegistry};
use serde::{Deserialize, Serialize};

/// Index of an option in the table, in append order.
pub type OptionId = usize;

/// One (item, optional color) cell of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEntry {
    pub item: ItemId,
    pub color: Option<ColorId>,
}

/// A named option: the unit of selection during search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionDef {
    pub name: String,
    pub entries: Vec<OptionEntry>,
}

/// Append-only store of options. Insertion order is the tie-break the search
/// uses when several options cover the chosen item, which keeps enumeration
/// deterministic for a given construction order.
#[derive(Debug, Default, Clone)]
pub struct OptionTable {
    options: Vec<OptionDef>,
}

impl OptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an option after validating it against the registry.
    ///
    /// Rejects empty options, repeated items within the option, unknown
    /// item handles, colors on primary items and colors outside a declared
    /// domain or above [`MAX_COLOR`].
    pub fn add(
        &mut self,
        name: &str,
        entries: Vec<OptionEntry>,
        registry: &ItemRegistry,
    ) -> Result<OptionId, XccError> {
        if entries.is_empty() {
            return Err(XccError::EmptyOption(name.to_string()));
        }
        for (pos, entry) in entries.iter().enumerate() {
            let Some(item) = registry.try_get(entry.item) else {
                return Err(XccError::UnknownItem {
                    option: name.to_string(),
                    item: format!("#{}", entry.item),
                });
            };
            if entries[..pos].iter().any(|e| e.item == entry.item) {
                return Err(XccError::DuplicateItemInOption {
                    option: name.to_string(),
                    item: item.name.clone(),
                });
            }
            if let Some(color) = entry.color {
                if item.is_primary() {
                    return Err(XccError::ColorOnPrimaryItem {
                        option: name.to_string(),
                        item: item.name.clone(),
                    });
                }
                if color > MAX_COLOR {
                    return Err(XccError::ColorOutOfRange {
                        option: name.to_string(),
                        item: item.name.clone(),
                        color,
                    });
                }
                if item.color_domain > 0 && (color == 0 || color > item.color_domain) {
                    return Err(XccError::ColorDomainViolation {
                        item: item.name.clone(),
                        color,
                        domain: item.color_domain,
                    });
                }
            }
        }
        let id = self.options.len();
        self.options.push(OptionDef {
            name: name.to_string(),
            entries,
        });
        Ok(id)
    }

    pub fn get(&self, id: OptionId) -> &OptionDef {
        &self.options[id]
    }

    pub fn name(&self, id: OptionId) -> &str {
        &self.options[id].name
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Total number of (item, color) cells across all options.
    pub fn entry_count(&self) -> usize {
        self.options.iter().map(|o| o.entries.len()).sum()
    }

    /// Iterate options in append order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionId, &OptionDef)> {
        self.options.iter().enumerate()
    }

    /// Whether any option carries a color.
    pub fn has_colors(&self) -> bool {
        self.options
            .iter()
            .any(|o| o.entries.iter().any(|e| e.color.is_some()))
    }
}
