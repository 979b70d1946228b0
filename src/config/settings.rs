//! Configuration settings for the exact cover solver

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Variant profile of the engine. Both variants share the data model;
/// the colorless profile rejects any option that carries a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverMode {
    /// Plain exact cover: no colors anywhere.
    ExactCover,
    /// Exact cover with colors on secondary items.
    ExactCoverColors,
}

/// How to treat an option that names an item nobody declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplicitItems {
    /// Auto-register the item as primary on first use.
    Permissive,
    /// Reject the option with an unknown-item error.
    Strict,
}

/// Solver configuration, loadable from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    pub mode: SolverMode,
    /// Cap for [`crate::Solver::solve_all`]; `None` enumerates everything.
    pub max_solutions: Option<usize>,
    pub implicit_items: ImplicitItems,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            mode: SolverMode::ExactCoverColors,
            max_solutions: None,
            implicit_items: ImplicitItems::Permissive,
        }
    }
}

impl SolverConfig {
    /// Load settings from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: SolverConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save settings to a YAML file.
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings.
    pub fn validate(&self) -> Result<()> {
        if self.max_solutions == Some(0) {
            anyhow::bail!("max_solutions must be positive; omit it to enumerate everything");
        }
        Ok(())
    }
}
