//! Display and output formatting utilities

use crate::solve::Solution;
use itertools::Itertools;

/// Format solutions for console output.
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Format a single solution, one selected option per line.
    pub fn format_solution(index: usize, solution: &Solution) -> String {
        let mut output = String::new();
        output.push_str(&format!("=== Solution {} ===\n", index + 1));
        output.push_str(&format!("Options selected: {}\n", solution.len()));
        output.push_str(&solution.to_string());
        output
    }

    /// Format multiple solutions as a summary table.
    pub fn format_solution_summary(solutions: &[Solution]) -> String {
        let mut output = String::new();
        output.push_str("Solutions Summary:\n");
        output.push_str("# | Size | Options\n");
        output.push_str("--|------|--------\n");

        for (i, solution) in solutions.iter().enumerate() {
            output.push_str(&format!(
                "{} | {:4} | {}\n",
                i + 1,
                solution.len(),
                solution.option_names().iter().join(", ")
            ));
        }

        output
    }
}
