//! Error taxonomy for problem construction and solver lifecycle

use thiserror::Error;

/// Errors raised while declaring items, adding options or driving the solver
/// lifecycle. The search itself never fails; an unsolvable problem is
/// reported as exhaustion, not as an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum XccError {
    /// An item name was declared twice.
    #[error("item '{0}' is already declared")]
    DuplicateItem(String),

    /// An option was added without any items.
    #[error("option '{0}' has no items")]
    EmptyOption(String),

    /// An option references the same item more than once.
    #[error("option '{option}' references item '{item}' more than once")]
    DuplicateItemInOption { option: String, item: String },

    /// An option references an item that was never declared while implicit
    /// declaration is disabled.
    #[error("option '{option}' references undeclared item '{item}'")]
    UnknownItem { option: String, item: String },

    /// A color id falls outside the declared color domain of an item.
    #[error("color {color} is outside the domain of item '{item}' (1..={domain})")]
    ColorDomainViolation {
        item: String,
        color: u32,
        domain: u32,
    },

    /// A color value is too large for the matrix node representation.
    #[error("color {color} on item '{item}' in option '{option}' exceeds the supported maximum")]
    ColorOutOfRange {
        option: String,
        item: String,
        color: u32,
    },

    /// A color was attached to a primary item.
    #[error("option '{option}' assigns a color to primary item '{item}'")]
    ColorOnPrimaryItem { option: String, item: String },

    /// A color was supplied while the solver runs in plain exact-cover mode.
    #[error("option '{0}' carries a color, but the solver mode is colorless")]
    ColorNotAllowed(String),

    /// The registry or option table was mutated after solving started.
    #[error("cannot {0} once solving has started; call reset() first")]
    InvalidState(&'static str),
}
