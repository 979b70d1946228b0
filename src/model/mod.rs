//! Problem data model: items, colors and options

pub mod colors;
pub mod items;
pub mod options;

pub use colors::{ColorId, ColorTable};
pub use items::{Item, ItemId, ItemKind, ItemRegistry};
pub use options::{OptionDef, OptionEntry, OptionId, OptionTable};
