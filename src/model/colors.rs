//! Color interning: names mapped to dense nonzero ids

use std::collections::HashMap;

/// Dense color id. Zero is reserved for "uncolored" inside the cover matrix,
/// so real colors start at 1.
pub type ColorId = u32;

/// Largest usable color value. Matrix nodes store colors in an `i32` slot
/// shared with the negative purified marker, so larger values must be
/// rejected before they reach the matrix.
pub const MAX_COLOR: ColorId = i32::MAX as ColorId;

/// Interns color names into dense ids and maps them back for reporting.
///
/// Colors may also be supplied as raw numeric values without a name; the
/// table then simply has no name to report for them.
#[derive(Debug, Default, Clone)]
pub struct ColorTable {
    names: Vec<String>,
    by_name: HashMap<String, ColorId>,
}

impl ColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id of a named color, interning it on first use.
    pub fn intern(&mut self, name: &str) -> ColorId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        self.names.push(name.to_string());
        let id = self.names.len() as ColorId;
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Look up an already interned color.
    pub fn lookup(&self, name: &str) -> Option<ColorId> {
        self.by_name.get(name).copied()
    }

    /// Name of an interned color, if the id came from interning.
    pub fn name(&self, id: ColorId) -> Option<&str> {
        if id == 0 {
            return None;
        }
        self.names.get(id as usize - 1).map(String::as_str)
    }

    /// Displayable form of a color: its name when interned, its decimal
    /// value otherwise.
    pub fn display(&self, id: ColorId) -> String {
        match self.name(id) {
            Some(name) => name.to_string(),
            None => id.to_string(),
        }
    }

    /// Drop every color interned after the table had `len` entries. Used to
    /// undo interning done on behalf of an option that was then rejected.
    pub(crate) fn truncate(&mut self, len: usize) {
        for name in self.names.drain(len..) {
            self.by_name.remove(&name);
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
