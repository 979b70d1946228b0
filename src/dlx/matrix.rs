//! Cover matrix: doubly linked item/option structure over index arrays
//!
//! The layout is the classic dancing-links arrangement, expressed with
//! `Vec` indices instead of pointers. Active items form two horizontal
//! rings (primary through header 0, secondary through header `n + 1`),
//! and every item owns a circular vertical list of the option nodes that
//! cover it. Option rows are laid out consecutively, separated by spacer
//! nodes whose `top` holds the negated option number.

use crate::model::{ItemId, ItemRegistry, OptionId, OptionTable};
use std::fmt::Write as _;

/// Live search structure derived from an [`ItemRegistry`] and an
/// [`OptionTable`]. Built once per solve cycle; mutated by cover/uncover
/// walks and restored exactly on backtrack.
#[derive(Debug, Clone)]
pub struct CoverMatrix {
    /// Number of primary items (matrix slots `1..=primary_count`).
    pub(crate) primary_count: usize,
    /// Total number of items (slots `1..=item_count`).
    pub(crate) item_count: usize,
    pub(crate) option_count: usize,

    // Horizontal ring over active item headers.
    pub(crate) llink: Vec<usize>,
    pub(crate) rlink: Vec<usize>,

    // Vertical lists: headers 0..=item_count, then spacers and option nodes.
    pub(crate) ulink: Vec<usize>,
    pub(crate) dlink: Vec<usize>,
    /// Item slot of a node; `<= 0` marks a spacer (negated option number).
    pub(crate) top: Vec<i32>,
    /// Number of active options covering each item slot.
    pub(crate) len: Vec<usize>,
    /// Node colors: 0 uncolored, > 0 a color id, -1 purified in place.
    /// On an item header this holds the currently committed color.
    pub(crate) color: Vec<i32>,

    // Slot permutation: primaries first, then secondaries, each in
    // registration order.
    slot_of: Vec<usize>,
    item_of: Vec<ItemId>,
}

impl CoverMatrix {
    /// Build the matrix for the given problem.
    pub fn build(registry: &ItemRegistry, table: &OptionTable) -> Self {
        let primaries = registry.primary_ids();
        let secondaries = registry.secondary_ids();
        let n1 = primaries.len();
        let n = n1 + secondaries.len();

        let mut slot_of = vec![0usize; registry.len()];
        let mut item_of = vec![0 as ItemId; n + 1];
        for (pos, &id) in primaries.iter().chain(secondaries.iter()).enumerate() {
            slot_of[id] = pos + 1;
            item_of[pos + 1] = id;
        }

        // Two header rings: primaries through 0, secondaries through n + 1.
        let mut llink = vec![0usize; n + 2];
        let mut rlink = vec![0usize; n + 2];
        let mut prev = 0;
        for slot in 1..=n1 {
            llink[slot] = prev;
            rlink[prev] = slot;
            prev = slot;
        }
        rlink[prev] = 0;
        llink[0] = prev;
        prev = n + 1;
        for slot in n1 + 1..=n {
            llink[slot] = prev;
            rlink[prev] = slot;
            prev = slot;
        }
        rlink[prev] = n + 1;
        llink[n + 1] = prev;

        // Node region: headers 0..=n, first spacer at n + 1, then one row
        // per option followed by its trailing spacer.
        let size = n + 2 + table.entry_count() + table.len();
        let mut ulink = vec![0usize; size];
        let mut dlink = vec![0usize; size];
        let mut top = vec![0i32; size];
        let mut color = vec![0i32; size];
        let mut len = vec![0usize; n + 2];
        for slot in 0..=n {
            ulink[slot] = slot;
            dlink[slot] = slot;
        }

        let mut spacer = n + 1;
        for (id, option) in table.iter() {
            let mut width = 0;
            for entry in &option.entries {
                width += 1;
                let node = spacer + width;
                let slot = slot_of[entry.item];
                let above = ulink[slot];
                ulink[node] = above;
                dlink[above] = node;
                dlink[node] = slot;
                ulink[slot] = node;
                top[node] = slot as i32;
                // Colors are capped at i32::MAX when options are added, so
                // the cast cannot collide with the negative purified marker.
                color[node] = entry.color.unwrap_or(0) as i32;
                len[slot] += 1;
            }
            dlink[spacer] = spacer + width;
            let next = spacer + width + 1;
            top[next] = -((id + 1) as i32);
            ulink[next] = spacer + 1;
            spacer = next;
        }
        dlink[spacer] = 0;

        Self {
            primary_count: n1,
            item_count: n,
            option_count: table.len(),
            llink,
            rlink,
            ulink,
            dlink,
            top,
            len,
            color,
            slot_of,
            item_of,
        }
    }

    /// Matrix slot of a registered item.
    pub fn slot_of(&self, item: ItemId) -> usize {
        self.slot_of[item]
    }

    /// Registered item sitting at a matrix slot.
    pub fn item_at(&self, slot: usize) -> ItemId {
        self.item_of[slot]
    }

    /// True while no selected option covers the item.
    pub fn is_active(&self, item: ItemId) -> bool {
        let slot = self.slot_of[item];
        self.rlink[self.llink[slot]] == slot
    }

    /// Option owning a node, found by walking right to the row's spacer.
    pub fn option_of_node(&self, node: usize) -> OptionId {
        let mut r = node;
        while self.top[r] > 0 {
            r += 1;
        }
        (-self.top[r]) as OptionId - 1
    }

    /// Color currently committed on a secondary item, if any.
    pub fn committed_color(&self, item: ItemId) -> Option<u32> {
        let c = self.color[self.slot_of[item]];
        (c > 0).then_some(c as u32)
    }

    /// Active primary item with the fewest covering options; ties go to the
    /// earliest registered item. Must not be called when the primary ring
    /// is empty.
    pub(crate) fn choose_mrv(&self) -> usize {
        let mut best = self.rlink[0];
        let mut best_len = usize::MAX;
        let mut slot = self.rlink[0];
        while slot != 0 {
            if self.len[slot] < best_len {
                best_len = self.len[slot];
                best = slot;
                if best_len == 0 {
                    break;
                }
            }
            slot = self.rlink[slot];
        }
        best
    }

    /// Remove an item from its ring and hide every row that covers it.
    pub(crate) fn cover(&mut self, i: usize) {
        let mut p = self.dlink[i];
        while p != i {
            self.hide(p);
            p = self.dlink[p];
        }
        let (l, r) = (self.llink[i], self.rlink[i]);
        self.rlink[l] = r;
        self.llink[r] = l;
    }

    /// Exact inverse of [`Self::cover`].
    pub(crate) fn uncover(&mut self, i: usize) {
        let (l, r) = (self.llink[i], self.rlink[i]);
        self.rlink[l] = i;
        self.llink[r] = i;
        let mut p = self.ulink[i];
        while p != i {
            self.unhide(p);
            p = self.ulink[p];
        }
    }

    /// Unlink the other nodes of a row from their vertical lists. Nodes
    /// purified in place (`color < 0`) are left alone.
    fn hide(&mut self, p: usize) {
        let mut q = p + 1;
        while q != p {
            let x = self.top[q];
            if x <= 0 {
                q = self.ulink[q];
            } else if self.color[q] < 0 {
                q += 1;
            } else {
                let (u, d) = (self.ulink[q], self.dlink[q]);
                self.dlink[u] = d;
                self.ulink[d] = u;
                self.len[x as usize] -= 1;
                q += 1;
            }
        }
    }

    /// Exact inverse of [`Self::hide`], walking the row backwards.
    fn unhide(&mut self, p: usize) {
        let mut q = p - 1;
        while q != p {
            let x = self.top[q];
            if x <= 0 {
                q = self.dlink[q];
            } else if self.color[q] < 0 {
                q -= 1;
            } else {
                let (u, d) = (self.ulink[q], self.dlink[q]);
                self.dlink[u] = q;
                self.ulink[d] = q;
                self.len[x as usize] += 1;
                q -= 1;
            }
        }
    }

    /// Apply the covering duty of node `p` (item slot `j`) when its row is
    /// selected: uncolored nodes cover the item outright, colored nodes
    /// purify it to their color. A node already purified needs nothing.
    pub(crate) fn commit(&mut self, p: usize, j: usize) {
        let c = self.color[p];
        if c == 0 {
            self.cover(j);
        } else if c > 0 {
            self.purify(p);
        }
    }

    /// Exact inverse of [`Self::commit`].
    pub(crate) fn uncommit(&mut self, p: usize, j: usize) {
        let c = self.color[p];
        if c == 0 {
            self.uncover(j);
        } else if c > 0 {
            self.unpurify(p);
        }
    }

    /// Commit item `top[p]` to the color of node `p`: rows agreeing on the
    /// color are tagged purified and stay selectable, conflicting rows
    /// (including uncolored ones) are hidden. The walk starts at the item
    /// header so rows added before `p`'s row are handled too.
    fn purify(&mut self, p: usize) {
        let c = self.color[p];
        let i = self.top[p] as usize;
        self.color[i] = c;
        let mut q = self.dlink[i];
        while q != i {
            if self.color[q] == c {
                if q != p {
                    self.color[q] = -1;
                }
            } else {
                self.hide(q);
            }
            q = self.dlink[q];
        }
    }

    /// Exact inverse of [`Self::purify`], walking upwards.
    fn unpurify(&mut self, p: usize) {
        let c = self.color[p];
        let i = self.top[p] as usize;
        let mut q = self.ulink[i];
        while q != i {
            if self.color[q] < 0 {
                self.color[q] = c;
            } else if q != p {
                self.unhide(q);
            }
            q = self.ulink[q];
        }
        self.color[i] = 0;
    }

    /// Render headers and node arrays, one line each, for debugging.
    pub fn dump(&self, registry: &ItemRegistry) -> String {
        let mut out = String::new();
        for slot in 0..self.llink.len() {
            let name = match slot {
                0 => "<primary>",
                s if s == self.item_count + 1 => "<secondary>",
                s => registry.name(self.item_of[s]),
            };
            let _ = writeln!(
                out,
                "slot:{slot}\tname:{name}\tllink:{}\trlink:{}\tlen:{}",
                self.llink[slot], self.rlink[slot], self.len[slot]
            );
        }
        for node in 0..self.ulink.len() {
            let _ = writeln!(
                out,
                "node:{node}\ttop:{}\tulink:{}\tdlink:{}\tcolor:{}",
                self.top[node], self.ulink[node], self.dlink[node], self.color[node]
            );
        }
        out
    }
}
