// SPDX-License-Identifier: MIT OR Apache-2.0
//! Texture slot assignment for external image resources.

use indexmap::IndexMap;

/// Key standing in for "no image". Not a path any real file would have.
pub const EMPTY_SLOT_KEY: &str =
    "ThisIsABigUniqueStringThatIReallyHopeWontOverlapAnyRealFilePaths-IThinkMyOddsArePrettyGood";

/// Assigns small, stable, 1-based integers to image paths in first-seen order
///
/// Scoped to a single serialization pass.
#[derive(Debug, Clone, Default)]
pub struct TextureSlotTable {
    slots: IndexMap<String, u32>,
}

impl TextureSlotTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot for a path, assigning the next free one on first sight
    pub fn slot_for(&mut self, path: &str) -> u32 {
        if let Some(slot) = self.slots.get(path) {
            return *slot;
        }
        let slot = self.next_slot();
        self.slots.insert(path.to_string(), slot);
        slot
    }

    /// Slot shared by every texture node without an image
    pub fn empty_slot(&mut self) -> u32 {
        self.slot_for(EMPTY_SLOT_KEY)
    }

    /// Number of assigned slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slot has been assigned yet
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Assigned keys and their slots, in assignment order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.slots.iter().map(|(path, slot)| (path.as_str(), *slot))
    }

    fn next_slot(&self) -> u32 {
        // Slots are never removed, so the count is the last assigned slot.
        u32::try_from(self.slots.len()).map_or(u32::MAX, |n| n.saturating_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_for_is_idempotent() {
        let mut table = TextureSlotTable::new();
        assert_eq!(table.slot_for("//wood.png"), 1);
        assert_eq!(table.slot_for("//wood.png"), 1);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_distinct_paths_in_first_seen_order() {
        let mut table = TextureSlotTable::new();
        assert_eq!(table.slot_for("//b.png"), 1);
        assert_eq!(table.slot_for("//a.png"), 2);
        assert_eq!(table.slot_for("//b.png"), 1);
        assert_eq!(table.slot_for("//c.png"), 3);

        let order: Vec<_> = table.iter().collect();
        assert_eq!(order, [("//b.png", 1), ("//a.png", 2), ("//c.png", 3)]);
    }

    #[test]
    fn test_empty_slot_is_stable() {
        let mut table = TextureSlotTable::new();
        assert_eq!(table.slot_for("//a.png"), 1);
        let empty = table.empty_slot();
        assert_eq!(empty, 2);
        assert_eq!(table.slot_for("//b.png"), 3);
        assert_eq!(table.empty_slot(), empty);
        assert_eq!(table.slot_for(EMPTY_SLOT_KEY), empty);
    }
}
