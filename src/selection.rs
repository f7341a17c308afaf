use std::collections::HashSet;

use crate::document::GlyphId;

/// The set of currently selected glyphs.
///
/// Membership is the only state; any "selected" decoration a host draws is a
/// pure function of [`SelectionSet::contains`]. No ordering is guaranteed.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SelectionSet {
    ids: HashSet<GlyphId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the glyph if absent, remove it if present. Never errors.
    pub fn toggle(&mut self, id: GlyphId) {
        if !self.ids.insert(id) {
            self.ids.remove(&id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: GlyphId) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = GlyphId> + '_ {
        self.ids.iter().copied()
    }

    /// Snapshot the membership in a deterministic order, for capture at
    /// gesture start.
    pub fn captured(&self) -> Vec<GlyphId> {
        let mut ids: Vec<GlyphId> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}
