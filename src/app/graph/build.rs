use crate::lexicon::{Language, filter_entries, is_active};

use super::super::ViewModel;

impl ViewModel {
    /// Re-runs the search and hands the surviving entries to the layout.
    pub(in crate::app) fn rebuild_visible(&mut self) {
        let entries = self.lexicon.entries();
        self.visible = filter_entries(entries, &self.search);
        self.simulation.set_nodes(entries, &self.visible);

        if let Some(key) = &self.dragging
            && self.simulation.node_index(key).is_none()
        {
            self.simulation.end_drag(key);
            self.dragging = None;
        }
        if self.hovered.is_some_and(|index| !self.visible.contains(&index)) {
            self.hovered = None;
        }
        self.glossary_hovered = None;
        self.filter_dirty = false;
    }

    pub(in crate::app) fn entry_active(&self, index: usize) -> bool {
        self.lexicon
            .entries()
            .get(index)
            .is_some_and(|entry| is_active(entry, &self.selection))
    }

    pub(in crate::app) fn active_count(&self) -> usize {
        self.visible
            .iter()
            .filter(|&&index| self.entry_active(index))
            .count()
    }

    /// Active entries carrying a form for `language`.
    pub(in crate::app) fn language_count(&self, language: Language) -> usize {
        self.visible
            .iter()
            .filter_map(|&index| self.lexicon.entries().get(index))
            .filter(|entry| is_active(entry, &self.selection) && entry.form(language).is_some())
            .count()
    }
}
