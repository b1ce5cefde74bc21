use rand::seq::SliceRandom;
use rand::Rng;

use crate::constants::ALL_CATEGORIES;
use crate::vocab::types::WordEntry;

/// Flashcard deck derived from the store: store indices plus a browsing cursor.
#[derive(Debug, Clone)]
pub struct FilterView {
    category: String,
    indices: Vec<usize>,
    cursor: Option<usize>,
}

impl Default for FilterView {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            indices: Vec::new(),
            cursor: None,
        }
    }
}

impl FilterView {
    pub fn new(entries: &[WordEntry], category: &str) -> Self {
        let mut view = Self::default();
        view.recompute(entries, category);
        view
    }

    /// Selects the entries of `category` (or all of them for the "all"
    /// sentinel) in store order and resets the cursor.
    pub fn recompute(&mut self, entries: &[WordEntry], category: &str) {
        self.category = category.to_string();
        self.indices = entries
            .iter()
            .enumerate()
            .filter(|(_, e)| self.matches(e))
            .map(|(i, _)| i)
            .collect();
        self.reset_cursor();
    }

    /// Uniform shuffle of the view; the cursor goes back to the first card.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.indices.shuffle(rng);
        self.reset_cursor();
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Position of the cursor within the view, `None` when the view is empty.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Store index of the card under the cursor.
    pub fn current(&self) -> Option<usize> {
        self.cursor.map(|pos| self.indices[pos])
    }

    pub fn has_prev(&self) -> bool {
        matches!(self.cursor, Some(pos) if pos > 0)
    }

    pub fn has_next(&self) -> bool {
        matches!(self.cursor, Some(pos) if pos + 1 < self.indices.len())
    }

    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.cursor = self.cursor.map(|pos| pos + 1);
        true
    }

    pub fn prev(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.cursor = self.cursor.map(|pos| pos - 1);
        true
    }

    /// Puts the cursor on the given store entry if this view shows it.
    pub fn jump_to(&mut self, store_index: usize) -> bool {
        match self.indices.iter().position(|&i| i == store_index) {
            Some(pos) => {
                self.cursor = Some(pos);
                true
            }
            None => false,
        }
    }

    /// A new entry was appended to the store at `store_index`.
    pub fn entry_added(&mut self, entries: &[WordEntry], store_index: usize) {
        if entries.get(store_index).is_some_and(|e| self.matches(e)) {
            self.indices.push(store_index);
            if self.cursor.is_none() {
                self.cursor = Some(0);
            }
        }
    }

    /// The entry at `store_index` changed; its membership may have changed
    /// with its category.
    pub fn entry_updated(&mut self, entries: &[WordEntry], store_index: usize) {
        let visible = entries.get(store_index).is_some_and(|e| self.matches(e));
        let position = self.indices.iter().position(|&i| i == store_index);
        match (visible, position) {
            (true, None) => self.entry_added(entries, store_index),
            (false, Some(pos)) => self.drop_position(pos),
            _ => {}
        }
    }

    /// The store entry at `store_index` was removed. Later indices shift down
    /// by one and the cursor is clamped into the shrunken view.
    pub fn entry_removed(&mut self, store_index: usize) {
        if let Some(pos) = self.indices.iter().position(|&i| i == store_index) {
            self.drop_position(pos);
        }
        for idx in self.indices.iter_mut() {
            if *idx > store_index {
                *idx -= 1;
            }
        }
    }

    fn drop_position(&mut self, pos: usize) {
        self.indices.remove(pos);
        self.cursor = match self.cursor {
            _ if self.indices.is_empty() => None,
            Some(cur) if cur > pos => Some(cur - 1),
            Some(cur) => Some(cur.min(self.indices.len() - 1)),
            None => Some(0),
        };
    }

    fn reset_cursor(&mut self) {
        self.cursor = if self.indices.is_empty() { None } else { Some(0) };
    }

    fn matches(&self, entry: &WordEntry) -> bool {
        self.category == ALL_CATEGORIES || entry.category == self.category
    }
}
