use crate::constants::FALLBACK_CATEGORY;
use crate::error::VocabError;
use crate::validation::{normalize_category, validate_required_fields};
use crate::vocab::types::{EntryPatch, NewWordEntry, WordEntry};

/// Authoritative in-memory word list for one session.
///
/// Entries are addressed by position. Views derived from the store keep only
/// indices and must be told about removals (see `FilterView::entry_removed`).
#[derive(Debug, Clone, Default)]
pub struct VocabularyStore {
    entries: Vec<WordEntry>,
    /// Categories created by the user that no entry uses yet.
    extra_categories: Vec<String>,
}

impl VocabularyStore {
    pub fn new(entries: Vec<WordEntry>) -> Self {
        Self {
            entries,
            extra_categories: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&WordEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a new entry and returns its index. The category is stored
    /// lowercased, the same form `add_category` uses.
    pub fn add(&mut self, new_entry: NewWordEntry) -> Result<usize, VocabError> {
        validate_required_fields(&new_entry.english, &new_entry.thai, &new_entry.category)
            .map_err(VocabError::validation)?;

        let mut entry = new_entry.into_entry();
        entry.category = normalize_category(&entry.category).map_err(VocabError::validation)?;
        self.extra_categories.retain(|c| *c != entry.category);
        self.entries.push(entry);
        Ok(self.entries.len() - 1)
    }

    pub fn update(&mut self, index: usize, patch: &EntryPatch) -> Result<&WordEntry, VocabError> {
        let current = self.entry_at(index)?;
        let mut merged = patch.merged(current);
        validate_required_fields(&merged.english, &merged.thai, &merged.category)
            .map_err(VocabError::validation)?;
        if patch.category.is_some() {
            merged.category = normalize_category(&merged.category).map_err(VocabError::validation)?;
        }

        self.extra_categories.retain(|c| *c != merged.category);
        self.entries[index] = merged;
        Ok(&self.entries[index])
    }

    pub fn remove(&mut self, index: usize) -> Result<WordEntry, VocabError> {
        self.entry_at(index)?;
        Ok(self.entries.remove(index))
    }

    /// Flips `mastered` and returns the new value.
    pub fn toggle_mastered(&mut self, index: usize) -> Result<bool, VocabError> {
        let entry = self.entry_at_mut(index)?;
        entry.mastered = !entry.mastered;
        Ok(entry.mastered)
    }

    /// Flips `bookmarked` and returns the new value.
    pub fn toggle_bookmarked(&mut self, index: usize) -> Result<bool, VocabError> {
        let entry = self.entry_at_mut(index)?;
        entry.bookmarked = !entry.bookmarked;
        Ok(entry.bookmarked)
    }

    /// Moves every entry in `old_category` to `new_category` and returns how
    /// many entries changed.
    pub fn reassign_category(&mut self, old_category: &str, new_category: &str) -> usize {
        let mut changed = 0;
        for entry in self.entries.iter_mut().filter(|e| e.category == old_category) {
            entry.category = new_category.to_string();
            changed += 1;
        }
        changed
    }

    /// Selectable categories: those in use, in first-appearance order, then
    /// user-created ones not yet used by any entry.
    pub fn categories(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for entry in &self.entries {
            if !out.contains(&entry.category) {
                out.push(entry.category.clone());
            }
        }
        for extra in &self.extra_categories {
            if !out.contains(extra) {
                out.push(extra.clone());
            }
        }
        out
    }

    /// Registers a new empty category. Returns `false` when it already exists.
    pub fn add_category(&mut self, name: &str) -> Result<bool, VocabError> {
        let category = normalize_category(name).map_err(VocabError::validation)?;
        if self.categories().contains(&category) {
            return Ok(false);
        }
        self.extra_categories.push(category);
        Ok(true)
    }

    /// Drops a category: its entries fall back to the literal default category
    /// and the name disappears from the selectable set. Returns the number of
    /// reassigned entries.
    pub fn delete_category(&mut self, name: &str) -> usize {
        self.extra_categories.retain(|c| c != name);
        self.reassign_category(name, FALLBACK_CATEGORY)
    }

    pub fn mastered_count(&self) -> usize {
        self.entries.iter().filter(|e| e.mastered).count()
    }

    pub fn bookmarked_count(&self) -> usize {
        self.entries.iter().filter(|e| e.bookmarked).count()
    }

    fn entry_at(&self, index: usize) -> Result<&WordEntry, VocabError> {
        let len = self.entries.len();
        self.entries.get(index).ok_or(VocabError::Index { index, len })
    }

    fn entry_at_mut(&mut self, index: usize) -> Result<&mut WordEntry, VocabError> {
        let len = self.entries.len();
        self.entries
            .get_mut(index)
            .ok_or(VocabError::Index { index, len })
    }
}
