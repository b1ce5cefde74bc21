use crate::vocab::types::WordEntry;

/// Table filter: one visibility flag per store entry, in store order.
#[derive(Debug, Clone, Default)]
pub struct SearchView {
    query: String,
    visible: Vec<bool>,
}

impl SearchView {
    pub fn new(entries: &[WordEntry], query: &str) -> Self {
        let mut view = Self::default();
        view.recompute(entries, query);
        view
    }

    pub fn recompute(&mut self, entries: &[WordEntry], query: &str) {
        self.query = query.to_string();
        let needle = query.to_lowercase();
        self.visible = entries.iter().map(|e| entry_matches(e, &needle)).collect();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Visibility flag for each store entry.
    pub fn flags(&self) -> &[bool] {
        &self.visible
    }

    pub fn is_visible(&self, store_index: usize) -> bool {
        self.visible.get(store_index).copied().unwrap_or(false)
    }

    /// Store indices of the visible rows.
    pub fn visible_indices(&self) -> Vec<usize> {
        self.visible
            .iter()
            .enumerate()
            .filter(|(_, shown)| **shown)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|shown| **shown).count()
    }
}

/// Matches against the English and Thai text only. `needle` must already be
/// lowercased.
fn entry_matches(entry: &WordEntry, needle: &str) -> bool {
    needle.is_empty()
        || entry.english.to_lowercase().contains(needle)
        || entry.thai.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(english: &str, thai: &str, pronunciation: &str) -> WordEntry {
        WordEntry {
            english: english.to_string(),
            pronunciation: pronunciation.to_string(),
            thai: thai.to_string(),
            thai_pronunciation: String::new(),
            category: "basics".to_string(),
            example: format!("{english} example"),
            thai_example: String::new(),
            mastered: false,
            bookmarked: false,
        }
    }

    fn sample() -> Vec<WordEntry> {
        vec![
            entry("Hello", "สวัสดี", "ha-'lō"),
            entry("Thank you", "ขอบคุณ", "thangk-yoo"),
            entry("Goodbye", "ลาก่อน", "good-bai"),
        ]
    }

    #[test]
    fn empty_query_shows_everything() {
        let view = SearchView::new(&sample(), "");
        assert_eq!(view.flags(), &[true, true, true]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let view = SearchView::new(&sample(), "HELLO");
        assert_eq!(view.visible_indices(), vec![0]);
    }

    #[test]
    fn thai_text_is_searched() {
        let view = SearchView::new(&sample(), "คุณ");
        assert_eq!(view.visible_indices(), vec![1]);
    }

    #[test]
    fn pronunciation_and_examples_are_ignored() {
        let view = SearchView::new(&sample(), "bai");
        assert_eq!(view.visible_count(), 0);
        let view = SearchView::new(&sample(), "example");
        assert_eq!(view.visible_count(), 0);
    }

    #[test]
    fn substring_matches_keep_store_order() {
        let view = SearchView::new(&sample(), "o");
        assert_eq!(view.visible_indices(), vec![0, 1, 2]);
        assert!(view.is_visible(2));
        assert!(!view.is_visible(3));
    }
}
