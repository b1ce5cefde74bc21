use serde::Serialize;

use crate::vocab::store::VocabularyStore;
use crate::vocab::streak::display_label;
use crate::vocab::types::StreakState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabStats {
    pub total_words: usize,
    pub mastered_words: usize,
    pub bookmarked_words: usize,
    pub streak_count: u32,
    pub streak_label: String,
}

impl VocabStats {
    pub fn collect(store: &VocabularyStore, streak: Option<&StreakState>) -> Self {
        let streak_count = streak.map(|s| s.streak_count).unwrap_or(0);
        Self {
            total_words: store.len(),
            mastered_words: store.mastered_count(),
            bookmarked_words: store.bookmarked_count(),
            streak_count,
            streak_label: display_label(streak_count),
        }
    }
}
