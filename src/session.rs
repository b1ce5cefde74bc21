use chrono::NaiveDate;
use rand::Rng;

use crate::constants::ALL_CATEGORIES;
use crate::error::VocabError;
use crate::store::{Store, StoreError};
use crate::vocab::streak::check_in;
use crate::vocab::{
    EntryPatch, FilterView, NewWordEntry, SearchView, StreakState, VocabStats, VocabularyStore,
    WordEntry,
};

/// How the persisted state looked when the session started.
#[derive(Debug)]
pub enum LoadStatus {
    /// A saved word list was found.
    Restored,
    /// Nothing was saved yet; the session may be seeded.
    Fresh,
    /// Saved data could not be read. The session starts empty.
    Corrupt(StoreError),
}

/// Single controller for one study session: owns the word list, the
/// persistence handle and the derived views.
///
/// Every mutating call persists before returning. When persisting fails the
/// in-memory change is kept and `VocabError::Storage` is returned, so callers
/// can warn that the change may not survive a restart.
#[derive(Debug)]
pub struct StudySession {
    vocab: VocabularyStore,
    store: Store,
    streak: Option<StreakState>,
    filter: FilterView,
    search: SearchView,
    fresh: bool,
    /// False while the in-memory word list stands in for one that was never
    /// saved or could not be read. Only the streak slots are written until a
    /// seed or an edit replaces it.
    owns_vocabulary: bool,
}

impl StudySession {
    /// Loads the word list and the streak independently, so an unreadable
    /// streak never costs the user a good word list.
    pub fn load(store: Store) -> (Self, LoadStatus) {
        let streak = match store.load_streak() {
            Ok(streak) => streak,
            Err(e) => {
                tracing::warn!(error = %e, "Saved practice streak unreadable, starting a new one");
                None
            }
        };

        let (entries, status) = match store.load_entries() {
            Ok(Some(entries)) => {
                tracing::info!(entries = entries.len(), "Restored saved vocabulary");
                (entries, LoadStatus::Restored)
            }
            Ok(None) => (Vec::new(), LoadStatus::Fresh),
            Err(e) => {
                tracing::error!(error = %e, "Saved vocabulary unreadable, starting with an empty store");
                (Vec::new(), LoadStatus::Corrupt(e))
            }
        };

        let vocab = VocabularyStore::new(entries);
        let filter = FilterView::new(vocab.entries(), ALL_CATEGORIES);
        let search = SearchView::new(vocab.entries(), "");
        let session = Self {
            fresh: matches!(status, LoadStatus::Fresh),
            owns_vocabulary: matches!(status, LoadStatus::Restored),
            vocab,
            store,
            streak,
            filter,
            search,
        };
        (session, status)
    }

    /// True until the first word list is saved in a session that started
    /// without one.
    pub fn needs_seed(&self) -> bool {
        self.fresh
    }

    /// Replaces the empty word list of a fresh session with the initial data.
    /// Does nothing once a word list exists.
    pub fn seed(&mut self, entries: Vec<WordEntry>) -> Result<usize, VocabError> {
        if !self.fresh {
            tracing::debug!("Saved vocabulary present, seed ignored");
            return Ok(0);
        }
        let count = entries.len();
        self.vocab = VocabularyStore::new(entries);
        self.fresh = false;
        self.owns_vocabulary = true;
        self.filter.recompute(self.vocab.entries(), ALL_CATEGORIES);
        self.refresh_search();
        tracing::info!(entries = count, "Seeded vocabulary");
        self.persist()?;
        Ok(count)
    }

    pub fn add(&mut self, entry: NewWordEntry) -> Result<usize, VocabError> {
        let index = self.vocab.add(entry)?;
        self.fresh = false;
        self.owns_vocabulary = true;
        self.filter.entry_added(self.vocab.entries(), index);
        self.refresh_search();
        tracing::info!(index, "Word added");
        self.persist()?;
        Ok(index)
    }

    pub fn update(&mut self, index: usize, patch: &EntryPatch) -> Result<(), VocabError> {
        self.vocab.update(index, patch)?;
        self.owns_vocabulary = true;
        self.filter.entry_updated(self.vocab.entries(), index);
        self.refresh_search();
        tracing::info!(index, "Word updated");
        self.persist()
    }

    pub fn remove(&mut self, index: usize) -> Result<WordEntry, VocabError> {
        let removed = self.vocab.remove(index)?;
        self.owns_vocabulary = true;
        self.filter.entry_removed(index);
        self.refresh_search();
        tracing::info!(index, english = %removed.english, "Word removed");
        self.persist()?;
        Ok(removed)
    }

    pub fn toggle_mastered(&mut self, index: usize) -> Result<bool, VocabError> {
        let mastered = self.vocab.toggle_mastered(index)?;
        self.owns_vocabulary = true;
        tracing::debug!(index, mastered, "Mastered toggled");
        self.persist()?;
        Ok(mastered)
    }

    pub fn toggle_bookmarked(&mut self, index: usize) -> Result<bool, VocabError> {
        let bookmarked = self.vocab.toggle_bookmarked(index)?;
        self.owns_vocabulary = true;
        tracing::debug!(index, bookmarked, "Bookmark toggled");
        self.persist()?;
        Ok(bookmarked)
    }

    /// Bookmarks or un-bookmarks the card under the flashcard cursor.
    pub fn toggle_current_bookmark(&mut self) -> Result<bool, VocabError> {
        match self.filter.current() {
            Some(index) => self.toggle_bookmarked(index),
            None => Err(VocabError::NoCurrentCard),
        }
    }

    pub fn add_category(&mut self, name: &str) -> Result<bool, VocabError> {
        self.vocab.add_category(name)
    }

    /// Moves the category's words to the fallback category. A deck filtered
    /// on the deleted category switches back to all categories.
    pub fn delete_category(&mut self, name: &str) -> Result<usize, VocabError> {
        let moved = self.vocab.delete_category(name);
        if moved > 0 {
            self.owns_vocabulary = true;
        }
        let selected = if self.filter.category() == name {
            ALL_CATEGORIES.to_string()
        } else {
            self.filter.category().to_string()
        };
        self.filter.recompute(self.vocab.entries(), &selected);
        self.refresh_search();
        tracing::info!(category = name, moved, "Category deleted");
        self.persist()?;
        Ok(moved)
    }

    pub fn set_category(&mut self, category: &str) {
        self.filter.recompute(self.vocab.entries(), category);
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.search.recompute(self.vocab.entries(), query);
    }

    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.filter.shuffle(rng);
    }

    pub fn next_card(&mut self) -> bool {
        self.filter.next()
    }

    pub fn prev_card(&mut self) -> bool {
        self.filter.prev()
    }

    /// Opens the given word in the flashcard deck if the current filter shows it.
    pub fn jump_to(&mut self, index: usize) -> bool {
        self.filter.jump_to(index)
    }

    /// Records practice for `today` and persists the streak when it changed.
    pub fn check_in_today(&mut self, today: NaiveDate) -> Result<StreakState, VocabError> {
        let next = check_in(self.streak, today);
        if self.streak != Some(next) {
            tracing::info!(
                streak = next.streak_count,
                date = %next.last_practiced_date,
                "Practice streak updated"
            );
            self.streak = Some(next);
            self.persist()?;
        }
        Ok(next)
    }

    pub fn entries(&self) -> &[WordEntry] {
        self.vocab.entries()
    }

    pub fn entry(&self, index: usize) -> Option<&WordEntry> {
        self.vocab.get(index)
    }

    pub fn current_entry(&self) -> Option<(usize, &WordEntry)> {
        let index = self.filter.current()?;
        self.vocab.get(index).map(|e| (index, e))
    }

    pub fn filter(&self) -> &FilterView {
        &self.filter
    }

    pub fn search(&self) -> &SearchView {
        &self.search
    }

    pub fn categories(&self) -> Vec<String> {
        self.vocab.categories()
    }

    pub fn streak(&self) -> Option<&StreakState> {
        self.streak.as_ref()
    }

    pub fn stats(&self) -> VocabStats {
        VocabStats::collect(&self.vocab, self.streak.as_ref())
    }

    /// Hands the persistence handle back, e.g. to flush on shutdown.
    pub fn into_store(self) -> Store {
        self.store
    }

    fn refresh_search(&mut self) {
        let query = self.search.query().to_string();
        self.search.recompute(self.vocab.entries(), &query);
    }

    fn persist(&self) -> Result<(), VocabError> {
        let result = if self.owns_vocabulary {
            self.store.save_snapshot(self.vocab.entries(), self.streak.as_ref())
        } else {
            self.store.save_streak(self.streak.as_ref())
        };
        result.map_err(|e| {
            tracing::error!(error = %e, "Failed to persist vocabulary; in-memory state kept");
            VocabError::Storage(e)
        })
    }
}
