pub mod filter;
pub mod search;
pub mod stats;
pub mod store;
pub mod streak;
pub mod types;

pub use filter::FilterView;
pub use search::SearchView;
pub use stats::VocabStats;
pub use store::VocabularyStore;
pub use types::{EntryPatch, NewWordEntry, StreakState, WordEntry};
