// Slot names in the `local_storage` tree. They are part of the persisted
// layout; renaming one orphans existing data.
pub const VOCABULARY: &str = "vocabulary";
pub const PRACTICE_STREAK: &str = "practiceStreak";
pub const LAST_PRACTICE_DATE: &str = "lastPracticeDate";

// `meta` tree
pub const SCHEMA_VERSION: &str = "_meta:version";
