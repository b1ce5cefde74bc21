/// Category filter value meaning "every category".
pub const ALL_CATEGORIES: &str = "all";

/// Category that words fall back to when their category is deleted. Literal
/// value; the category does not need to exist beforehand.
pub const FALLBACK_CATEGORY: &str = "basics";

/// Default local storage quota in bytes, the usual browser localStorage limit.
pub const DEFAULT_STORAGE_QUOTA_BYTES: usize = 5 * 1_024 * 1_024;

/// Largest seed word list accepted, from a file or a download.
pub const MAX_SEED_BYTES: usize = 10 * 1_024 * 1_024;

/// Seed download timeout in seconds.
pub const DEFAULT_SEED_TIMEOUT_SECS: u64 = 30;

/// Practice date format written by older versions, e.g. "Mon Jan 01 2024".
pub const LEGACY_DATE_FORMAT: &str = "%a %b %d %Y";
