use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One vocabulary record. Field names match the persisted JSON layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub english: String,
    #[serde(default)]
    pub pronunciation: String,
    pub thai: String,
    #[serde(default)]
    pub thai_pronunciation: String,
    pub category: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub thai_example: String,
    #[serde(default)]
    pub mastered: bool,
    #[serde(default)]
    pub bookmarked: bool,
}

/// User-supplied fields for a new entry. Flags are not accepted here; a new
/// entry always starts unmastered and unbookmarked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWordEntry {
    pub english: String,
    #[serde(default)]
    pub pronunciation: String,
    pub thai: String,
    #[serde(default)]
    pub thai_pronunciation: String,
    pub category: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub thai_example: String,
}

impl NewWordEntry {
    pub fn into_entry(self) -> WordEntry {
        WordEntry {
            english: self.english.trim().to_string(),
            pronunciation: self.pronunciation.trim().to_string(),
            thai: self.thai.trim().to_string(),
            thai_pronunciation: self.thai_pronunciation.trim().to_string(),
            category: self.category.trim().to_string(),
            example: self.example.trim().to_string(),
            thai_example: self.thai_example.trim().to_string(),
            mastered: false,
            bookmarked: false,
        }
    }
}

/// Partial edit. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPatch {
    pub english: Option<String>,
    pub pronunciation: Option<String>,
    pub thai: Option<String>,
    pub thai_pronunciation: Option<String>,
    pub category: Option<String>,
    pub example: Option<String>,
    pub thai_example: Option<String>,
    pub mastered: Option<bool>,
    pub bookmarked: Option<bool>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns the entry that results from applying this patch, leaving
    /// `entry` untouched so callers can validate before committing.
    pub fn merged(&self, entry: &WordEntry) -> WordEntry {
        fn pick(patch: &Option<String>, current: &str) -> String {
            match patch {
                Some(value) => value.trim().to_string(),
                None => current.to_string(),
            }
        }

        WordEntry {
            english: pick(&self.english, &entry.english),
            pronunciation: pick(&self.pronunciation, &entry.pronunciation),
            thai: pick(&self.thai, &entry.thai),
            thai_pronunciation: pick(&self.thai_pronunciation, &entry.thai_pronunciation),
            category: pick(&self.category, &entry.category),
            example: pick(&self.example, &entry.example),
            thai_example: pick(&self.thai_example, &entry.thai_example),
            mastered: self.mastered.unwrap_or(entry.mastered),
            bookmarked: self.bookmarked.unwrap_or(entry.bookmarked),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    pub streak_count: u32,
    pub last_practiced_date: NaiveDate,
}
