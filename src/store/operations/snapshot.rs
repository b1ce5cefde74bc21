use chrono::NaiveDate;
use sled::transaction::{ConflictableTransactionResult, TransactionError};

use crate::constants::LEGACY_DATE_FORMAT;
use crate::store::keys;
use crate::store::{Store, StoreError};
use crate::vocab::types::{StreakState, WordEntry};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_practice_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Accepts ISO dates and the legacy `"Mon Jan 01 2024"` form.
pub fn parse_practice_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(raw, LEGACY_DATE_FORMAT))
        .ok()
}

impl Store {
    /// Writes the word list and streak slots in one transaction. Nothing is
    /// written when the snapshot exceeds the storage quota.
    pub fn save_snapshot(
        &self,
        entries: &[WordEntry],
        streak: Option<&StreakState>,
    ) -> Result<(), StoreError> {
        let vocabulary = Self::serialize(&entries)?;
        self.write_slots(Some(vocabulary.as_slice()), streak)?;
        tracing::debug!(entries = entries.len(), "Snapshot saved");
        Ok(())
    }

    /// Writes only the streak slots. The stored word list, present, absent or
    /// unreadable, is left as it is.
    pub fn save_streak(&self, streak: Option<&StreakState>) -> Result<(), StoreError> {
        self.write_slots(None, streak)?;
        tracing::debug!(has_streak = streak.is_some(), "Streak saved");
        Ok(())
    }

    fn write_slots(
        &self,
        vocabulary: Option<&[u8]>,
        streak: Option<&StreakState>,
    ) -> Result<(), StoreError> {
        let streak_slots = streak.map(|s| {
            (
                s.streak_count.to_string().into_bytes(),
                format_practice_date(s.last_practiced_date).into_bytes(),
            )
        });

        // An untouched word list still counts against the quota.
        let vocabulary_slot = match vocabulary {
            Some(raw) => keys::VOCABULARY.len() + raw.len(),
            None => self
                .local_storage
                .get(keys::VOCABULARY.as_bytes())?
                .map_or(0, |raw| keys::VOCABULARY.len() + raw.len()),
        };
        let needed = vocabulary_slot
            + streak_slots.as_ref().map_or(0, |(count, date)| {
                keys::PRACTICE_STREAK.len()
                    + count.len()
                    + keys::LAST_PRACTICE_DATE.len()
                    + date.len()
            });
        if needed > self.quota_bytes() {
            tracing::warn!(needed, quota = self.quota_bytes(), "Snapshot rejected by storage quota");
            return Err(StoreError::QuotaExceeded {
                needed,
                quota: self.quota_bytes(),
            });
        }

        self.local_storage
            .transaction(|tx| -> ConflictableTransactionResult<(), StoreError> {
                if let Some(raw) = vocabulary {
                    tx.insert(keys::VOCABULARY.as_bytes(), raw)?;
                }
                match &streak_slots {
                    Some((count, date)) => {
                        tx.insert(keys::PRACTICE_STREAK.as_bytes(), count.as_slice())?;
                        tx.insert(keys::LAST_PRACTICE_DATE.as_bytes(), date.as_slice())?;
                    }
                    None => {
                        tx.remove(keys::PRACTICE_STREAK.as_bytes())?;
                        tx.remove(keys::LAST_PRACTICE_DATE.as_bytes())?;
                    }
                }
                Ok(())
            })
            .map_err(|e: TransactionError<StoreError>| match e {
                TransactionError::Abort(store_err) => store_err,
                TransactionError::Storage(sled_err) => StoreError::Sled(sled_err),
            })?;

        self.flush()
    }

    /// The saved word list. `None` when it has never been saved, which is
    /// what triggers seeding.
    pub fn load_entries(&self) -> Result<Option<Vec<WordEntry>>, StoreError> {
        match self.local_storage.get(keys::VOCABULARY.as_bytes())? {
            Some(raw) => Self::deserialize::<Vec<WordEntry>>(&raw)
                .map(Some)
                .map_err(|e| StoreError::corrupt(keys::VOCABULARY, e)),
            None => Ok(None),
        }
    }

    /// The saved streak. A lone count or date without its other half is
    /// treated as no streak.
    pub fn load_streak(&self) -> Result<Option<StreakState>, StoreError> {
        let count = match self.local_storage.get(keys::PRACTICE_STREAK.as_bytes())? {
            Some(raw) => {
                let text = String::from_utf8_lossy(&raw);
                let parsed = text
                    .trim()
                    .parse::<u32>()
                    .map_err(|e| StoreError::corrupt(keys::PRACTICE_STREAK, e))?;
                Some(parsed)
            }
            None => None,
        };

        let date = match self.local_storage.get(keys::LAST_PRACTICE_DATE.as_bytes())? {
            Some(raw) => {
                let text = String::from_utf8_lossy(&raw);
                let parsed = parse_practice_date(&text).ok_or_else(|| {
                    StoreError::corrupt(
                        keys::LAST_PRACTICE_DATE,
                        format!("unrecognised date {text:?}"),
                    )
                })?;
                Some(parsed)
            }
            None => None,
        };

        Ok(match (count, date) {
            (Some(streak_count), Some(last_practiced_date)) => Some(StreakState {
                streak_count,
                last_practiced_date,
            }),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::constants::DEFAULT_STORAGE_QUOTA_BYTES;

    fn sample_entry(english: &str, thai: &str) -> WordEntry {
        WordEntry {
            english: english.to_string(),
            pronunciation: String::new(),
            thai: thai.to_string(),
            thai_pronunciation: String::new(),
            category: "basics".to_string(),
            example: String::new(),
            thai_example: String::new(),
            mastered: true,
            bookmarked: false,
        }
    }

    fn streak(count: u32, y: i32, m: u32, d: u32) -> StreakState {
        StreakState {
            streak_count: count,
            last_practiced_date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        }
    }

    #[test]
    fn empty_medium_loads_as_no_data() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot-empty");
        let store = Store::open(path.to_str().unwrap(), DEFAULT_STORAGE_QUOTA_BYTES).unwrap();

        assert_eq!(store.load_entries().unwrap(), None);
        assert_eq!(store.load_streak().unwrap(), None);
    }

    #[test]
    fn save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot-save");
        let store = Store::open(path.to_str().unwrap(), DEFAULT_STORAGE_QUOTA_BYTES).unwrap();

        let entries = vec![sample_entry("Hello", "สวัสดี"), sample_entry("Rice", "ข้าว")];
        let state = streak(4, 2024, 1, 2);
        store.save_snapshot(&entries, Some(&state)).unwrap();

        assert_eq!(store.load_entries().unwrap(), Some(entries));
        assert_eq!(store.load_streak().unwrap(), Some(state));
    }

    #[test]
    fn slots_use_plain_text_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot-layout");
        let store = Store::open(path.to_str().unwrap(), DEFAULT_STORAGE_QUOTA_BYTES).unwrap();

        store
            .save_snapshot(&[sample_entry("Hello", "สวัสดี")], Some(&streak(7, 2024, 6, 30)))
            .unwrap();

        let count = store.local_storage.get(keys::PRACTICE_STREAK).unwrap().unwrap();
        assert_eq!(&count[..], b"7");
        let date = store.local_storage.get(keys::LAST_PRACTICE_DATE).unwrap().unwrap();
        assert_eq!(&date[..], b"2024-06-30");
        let vocabulary = store.local_storage.get(keys::VOCABULARY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&vocabulary).unwrap();
        assert_eq!(value[0]["thaiPronunciation"], "");
    }

    #[test]
    fn corrupt_vocabulary_is_distinguishable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot-corrupt");
        let store = Store::open(path.to_str().unwrap(), DEFAULT_STORAGE_QUOTA_BYTES).unwrap();

        store
            .local_storage
            .insert(keys::VOCABULARY, b"[{not json".as_slice())
            .unwrap();

        let err = store.load_entries().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { ref slot, .. } if slot == keys::VOCABULARY));
    }

    #[test]
    fn corrupt_streak_does_not_hide_word_list() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot-bad-count");
        let store = Store::open(path.to_str().unwrap(), DEFAULT_STORAGE_QUOTA_BYTES).unwrap();

        store.save_snapshot(&[sample_entry("Hello", "สวัสดี")], None).unwrap();
        store
            .local_storage
            .insert(keys::PRACTICE_STREAK, b"many".as_slice())
            .unwrap();
        store
            .local_storage
            .insert(keys::LAST_PRACTICE_DATE, b"2024-01-01".as_slice())
            .unwrap();

        assert!(matches!(
            store.load_streak(),
            Err(StoreError::Corrupt { ref slot, .. }) if slot == keys::PRACTICE_STREAK
        ));
        assert_eq!(store.load_entries().unwrap().map(|e| e.len()), Some(1));
    }

    #[test]
    fn legacy_date_form_is_accepted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot-legacy");
        let store = Store::open(path.to_str().unwrap(), DEFAULT_STORAGE_QUOTA_BYTES).unwrap();

        store.local_storage.insert(keys::PRACTICE_STREAK, b"2".as_slice()).unwrap();
        store
            .local_storage
            .insert(keys::LAST_PRACTICE_DATE, b"Mon Jan 01 2024".as_slice())
            .unwrap();

        assert_eq!(store.load_entries().unwrap(), None);
        assert_eq!(store.load_streak().unwrap(), Some(streak(2, 2024, 1, 1)));
    }

    #[test]
    fn lone_streak_count_is_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot-lone");
        let store = Store::open(path.to_str().unwrap(), DEFAULT_STORAGE_QUOTA_BYTES).unwrap();

        store.local_storage.insert(keys::PRACTICE_STREAK, b"5".as_slice()).unwrap();
        assert_eq!(store.load_streak().unwrap(), None);
    }

    #[test]
    fn quota_rejection_leaves_previous_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot-quota");
        let store = Store::open(path.to_str().unwrap(), 256).unwrap();

        let first = vec![sample_entry("Hi", "หวัดดี")];
        store.save_snapshot(&first, None).unwrap();

        let big: Vec<WordEntry> = (0..50)
            .map(|i| sample_entry(&format!("word-{i}"), "คำ"))
            .collect();
        let err = store.save_snapshot(&big, None).unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { quota: 256, .. }));

        assert_eq!(store.load_entries().unwrap(), Some(first));
    }

    #[test]
    fn saving_without_streak_clears_streak_slots() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot-no-streak");
        let store = Store::open(path.to_str().unwrap(), DEFAULT_STORAGE_QUOTA_BYTES).unwrap();

        store.save_snapshot(&[], Some(&streak(3, 2024, 2, 2))).unwrap();
        store.save_snapshot(&[], None).unwrap();
        assert_eq!(store.load_entries().unwrap(), Some(Vec::new()));
        assert_eq!(store.load_streak().unwrap(), None);
    }

    #[test]
    fn streak_save_leaves_word_list_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot-streak-only");
        let store = Store::open(path.to_str().unwrap(), DEFAULT_STORAGE_QUOTA_BYTES).unwrap();

        store.save_streak(Some(&streak(1, 2024, 1, 1))).unwrap();
        assert_eq!(store.load_entries().unwrap(), None);
        assert_eq!(store.load_streak().unwrap(), Some(streak(1, 2024, 1, 1)));

        store
            .local_storage
            .insert(keys::VOCABULARY, b"[{not json".as_slice())
            .unwrap();
        store.save_streak(Some(&streak(2, 2024, 1, 2))).unwrap();
        let raw = store.local_storage.get(keys::VOCABULARY).unwrap().unwrap();
        assert_eq!(&raw[..], b"[{not json");
    }

    #[test]
    fn streak_save_counts_stored_word_list_against_quota() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot-streak-quota");
        let store = Store::open(path.to_str().unwrap(), 200).unwrap();

        store.save_snapshot(&[sample_entry("Hello", "สวัสดี")], None).unwrap();
        let err = store.save_streak(Some(&streak(1, 2024, 1, 1))).unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { quota: 200, .. }));
    }

    #[test]
    fn parses_both_date_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1);
        assert_eq!(parse_practice_date("2024-01-01"), expected);
        assert_eq!(parse_practice_date("Mon Jan 01 2024"), expected);
        assert_eq!(parse_practice_date("yesterday"), None);
    }
}
