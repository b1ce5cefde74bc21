use chrono::NaiveDate;

use thai_flashcards::vocab::{NewWordEntry, WordEntry};

pub fn new_word(english: &str, thai: &str, category: &str) -> NewWordEntry {
    NewWordEntry {
        english: english.to_string(),
        thai: thai.to_string(),
        category: category.to_string(),
        ..Default::default()
    }
}

pub fn entry(english: &str, thai: &str, category: &str) -> WordEntry {
    new_word(english, thai, category).into_entry()
}

/// A small mixed-category word list shaped like the bundled one.
pub fn seed_entries() -> Vec<WordEntry> {
    vec![
        WordEntry {
            pronunciation: "ha-'lō".to_string(),
            thai_pronunciation: "sà-wàt-dee".to_string(),
            example: "Hello, how are you?".to_string(),
            thai_example: "สวัสดี คุณเป็นอย่างไรบ้าง?".to_string(),
            ..entry("Hello", "สวัสดี", "basics")
        },
        entry("Thank you", "ขอบคุณ", "basics"),
        entry("Rice", "ข้าว", "food"),
        entry("Airport", "สนามบิน", "travel"),
        entry("Hotel", "โรงแรม", "travel"),
        entry("Meeting", "การประชุม", "business"),
    ]
}

pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid date")
}
