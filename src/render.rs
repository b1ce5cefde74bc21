//! Plain-text rendering of the session's derived views.

use std::fmt::Write;

use crate::session::StudySession;
use crate::vocab::types::WordEntry;
use crate::vocab::VocabStats;

pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The card under the cursor, both sides, with deck position and navigation.
pub fn card(session: &StudySession) -> String {
    let filter = session.filter();
    let Some((index, entry)) = session.current_entry() else {
        return "No words available".to_string();
    };
    let position = filter.cursor().map_or(0, |c| c + 1);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "[{position}/{}] #{index} {} {}",
        filter.len(),
        capitalize(&entry.category),
        flags(entry)
    );
    let _ = writeln!(out, "  {}{}", entry.english, paren(&entry.pronunciation));
    if !entry.example.is_empty() {
        let _ = writeln!(out, "    {}", entry.example);
    }
    let _ = writeln!(out, "  {}{}", entry.thai, paren(&entry.thai_pronunciation));
    if !entry.thai_example.is_empty() {
        let _ = writeln!(out, "    {}", entry.thai_example);
    }
    let prev = if filter.has_prev() { "< prev" } else { "      " };
    let next = if filter.has_next() { "next >" } else { "" };
    let _ = write!(out, "  {prev}  {next}");
    out.trim_end().to_string()
}

/// Word table limited to the rows the current search shows.
pub fn table(session: &StudySession) -> String {
    let search = session.search();
    let rows = search.visible_indices();
    if rows.is_empty() {
        return if session.entries().is_empty() {
            "No vocabulary words found. Add some!".to_string()
        } else {
            format!("No words match \"{}\".", search.query())
        };
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<20} {:<20} {:<20} {:<12} {}",
        "#", "English", "Pronunciation", "Thai", "Category", "Flags"
    );
    for index in rows {
        if let Some(entry) = session.entry(index) {
            let _ = writeln!(
                out,
                "{:>4}  {:<20} {:<20} {:<20} {:<12} {}",
                index,
                entry.english,
                entry.pronunciation,
                entry.thai,
                capitalize(&entry.category),
                flags(entry)
            );
        }
    }
    out.trim_end().to_string()
}

pub fn categories(session: &StudySession) -> String {
    let selected = session.filter().category();
    let mut out = String::new();
    for category in session.categories() {
        let count = session
            .entries()
            .iter()
            .filter(|e| e.category == category)
            .count();
        let marker = if category == selected { "*" } else { " " };
        let _ = writeln!(out, "{marker} {} ({count})", capitalize(&category));
    }
    if out.is_empty() {
        return "No categories yet".to_string();
    }
    out.trim_end().to_string()
}

pub fn stats(stats: &VocabStats) -> String {
    format!(
        "Total words: {}\nMastered: {}\nBookmarked: {}\nPractice streak: {}",
        stats.total_words, stats.mastered_words, stats.bookmarked_words, stats.streak_label
    )
}

pub fn entry_line(index: usize, entry: &WordEntry) -> String {
    format!("#{index} {} / {} ({})", entry.english, entry.thai, entry.category)
}

fn flags(entry: &WordEntry) -> String {
    let mut out = String::new();
    if entry.mastered {
        out.push_str("[mastered]");
    }
    if entry.bookmarked {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str("[bookmarked]");
    }
    out
}

fn paren(text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        format!("  ({text})")
    }
}
