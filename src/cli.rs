use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::error::VocabError;
use crate::render;
use crate::session::StudySession;
use crate::vocab::{EntryPatch, NewWordEntry};

#[derive(Debug, Parser)]
#[command(name = "flashcards", version, about = "English/Thai vocabulary flashcards")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive session: filter, shuffle and browse cards across commands
    Shell,
    #[command(flatten)]
    Action(Action),
}

/// A single line typed in the interactive shell.
#[derive(Debug, Parser)]
#[command(name = "flashcards-shell", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
pub enum Action {
    /// Show the current flashcard
    #[command(alias = "show")]
    Card,
    /// Move to the next card
    Next,
    /// Move to the previous card
    Prev,
    /// Restrict the deck to one category ("all" for every word)
    Category { name: String },
    /// Shuffle the current deck
    Shuffle,
    /// Open a word from the list in the deck
    Open { index: usize },
    /// Print the word table
    List {
        /// Case-insensitive filter on English or Thai text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Add a new word
    Add(NewEntryArgs),
    /// Edit fields of an existing word
    Edit(EditArgs),
    /// Delete a word
    Remove { index: usize },
    /// Toggle the mastered flag of a word
    Master { index: usize },
    /// Toggle the bookmark of a word (the current card when no index is given)
    Bookmark { index: Option<usize> },
    /// List categories
    Categories,
    /// Create an empty category
    AddCategory { name: String },
    /// Delete a category; its words move to "basics"
    DeleteCategory { name: String },
    /// Record today's practice
    CheckIn,
    /// Word counts and practice streak
    Stats,
}

#[derive(Debug, Args)]
pub struct NewEntryArgs {
    pub english: String,
    pub thai: String,
    pub category: String,
    #[arg(long, default_value = "")]
    pub pronunciation: String,
    #[arg(long, default_value = "")]
    pub thai_pronunciation: String,
    #[arg(long, default_value = "")]
    pub example: String,
    #[arg(long, default_value = "")]
    pub thai_example: String,
}

impl From<NewEntryArgs> for NewWordEntry {
    fn from(args: NewEntryArgs) -> Self {
        Self {
            english: args.english,
            pronunciation: args.pronunciation,
            thai: args.thai,
            thai_pronunciation: args.thai_pronunciation,
            category: args.category,
            example: args.example,
            thai_example: args.thai_example,
        }
    }
}

#[derive(Debug, Args)]
pub struct EditArgs {
    pub index: usize,
    #[arg(long)]
    pub english: Option<String>,
    #[arg(long)]
    pub pronunciation: Option<String>,
    #[arg(long)]
    pub thai: Option<String>,
    #[arg(long)]
    pub thai_pronunciation: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub example: Option<String>,
    #[arg(long)]
    pub thai_example: Option<String>,
}

impl EditArgs {
    fn patch(&self) -> EntryPatch {
        EntryPatch {
            english: self.english.clone(),
            pronunciation: self.pronunciation.clone(),
            thai: self.thai.clone(),
            thai_pronunciation: self.thai_pronunciation.clone(),
            category: self.category.clone(),
            example: self.example.clone(),
            thai_example: self.thai_example.clone(),
            mastered: None,
            bookmarked: None,
        }
    }
}

/// Runs one action and writes its outcome. Vocabulary errors are reported to
/// the user, not returned.
pub fn run_action<W: Write>(
    session: &mut StudySession,
    action: Action,
    today: NaiveDate,
    out: &mut W,
) -> io::Result<()> {
    match apply(session, action, today) {
        Ok(text) => writeln!(out, "{text}"),
        Err(err) => writeln!(out, "{}", describe_error(&err)),
    }
}

/// Reads commands line by line until end of input or `quit`.
pub fn run_shell<R: BufRead, W: Write>(
    session: &mut StudySession,
    input: R,
    out: &mut W,
    today: NaiveDate,
) -> io::Result<()> {
    writeln!(out, "{}", render::card(session))?;
    for line in input.lines() {
        let line = line?;
        let tokens = match split_line(&line) {
            Ok(tokens) => tokens,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };
        match tokens.first().map(String::as_str) {
            None => continue,
            Some("quit") | Some("exit") => break,
            _ => {}
        }
        match ShellLine::try_parse_from(tokens) {
            Ok(parsed) => run_action(session, parsed.action, today, out)?,
            Err(e) => write!(out, "{}", e.render())?,
        }
    }
    Ok(())
}

fn apply(session: &mut StudySession, action: Action, today: NaiveDate) -> Result<String, VocabError> {
    let text = match action {
        Action::Card => render::card(session),
        Action::Next => {
            session.next_card();
            render::card(session)
        }
        Action::Prev => {
            session.prev_card();
            render::card(session)
        }
        Action::Category { name } => {
            session.set_category(name.trim());
            render::card(session)
        }
        Action::Shuffle => {
            session.shuffle();
            render::card(session)
        }
        Action::Open { index } => {
            if session.jump_to(index) {
                render::card(session)
            } else {
                format!("Word #{index} is not in the current deck")
            }
        }
        Action::List { search } => {
            if let Some(query) = search {
                session.set_search_query(&query);
            }
            render::table(session)
        }
        Action::Add(args) => {
            let index = session.add(args.into())?;
            added_or_updated("Added", session, index)
        }
        Action::Edit(args) => {
            let patch = args.patch();
            if patch.is_empty() {
                return Err(VocabError::validation("nothing to change, pass at least one field"));
            }
            session.update(args.index, &patch)?;
            added_or_updated("Updated", session, args.index)
        }
        Action::Remove { index } => {
            let removed = session.remove(index)?;
            format!("Deleted \"{} / {}\"", removed.english, removed.thai)
        }
        Action::Master { index } => {
            let mastered = session.toggle_mastered(index)?;
            format!("#{index} {}", if mastered { "mastered" } else { "not mastered" })
        }
        Action::Bookmark { index } => {
            let bookmarked = match index {
                Some(index) => session.toggle_bookmarked(index)?,
                None => session.toggle_current_bookmark()?,
            };
            (if bookmarked { "Bookmarked" } else { "Bookmark removed" }).to_string()
        }
        Action::Categories => render::categories(session),
        Action::AddCategory { name } => {
            if session.add_category(&name)? {
                format!("Category \"{}\" added", name.trim().to_lowercase())
            } else {
                format!("Category \"{}\" already exists", name.trim().to_lowercase())
            }
        }
        Action::DeleteCategory { name } => {
            let moved = session.delete_category(&name)?;
            format!("Category \"{name}\" deleted, {moved} word(s) moved to basics")
        }
        Action::CheckIn => {
            let streak = session.check_in_today(today)?;
            format!(
                "Practice streak: {}",
                crate::vocab::streak::display_label(streak.streak_count)
            )
        }
        Action::Stats => render::stats(&session.stats()),
    };
    Ok(text)
}

fn added_or_updated(verb: &str, session: &StudySession, index: usize) -> String {
    match session.entry(index) {
        Some(entry) => format!("{verb} {}", render::entry_line(index, entry)),
        None => verb.to_string(),
    }
}

pub fn describe_error(err: &VocabError) -> String {
    match err {
        VocabError::Validation(message) => format!("Not saved: {message}"),
        VocabError::Index { index, .. } => format!("No word at #{index}"),
        VocabError::NoCurrentCard => "No card selected".to_string(),
        VocabError::Storage(e) => {
            format!("Warning: could not save ({e}). Changes may not survive a restart.")
        }
    }
}

/// Splits a shell line on whitespace, honouring single and double quotes.
fn split_line(line: &str) -> Result<Vec<String>, &'static str> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_token = true;
            }
            None if ch.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(ch);
                in_token = true;
            }
        }
    }
    if quote.is_some() {
        return Err("Unterminated quote");
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
