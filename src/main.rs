use std::io;
use std::process::ExitCode;

use clap::Parser;
use thai_flashcards::cli::{self, Action, Cli, Command};
use thai_flashcards::config::Config;
use thai_flashcards::logging::{init_tracing, LogConfig};
use thai_flashcards::seed::load_seed;
use thai_flashcards::session::{LoadStatus, StudySession};
use thai_flashcards::store::Store;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env();

    init_tracing(&LogConfig {
        log_level: config.log_level.clone(),
        enable_file_logs: config.enable_file_logs,
        log_dir: config.log_dir.clone(),
    });
    tracing::debug!(?config, "Starting flashcards");

    let store = match Store::open(&config.sled_path, config.storage_quota_bytes) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, path = %config.sled_path, "Failed to open local store");
            eprintln!("Cannot open local store at {}: {e}", config.sled_path);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = store.run_migrations() {
        tracing::error!(error = %e, "Failed to run migrations");
        eprintln!("Cannot upgrade local store: {e}");
        return ExitCode::FAILURE;
    }

    let (mut session, status) = StudySession::load(store);
    if let LoadStatus::Corrupt(e) = &status {
        eprintln!("Warning: saved vocabulary could not be read ({e}); starting with an empty word list.");
    }

    if session.needs_seed() {
        match load_seed(&config.seed).await {
            Ok(entries) if !entries.is_empty() => {
                if let Err(e) = session.seed(entries) {
                    eprintln!("{}", cli::describe_error(&e));
                }
            }
            Ok(_) => tracing::info!("No seed word list, starting empty"),
            Err(e) => {
                tracing::warn!(error = %e, source = %config.seed.source, "Seed word list unavailable");
            }
        }
    }

    let today = chrono::Local::now().date_naive();
    if let Err(e) = session.check_in_today(today) {
        eprintln!("{}", cli::describe_error(&e));
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = match cli.command.unwrap_or(Command::Action(Action::Card)) {
        Command::Shell => cli::run_shell(&mut session, io::stdin().lock(), &mut out, today),
        Command::Action(action) => cli::run_action(&mut session, action, today, &mut out),
    };

    let store = session.into_store();
    if let Err(e) = store.flush() {
        tracing::error!(error = %e, "Failed to flush store before exit");
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Output failed");
            ExitCode::FAILURE
        }
    }
}
