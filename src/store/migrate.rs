use chrono::NaiveDate;

use crate::store::keys;
use crate::store::operations::snapshot::{format_practice_date, parse_practice_date};
use crate::store::{Store, StoreError};

type MigrationFn = fn(&Store) -> Result<(), StoreError>;

fn migrations() -> Vec<(&'static str, MigrationFn)> {
    vec![
        ("001_initial", m001_initial),
        ("002_iso_practice_date", m002_iso_practice_date),
    ]
}

/// Applies every pending migration in order.
///
/// Each migration must be idempotent: the process can stop after a migration
/// ran but before its version was recorded, and it will run again on the next
/// start. Versions only move forward.
pub fn run(store: &Store) -> Result<(), StoreError> {
    let current = get_current_version(store)?;
    let all = migrations();

    for (index, (name, func)) in all.iter().enumerate() {
        let version = (index + 1) as u32;
        if version > current {
            tracing::info!(version, name, "Running migration");
            func(store)?;
            set_version(store, version)?;
            tracing::info!(version, name, "Migration complete");
        } else {
            tracing::debug!(version, name, "Migration already applied, skipping");
        }
    }

    Ok(())
}

pub fn get_current_version(store: &Store) -> Result<u32, StoreError> {
    match store.meta.get(keys::SCHEMA_VERSION.as_bytes())? {
        Some(raw) => {
            let bytes: [u8; 4] = raw.as_ref().try_into().map_err(|_| StoreError::Migration {
                version: 0,
                message: format!("schema version has {} bytes, expected 4", raw.len()),
            })?;
            Ok(u32::from_be_bytes(bytes))
        }
        None => Ok(0),
    }
}

pub fn set_version(store: &Store, version: u32) -> Result<(), StoreError> {
    let current = get_current_version(store)?;
    if version < current {
        return Err(StoreError::Migration {
            version,
            message: format!("Refuse to downgrade from {} to {}", current, version),
        });
    }

    store
        .meta
        .insert(keys::SCHEMA_VERSION.as_bytes(), &version.to_be_bytes())?;
    Ok(())
}

fn m001_initial(_store: &Store) -> Result<(), StoreError> {
    Ok(())
}

/// Older builds stored the practice date as `"Mon Jan 01 2024"`.
fn m002_iso_practice_date(store: &Store) -> Result<(), StoreError> {
    let Some(raw) = store.local_storage.get(keys::LAST_PRACTICE_DATE.as_bytes())? else {
        return Ok(());
    };
    let text = String::from_utf8_lossy(&raw).into_owned();
    if NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").is_ok() {
        return Ok(());
    }

    match parse_practice_date(&text) {
        Some(date) => {
            let iso = format_practice_date(date);
            store
                .local_storage
                .insert(keys::LAST_PRACTICE_DATE.as_bytes(), iso.as_bytes())?;
            tracing::info!(from = %text, to = %iso, "Rewrote legacy practice date");
        }
        None => {
            // Left in place; loading reports it as corrupt.
            tracing::warn!(value = %text, "Unrecognised practice date, not migrated");
        }
    }
    Ok(())
}
