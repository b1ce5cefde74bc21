//! Initial word list, read once at startup when nothing has been saved yet.
//!
//! The source is either a local JSON file or an http(s) URL serving the same
//! JSON array of entries.

use std::time::Duration;

use futures::StreamExt;
use thiserror::Error;

use crate::config::SeedConfig;
use crate::constants::MAX_SEED_BYTES;
use crate::validation::{normalize_category, validate_required_fields};
use crate::vocab::types::WordEntry;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch seed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("seed request returned HTTP {0}")]
    Status(u16),
    #[error("seed is larger than {limit} bytes")]
    TooLarge { limit: usize },
    #[error("seed is not a valid word list: {0}")]
    Parse(#[from] serde_json::Error),
}

pub async fn load_seed(config: &SeedConfig) -> Result<Vec<WordEntry>, SeedError> {
    let source = config.source.trim();
    if source.is_empty() {
        return Ok(Vec::new());
    }

    let bytes = if is_remote(source) {
        fetch_remote(source, Duration::from_secs(config.timeout_secs)).await?
    } else {
        read_local(source).await?
    };
    let entries = parse_seed(&bytes)?;
    tracing::info!(source, entries = entries.len(), "Seed word list loaded");
    Ok(entries)
}

/// Parses a JSON word list, dropping records that lack a required field.
pub fn parse_seed(bytes: &[u8]) -> Result<Vec<WordEntry>, SeedError> {
    let raw: Vec<WordEntry> = serde_json::from_slice(bytes)?;
    let total = raw.len();
    let entries: Vec<WordEntry> = raw
        .into_iter()
        .filter(|e| validate_required_fields(&e.english, &e.thai, &e.category).is_ok())
        .map(|mut e| {
            if let Ok(category) = normalize_category(&e.category) {
                e.category = category;
            }
            e
        })
        .collect();
    if entries.len() < total {
        tracing::warn!(
            skipped = total - entries.len(),
            "Seed records with missing required fields were skipped"
        );
    }
    Ok(entries)
}

fn is_remote(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

async fn read_local(path: &str) -> Result<Vec<u8>, SeedError> {
    let io_err = |source: std::io::Error| SeedError::Io {
        path: path.to_string(),
        source,
    };
    let metadata = tokio::fs::metadata(path).await.map_err(io_err)?;
    if metadata.len() > MAX_SEED_BYTES as u64 {
        return Err(SeedError::TooLarge {
            limit: MAX_SEED_BYTES,
        });
    }
    tokio::fs::read(path).await.map_err(io_err)
}

async fn fetch_remote(url: &str, timeout: Duration) -> Result<Vec<u8>, SeedError> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(SeedError::Status(response.status().as_u16()));
    }
    if let Some(len) = response.content_length() {
        if len > MAX_SEED_BYTES as u64 {
            return Err(SeedError::TooLarge {
                limit: MAX_SEED_BYTES,
            });
        }
    }

    // Content-Length can be missing or wrong; enforce the cap while streaming.
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        body.extend_from_slice(&chunk?);
        if body.len() > MAX_SEED_BYTES {
            return Err(SeedError::TooLarge {
                limit: MAX_SEED_BYTES,
            });
        }
    }
    Ok(body)
}
