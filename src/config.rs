use std::env;
use std::str::FromStr;

use crate::constants::{DEFAULT_SEED_TIMEOUT_SECS, DEFAULT_STORAGE_QUOTA_BYTES};

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
    pub sled_path: String,
    pub seed: SeedConfig,
    pub storage_quota_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// File path or http(s) URL of the initial word list. Empty disables seeding.
    pub source: String,
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            log_level: env_or("RUST_LOG", "warn"),
            enable_file_logs: env_or_bool("ENABLE_FILE_LOGS", false),
            log_dir: env_or("LOG_DIR", "./logs"),
            sled_path: env_or("SLED_PATH", "./data/flashcards.sled"),
            seed: SeedConfig {
                source: env_or("SEED_SOURCE", "./wordlist.json"),
                timeout_secs: env_or_parse("SEED_TIMEOUT_SECS", DEFAULT_SEED_TIMEOUT_SECS),
            },
            storage_quota_bytes: env_or_parse("STORAGE_QUOTA_BYTES", DEFAULT_STORAGE_QUOTA_BYTES),
        }
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_or_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match env::var(key) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(
                    key,
                    value = %raw,
                    "Failed to parse env var, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}

pub fn env_or_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, OnceLock};

    use super::*;

    fn env_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    fn managed_keys() -> &'static [&'static str] {
        &[
            "RUST_LOG",
            "ENABLE_FILE_LOGS",
            "SLED_PATH",
            "SEED_SOURCE",
            "SEED_TIMEOUT_SECS",
            "STORAGE_QUOTA_BYTES",
        ]
    }

    fn clear_keys(keys: &[&str]) {
        for key in keys {
            env::remove_var(key);
        }
    }

    #[test]
    fn loads_defaults_when_missing() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        let cfg = Config::from_env();
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.sled_path, "./data/flashcards.sled");
        assert_eq!(cfg.seed.timeout_secs, DEFAULT_SEED_TIMEOUT_SECS);
        assert_eq!(cfg.storage_quota_bytes, DEFAULT_STORAGE_QUOTA_BYTES);
        assert!(!cfg.enable_file_logs);
    }

    #[test]
    fn parses_numeric_values() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        env::set_var("STORAGE_QUOTA_BYTES", "2048");
        env::set_var("SEED_TIMEOUT_SECS", "5");

        let cfg = Config::from_env();
        assert_eq!(cfg.storage_quota_bytes, 2048);
        assert_eq!(cfg.seed.timeout_secs, 5);
        clear_keys(managed_keys());
    }

    #[test]
    fn invalid_values_fall_back() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        env::set_var("STORAGE_QUOTA_BYTES", "lots");
        env::set_var("ENABLE_FILE_LOGS", "maybe");

        let cfg = Config::from_env();
        assert_eq!(cfg.storage_quota_bytes, DEFAULT_STORAGE_QUOTA_BYTES);
        assert!(!cfg.enable_file_logs);
        clear_keys(managed_keys());
    }

    #[test]
    fn seed_source_can_be_disabled() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        env::set_var("SEED_SOURCE", "");

        let cfg = Config::from_env();
        assert!(cfg.seed.source.is_empty());
        clear_keys(managed_keys());
    }
}
