use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            enable_file_logs: false,
            log_dir: "./logs".to_string(),
        }
    }
}

/// Installs the global subscriber. Console output goes to stderr so it never
/// interleaves with rendered cards on stdout.
pub fn init_tracing(config: &LogConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    let registry = Registry::default().with(env_filter).with(stderr_layer);

    if config.enable_file_logs {
        let file_appender = match RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("flashcards")
            .filename_suffix("log")
            .max_log_files(30)
            .build(&config.log_dir)
        {
            Ok(appender) => appender,
            Err(e) => {
                eprintln!("File logging disabled, cannot create appender in {}: {e}", config.log_dir);
                let _ = registry.try_init();
                return;
            }
        };
        let file_layer = fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .json();
        // Already-set subscriber is expected in tests; anything else is a misconfiguration.
        if let Err(e) = registry.with(file_layer).try_init() {
            let msg = e.to_string();
            if !msg.contains("already been set") {
                panic!("Failed to initialize tracing with file logs: {e}");
            }
        }
    } else if let Err(e) = registry.try_init() {
        let msg = e.to_string();
        if !msg.contains("already been set") {
            panic!("Failed to initialize tracing: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let cfg = LogConfig::default();
        init_tracing(&cfg);
        init_tracing(&cfg);
    }
}
