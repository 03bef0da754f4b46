use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Shape of the logging YAML file.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directives, e.g. "info,teleframe_bot=debug".
    pub filter: String,
    #[serde(default = "default_true")]
    pub ansi: bool,
    #[serde(default = "default_true")]
    pub with_target: bool,
}

fn default_true() -> bool {
    true
}

/// Reads and parses the logging config, or `None` when the file is
/// missing or malformed.
pub fn load_logging_config(path: &Path) -> Option<LoggingConfig> {
    let text = std::fs::read_to_string(path).ok()?;
    match serde_yaml::from_str(&text) {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("ignoring malformed logging config {}: {}", path.display(), e);
            None
        }
    }
}

/// Initializes the tracing subscriber from the YAML file at `path`,
/// falling back to a basic console logger when it does not exist.
pub fn setup_logging(path: &Path) {
    match load_logging_config(path) {
        Some(config) => {
            tracing_subscriber::registry()
                .with(EnvFilter::new(&config.filter))
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(config.ansi)
                        .with_target(config.with_target),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| "teleframe_bot=debug".into()),
                )
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
