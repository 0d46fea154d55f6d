//! Logging bootstrap for twarc binaries
//!
//! Filter precedence: command-line level > `RUST_LOG` > TOML `[logging] level`.
//! Logs go to stderr so snapshot JSON on stdout stays clean.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::{Error, Result};

/// Pick the filter directive to install
pub fn resolve_filter(cli_level: Option<&str>, env_filter: Option<&str>, config: &LoggingConfig) -> String {
    let non_blank = |s: &&str| !s.trim().is_empty();

    cli_level
        .filter(non_blank)
        .or(env_filter.filter(non_blank))
        .unwrap_or(&config.level)
        .to_string()
}

/// Install the global tracing subscriber
///
/// # Errors
/// `Error::Config` if the filter directive is invalid or a subscriber is
/// already installed.
pub fn init_logging(cli_level: Option<&str>, config: &LoggingConfig) -> Result<()> {
    let env_filter = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = resolve_filter(cli_level, env_filter.as_deref(), config);

    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| Error::Config(format!("invalid log filter {:?}: {}", directive, e)))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| Error::Config(format!("failed to install logger: {}", e)))
}
