use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `default_level` applies to the
/// whole process. Output goes to stderr so results on stdout stay clean.
///
/// # Errors
/// Returns an error if `default_level` is not a valid filter directive or a
/// global subscriber is already installed.
pub fn init(default_level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)?,
    };

    fmt().with_env_filter(filter)
         .with_writer(std::io::stderr)
         .with_target(true)
         .compact()
         .try_init()
         .map_err(|e| anyhow!(e))
}
