use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Logs go to stderr so stdout stays free for
/// frames. `RUST_LOG` overrides the configured filter; a malformed `RUST_LOG`
/// falls back to the configured filter with a warning.
pub fn init_logging(config: &LoggingConfig) -> Result<(), String> {
    let (filter, rejected_env) = select_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok(), config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|error| format!("failed to install log subscriber: {error}"))?;
    if let Some(error) = rejected_env {
        tracing::warn!(
            env = EnvFilter::DEFAULT_ENV,
            %error,
            filter = %config.filter,
            "ignoring malformed log filter from environment"
        );
    }
    Ok(())
}

/// Picks the environment filter when it parses, else the configured one. The
/// second element carries the parse error of a rejected environment filter.
pub(crate) fn select_filter(
    env_filter: Option<String>,
    config: &LoggingConfig,
) -> Result<(EnvFilter, Option<String>), String> {
    let rejected = match env_filter.as_deref().map(str::trim) {
        Some(directives) if !directives.is_empty() => match EnvFilter::try_new(directives) {
            Ok(filter) => return Ok((filter, None)),
            Err(error) => Some(format!("`{directives}`: {error}")),
        },
        _ => None,
    };
    let filter = EnvFilter::try_new(config.filter.as_str())
        .map_err(|error| format!("invalid log filter `{}`: {error}", config.filter))?;
    Ok((filter, rejected))
}

#[cfg(test)]
#[path = "logging_test.rs"]
mod tests;
