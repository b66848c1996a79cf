//! Tracing subscriber setup.

/// Default filter: engine crates at debug, everything else at info.
pub const DEFAULT_FILTER: &str = "info,dockyard=debug,dockyard_core=debug";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },

    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Install a fmt subscriber using [`DEFAULT_FILTER`], or `RUST_LOG` when set.
pub fn init() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_string());
    if let Err(err) = init_with_filter(&filter) {
        eprintln!("dockyard: {err}");
    }
}

/// Install a fmt subscriber with an explicit env-filter directive string.
pub fn init_with_filter(filter: &str) -> Result<(), LoggingError> {
    let env_filter = tracing_subscriber::EnvFilter::try_new(filter).map_err(|e| {
        LoggingError::InvalidFilter {
            filter: filter.to_string(),
            message: e.to_string(),
        }
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_is_rejected() {
        let err = init_with_filter("dockyard=notalevel").unwrap_err();
        assert!(matches!(err, LoggingError::InvalidFilter { .. }));
        assert!(err.to_string().contains("dockyard=notalevel"));
    }
}
