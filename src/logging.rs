use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Setup logging to the process error stream.
///
/// Diagnostics must not interleave with the merged document, so everything
/// goes to stderr. The level defaults to info (debug with `verbose`) and can
/// be overridden through `RUST_LOG`.
///
/// # Arguments
/// * `verbose` - If true, use debug level; otherwise use info level
pub fn setup_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to initialize logging: {err}"))?;

    tracing::debug!("Logging initialized: verbose={}", verbose);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_logging_is_not_reentrant() {
        // First call wins; a second call must surface an error instead of
        // panicking, since integration tests may share the process
        let first = setup_logging(false);
        let second = setup_logging(true);

        assert!(first.is_ok() || second.is_err());
    }
}
