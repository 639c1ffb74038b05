//! # Harness Logging
//!
//! Installs the global `tracing` subscriber used by the KAT runner.
//! Verbosity follows `RUST_LOG` when set.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kat_validation::logging::init_tracing;
//!
//! // Sets the global subscriber; call once per process
//! init_tracing("kat_validation=info").expect("Failed to init tracing");
//! tracing::info!("harness ready");
//! ```

use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter directive when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "kat_validation=info";

/// Initialize the tracing subscriber
///
/// `default_filter` applies only when `RUST_LOG` is absent or unparsable.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(default_filter: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .compact(),
    );

    subscriber.try_init()?;

    info!("KAT harness logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        // The first call may lose to another test that already installed one
        let _ = init_tracing(DEFAULT_FILTER);
        assert!(init_tracing(DEFAULT_FILTER).is_err());
    }
}
