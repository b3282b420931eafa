//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Bare registry; tests install a capture layer instead
    Test,
}

impl Profile {
    /// Default filter directive when `RUST_LOG` is unset
    pub fn default_filter(&self) -> &'static str {
        match self {
            Profile::Development => "beam=debug",
            Profile::Production => "beam=info",
            Profile::Test => "off",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at application startup, before the store is opened. Later
/// calls are no-ops. `RUST_LOG` overrides the profile's default filter.
///
/// # Example
///
/// ```
/// use beam_logging::{init, Profile};
///
/// init(Profile::Production);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_filter()));

        // try_init: a host process may already own the global subscriber.
        let _ = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish()
                .try_init(),
            Profile::Test => tracing_subscriber::registry().try_init(),
        };
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        init(Profile::Test);
        init(Profile::Test);
        init(Profile::Development);
    }

    #[test]
    fn test_default_filters() {
        assert_eq!(Profile::Development.default_filter(), "beam=debug");
        assert_eq!(Profile::Production.default_filter(), "beam=info");
    }
}
