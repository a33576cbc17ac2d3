//! Tracing setup for hosts embedding the price chart.
//!
//! Every state transition in this crate is reported through `tracing`
//! macros; nothing is printed unless the host installs a subscriber.
//! Hosts either call `init_default_tracing` (with the `telemetry` feature)
//! or wire their own subscriber.

/// Default filter directive when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "price_chart=info";

/// Installs a compact `tracing` fmt subscriber filtered by `RUST_LOG`.
///
/// Returns `false` when the `telemetry` feature is disabled or when the host
/// already installed a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
