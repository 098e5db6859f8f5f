//! Tracing setup for hosts embedding `gantt-rs`.
//!
//! The engine only emits through the `tracing` facade: layout recomputation
//! and dropped rows under `gantt_rs::core`, gestures and commits under
//! `gantt_rs::api`. Hosts that already own a subscriber need nothing here.

/// Environment variable read by [`init_default_tracing`].
pub const LOG_ENV_VAR: &str = "GANTT_LOG";

/// Filter used when `GANTT_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "gantt_rs=info";

/// Installs a compact fmt subscriber filtered by `GANTT_LOG`.
///
/// Returns `false` without the `telemetry` feature, or when a global
/// subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    let filter = std::env::var(LOG_ENV_VAR).unwrap_or_default();
    init_tracing_with_filter(&filter)
}

/// Same as [`init_default_tracing`] with an explicit filter directive
/// (for example `"gantt_rs::api=debug"`). An empty or invalid directive
/// falls back to [`DEFAULT_FILTER`].
#[must_use]
pub fn init_tracing_with_filter(directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_new(directive)
            .ok()
            .filter(|_| !directive.trim().is_empty())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directive;
        false
    }
}
