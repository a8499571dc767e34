/*!
 * Structured Tracing
 * Subscriber setup for hosts that want the bridge's events
 *
 * The bridge only emits `tracing` events; installing a subscriber is left to
 * the host process, which calls `init_tracing` once at startup.
 */

use crate::core::config::BridgeConfig;
use tracing::info;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Install a global subscriber configured by `config`
///
/// Returns `false` if a global subscriber was already installed, in which
/// case nothing changes.
pub fn init_tracing(config: &BridgeConfig) -> bool {
    let env_filter =
        EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if config.trace_json {
        // JSON output for log shippers
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(config.with_source_location)
                    .with_file(config.with_source_location)
                    .with_current_span(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
            .is_ok()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(config.with_source_location)
                    .with_file(config.with_source_location)
                    .compact(),
            )
            .try_init()
            .is_ok()
    };

    if installed {
        info!(
            filter = %config.log_filter,
            json = config.trace_json,
            "vmem bridge tracing initialized"
        );
    }
    installed
}
