use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt};

static LOGGER_INIT: Once = Once::new();

/// Initializes the global `tracing` subscriber. Safe to call more than once;
/// only the first call takes effect.
pub fn init_tracing(service_name: &'static str, json: bool) {
    LOGGER_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let base = fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_line_number(true)
            .with_span_events(fmt::format::FmtSpan::CLOSE);

        if json {
            base.json().init();
        } else {
            base.pretty().init();
        }

        tracing::info!(service = service_name, "logger initialized");
    });
}
