//! Tracer setup and management

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::TracerProvider;
use std::sync::{Arc, OnceLock};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Global tracer provider holder
static TRACER_PROVIDER: OnceLock<Arc<TracerProvider>> = OnceLock::new();

/// Initialize telemetry with OpenTelemetry support.
///
/// Installs a tracing registry with an OpenTelemetry layer, a structured fmt
/// layer and an `EnvFilter` read from `RUST_LOG`. Calling it twice is a no-op
/// for the subscriber (the global default can only be set once).
///
/// ```rust,no_run
/// toolspec_telemetry::init_telemetry();
/// ```
pub fn init_telemetry() {
    let tracer_provider = TracerProvider::builder().build();
    let tracer = tracer_provider.tracer(crate::attributes::SYSTEM_NAME);

    let _ = TRACER_PROVIDER.set(Arc::new(tracer_provider));

    let telemetry_layer = tracing_opentelemetry::layer().with_tracer(tracer);

    let _ = tracing_subscriber::registry()
        .with(telemetry_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_line_number(true),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Get the global tracer provider if initialized
pub fn tracer_provider() -> Option<Arc<TracerProvider>> {
    TRACER_PROVIDER.get().cloned()
}
