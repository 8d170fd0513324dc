//! Subscriber setup: `EnvFilter` plus the OpenTelemetry layer.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and instrumentation scope name attached to every span.
pub const SERVICE_NAME: &str = "Popcorn";

/// File name of the span log inside the data directory.
pub const TRACE_FILE_NAME: &str = "popcorn-otlp.json";

/// Installs the global subscriber.
///
/// The filter comes from `config.trace_level` (an `EnvFilter` directive such
/// as `"debug"` or `"popcorn=trace"`), defaulting to `"info"`. Spans go to
/// `<data dir>/popcorn-otlp.json`.
///
/// Tracing is best effort: if the data directory cannot be created or a
/// subscriber is already installed, this returns without doing anything, so
/// calling it from both the plugin and its worker is fine.
///
/// # Example
///
/// ```rust,no_run
/// use popcorn::observability::init_tracing;
/// use popcorn::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource, SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
