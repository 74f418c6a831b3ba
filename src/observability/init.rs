//! Subscriber setup: `tracing` macros → OpenTelemetry → trace file.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::tracer;
use crate::infrastructure::paths;
use crate::Config;

/// Name of the trace file inside the plugin data directory.
pub const TRACE_FILE_NAME: &str = "bookscout-traces.jsonl";

/// Filter used when `trace_level` is not configured.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Installs the global subscriber writing to
/// `~/.local/share/zellij/bookscout/bookscout-traces.jsonl`.
///
/// `config.trace_level` accepts any `EnvFilter` directive, e.g. `debug` or
/// `bookscout::fetch=trace,info`; an invalid directive falls back to
/// [`DEFAULT_TRACE_LEVEL`].
///
/// Tracing is optional: if the data directory cannot be created nothing is
/// installed. Calling this more than once keeps the first subscriber.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_TRACE_LEVEL);
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACE_LEVEL));

    let data_dir = paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", "bookscout"),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer("bookscout"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
