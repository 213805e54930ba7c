//! Tracing setup: `tracing` spans exported through OpenTelemetry to a file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK TracerProvider → FileSpanExporter → RotatingSink
//! ```
//!
//! Spans land in `~/.local/share/zellij/popcorn/popcorn-traces.json`, one JSON
//! object per line, rotated at 5 MiB with two backups kept.
//!
//! The level comes from the `trace_level` plugin option and uses
//! `EnvFilter` syntax, e.g. `"debug"` or `"popcorn=trace"`.

mod exporter;
mod sink;

use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use exporter::{create_tracer_provider, FileSpanExporter};
pub use sink::RotatingSink;

/// Service and tracer name attached to every span.
pub const SERVICE_NAME: &str = "Popcorn";

/// File name of the live trace file inside the data directory.
pub const TRACE_FILE_NAME: &str = "popcorn-traces.json";

/// Installs the global subscriber.
///
/// Tracing is optional: if the data directory cannot be created or a
/// subscriber is already installed, the plugin runs without traces.
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::paths::get_data_dir();
    if let Err(err) = std::fs::create_dir_all(&data_dir) {
        eprintln!("popcorn: tracing disabled, cannot create {}: {err}", data_dir.display());
        return;
    }

    let filter = EnvFilter::try_new(&config.trace_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)));

    if subscriber.try_init().is_err() {
        eprintln!("popcorn: a tracing subscriber is already installed");
    }
}
