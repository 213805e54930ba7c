//! OpenTelemetry span exporter writing one JSON object per span.
//!
//! ```json
//! {"service":"Popcorn","name":"handle_event","trace_id":"…","span_id":"…",
//!  "parent_span_id":null,"start":"2024-05-01T12:00:00.000123Z","duration_us":42,
//!  "attributes":{"event_type":"ToggleGenre"},"events":[…],"status":"unset"}
//! ```

use super::sink::RotatingSink;
use chrono::{DateTime, SecondsFormat, Utc};
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::{Key, KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Map, Value as JsonValue};
use std::path::PathBuf;

/// Exporter that appends spans to a [`RotatingSink`].
#[derive(Debug)]
pub struct FileSpanExporter {
    sink: RotatingSink,
    service: String,
    is_shutdown: bool,
}

impl FileSpanExporter {
    pub fn new(sink: RotatingSink, resource: &Resource) -> Self {
        Self {
            sink,
            service: service_name(resource),
            is_shutdown: false,
        }
    }

    fn span_to_json(&self, span: &SpanData) -> JsonValue {
        let parent = (span.parent_span_id != SpanId::INVALID).then(|| format!("{:016x}", span.parent_span_id));
        let duration_us = span
            .end_time
            .duration_since(span.start_time)
            .map_or(0, |elapsed| u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX));

        let events: Vec<JsonValue> = span
            .events
            .iter()
            .map(|event| {
                json!({
                    "name": event.name,
                    "time": timestamp(event.timestamp),
                    "attributes": attributes_to_json(&event.attributes),
                })
            })
            .collect();

        let status = match &span.status {
            Status::Unset => json!("unset"),
            Status::Ok => json!("ok"),
            Status::Error { description } => json!({ "error": description.to_string() }),
        };

        json!({
            "service": self.service,
            "name": span.name,
            "trace_id": format!("{:032x}", span.span_context.trace_id()),
            "span_id": format!("{:016x}", span.span_context.span_id()),
            "parent_span_id": parent,
            "start": timestamp(span.start_time),
            "duration_us": duration_us,
            "attributes": attributes_to_json(&span.attributes),
            "events": events,
            "status": status,
        })
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown {
            return Box::pin(std::future::ready(Err(TraceError::from("exporter is shut down"))));
        }

        let lines: Vec<String> = batch.iter().map(|span| self.span_to_json(span).to_string()).collect();
        let result = lines
            .iter()
            .try_for_each(|line| self.sink.append(line))
            .map_err(|err| TraceError::from(err.to_string()));

        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.service = service_name(resource);
    }
}

/// Builds a provider that exports every finished span to `file_path`.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(RotatingSink::new(file_path), &resource);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

fn service_name(resource: &Resource) -> String {
    resource
        .get(Key::from_static_str("service.name"))
        .map_or_else(|| super::SERVICE_NAME.to_string(), |value| value.to_string())
}

fn timestamp(time: std::time::SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn attributes_to_json(attributes: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = attributes
        .iter()
        .map(|kv| {
            let value = match &kv.value {
                Value::Bool(b) => json!(b),
                Value::I64(i) => json!(i),
                Value::F64(f) => json!(f),
                Value::String(s) => json!(s.as_str()),
                Value::Array(_) => json!(kv.value.to_string()),
            };
            (kv.key.as_str().to_string(), value)
        })
        .collect();
    JsonValue::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_keep_their_types() {
        let attrs = vec![
            KeyValue::new("genre", "Action"),
            KeyValue::new("selected", true),
            KeyValue::new("count", 3_i64),
            KeyValue::new("rating", 7.5),
        ];

        let json = attributes_to_json(&attrs);

        assert_eq!(json, json!({"genre": "Action", "selected": true, "count": 3, "rating": 7.5}));
    }

    #[test]
    fn service_name_comes_from_resource() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "Popcorn")]);
        let dir = tempfile::tempdir().unwrap();

        let exporter = FileSpanExporter::new(RotatingSink::new(dir.path().join("t.json")), &resource);

        assert_eq!(exporter.service, "Popcorn");
    }

    #[test]
    fn provider_writes_spans_to_file() {
        use opentelemetry::trace::{Tracer, TracerProvider as _};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("popcorn-traces.json");
        let resource = Resource::new(vec![KeyValue::new("service.name", "Popcorn")]);
        let provider = create_tracer_provider(path.clone(), resource);

        provider.tracer("Popcorn").in_span("load_catalog", |_cx| {});

        let contents = std::fs::read_to_string(&path).unwrap();
        let line: JsonValue = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        assert_eq!(line["service"], "Popcorn");
        assert_eq!(line["name"], "load_catalog");
        assert!(line["parent_span_id"].is_null());
    }
}
