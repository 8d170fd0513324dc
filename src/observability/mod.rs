//! OpenTelemetry tracing with file-based span export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → popcorn-otlp.json
//! ```
//!
//! Spans land in `<data dir>/popcorn-otlp.json`, one OTLP JSON document per
//! line, rotated by size. The level comes from the `trace_level` plugin
//! option (default `"info"`).
//!
//! The worker continues the plugin's traces: requests carry a
//! [`TraceContext`](crate::worker::TraceContext) that the worker attaches as
//! the parent of its own spans.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider with the file exporter
//! - [`span_formatter`]: OTLP JSON encoding
//! - [`file_writer`]: Rotating file writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE_NAME};
