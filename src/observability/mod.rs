//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → JsonLinesExporter → file
//! ```
//!
//! Each line of the trace file is a complete OTLP JSON document. The file
//! rotates by size and keeps a few numbered backups.
//!
//! The verbosity comes from the `trace_level` plugin option (default `info`).
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider with the JSON-lines exporter
//! - [`span_formatter`]: OTLP JSON encoding
//! - [`file_writer`]: Size-rotated file writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, DEFAULT_TRACE_LEVEL, TRACE_FILE_NAME};
