//! Worker thread message types for cross-thread communication.
//!
//! This module defines the request and response protocol between the main plugin
//! thread and the background worker thread that owns watched-list storage. It
//! also implements distributed tracing context propagation across thread boundaries.

use crate::domain::WatchedEntry;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when passing messages to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if no OpenTelemetry layer is installed or the current
    /// span context is invalid.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();
        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        let context = Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        };
        tracing::trace!(trace_id = %context.trace_id, "capturing trace context");
        Some(context)
    }
}

/// Generates constructors for `WorkerMessage` variants that attach the current
/// trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_watched(LoadWatched { key: String }),
    save_watched(SaveWatched { key: String, entries: Vec<WatchedEntry> }),
}

/// Messages sent from the main thread to the worker thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read the watched list stored under `key`.
    LoadWatched {
        key: String,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Overwrite the watched list stored under `key` with `entries`.
    SaveWatched {
        key: String,
        entries: Vec<WatchedEntry>,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Short name used in spans and logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::LoadWatched { .. } => "load_watched",
            Self::SaveWatched { .. } => "save_watched",
        }
    }

    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadWatched { trace_context, .. } | Self::SaveWatched { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }
}

/// Responses sent from the worker thread back to the main thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The stored list; empty when nothing valid was stored.
    WatchedLoaded { entries: Vec<WatchedEntry> },

    /// A save completed.
    WatchedSaved {
        count: usize,

        /// Unix timestamp (seconds) of the write.
        saved_at: i64,
    },

    /// A storage operation failed.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_leave_trace_context_empty_without_otel_layer() {
        let message = WorkerMessage::load_watched("watched".to_string());
        assert_eq!(message.kind(), "load_watched");
        assert!(message.trace_context().is_none());
    }

    #[test]
    fn message_round_trips_through_json() {
        let message = WorkerMessage::save_watched("watched".to_string(), Vec::new());
        let json = serde_json::to_string(&message).unwrap();
        assert!(!json.contains("trace_context"));
        let back: WorkerMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, message);
    }
}
