//! Worker-side processing of storage messages.
//!
//! [`PopcornWorker`] owns the watched-list repository and turns each
//! [`WorkerMessage`] into a [`WorkerResponse`]. It has no dependency on the
//! Zellij host; the plugin binary wraps it in a `ZellijWorker` that handles
//! the transport.

use crate::domain::error::{PopcornError, Result};
use crate::infrastructure::paths;
use crate::storage::{JsonFileStore, KeyValueStore, MemoryStore, WatchedRepository};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Background worker state.
///
/// The repository is created lazily on the first message, using the storage
/// key carried by that message.
#[derive(Default)]
pub struct PopcornWorker {
    repository: Option<WatchedRepository>,
}

impl PopcornWorker {
    /// Worker over an already opened repository.
    #[must_use]
    pub fn with_repository(repository: WatchedRepository) -> Self {
        Self {
            repository: Some(repository),
        }
    }

    /// Opens the JSON file store in the plugin data directory, falling back to
    /// a process-local store if the directory is unusable.
    fn open_store() -> Box<dyn KeyValueStore> {
        match JsonFileStore::open(paths::store_file()) {
            Ok(store) => Box::new(store),
            Err(e) => {
                tracing::warn!(error = %e, "data directory unavailable, watched list will not persist");
                Box::new(MemoryStore::default())
            }
        }
    }

    fn repository(&mut self, key: &str) -> &mut WatchedRepository {
        self.repository
            .get_or_insert_with(|| WatchedRepository::new(Self::open_store(), key))
    }

    /// Standardizes logging and error mapping for repository operations.
    fn respond<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "storage operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation = operation, error = %e, "storage operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    /// Attaches the parent trace context carried by `message`, if any.
    ///
    /// The returned guard must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes one message and returns the response to send back.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);
        let _span = tracing::debug_span!("worker_handle_message", kind = message.kind()).entered();

        match message {
            WorkerMessage::LoadWatched { key, .. } => {
                Self::respond("load watched", self.repository(&key).load(), |entries| {
                    WorkerResponse::WatchedLoaded { entries }
                })
            }
            WorkerMessage::SaveWatched { key, entries, .. } => {
                let count = entries.len();
                Self::respond("save watched", self.repository(&key).save(&entries), |()| {
                    WorkerResponse::WatchedSaved {
                        count,
                        saved_at: chrono::Utc::now().timestamp(),
                    }
                })
            }
        }
    }

    /// Entry point for the transport: decodes `payload`, handles it and
    /// encodes the response.
    ///
    /// A payload that is not a [`WorkerMessage`] is answered with
    /// [`WorkerResponse::Error`]. Returns `None` only if the response itself
    /// cannot be serialized.
    pub fn handle_payload(&mut self, payload: &str) -> Option<String> {
        let response = match serde_json::from_str::<WorkerMessage>(payload) {
            Ok(message) => self.handle_message(message),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker message");
                WorkerResponse::Error {
                    message: PopcornError::Worker(format!("malformed request: {e}")).to_string(),
                }
            }
        };

        match serde_json::to_string(&response) {
            Ok(encoded) => Some(encoded),
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize worker response");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WatchedEntry;

    fn entry(id: &str) -> WatchedEntry {
        WatchedEntry {
            id: id.to_string(),
            title: "Heat".to_string(),
            year: "1995".to_string(),
            poster: "N/A".to_string(),
            catalog_rating: 8.3,
            runtime_minutes: 170,
            user_rating: 9,
        }
    }

    fn worker() -> PopcornWorker {
        PopcornWorker::with_repository(WatchedRepository::new(Box::new(MemoryStore::default()), "watched"))
    }

    #[test]
    fn load_from_empty_store_returns_empty_list() {
        let mut worker = worker();
        let response = worker.handle_message(WorkerMessage::load_watched("watched".to_string()));
        assert_eq!(response, WorkerResponse::WatchedLoaded { entries: Vec::new() });
    }

    #[test]
    fn save_then_load_returns_saved_entries() {
        let mut worker = worker();
        let saved = worker.handle_message(WorkerMessage::save_watched("watched".to_string(), vec![entry("tt1")]));
        assert!(matches!(saved, WorkerResponse::WatchedSaved { count: 1, .. }));

        let loaded = worker.handle_message(WorkerMessage::load_watched("watched".to_string()));
        assert_eq!(loaded, WorkerResponse::WatchedLoaded { entries: vec![entry("tt1")] });
    }

    #[test]
    fn payload_round_trip_and_garbage() {
        let mut worker = worker();
        let payload = serde_json::to_string(&WorkerMessage::load_watched("watched".to_string())).unwrap();
        let response: WorkerResponse = serde_json::from_str(&worker.handle_payload(&payload).unwrap()).unwrap();
        assert!(matches!(response, WorkerResponse::WatchedLoaded { .. }));

        let garbage: WorkerResponse = serde_json::from_str(&worker.handle_payload("not a message").unwrap()).unwrap();
        assert!(matches!(garbage, WorkerResponse::Error { message } if message.starts_with("Worker communication error")));
    }
}
