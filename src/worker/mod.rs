//! Background worker for watched-list storage.
//!
//! Storage I/O runs on Zellij's worker thread so the render loop never waits
//! on the filesystem.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Message processing over the watched repository

pub mod handler;
pub mod messages;

pub use handler::PopcornWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
