//! OMDb catalog integration.
//!
//! - [`dto`]: Wire types mirroring OMDb's JSON
//! - [`client`]: URL building and `(status, body)` decoding

pub mod client;
pub mod dto;

pub use client::{decode_detail, decode_search, ApiRequest, OmdbClient};
