//! Sandbox filesystem locations.
//!
//! Zellij plugins see the host filesystem under `/host`; everything that
//! touches disk resolves its paths here.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, store_file};
