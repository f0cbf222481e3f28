//! Adapters - Implementations of port interfaces.
//!
//! - `http` - REST endpoints built on axum
//! - `storage` - Snapshot stores (in-memory and file-backed)

pub mod http;
pub mod storage;
