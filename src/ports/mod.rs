//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SnapshotStore` - Load and save assessment session snapshots

mod snapshot_store;

pub use snapshot_store::{SnapshotStore, SnapshotStoreError};
