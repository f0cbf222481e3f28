//! Storage Adapters
//!
//! Implementations of the SnapshotStore port for persisting assessment sessions.
//!
//! ## Available Adapters
//!
//! - **FileSnapshotStore** - Stores snapshots as YAML files on disk
//! - **InMemorySnapshotStore** - Stores snapshots in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileSnapshotStore, InMemorySnapshotStore};
//!
//! // Production: file-based storage
//! let store = FileSnapshotStore::new("./data/sessions");
//!
//! // Testing: in-memory storage
//! let store = InMemorySnapshotStore::new();
//! ```

mod file_snapshot_store;
mod in_memory_snapshot_store;

pub use file_snapshot_store::FileSnapshotStore;
pub use in_memory_snapshot_store::InMemorySnapshotStore;
