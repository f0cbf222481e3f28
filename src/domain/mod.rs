//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `assessment` - Lap catalog, navigation state machine and scoring engine
//! - `session` - Assessment session aggregate, snapshots and events

pub mod assessment;
pub mod foundation;
pub mod session;
