// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conditional group-membership joins over a pluggable group store.
//!
//! A group is a named, ordered list of user identifiers with an optional capacity limit. The
//! [`JoinHandler`] adds a user to a group in one snapshot read followed by at most one
//! field-scoped write: missing groups and missing user identifiers are rejected, full groups are
//! refused, and joining twice is a no-op success.
//!
//! ## Group stores
//!
//! Group records live in an external key-value store behind the [`GroupStore`] trait, so the
//! handler can run against any backend which offers a point read and a members replacement.
//! Two implementations are provided: [`MemoryGroupStore`] for development and tests, and a
//! SQLite-backed store gated by the `sqlite` feature flag.
//!
//! ## Write policies
//!
//! The snapshot read and the members write are not wrapped in one transaction. How the write
//! relates to the snapshot is a pluggable [`WritePolicy`]: [`LastWriteWins`] replaces the list
//! unconditionally (two concurrent joins can lose one update), while [`CheckAndSet`] asks the
//! store for an atomic conditional replacement and re-reads when another writer got there first.
//! Both policies sit behind the same interface so callers and tests can select which one is in
//! effect.

pub mod config;
pub mod group;
pub mod join;
pub mod memory;
pub mod policy;
pub mod response;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod store;
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use config::{Config, ConfigError};
pub use group::Group;
pub use join::{JoinError, JoinHandler, JoinOutcome};
pub use memory::MemoryGroupStore;
pub use policy::{CheckAndSet, LastWriteWins, Persisted, WritePolicy};
pub use response::{JoinRequest, JoinResponse, handle};
#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteGroupStore, SqliteStoreError};
pub use store::GroupStore;
