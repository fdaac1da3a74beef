// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

use crate::group::Group;
use crate::memory::MemoryGroupStore;
use crate::store::GroupStore;

#[derive(Debug, Error)]
#[error("store unavailable")]
pub struct BrokenStoreError;

/// Store whose every operation fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrokenStore;

impl GroupStore for BrokenStore {
    type Error = BrokenStoreError;

    async fn group(&self, _id: &str) -> Result<Option<Group>, Self::Error> {
        Err(BrokenStoreError)
    }

    async fn set_members(&self, _id: &str, _members: &[String]) -> Result<(), Self::Error> {
        Err(BrokenStoreError)
    }

    async fn compare_and_swap_members(
        &self,
        _id: &str,
        _expected: &[String],
        _next: &[String],
    ) -> Result<bool, Self::Error> {
        Err(BrokenStoreError)
    }
}

/// Store which serves reads from an inner memory store but fails every write.
#[derive(Clone, Debug, Default)]
pub struct WriteBrokenStore {
    pub inner: MemoryGroupStore,
}

impl WriteBrokenStore {
    pub fn new(inner: MemoryGroupStore) -> Self {
        Self { inner }
    }
}

impl GroupStore for WriteBrokenStore {
    type Error = BrokenStoreError;

    async fn group(&self, id: &str) -> Result<Option<Group>, Self::Error> {
        let group = self
            .inner
            .group(id)
            .await
            .expect("memory store reads are infallible");
        Ok(group)
    }

    async fn set_members(&self, _id: &str, _members: &[String]) -> Result<(), Self::Error> {
        Err(BrokenStoreError)
    }

    async fn compare_and_swap_members(
        &self,
        _id: &str,
        _expected: &[String],
        _next: &[String],
    ) -> Result<bool, Self::Error> {
        Err(BrokenStoreError)
    }
}
