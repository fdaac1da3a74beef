// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::group::Group;
use crate::store::GroupStore;

/// In-memory group store.
///
/// This does not persist data permanently, all changes are lost when the process ends. Use this
/// only in development or test contexts.
///
/// Cloning is cheap and clones share the same underlying state, so one store instance can be
/// handed to concurrently running join invocations.
#[derive(Clone, Debug, Default)]
pub struct MemoryGroupStore {
    groups: Arc<RwLock<HashMap<String, Group>>>,
}

impl MemoryGroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a group record, replacing any previous record with the same id.
    pub async fn insert_group(&self, group: Group) {
        let mut groups = self.groups.write().await;
        groups.insert(group.group_id.clone(), group);
    }
}

impl GroupStore for MemoryGroupStore {
    type Error = Infallible;

    async fn group(&self, id: &str) -> Result<Option<Group>, Self::Error> {
        let groups = self.groups.read().await;
        Ok(groups.get(id).cloned())
    }

    async fn set_members(&self, id: &str, members: &[String]) -> Result<(), Self::Error> {
        let mut groups = self.groups.write().await;
        if let Some(group) = groups.get_mut(id) {
            group.members = members.to_vec();
        }
        Ok(())
    }

    async fn compare_and_swap_members(
        &self,
        id: &str,
        expected: &[String],
        next: &[String],
    ) -> Result<bool, Self::Error> {
        // The write lock is held across compare and swap.
        let mut groups = self.groups.write().await;
        let Some(group) = groups.get_mut(id) else {
            return Ok(false);
        };
        if group.members.as_slice() != expected {
            return Ok(false);
        }
        group.members = next.to_vec();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryGroupStore;
    use crate::group::Group;
    use crate::store::GroupStore;

    #[tokio::test]
    async fn insert_and_get_group() {
        let store = MemoryGroupStore::new();
        let group = Group::new("cats").with_members(&["ana"]);

        store.insert_group(group.clone()).await;

        assert_eq!(store.group("cats").await.unwrap(), Some(group));
        assert_eq!(store.group("dogs").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_members_replaces_field() {
        let store = MemoryGroupStore::new();
        store
            .insert_group(Group::new("cats").with_max_members(4).with_members(&["ana"]))
            .await;

        store
            .set_members("cats", &["ana".to_owned(), "bo".to_owned()])
            .await
            .unwrap();

        let group = store.group("cats").await.unwrap().unwrap();
        assert_eq!(group.members, vec!["ana".to_owned(), "bo".to_owned()]);
        // Only the members field is touched.
        assert_eq!(group.max_members, Some(4));
    }

    #[tokio::test]
    async fn set_members_ignores_missing_group() {
        let store = MemoryGroupStore::new();
        store
            .set_members("ghost", &["ana".to_owned()])
            .await
            .unwrap();
        assert_eq!(store.group("ghost").await.unwrap(), None);
    }

    #[tokio::test]
    async fn compare_and_swap_members() {
        let store = MemoryGroupStore::new();
        store.insert_group(Group::new("cats").with_members(&["ana"])).await;

        let stale = vec!["bo".to_owned()];
        let fresh = vec!["ana".to_owned()];
        let next = vec!["ana".to_owned(), "bo".to_owned()];

        assert!(!store.compare_and_swap_members("cats", &stale, &next).await.unwrap());
        assert!(!store.compare_and_swap_members("ghost", &fresh, &next).await.unwrap());
        assert!(store.compare_and_swap_members("cats", &fresh, &next).await.unwrap());

        let group = store.group("cats").await.unwrap().unwrap();
        assert_eq!(group.members, next);
    }
}
