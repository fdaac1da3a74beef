// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

/// A group record as it is held by the group store.
///
/// The serialized representation uses camelCase field names. A record without a `members` field
/// deserializes to an empty member list, and a record without `maxMembers` is unbounded.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Opaque unique identifier, primary key in the group store.
    pub group_id: String,

    /// Optional capacity limit. A value of zero counts as "not set".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_members: Option<u32>,

    /// Ordered sequence of user identifiers. Uniqueness is not enforced by the storage layer.
    #[serde(default)]
    pub members: Vec<String>,
}

impl Group {
    pub fn new(group_id: &str) -> Self {
        Self {
            group_id: group_id.to_owned(),
            max_members: None,
            members: Vec::new(),
        }
    }

    pub fn with_max_members(mut self, max_members: u32) -> Self {
        self.max_members = Some(max_members);
        self
    }

    pub fn with_members(mut self, members: &[&str]) -> Self {
        self.members = members.iter().map(|member| (*member).to_owned()).collect();
        self
    }

    /// Effective capacity of the group.
    ///
    /// Returns `None` when the group is unbounded, either because `maxMembers` is absent or
    /// because it is set to zero.
    pub fn capacity(&self) -> Option<usize> {
        self.max_members
            .filter(|max_members| *max_members > 0)
            .map(|max_members| max_members as usize)
    }

    /// Returns `true` if the user identifier is present in the member list.
    pub fn is_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|member| member.as_str() == user_id)
    }

    /// Returns `true` if the member count has reached the effective capacity.
    pub fn is_full(&self) -> bool {
        match self.capacity() {
            Some(capacity) => self.members.len() >= capacity,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Group;

    #[test]
    fn record_without_optional_fields() {
        let group: Group = serde_json::from_str(r#"{ "groupId": "cats" }"#).unwrap();
        assert_eq!(group.group_id, "cats");
        assert_eq!(group.max_members, None);
        assert!(group.members.is_empty());
    }

    #[test]
    fn camel_case_representation() {
        let group = Group::new("cats").with_max_members(2).with_members(&["ana"]);
        let value = serde_json::to_value(&group).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "groupId": "cats",
                "maxMembers": 2,
                "members": ["ana"],
            })
        );
    }

    #[test]
    fn zero_capacity_counts_as_unset() {
        let group = Group::new("cats").with_max_members(0).with_members(&["ana"]);
        assert_eq!(group.capacity(), None);
        assert!(!group.is_full());
    }

    #[test]
    fn full_group() {
        let group = Group::new("cats")
            .with_max_members(2)
            .with_members(&["ana", "bo"]);
        assert!(group.is_full());
        assert!(group.is_member("ana"));
        assert!(!group.is_member("cem"));
    }
}
