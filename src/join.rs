// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

use crate::policy::{Persisted, WritePolicy};
use crate::store::GroupStore;

/// Semantic success of a join invocation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum JoinOutcome {
    /// The user was appended to the member list and the list was persisted.
    Joined,
    /// The user is already a member; nothing was written.
    AlreadyMember,
}

#[derive(Debug, Error)]
pub enum JoinError<E> {
    #[error("group not found")]
    NotFound,

    #[error("no user given")]
    InvalidRequest,

    #[error("group has reached its maximum number of members")]
    CapacityExceeded,

    #[error("{0}")]
    Storage(E),
}

/// Adds users to groups, enforcing capacity and idempotence.
///
/// The handler holds no state of its own between invocations. Every call reads one snapshot of
/// the group record, evaluates all checks against that snapshot and performs at most one members
/// write through the configured [`WritePolicy`].
#[derive(Clone, Debug)]
pub struct JoinHandler<S, P> {
    store: S,
    policy: P,
}

impl<S, P> JoinHandler<S, P>
where
    S: GroupStore,
    P: WritePolicy,
{
    pub fn new(store: S, policy: P) -> Self {
        Self { store, policy }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Join `user_id` to the group identified by `group_id`.
    ///
    /// Joining a group the user is already a member of is a no-op success
    /// ([`JoinOutcome::AlreadyMember`]). Capacity is checked before membership, so a full group
    /// answers [`JoinError::CapacityExceeded`] even for an existing member.
    pub async fn join(
        &self,
        group_id: &str,
        user_id: Option<&str>,
    ) -> Result<JoinOutcome, JoinError<S::Error>> {
        loop {
            let group = self
                .store
                .group(group_id)
                .await
                .map_err(JoinError::Storage)?
                .ok_or(JoinError::NotFound)?;

            let Some(user_id) = user_id.filter(|user_id| !user_id.is_empty()) else {
                return Err(JoinError::InvalidRequest);
            };

            if group.is_full() {
                return Err(JoinError::CapacityExceeded);
            }

            if group.is_member(user_id) {
                return Ok(JoinOutcome::AlreadyMember);
            }

            let mut next = group.members.clone();
            next.push(user_id.to_owned());

            match self
                .policy
                .persist(&self.store, group_id, &group.members, &next)
                .await
                .map_err(JoinError::Storage)?
            {
                Persisted::Committed => return Ok(JoinOutcome::Joined),
                // Another writer landed between our read and write. Membership only grows, so
                // re-reading converges: the user is already present, the group filled up, or the
                // next attempt commits.
                Persisted::Conflict => continue,
            }
        }
    }
}
