// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::store::GroupStore;

/// Outcome of a policy write attempt.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Persisted {
    /// The replacement list was written.
    Committed,
    /// The stored list no longer matches the snapshot the replacement was computed from; the
    /// caller must re-read and decide again.
    Conflict,
}

/// Strategy for persisting a members replacement computed from a snapshot read.
///
/// The snapshot read and the write are two separate store calls. What happens when another
/// writer lands in between is a property of the policy, not of the handler, which is why both
/// behaviours sit behind this one interface.
pub trait WritePolicy {
    fn persist<S: GroupStore>(
        &self,
        store: &S,
        id: &str,
        snapshot: &[String],
        next: &[String],
    ) -> impl Future<Output = Result<Persisted, S::Error>>;
}

/// Unconditional replacement write.
///
/// Two concurrent joins to the same group can both read a snapshot missing each other's update;
/// the later write wins and the earlier one is lost.
#[derive(Clone, Copy, Debug, Default)]
pub struct LastWriteWins;

impl WritePolicy for LastWriteWins {
    async fn persist<S: GroupStore>(
        &self,
        store: &S,
        id: &str,
        _snapshot: &[String],
        next: &[String],
    ) -> Result<Persisted, S::Error> {
        store.set_members(id, next).await?;
        Ok(Persisted::Committed)
    }
}

/// Conditional replacement write.
///
/// The store only applies the replacement when the stored list still equals the snapshot. A
/// concurrent writer surfaces as [`Persisted::Conflict`] instead of a lost update.
#[derive(Clone, Copy, Debug, Default)]
pub struct CheckAndSet;

impl WritePolicy for CheckAndSet {
    async fn persist<S: GroupStore>(
        &self,
        store: &S,
        id: &str,
        snapshot: &[String],
        next: &[String],
    ) -> Result<Persisted, S::Error> {
        if store.compare_and_swap_members(id, snapshot, next).await? {
            Ok(Persisted::Committed)
        } else {
            Ok(Persisted::Conflict)
        }
    }
}
