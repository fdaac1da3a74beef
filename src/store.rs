// SPDX-License-Identifier: MIT OR Apache-2.0

use std::error::Error;

use crate::group::Group;

/// Interface for the external store holding group records.
///
/// The handler only ever performs a point read followed by at most one members write per
/// invocation, so this is the whole capability it needs. Implementations are expected to make
/// each single call atomic at the field level; nothing here coordinates across calls.
pub trait GroupStore {
    type Error: Error;

    /// Returns the group record for this id.
    ///
    /// Returns `None` when no group with this id exists.
    fn group(&self, id: &str) -> impl Future<Output = Result<Option<Group>, Self::Error>>;

    /// Replaces the members field of a group with a precomputed full replacement list.
    ///
    /// The write is unconditional: whatever the store holds for this field is overwritten. The
    /// write is ignored when no record with this id exists.
    fn set_members(
        &self,
        id: &str,
        members: &[String],
    ) -> impl Future<Output = Result<(), Self::Error>>;

    /// Replaces the members field only when the stored list still equals `expected`.
    ///
    /// Returns `true` when the replacement was applied and `false` when the stored list has
    /// changed since `expected` was read (or the record no longer exists). Compare and swap must
    /// be atomic against concurrent writers.
    fn compare_and_swap_members(
        &self,
        id: &str,
        expected: &[String],
        next: &[String],
    ) -> impl Future<Output = Result<bool, Self::Error>>;
}
