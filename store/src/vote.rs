//! Vote records and the vote store trait.

use crate::StoreError;
use agora_types::{Name, Timestamp, VoteKey};
use serde::{Deserialize, Serialize};

/// A single vote, logically unique per (scope, proposal name, voter).
///
/// The `id` is an internal sequential allocation kept for audit purposes;
/// all lookups go through the composite [`VoteKey`]. Votes carry no
/// foreign key to their proposal — they can outlive it until explicitly
/// swept.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub id: u64,
    pub proposal_name: Name,
    pub voter: Name,
    pub vote: u8,
    pub vote_json: String,
    pub updated_at: Timestamp,
}

impl VoteRecord {
    /// The composite key this record is stored under.
    pub fn key(&self) -> VoteKey {
        VoteKey::new(self.proposal_name, self.voter)
    }
}

/// Outcome of one bounded sweep pass over a proposal's vote range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoteSweep {
    /// Number of vote records deleted by this pass.
    pub deleted: u64,
    /// Whether the range was empty after the pass.
    pub range_empty: bool,
}

/// Trait for storing votes, partitioned per proposer scope and ordered by
/// the composite vote key so one proposal's votes form a contiguous range.
pub trait VoteStore {
    /// Point lookup by (scope, proposal, voter).
    fn get_vote(
        &self,
        scope: Name,
        proposal: Name,
        voter: Name,
    ) -> Result<Option<VoteRecord>, StoreError>;

    /// Insert or overwrite the vote at its composite key.
    fn put_vote(&self, scope: Name, record: &VoteRecord) -> Result<(), StoreError>;

    /// Delete one vote. Deleting an absent record is not an error.
    fn delete_vote(&self, scope: Name, proposal: Name, voter: Name) -> Result<(), StoreError>;

    /// Whether any vote exists for `proposal` in `scope`.
    fn has_votes(&self, scope: Name, proposal: Name) -> Result<bool, StoreError>;

    /// All votes for `proposal`, in ascending voter order — the read path.
    fn votes_for_proposal(
        &self,
        scope: Name,
        proposal: Name,
    ) -> Result<Vec<VoteRecord>, StoreError>;

    /// Delete up to `max_count` votes from the proposal's range, ascending,
    /// then report whether the range is now empty. Safe to call repeatedly;
    /// a deleted entry is never revisited and a live one never skipped.
    fn sweep_votes(
        &self,
        scope: Name,
        proposal: Name,
        max_count: u64,
    ) -> Result<VoteSweep, StoreError>;

    /// Allocate the next sequential vote id for `scope`. Ids are unique
    /// within the scope; gaps from failed operations are harmless.
    fn next_vote_id(&self, scope: Name) -> Result<u64, StoreError>;
}
