//! Proposal records, lifecycle classification, and the proposal store trait.

use crate::StoreError;
use agora_types::{Name, Timestamp};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a proposal at a given instant.
///
/// Transitions are purely time-driven except `expire`, which advances
/// `expires_at` to "now". There is no way back to `Active`; the terminal
/// state is deletion, reachable only from `Cleanable` once the vote range
/// is empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProposalState {
    /// `now < expires_at` — open for voting.
    Active,
    /// `expires_at <= now <= expires_at + grace` — closed, inside the
    /// grace window; votes are frozen.
    Expired,
    /// `now > expires_at + grace` — eligible for bounded cleanup.
    Cleanable,
}

/// A proposal, stored per proposer scope and keyed by its name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRecord {
    pub proposal_name: Name,
    pub title: String,
    pub proposal_json: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

impl ProposalRecord {
    /// Whether the proposal has expired, naturally or via `expire`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }

    /// Whether the grace period after expiry has fully elapsed.
    pub fn can_be_cleaned_up(&self, now: Timestamp, grace_secs: u64) -> bool {
        now.as_secs() > self.expires_at.as_secs().saturating_add(grace_secs)
    }

    pub fn state(&self, now: Timestamp, grace_secs: u64) -> ProposalState {
        if !self.is_expired(now) {
            ProposalState::Active
        } else if self.can_be_cleaned_up(now, grace_secs) {
            ProposalState::Cleanable
        } else {
            ProposalState::Expired
        }
    }
}

/// Trait for storing proposals, partitioned per proposer scope.
///
/// Two proposers may use the same proposal name independently; the scope
/// is always part of the physical key.
pub trait ProposalStore {
    /// Point lookup by (scope, name).
    fn get_proposal(&self, scope: Name, name: Name) -> Result<Option<ProposalRecord>, StoreError>;

    /// Insert or overwrite a proposal in `scope`.
    fn put_proposal(&self, scope: Name, record: &ProposalRecord) -> Result<(), StoreError>;

    /// Delete a proposal. Deleting an absent record is not an error;
    /// existence policy lives in the engine.
    fn delete_proposal(&self, scope: Name, name: Name) -> Result<(), StoreError>;
}
