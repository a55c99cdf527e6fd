//! Composite (proposal, voter) vote key.

use crate::Name;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Composite key packing a (proposal name, voter) pair into one orderable
/// 128-bit value: the proposal name occupies the high 64 bits, the voter
/// the low 64 bits.
///
/// Under unsigned order, every key sharing a proposal name falls in the
/// contiguous range `[lower_bound, upper_bound]` for that name, so "all
/// votes for proposal X" is a single range scan with no grouping index.
/// Bounded cleanup depends entirely on this ordering property.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VoteKey(u128);

impl VoteKey {
    pub const fn new(proposal: Name, voter: Name) -> Self {
        Self(((proposal.as_u64() as u128) << 64) | voter.as_u64() as u128)
    }

    /// Smallest key belonging to `proposal`.
    pub const fn lower_bound(proposal: Name) -> Self {
        Self::new(proposal, Name::ZERO)
    }

    /// Largest key belonging to `proposal`.
    pub const fn upper_bound(proposal: Name) -> Self {
        Self::new(proposal, Name::from_u64(u64::MAX))
    }

    pub const fn proposal(&self) -> Name {
        Name::from_u64((self.0 >> 64) as u64)
    }

    pub const fn voter(&self) -> Name {
        Name::from_u64(self.0 as u64)
    }

    pub const fn as_u128(&self) -> u128 {
        self.0
    }

    /// Big-endian bytes, so lexicographic byte order equals numeric order.
    pub const fn to_be_bytes(&self) -> [u8; 16] {
        self.0.to_be_bytes()
    }
}

impl fmt::Debug for VoteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VoteKey({}/{})", self.proposal(), self.voter())
    }
}
