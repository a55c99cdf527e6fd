//! Abstract storage traits for the agora forum core.
//!
//! Every storage backend (LMDB, or an in-memory ordered map for testing)
//! implements these traits. The forum engine depends only on the traits;
//! the host picks the backend. The hosting environment is assumed to
//! execute each operation serially and to completion, so the traits carry
//! no locking surface.

pub mod error;
pub mod proposal;
pub mod status;
pub mod vote;

pub use error::StoreError;
pub use proposal::{ProposalRecord, ProposalState, ProposalStore};
pub use status::{StatusRecord, StatusStore};
pub use vote::{VoteRecord, VoteStore, VoteSweep};
