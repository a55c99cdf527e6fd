//! LMDB storage backend for the agora forum core.
//!
//! Implements the storage traits from `agora-store` using the `heed` LMDB
//! bindings. All keys are big-endian binary composites so that LMDB's
//! lexicographic key order equals the numeric order the range scans rely
//! on. One environment holds every database; each store value is a cheap
//! handle over shared `Arc<Env>` + `Database` copies.

pub mod environment;
pub mod error;
pub mod proposal;
pub mod status;
pub mod vote;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use proposal::LmdbProposalStore;
pub use status::LmdbStatusStore;
pub use vote::LmdbVoteStore;
