//! Fundamental types for the agora forum core.
//!
//! This crate defines the types shared across every other crate in the
//! workspace: interned names, timestamps, the composite vote key, and the
//! tunable operation limits.

pub mod name;
pub mod params;
pub mod time;
pub mod vote_key;

pub use name::{Name, NameError};
pub use params::ForumParams;
pub use time::Timestamp;
pub use vote_key::VoteKey;
