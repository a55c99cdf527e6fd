//! Record managers for the agora forum core.
//!
//! The [`Forum`] engine applies authorization, validation, and lifecycle
//! rules over the abstract stores from `agora-store`. Every operation
//! takes an explicit [`OpContext`] carrying the caller-supplied clock and
//! authorization capability — the engine reads no ambient state, which is
//! what makes it deterministic under the host's serialized execution.

pub mod context;
pub mod engine;
pub mod error;
pub mod validate;

pub use context::{Authority, OpContext};
pub use engine::Forum;
pub use error::ForumError;
pub use validate::validate_json;
