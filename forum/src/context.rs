//! Execution context threaded through every operation.

use agora_types::{Name, Timestamp};

/// Capability checks the hosting environment must provide.
///
/// The core never verifies signatures or resolves identities itself; it
/// consumes these as opaque predicates.
pub trait Authority {
    /// Whether the current call is authorized to act as `account`.
    fn is_authorized(&self, account: Name) -> bool;

    /// Whether `account` resolves to a known identity. Used only to
    /// validate `reply_to_poster` in `post`.
    fn account_exists(&self, account: Name) -> bool;
}

/// Per-operation execution context: the externally supplied clock and the
/// authorization capability. `now` is read once per operation and stays
/// consistent across every check within it.
pub struct OpContext<'a> {
    pub now: Timestamp,
    pub auth: &'a dyn Authority,
}

impl<'a> OpContext<'a> {
    pub fn new(now: Timestamp, auth: &'a dyn Authority) -> Self {
        Self { now, auth }
    }
}
