//! Operation limits and lifecycle horizons.
//!
//! All size checks in the forum core are strictly-less-than: a payload of
//! exactly the configured limit is rejected.

use serde::{Deserialize, Serialize};

/// Seconds in the six-month proposal expiry horizon (180 days).
pub const SIX_MONTHS_SECS: u64 = 180 * 24 * 3600;

/// Seconds in the post-expiry grace period (3 days).
pub const GRACE_PERIOD_SECS: u64 = 3 * 24 * 3600;

/// Tunable limits applied by the forum operations.
///
/// The defaults are the protocol constants; hosts may tighten or relax
/// them without touching the engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForumParams {
    // ── Proposals ────────────────────────────────────────────────────────
    /// Upper bound (exclusive) on proposal title length in bytes.
    pub max_title_bytes: usize,

    /// Upper bound (exclusive) on the `proposal_json` payload in bytes.
    pub max_proposal_json_bytes: usize,

    /// How far in the future `expires_at` may lie, in seconds from now.
    pub max_expiry_horizon_secs: u64,

    /// Window after expiry during which a proposal is expired but not yet
    /// eligible for cleanup, in seconds.
    pub vote_grace_period_secs: u64,

    // ── Votes ────────────────────────────────────────────────────────────
    /// Upper bound (exclusive) on the `vote_json` payload in bytes.
    pub max_vote_json_bytes: usize,

    // ── Posts ────────────────────────────────────────────────────────────
    /// Upper bound (exclusive) on post content length in bytes.
    pub max_post_content_bytes: usize,

    /// Upper bound (exclusive) on post UUID length in bytes.
    pub max_post_uuid_bytes: usize,

    /// Upper bound (exclusive) on the `json_metadata` payload in bytes.
    pub max_post_json_bytes: usize,

    // ── Statuses ─────────────────────────────────────────────────────────
    /// Upper bound (exclusive) on status content length in bytes.
    pub max_status_bytes: usize,
}

impl Default for ForumParams {
    fn default() -> Self {
        Self {
            max_title_bytes: 1024,
            max_proposal_json_bytes: 32768,
            max_expiry_horizon_secs: SIX_MONTHS_SECS,
            vote_grace_period_secs: GRACE_PERIOD_SECS,
            max_vote_json_bytes: 8192,
            max_post_content_bytes: 10 * 1024,
            max_post_uuid_bytes: 128,
            max_post_json_bytes: 8192,
            max_status_bytes: 256,
        }
    }
}
