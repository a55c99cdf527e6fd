//! The forum engine — record managers for proposals, votes, statuses,
//! and posts.
//!
//! Each operation runs its checks in a fixed order (authorization, then
//! payload validation, then lifecycle) before touching any store, so a
//! failed call commits nothing. The single exception is `clnproposal`,
//! whose bounded partial progress is its contract.

use agora_store::proposal::{ProposalRecord, ProposalStore};
use agora_store::status::{StatusRecord, StatusStore};
use agora_store::vote::{VoteRecord, VoteStore};
use agora_types::{ForumParams, Name, Timestamp};

use crate::context::OpContext;
use crate::validate::validate_json;
use crate::ForumError;

/// The record-management engine. Holds no state of its own — everything
/// lives behind the store traits, partitioned per proposer scope for
/// proposals and votes and globally for statuses.
pub struct Forum<'a> {
    proposals: &'a dyn ProposalStore,
    votes: &'a dyn VoteStore,
    statuses: &'a dyn StatusStore,
    params: ForumParams,
}

impl<'a> Forum<'a> {
    pub fn new(
        proposals: &'a dyn ProposalStore,
        votes: &'a dyn VoteStore,
        statuses: &'a dyn StatusStore,
        params: ForumParams,
    ) -> Self {
        Self {
            proposals,
            votes,
            statuses,
            params,
        }
    }

    fn require_auth(&self, ctx: &OpContext<'_>, account: Name) -> Result<(), ForumError> {
        if ctx.auth.is_authorized(account) {
            Ok(())
        } else {
            Err(ForumError::Unauthorized { account })
        }
    }

    /// Create a new proposal in `proposer`'s scope.
    ///
    /// Fails if a proposal with the same name exists, or if stale votes
    /// remain under that name — recycling a name with uncleaned votes
    /// would attach old votes to a new proposal.
    pub fn propose(
        &self,
        ctx: &OpContext<'_>,
        proposer: Name,
        proposal_name: Name,
        title: &str,
        proposal_json: &str,
        expires_at: Timestamp,
    ) -> Result<(), ForumError> {
        self.require_auth(ctx, proposer)?;

        if title.len() >= self.params.max_title_bytes {
            return Err(ForumError::Validation(format!(
                "title should be less than {} bytes long",
                self.params.max_title_bytes
            )));
        }
        validate_json(
            "proposal_json",
            proposal_json,
            self.params.max_proposal_json_bytes,
        )?;

        let max_expires_at = ctx.now.plus_secs(self.params.max_expiry_horizon_secs);
        if expires_at > max_expires_at {
            return Err(ForumError::RangeBounds(
                "expires_at exceeds the maximum expiry horizon".into(),
            ));
        }

        if self.proposals.get_proposal(proposer, proposal_name)?.is_some() {
            return Err(ForumError::Conflict(
                "proposal with the same name exists".into(),
            ));
        }
        if self.votes.has_votes(proposer, proposal_name)? {
            return Err(ForumError::Conflict(
                "proposal with the same name has uncleaned votes, clean them before re-using the name"
                    .into(),
            ));
        }

        let record = ProposalRecord {
            proposal_name,
            title: title.to_string(),
            proposal_json: proposal_json.to_string(),
            created_at: ctx.now,
            expires_at,
        };
        self.proposals.put_proposal(proposer, &record)?;
        tracing::debug!(proposer = %proposer, proposal = %proposal_name, "proposal created");
        Ok(())
    }

    /// Force-expire a proposal by advancing `expires_at` to now.
    ///
    /// One-way: an already-expired proposal cannot be expired again, and
    /// nothing ever returns a proposal to `Active`.
    pub fn expire(
        &self,
        ctx: &OpContext<'_>,
        proposer: Name,
        proposal_name: Name,
    ) -> Result<(), ForumError> {
        self.require_auth(ctx, proposer)?;

        let mut record = self
            .proposals
            .get_proposal(proposer, proposal_name)?
            .ok_or_else(|| ForumError::NotFound("proposal not found".into()))?;
        if record.is_expired(ctx.now) {
            return Err(ForumError::IllegalState(
                "proposal is already expired".into(),
            ));
        }

        record.expires_at = ctx.now;
        self.proposals.put_proposal(proposer, &record)?;
        tracing::debug!(proposer = %proposer, proposal = %proposal_name, "proposal expired");
        Ok(())
    }

    /// Cast or update a vote on an active proposal.
    ///
    /// Upsert keyed by (proposal, voter): the first call allocates a
    /// sequential id and inserts; later calls overwrite `vote` and
    /// `vote_json` in place. `updated_at` is refreshed on both paths.
    pub fn vote(
        &self,
        ctx: &OpContext<'_>,
        voter: Name,
        proposer: Name,
        proposal_name: Name,
        vote_value: u8,
        vote_json: &str,
    ) -> Result<(), ForumError> {
        self.require_auth(ctx, voter)?;

        let proposal = self
            .proposals
            .get_proposal(proposer, proposal_name)?
            .ok_or_else(|| {
                ForumError::NotFound("proposal_name does not exist under proposer's scope".into())
            })?;
        if proposal.is_expired(ctx.now) {
            return Err(ForumError::IllegalState(
                "cannot vote on an expired proposal".into(),
            ));
        }
        validate_json("vote_json", vote_json, self.params.max_vote_json_bytes)?;

        let record = match self.votes.get_vote(proposer, proposal_name, voter)? {
            Some(mut existing) => {
                existing.vote = vote_value;
                existing.vote_json = vote_json.to_string();
                existing.updated_at = ctx.now;
                existing
            }
            None => VoteRecord {
                id: self.votes.next_vote_id(proposer)?,
                proposal_name,
                voter,
                vote: vote_value,
                vote_json: vote_json.to_string(),
                updated_at: ctx.now,
            },
        };
        self.votes.put_vote(proposer, &record)?;
        tracing::debug!(voter = %voter, proposer = %proposer, proposal = %proposal_name, "vote recorded");
        Ok(())
    }

    /// Retract a vote.
    ///
    /// Rejected while the proposal sits in its grace window: voters may
    /// not retract between expiry and cleanup eligibility.
    pub fn unvote(
        &self,
        ctx: &OpContext<'_>,
        voter: Name,
        proposer: Name,
        proposal_name: Name,
    ) -> Result<(), ForumError> {
        self.require_auth(ctx, voter)?;

        let proposal = self
            .proposals
            .get_proposal(proposer, proposal_name)?
            .ok_or_else(|| {
                ForumError::NotFound("proposal_name does not exist under proposer's scope".into())
            })?;
        if proposal.is_expired(ctx.now)
            && !proposal.can_be_cleaned_up(ctx.now, self.params.vote_grace_period_secs)
        {
            return Err(ForumError::IllegalState(
                "cannot unvote on an expired proposal within its grace period".into(),
            ));
        }

        if self
            .votes
            .get_vote(proposer, proposal_name, voter)?
            .is_none()
        {
            return Err(ForumError::NotFound(
                "no vote exists for this proposal_name/voter pair".into(),
            ));
        }
        self.votes.delete_vote(proposer, proposal_name, voter)?;
        tracing::debug!(voter = %voter, proposer = %proposer, proposal = %proposal_name, "vote retracted");
        Ok(())
    }

    /// Clean up a cleanable (or already deleted) proposal in bounded
    /// batches.
    ///
    /// Deliberately unauthenticated: cleanup only applies once a proposal
    /// is past its grace period or gone, and at that point no legitimate
    /// interest remains in withholding it. Callers re-invoke with a
    /// bounded `max_count` until the proposal disappears, so no single
    /// call does unbounded work.
    pub fn clnproposal(
        &self,
        ctx: &OpContext<'_>,
        proposer: Name,
        proposal_name: Name,
        max_count: u64,
    ) -> Result<(), ForumError> {
        let proposal = self.proposals.get_proposal(proposer, proposal_name)?;
        if let Some(record) = &proposal {
            if !record.can_be_cleaned_up(ctx.now, self.params.vote_grace_period_secs) {
                return Err(ForumError::IllegalState(
                    "proposal must not exist or be expired since at least the grace period before cleanup"
                        .into(),
                ));
            }
        }

        let sweep = self.votes.sweep_votes(proposer, proposal_name, max_count)?;
        if sweep.range_empty && proposal.is_some() {
            self.proposals.delete_proposal(proposer, proposal_name)?;
        }
        tracing::debug!(
            proposer = %proposer,
            proposal = %proposal_name,
            deleted = sweep.deleted,
            finished = sweep.range_empty,
            "proposal cleanup pass"
        );
        Ok(())
    }

    /// Set, update, or clear an account's status line.
    ///
    /// Empty content deletes the record and requires one to exist.
    pub fn status(
        &self,
        ctx: &OpContext<'_>,
        account: Name,
        content: &str,
    ) -> Result<(), ForumError> {
        self.require_auth(ctx, account)?;

        if content.len() >= self.params.max_status_bytes {
            return Err(ForumError::Validation(format!(
                "content should be less than {} bytes long",
                self.params.max_status_bytes
            )));
        }

        if content.is_empty() {
            if self.statuses.get_status(account)?.is_none() {
                return Err(ForumError::NotFound(
                    "no previous status entry for this account".into(),
                ));
            }
            self.statuses.delete_status(account)?;
            tracing::debug!(account = %account, "status cleared");
        } else {
            let record = StatusRecord {
                account,
                content: content.to_string(),
                updated_at: ctx.now,
            };
            self.statuses.put_status(&record)?;
            tracing::debug!(account = %account, "status updated");
        }
        Ok(())
    }

    /// Validate a post. Persistence is an append-only external log, out
    /// of scope here — this operation mutates no table.
    ///
    /// `certify` asserts the poster vouches for the content's truth; it
    /// is carried for the external log and not checked here.
    #[allow(clippy::too_many_arguments)]
    pub fn post(
        &self,
        ctx: &OpContext<'_>,
        poster: Name,
        post_uuid: &str,
        content: &str,
        reply_to_poster: Name,
        reply_to_post_uuid: &str,
        _certify: bool,
        json_metadata: &str,
    ) -> Result<(), ForumError> {
        self.require_auth(ctx, poster)?;

        if content.is_empty() {
            return Err(ForumError::Validation(
                "content should be longer than 0 bytes".into(),
            ));
        }
        if content.len() >= self.params.max_post_content_bytes {
            return Err(ForumError::Validation(format!(
                "content should be less than {} bytes",
                self.params.max_post_content_bytes
            )));
        }
        self.validate_uuid("post_uuid", post_uuid)?;

        if reply_to_poster.is_zero() {
            if !reply_to_post_uuid.is_empty() {
                return Err(ForumError::Validation(
                    "reply_to_post_uuid should not be set when reply_to_poster is not set".into(),
                ));
            }
        } else {
            if !ctx.auth.account_exists(reply_to_poster) {
                return Err(ForumError::Validation(
                    "reply_to_poster must be a valid account".into(),
                ));
            }
            self.validate_uuid("reply_to_post_uuid", reply_to_post_uuid)?;
        }

        validate_json("json_metadata", json_metadata, self.params.max_post_json_bytes)?;
        Ok(())
    }

    /// Validate a post retraction. Like `post`, mutates no table.
    pub fn unpost(
        &self,
        ctx: &OpContext<'_>,
        poster: Name,
        post_uuid: &str,
    ) -> Result<(), ForumError> {
        self.require_auth(ctx, poster)?;
        self.validate_uuid("post_uuid", post_uuid)
    }

    fn validate_uuid(&self, field: &str, value: &str) -> Result<(), ForumError> {
        if value.is_empty() {
            return Err(ForumError::Validation(format!(
                "{field} should be longer than 0 bytes"
            )));
        }
        if value.len() >= self.params.max_post_uuid_bytes {
            return Err(ForumError::Validation(format!(
                "{field} should be shorter than {} bytes",
                self.params.max_post_uuid_bytes
            )));
        }
        Ok(())
    }
}
