//! LMDB implementation of VoteStore.
//!
//! Two databases:
//! - `votes`: key `scope_be_u64(8) ++ vote_key_be_u128(16)` → bincode
//!   `VoteRecord`. The 128-bit composite key is the physical ordering
//!   key, so all votes for one proposal in one scope are one contiguous
//!   range and bounded cleanup is a prefix-bounded scan.
//! - `vote_seq`: key `scope_be_u64(8)` → next id as big-endian `u64`.

use std::ops::Bound;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};

use agora_store::vote::{VoteRecord, VoteStore, VoteSweep};
use agora_store::StoreError;
use agora_types::{Name, VoteKey};

use crate::LmdbError;

pub struct LmdbVoteStore {
    pub(crate) env: Arc<Env>,
    pub(crate) votes_db: Database<Bytes, Bytes>,
    pub(crate) vote_seq_db: Database<Bytes, Bytes>,
}

/// Build the 24-byte key `scope ++ vote_key`.
fn vote_key_bytes(scope: Name, key: VoteKey) -> [u8; 24] {
    let mut bytes = [0u8; 24];
    bytes[..8].copy_from_slice(&scope.as_u64().to_be_bytes());
    bytes[8..].copy_from_slice(&key.to_be_bytes());
    bytes
}

/// Inclusive byte bounds of the vote range for one proposal.
fn range_bounds(scope: Name, proposal: Name) -> ([u8; 24], [u8; 24]) {
    (
        vote_key_bytes(scope, VoteKey::lower_bound(proposal)),
        vote_key_bytes(scope, VoteKey::upper_bound(proposal)),
    )
}

impl VoteStore for LmdbVoteStore {
    fn get_vote(
        &self,
        scope: Name,
        proposal: Name,
        voter: Name,
    ) -> Result<Option<VoteRecord>, StoreError> {
        let key = vote_key_bytes(scope, VoteKey::new(proposal, voter));
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self.votes_db.get(&rtxn, &key[..]).map_err(LmdbError::from)? {
            Some(bytes) => {
                let record: VoteRecord = bincode::deserialize(bytes).map_err(LmdbError::from)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn put_vote(&self, scope: Name, record: &VoteRecord) -> Result<(), StoreError> {
        let key = vote_key_bytes(scope, record.key());
        let bytes = bincode::serialize(record).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.votes_db
            .put(&mut wtxn, &key[..], &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn delete_vote(&self, scope: Name, proposal: Name, voter: Name) -> Result<(), StoreError> {
        let key = vote_key_bytes(scope, VoteKey::new(proposal, voter));
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.votes_db
            .delete(&mut wtxn, &key[..])
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn has_votes(&self, scope: Name, proposal: Name) -> Result<bool, StoreError> {
        let (lower, upper) = range_bounds(scope, proposal);
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let bounds = (Bound::Included(&lower[..]), Bound::Included(&upper[..]));
        let mut iter = self
            .votes_db
            .range(&rtxn, &bounds)
            .map_err(LmdbError::from)?;
        match iter.next() {
            Some(entry) => {
                entry.map_err(LmdbError::from)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn votes_for_proposal(
        &self,
        scope: Name,
        proposal: Name,
    ) -> Result<Vec<VoteRecord>, StoreError> {
        let (lower, upper) = range_bounds(scope, proposal);
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let bounds = (Bound::Included(&lower[..]), Bound::Included(&upper[..]));
        let iter = self
            .votes_db
            .range(&rtxn, &bounds)
            .map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (_key, bytes) = entry.map_err(LmdbError::from)?;
            let record: VoteRecord = bincode::deserialize(bytes).map_err(LmdbError::from)?;
            results.push(record);
        }
        Ok(results)
    }

    fn sweep_votes(
        &self,
        scope: Name,
        proposal: Name,
        max_count: u64,
    ) -> Result<VoteSweep, StoreError> {
        let (lower, upper) = range_bounds(scope, proposal);
        let bounds = (Bound::Included(&lower[..]), Bound::Included(&upper[..]));
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;

        // Collect up to max_count keys ascending, then delete them. Within
        // one write transaction this is equivalent to erase-and-advance: a
        // deleted entry is never revisited and a live one never skipped.
        let mut doomed: Vec<Vec<u8>> = Vec::new();
        {
            let iter = self
                .votes_db
                .range(&wtxn, &bounds)
                .map_err(LmdbError::from)?;
            for entry in iter {
                if (doomed.len() as u64) >= max_count {
                    break;
                }
                let (key, _) = entry.map_err(LmdbError::from)?;
                doomed.push(key.to_vec());
            }
        }
        for key in &doomed {
            self.votes_db
                .delete(&mut wtxn, key)
                .map_err(LmdbError::from)?;
        }

        let range_empty = {
            let mut iter = self
                .votes_db
                .range(&wtxn, &bounds)
                .map_err(LmdbError::from)?;
            match iter.next() {
                Some(entry) => {
                    entry.map_err(LmdbError::from)?;
                    false
                }
                None => true,
            }
        };
        wtxn.commit().map_err(LmdbError::from)?;

        tracing::debug!(
            scope = %scope,
            proposal = %proposal,
            deleted = doomed.len(),
            range_empty,
            "swept vote range"
        );
        Ok(VoteSweep {
            deleted: doomed.len() as u64,
            range_empty,
        })
    }

    fn next_vote_id(&self, scope: Name) -> Result<u64, StoreError> {
        let key = scope.as_u64().to_be_bytes();
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let next = match self
            .vote_seq_db
            .get(&wtxn, &key[..])
            .map_err(LmdbError::from)?
        {
            Some(bytes) => {
                if bytes.len() != 8 {
                    return Err(StoreError::Serialization(
                        "invalid vote sequence bytes length".into(),
                    ));
                }
                let mut buf = [0u8; 8];
                buf.copy_from_slice(bytes);
                u64::from_be_bytes(buf)
            }
            None => 0,
        };
        self.vote_seq_db
            .put(&mut wtxn, &key[..], &next.wrapping_add(1).to_be_bytes())
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_types::Timestamp;

    fn open_test_env() -> (tempfile::TempDir, crate::LmdbEnvironment) {
        let dir = tempfile::tempdir().unwrap();
        let env = crate::LmdbEnvironment::open(dir.path(), 8, 1 << 22).unwrap();
        (dir, env)
    }

    fn name(s: &str) -> Name {
        s.parse().unwrap()
    }

    fn vote(id: u64, proposal: &str, voter: &str, value: u8) -> VoteRecord {
        VoteRecord {
            id,
            proposal_name: name(proposal),
            voter: name(voter),
            vote: value,
            vote_json: String::new(),
            updated_at: Timestamp::new(1_000),
        }
    }

    #[test]
    fn put_and_get_vote() {
        let (_dir, env) = open_test_env();
        let store = env.vote_store();
        let scope = name("alice");

        assert!(store
            .get_vote(scope, name("prop1"), name("bob"))
            .unwrap()
            .is_none());

        let rec = vote(0, "prop1", "bob", 1);
        store.put_vote(scope, &rec).unwrap();
        assert_eq!(
            store.get_vote(scope, name("prop1"), name("bob")).unwrap(),
            Some(rec)
        );
    }

    #[test]
    fn put_upserts_at_the_composite_key() {
        let (_dir, env) = open_test_env();
        let store = env.vote_store();
        let scope = name("alice");

        store.put_vote(scope, &vote(0, "prop1", "bob", 1)).unwrap();
        store.put_vote(scope, &vote(0, "prop1", "bob", 2)).unwrap();

        let all = store.votes_for_proposal(scope, name("prop1")).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].vote, 2);
    }

    #[test]
    fn votes_come_back_in_ascending_voter_order() {
        let (_dir, env) = open_test_env();
        let store = env.vote_store();
        let scope = name("alice");

        // Insert out of order; the range scan must sort by composite key.
        for (id, voter) in [(0, "zed"), (1, "bob"), (2, "carol")] {
            store.put_vote(scope, &vote(id, "prop1", voter, 1)).unwrap();
        }

        let all = store.votes_for_proposal(scope, name("prop1")).unwrap();
        let voters: Vec<Name> = all.iter().map(|v| v.voter).collect();
        let mut sorted = voters.clone();
        sorted.sort();
        assert_eq!(voters, sorted);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn range_is_confined_to_one_proposal() {
        let (_dir, env) = open_test_env();
        let store = env.vote_store();
        let scope = name("alice");

        store.put_vote(scope, &vote(0, "prop1", "bob", 1)).unwrap();
        store.put_vote(scope, &vote(1, "prop2", "bob", 1)).unwrap();

        assert_eq!(store.votes_for_proposal(scope, name("prop1")).unwrap().len(), 1);
        assert!(store.has_votes(scope, name("prop2")).unwrap());
        assert!(!store.has_votes(scope, name("prop3")).unwrap());
    }

    #[test]
    fn sweep_deletes_in_bounded_batches() {
        let (_dir, env) = open_test_env();
        let store = env.vote_store();
        let scope = name("alice");

        for (id, voter) in [(0, "bob"), (1, "carol"), (2, "dave"), (3, "erin"), (4, "frank")] {
            store.put_vote(scope, &vote(id, "prop1", voter, 1)).unwrap();
        }

        let pass1 = store.sweep_votes(scope, name("prop1"), 2).unwrap();
        assert_eq!(pass1, VoteSweep { deleted: 2, range_empty: false });

        let pass2 = store.sweep_votes(scope, name("prop1"), 2).unwrap();
        assert_eq!(pass2, VoteSweep { deleted: 2, range_empty: false });

        let pass3 = store.sweep_votes(scope, name("prop1"), 2).unwrap();
        assert_eq!(pass3, VoteSweep { deleted: 1, range_empty: true });

        // Idempotent once empty.
        let pass4 = store.sweep_votes(scope, name("prop1"), 2).unwrap();
        assert_eq!(pass4, VoteSweep { deleted: 0, range_empty: true });
    }

    #[test]
    fn sweep_with_zero_budget_only_probes() {
        let (_dir, env) = open_test_env();
        let store = env.vote_store();
        let scope = name("alice");

        store.put_vote(scope, &vote(0, "prop1", "bob", 1)).unwrap();
        let pass = store.sweep_votes(scope, name("prop1"), 0).unwrap();
        assert_eq!(pass, VoteSweep { deleted: 0, range_empty: false });
        assert!(store.has_votes(scope, name("prop1")).unwrap());
    }

    #[test]
    fn sweep_leaves_other_proposals_alone() {
        let (_dir, env) = open_test_env();
        let store = env.vote_store();
        let scope = name("alice");

        store.put_vote(scope, &vote(0, "prop1", "bob", 1)).unwrap();
        store.put_vote(scope, &vote(1, "prop2", "bob", 1)).unwrap();

        let pass = store.sweep_votes(scope, name("prop1"), 10).unwrap();
        assert_eq!(pass.deleted, 1);
        assert!(store.has_votes(scope, name("prop2")).unwrap());
    }

    #[test]
    fn vote_ids_are_sequential_per_scope() {
        let (_dir, env) = open_test_env();
        let store = env.vote_store();

        assert_eq!(store.next_vote_id(name("alice")).unwrap(), 0);
        assert_eq!(store.next_vote_id(name("alice")).unwrap(), 1);
        assert_eq!(store.next_vote_id(name("alice")).unwrap(), 2);
        // Scopes count independently.
        assert_eq!(store.next_vote_id(name("bob")).unwrap(), 0);
    }
}
