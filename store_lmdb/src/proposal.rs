//! LMDB implementation of ProposalStore.
//!
//! Key format: `scope_be_u64(8) ++ proposal_name_be_u64(8)`. Scopes never
//! collide because the scope is a fixed-width key prefix.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};

use agora_store::proposal::{ProposalRecord, ProposalStore};
use agora_store::StoreError;
use agora_types::Name;

use crate::LmdbError;

pub struct LmdbProposalStore {
    pub(crate) env: Arc<Env>,
    pub(crate) proposals_db: Database<Bytes, Bytes>,
}

/// Build the 16-byte key `scope ++ proposal_name`.
fn proposal_key(scope: Name, name: Name) -> [u8; 16] {
    let mut key = [0u8; 16];
    key[..8].copy_from_slice(&scope.as_u64().to_be_bytes());
    key[8..].copy_from_slice(&name.as_u64().to_be_bytes());
    key
}

impl ProposalStore for LmdbProposalStore {
    fn get_proposal(&self, scope: Name, name: Name) -> Result<Option<ProposalRecord>, StoreError> {
        let key = proposal_key(scope, name);
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self
            .proposals_db
            .get(&rtxn, &key[..])
            .map_err(LmdbError::from)?
        {
            Some(bytes) => {
                let record: ProposalRecord =
                    bincode::deserialize(bytes).map_err(LmdbError::from)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn put_proposal(&self, scope: Name, record: &ProposalRecord) -> Result<(), StoreError> {
        let key = proposal_key(scope, record.proposal_name);
        let bytes = bincode::serialize(record).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.proposals_db
            .put(&mut wtxn, &key[..], &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn delete_proposal(&self, scope: Name, name: Name) -> Result<(), StoreError> {
        let key = proposal_key(scope, name);
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.proposals_db
            .delete(&mut wtxn, &key[..])
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
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

    fn record(proposal: &str) -> ProposalRecord {
        ProposalRecord {
            proposal_name: name(proposal),
            title: "a title".to_string(),
            proposal_json: "{}".to_string(),
            created_at: Timestamp::new(1_000),
            expires_at: Timestamp::new(100_000),
        }
    }

    #[test]
    fn put_and_get_proposal() {
        let (_dir, env) = open_test_env();
        let store = env.proposal_store();
        let scope = name("alice");

        assert!(store.get_proposal(scope, name("prop1")).unwrap().is_none());

        let rec = record("prop1");
        store.put_proposal(scope, &rec).unwrap();
        assert_eq!(store.get_proposal(scope, name("prop1")).unwrap(), Some(rec));
    }

    #[test]
    fn put_overwrites_in_place() {
        let (_dir, env) = open_test_env();
        let store = env.proposal_store();
        let scope = name("alice");

        store.put_proposal(scope, &record("prop1")).unwrap();
        let mut updated = record("prop1");
        updated.expires_at = Timestamp::new(2_000);
        store.put_proposal(scope, &updated).unwrap();

        let got = store.get_proposal(scope, name("prop1")).unwrap().unwrap();
        assert_eq!(got.expires_at, Timestamp::new(2_000));
    }

    #[test]
    fn scopes_are_isolated() {
        let (_dir, env) = open_test_env();
        let store = env.proposal_store();

        store.put_proposal(name("alice"), &record("prop1")).unwrap();
        assert!(store
            .get_proposal(name("bob"), name("prop1"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn delete_proposal_removes_only_its_key() {
        let (_dir, env) = open_test_env();
        let store = env.proposal_store();
        let scope = name("alice");

        store.put_proposal(scope, &record("prop1")).unwrap();
        store.put_proposal(scope, &record("prop2")).unwrap();

        store.delete_proposal(scope, name("prop1")).unwrap();
        assert!(store.get_proposal(scope, name("prop1")).unwrap().is_none());
        assert!(store.get_proposal(scope, name("prop2")).unwrap().is_some());

        // Deleting again is a no-op, not an error.
        store.delete_proposal(scope, name("prop1")).unwrap();
    }
}
