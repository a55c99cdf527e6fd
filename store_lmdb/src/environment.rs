//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::proposal::LmdbProposalStore;
use crate::status::LmdbStatusStore;
use crate::vote::LmdbVoteStore;
use crate::LmdbError;

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    pub(crate) proposals_db: Database<Bytes, Bytes>,
    pub(crate) votes_db: Database<Bytes, Bytes>,
    pub(crate) vote_seq_db: Database<Bytes, Bytes>,
    pub(crate) statuses_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path and create
    /// every database up front, so later operations only ever open
    /// read/write transactions.
    pub fn open(path: &Path, max_dbs: u32, map_size: usize) -> Result<Self, LmdbError> {
        let env = unsafe {
            EnvOpenOptions::new()
                .max_dbs(max_dbs)
                .map_size(map_size)
                .open(path)?
        };
        let mut wtxn = env.write_txn()?;
        let proposals_db: Database<Bytes, Bytes> =
            env.create_database(&mut wtxn, Some("proposals"))?;
        let votes_db: Database<Bytes, Bytes> = env.create_database(&mut wtxn, Some("votes"))?;
        let vote_seq_db: Database<Bytes, Bytes> =
            env.create_database(&mut wtxn, Some("vote_seq"))?;
        let statuses_db: Database<Bytes, Bytes> =
            env.create_database(&mut wtxn, Some("statuses"))?;
        wtxn.commit()?;

        Ok(Self {
            env: Arc::new(env),
            proposals_db,
            votes_db,
            vote_seq_db,
            statuses_db,
        })
    }

    pub fn proposal_store(&self) -> LmdbProposalStore {
        LmdbProposalStore {
            env: self.env.clone(),
            proposals_db: self.proposals_db,
        }
    }

    pub fn vote_store(&self) -> LmdbVoteStore {
        LmdbVoteStore {
            env: self.env.clone(),
            votes_db: self.votes_db,
            vote_seq_db: self.vote_seq_db,
        }
    }

    pub fn status_store(&self) -> LmdbStatusStore {
        LmdbStatusStore {
            env: self.env.clone(),
            statuses_db: self.statuses_db,
        }
    }
}
